use reqwest::StatusCode;
use std::fmt::{self, Formatter};
use thiserror::Error;
use url::Url;

/// Non-success answer from the validation service.
#[derive(Debug, Error)]
pub struct RequestFailure {
    pub url: Url,
    pub status: StatusCode,
    pub msg: String,
}

impl RequestFailure {
    pub fn new(url: Url, status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            url,
            status,
            msg: msg.into(),
        }
    }

    pub fn suggestions(&self) -> Vec<&'static str> {
        match self.status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => vec![
                "Check that the API key is correct",
                "Set MAILGUN_API_KEY or pass --api-key",
                "Make sure the key belongs to the selected region",
            ],
            StatusCode::BAD_REQUEST => vec![
                "Check the request parameters",
                "Uploaded lists must be CSV or gzip-compressed CSV",
            ],
            StatusCode::PAYLOAD_TOO_LARGE => {
                vec!["Split the list into smaller files before uploading"]
            }
            StatusCode::TOO_MANY_REQUESTS => vec![
                "Wait a moment before retrying",
                "Consider reducing request frequency",
            ],
            status if status.is_server_error() => vec![
                "The validation service is having trouble, try again later",
            ],
            _ => vec!["Check that the URL is correct"],
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        writeln!(
            formatter,
            "[E004] {} returned {}",
            self.url.as_str(),
            self.status
        )?;
        writeln!(formatter, "Server response: {}", self.msg)?;
        writeln!(formatter)?;
        writeln!(formatter, "Suggestions:")?;
        for suggestion in self.suggestions() {
            writeln!(formatter, "  • {suggestion}")?;
        }
        Ok(())
    }
}
