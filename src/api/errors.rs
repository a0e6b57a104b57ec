use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::{errors::RequestFailure, identifiers::InputError};

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("[E001] Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("[E002] Cannot read upload file {}: {source}\n\nSuggestions:\n  • Check that the file exists and is readable\n  • Pass the list content directly instead of a path", .path.display())]
    FileNotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[E003] Nothing found at {0}\n\nSuggestions:\n  • Check that the list or preview id is correct\n  • The job may have been deleted or expired")]
    NotFound(Url),

    #[error(transparent)]
    Failure(#[from] RequestFailure),

    #[error("[E005] Unexpected response body from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },

    #[error("[E006] Invalid base URL: {0}\n\nSuggestions:\n  • Provide a valid HTTP or HTTPS URL\n  • Example: https://api.mailgun.net")]
    CannotBeBase(Url),

    #[error("[E007] Invalid URL format: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

impl ApiClientError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "E001",
            Self::FileNotReadable { .. } => "E002",
            Self::NotFound(_) => "E003",
            Self::Failure(_) => "E004",
            Self::Decode { .. } => "E005",
            Self::CannotBeBase(_) => "E006",
            Self::UrlParse(_) => "E007",
            Self::Reqwest(_) => "E999",
        }
    }

    /// True for failures raised locally, before anything was sent.
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::FileNotReadable { .. }
                | Self::CannotBeBase(_)
                | Self::UrlParse(_)
        )
    }
}
