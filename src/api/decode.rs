use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use super::{errors::ApiClientError, models::ErrorBody, transport::RawResponse};
use crate::errors::RequestFailure;

/// Turns a raw answer from `url` into `M`, or into the error its status
/// stands for.
///
/// # Errors
///
/// [`ApiClientError::NotFound`] on 404, [`ApiClientError::Failure`] on any
/// other non-success status, [`ApiClientError::Decode`] when a success body
/// doesn't match `M`.
pub fn decode<M: DeserializeOwned>(url: Url, response: RawResponse) -> Result<M, ApiClientError> {
    let RawResponse { status, body } = response;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(|source| {
            log::error!("Failed to parse JSON response: {source}");
            log::error!("Response text: {body}");
            ApiClientError::Decode { url, source }
        });
    }

    match status {
        StatusCode::NOT_FOUND => Err(ApiClientError::NotFound(url)),
        status => Err(ApiClientError::from(RequestFailure::new(
            url,
            status,
            server_message(&body),
        ))),
    }
}

fn server_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).map_or_else(|_| body.to_owned(), |error| error.message)
}
