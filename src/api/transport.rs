use reqwest::{
    blocking::{multipart, Client},
    Method, StatusCode,
};
use url::Url;

use super::errors::ApiClientError;
use crate::{config::ClientConfig, upload::Upload};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A single call to the validation service.
#[derive(Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub upload: Option<Upload>,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            upload: None,
        }
    }

    #[must_use]
    pub fn with_upload(mut self, upload: Upload) -> Self {
        self.upload = Some(upload);
        self
    }
}

/// Status and body, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues requests on behalf of [`EmailValidationClient`].
///
/// Implementations take ownership of the request, so any upload stream it
/// carries is released when `send` returns, whatever the outcome.
///
/// [`EmailValidationClient`]: super::EmailValidationClient
pub trait Transport {
    /// # Errors
    ///
    /// Will return `Err` if the request could not be delivered or the
    /// response could not be read. Non-success statuses are not errors
    /// at this level.
    fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiClientError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiClientError> {
        (**self).send(request)
    }
}

/// Blocking `reqwest` transport with HTTP basic auth.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    api_key: Option<String>,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Fails if the underlying HTTP client can't be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiClientError> {
        let ApiRequest {
            method,
            url,
            upload,
        } = request;
        log::debug!("{method} {url}");

        let mut builder = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            builder = builder.basic_auth("api", Some(key));
        }

        if let Some(upload) = upload {
            let length = upload.stream.len();
            let mut part = multipart::Part::reader_with_length(upload.stream, length);
            if let Some(name) = upload.file_name {
                part = part.file_name(name);
            }
            builder = builder.multipart(multipart::Form::new().part(upload.field, part));
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;
        log::debug!("Raw API Response ({status}): {body}");

        Ok(RawResponse { status, body })
    }
}
