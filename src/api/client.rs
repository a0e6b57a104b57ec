use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::decode::decode;
use super::errors::ApiClientError;
use super::models::{
    BulkJob, BulkJobList, BulkPreview, BulkPreviewList, Confirmation, PreviewEnvelope,
    ValidationResult,
};
use super::transport::{ApiRequest, HttpTransport, Transport};
use crate::{
    config::ClientConfig,
    identifiers::{Address, Limit, ListId, PreviewId},
    upload::FileSource,
};

const ENDPOINT_ROOT: [&str; 3] = ["v4", "address", "validate"];

/// Client for the address validation endpoints.
///
/// Every method checks its arguments before anything is sent, so an
/// [`ApiClientError::InvalidInput`] always means no request went out.
#[derive(Clone)]
pub struct EmailValidationClient<T = HttpTransport> {
    base: Url,
    transport: T,
}

impl EmailValidationClient<HttpTransport> {
    /// # Errors
    ///
    /// Fails if the configured base `Url` cannot be a base or the HTTP
    /// client can't be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiClientError> {
        let transport = HttpTransport::new(config)?;
        Self::with_transport(config.base.clone(), transport)
    }

    /// # Errors
    ///
    /// See [`ClientConfig::from_env`] and [`EmailValidationClient::new`].
    pub fn from_env() -> Result<Self, ApiClientError> {
        Self::new(&ClientConfig::from_env()?)
    }
}

impl<T: Transport> EmailValidationClient<T> {
    /// # Errors
    ///
    /// Fails if provided `Url` cannot be a base. We rely on that
    /// invariant in other methods.
    pub fn with_transport(base: Url, transport: T) -> Result<Self, ApiClientError> {
        // Test here so that we are sure path_segments_mut succeeds
        if base.cannot_be_a_base() {
            Err(ApiClientError::CannotBeBase(base))
        } else {
            Ok(Self { base, transport })
        }
    }

    pub const fn base(&self) -> &Url {
        &self.base
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiClientError::CannotBeBase(self.base.clone()))?
            .pop_if_empty()
            .extend(ENDPOINT_ROOT.iter().chain(segments));
        Ok(url)
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn validate_url(
        &self,
        address: &Address,
        provider_lookup: bool,
    ) -> Result<Url, ApiClientError> {
        let mut url = self.endpoint(&[])?;
        url.query_pairs_mut()
            .append_pair("address", address.as_ref())
            .append_pair("provider_lookup", if provider_lookup { "true" } else { "false" });
        Ok(url)
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn bulk_job_url(&self, list_id: &ListId) -> Result<Url, ApiClientError> {
        self.endpoint(&["bulk", list_id.as_ref()])
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn bulk_jobs_url(&self, limit: Limit) -> Result<Url, ApiClientError> {
        let mut url = self.endpoint(&["bulk"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn preview_url(&self, preview_id: &PreviewId) -> Result<Url, ApiClientError> {
        self.endpoint(&["preview", preview_id.as_ref()])
    }

    /// # Errors
    ///
    /// Will return `Err` if the URL cannot be a base.
    pub fn previews_url(&self, limit: Limit) -> Result<Url, ApiClientError> {
        let mut url = self.endpoint(&["preview"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    fn fetch<M: DeserializeOwned>(&self, method: Method, url: Url) -> Result<M, ApiClientError> {
        let response = self.transport.send(ApiRequest::new(method, url.clone()))?;
        decode(url, response)
    }

    fn upload<M: DeserializeOwned>(
        &self,
        url: Url,
        source: FileSource,
    ) -> Result<M, ApiClientError> {
        let upload = source.open()?;
        log::debug!(
            "Uploading {} bytes as {:?} ({})",
            upload.stream.len(),
            upload.file_name,
            if upload.stream.is_path_backed() {
                "file"
            } else {
                "buffer"
            }
        );

        // The request owns the stream; it is closed when `send` returns.
        let response = self
            .transport
            .send(ApiRequest::new(Method::POST, url.clone()).with_upload(upload))?;
        decode(url, response)
    }

    /// Validates a single address.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `address` is empty or longer than 512
    /// characters, on network failure, or on a non-success answer.
    pub fn validate(
        &self,
        address: &str,
        provider_lookup: bool,
    ) -> Result<ValidationResult, ApiClientError> {
        let address = Address::new(address)?;
        let url = self.validate_url(&address, provider_lookup)?;
        self.fetch(Method::GET, url)
    }

    /// Uploads a list and starts a bulk validation job under `list_id`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `list_id` is empty, a path source can't be
    /// read, on network failure, or on a non-success answer.
    pub fn create_bulk_job(
        &self,
        list_id: &str,
        source: impl Into<FileSource>,
    ) -> Result<BulkJob, ApiClientError> {
        let list_id = ListId::new(list_id)?;
        let url = self.bulk_job_url(&list_id)?;
        self.upload(url, source.into())
    }

    /// # Errors
    ///
    /// Will return `Err` if `list_id` is empty, on network failure, or on
    /// a non-success answer.
    pub fn delete_bulk_job(&self, list_id: &str) -> Result<Confirmation, ApiClientError> {
        let list_id = ListId::new(list_id)?;
        let url = self.bulk_job_url(&list_id)?;
        self.fetch(Method::DELETE, url)
    }

    /// # Errors
    ///
    /// Will return `Err` if `list_id` is empty, [`ApiClientError::NotFound`]
    /// for an unknown job, or on network failure.
    pub fn get_bulk_job(&self, list_id: &str) -> Result<BulkJob, ApiClientError> {
        let list_id = ListId::new(list_id)?;
        let url = self.bulk_job_url(&list_id)?;
        self.fetch(Method::GET, url)
    }

    /// Lists bulk jobs, at most `limit` of them. [`Limit::DEFAULT`] is 500.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `limit` is not positive, on network failure,
    /// or on a non-success answer.
    pub fn get_bulk_jobs(&self, limit: i64) -> Result<BulkJobList, ApiClientError> {
        let limit = Limit::new(limit)?;
        let url = self.bulk_jobs_url(limit)?;
        self.fetch(Method::GET, url)
    }

    /// Lists bulk previews, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `limit` is not positive, on network failure,
    /// or on a non-success answer.
    pub fn get_bulk_previews(&self, limit: i64) -> Result<BulkPreviewList, ApiClientError> {
        let limit = Limit::new(limit)?;
        let url = self.previews_url(limit)?;
        self.fetch(Method::GET, url)
    }

    /// Uploads a list for a preview under `preview_id`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `preview_id` is empty, a path source can't be
    /// read, on network failure, or on a non-success answer.
    pub fn create_bulk_preview(
        &self,
        preview_id: &str,
        source: impl Into<FileSource>,
    ) -> Result<BulkPreview, ApiClientError> {
        let preview_id = PreviewId::new(preview_id)?;
        let url = self.preview_url(&preview_id)?;
        self.upload(url, source.into())
    }

    /// # Errors
    ///
    /// Will return `Err` if `preview_id` is empty,
    /// [`ApiClientError::NotFound`] for an unknown preview, or on network
    /// failure.
    pub fn get_bulk_preview(&self, preview_id: &str) -> Result<BulkPreview, ApiClientError> {
        let preview_id = PreviewId::new(preview_id)?;
        let url = self.preview_url(&preview_id)?;
        let envelope: PreviewEnvelope = self.fetch(Method::GET, url)?;
        Ok(envelope.preview)
    }

    /// Deletes a preview. Returns `true` only when the service answers
    /// `204 No Content`; any other status is `false`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `preview_id` is empty or on network failure.
    pub fn delete_bulk_preview(&self, preview_id: &str) -> Result<bool, ApiClientError> {
        let preview_id = PreviewId::new(preview_id)?;
        let url = self.preview_url(&preview_id)?;
        let response = self.transport.send(ApiRequest::new(Method::DELETE, url))?;

        if response.status != StatusCode::NO_CONTENT {
            log::debug!(
                "Preview {preview_id} not deleted, service answered {}",
                response.status
            );
        }
        Ok(response.status == StatusCode::NO_CONTENT)
    }

    /// Turns a preview into a full bulk validation job.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `preview_id` is empty, on network failure, or
    /// on a non-success answer.
    pub fn promote_bulk_preview(&self, preview_id: &str) -> Result<Confirmation, ApiClientError> {
        let preview_id = PreviewId::new(preview_id)?;
        let url = self.preview_url(&preview_id)?;
        self.fetch(Method::PUT, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::RawResponse;

    struct Unreachable;

    impl Transport for Unreachable {
        fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiClientError> {
            panic!("unexpected request to {}", request.url)
        }
    }

    fn client(base: &str) -> EmailValidationClient<Unreachable> {
        EmailValidationClient::with_transport(Url::parse(base).unwrap(), Unreachable).unwrap()
    }

    #[test]
    fn test_base_must_be_a_base() {
        let result =
            EmailValidationClient::with_transport(Url::parse("mailto:a@b.c").unwrap(), Unreachable);
        assert!(matches!(result, Err(ApiClientError::CannotBeBase(_))));
    }

    #[test]
    fn test_validate_url() {
        let client = client("https://api.mailgun.net");
        let address = Address::new("alice+news@example.com").unwrap();
        let url = client.validate_url(&address, true).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.mailgun.net/v4/address/validate?address=alice%2Bnews%40example.com&provider_lookup=true"
        );

        let url = client.validate_url(&address, false).unwrap();
        assert!(url.as_str().ends_with("provider_lookup=false"));
    }

    #[test]
    fn test_base_path_is_kept() {
        let client = client("http://localhost:8080/proxy/");
        let list_id = ListId::new("list123").unwrap();
        assert_eq!(
            client.bulk_job_url(&list_id).unwrap().as_str(),
            "http://localhost:8080/proxy/v4/address/validate/bulk/list123"
        );
    }

    #[test]
    fn test_identifiers_are_single_segments() {
        let client = client("https://api.mailgun.net");
        let preview_id = PreviewId::new("../bulk/x?y").unwrap();
        assert_eq!(
            client.preview_url(&preview_id).unwrap().as_str(),
            "https://api.mailgun.net/v4/address/validate/preview/..%2Fbulk%2Fx%3Fy"
        );
    }

    #[test]
    fn test_listing_urls() {
        let client = client("https://api.mailgun.net");
        assert_eq!(
            client.bulk_jobs_url(Limit::DEFAULT).unwrap().as_str(),
            "https://api.mailgun.net/v4/address/validate/bulk?limit=500"
        );
        assert_eq!(
            client.previews_url(Limit::new(10).unwrap()).unwrap().as_str(),
            "https://api.mailgun.net/v4/address/validate/preview?limit=10"
        );
    }

    #[test]
    fn test_invalid_input_never_reaches_transport() {
        let client = client("https://api.mailgun.net");
        assert!(client.validate("", true).unwrap_err().is_local());
        assert!(client.get_bulk_job("").unwrap_err().is_local());
        assert!(client.get_bulk_jobs(0).unwrap_err().is_local());
        assert!(client.get_bulk_previews(-1).unwrap_err().is_local());
        assert!(client.delete_bulk_preview("").unwrap_err().is_local());
        assert!(client.promote_bulk_preview("").unwrap_err().is_local());
        assert!(client
            .create_bulk_job("", FileSource::content("x", "file"))
            .unwrap_err()
            .is_local());
    }
}
