// Re-export the API module components
pub use self::{
    client::EmailValidationClient,
    decode::decode,
    errors::ApiClientError,
    models::{
        BulkJob, BulkJobList, BulkPreview, BulkPreviewList, Confirmation, DownloadUrl,
        Engagement, Paging, PreviewSummary, ResultCounts, ResultShares, RiskCounts, RiskShares,
        Summary, ValidationResult,
    },
    transport::{ApiRequest, HttpTransport, RawResponse, Transport},
    types::{JobStatus, PreviewStatus, Risk, Verdict},
};

// Module declarations
mod client;
mod decode;
mod errors;
mod models;
mod transport;
mod types;
