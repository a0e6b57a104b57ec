use super::types::{JobStatus, PreviewStatus, Risk, Verdict};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error body shape used by the service for non-success answers.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Plain acknowledgement returned by job deletion and preview promotion.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Confirmation {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Engagement {
    #[serde(default)]
    pub engaging: bool,
    #[serde(default)]
    pub is_bot: bool,
    pub behavior: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ValidationResult {
    pub address: String,
    pub result: Verdict,
    pub risk: Risk,
    #[serde(default)]
    pub reason: Vec<String>,
    #[serde(default)]
    pub is_disposable_address: bool,
    #[serde(default)]
    pub is_role_address: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did_you_mean: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement: Option<Engagement>,
    /// Provider lookup metadata and any field this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.result == Verdict::Deliverable
    }

    pub fn reasons(&self) -> &[String] {
        &self.reason
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResultCounts {
    #[serde(default)]
    pub deliverable: u64,
    #[serde(default)]
    pub undeliverable: u64,
    #[serde(default)]
    pub do_not_send: u64,
    #[serde(default)]
    pub catch_all: u64,
    #[serde(default)]
    pub unknown: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RiskCounts {
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub low: u64,
    #[serde(default)]
    pub unknown: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Summary {
    #[serde(default)]
    pub result: ResultCounts,
    #[serde(default)]
    pub risk: RiskCounts,
}

/// Preview summaries report shares of the list in percent, not counts.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ResultShares {
    #[serde(default)]
    pub deliverable: f64,
    #[serde(default)]
    pub undeliverable: f64,
    #[serde(default)]
    pub do_not_send: f64,
    #[serde(default)]
    pub catch_all: f64,
    #[serde(default)]
    pub unknown: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RiskShares {
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub medium: f64,
    #[serde(default)]
    pub low: f64,
    #[serde(default)]
    pub unknown: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PreviewSummary {
    #[serde(default)]
    pub result: ResultShares,
    #[serde(default)]
    pub risk: RiskShares,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DownloadUrl {
    pub csv: Option<String>,
    pub json: Option<String>,
}

/// A bulk validation job. The creation answer only carries `id` and
/// `message`, the other fields are filled in by later lookups.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BulkJob {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub quantity: u64,
    #[serde(default)]
    pub records_processed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<DownloadUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BulkJob {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> JobStatus {
        self.status.unwrap_or(JobStatus::Unknown)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(from_unix)
    }

    pub fn is_completed(&self) -> bool {
        self.status() == JobStatus::Completed
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Paging {
    pub first: Option<String>,
    pub last: Option<String>,
    pub next: Option<String>,
    #[serde(alias = "prev")]
    pub previous: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BulkJobList {
    #[serde(default)]
    pub jobs: Vec<BulkJob>,
    #[serde(default)]
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BulkPreview {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PreviewStatus>,
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<PreviewSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BulkPreview {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> PreviewStatus {
        self.status.unwrap_or(PreviewStatus::Unknown)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(from_unix)
    }
}

/// A single preview lookup answers `{"preview": {...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct PreviewEnvelope {
    pub preview: BulkPreview,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BulkPreviewList {
    #[serde(default)]
    pub previews: Vec<BulkPreview>,
}

fn from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_result_keeps_unmodelled_fields() {
        let body = r#"{
            "address": "alice@example.com",
            "is_disposable_address": false,
            "is_role_address": false,
            "reason": [],
            "result": "deliverable",
            "risk": "low",
            "provider": "gmail"
        }"#;
        let result: ValidationResult = serde_json::from_str(body).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.risk, Risk::Low);
        assert_eq!(result.extra.get("provider"), Some(&Value::from("gmail")));
    }

    #[test]
    fn test_creation_answer_decodes_as_job() {
        let body = r#"{"id": "list123", "message": "The validation job was submitted."}"#;
        let job: BulkJob = serde_json::from_str(body).unwrap();
        assert_eq!(job.id(), "list123");
        assert_eq!(job.status(), JobStatus::Unknown);
        assert_eq!(
            job.message.as_deref(),
            Some("The validation job was submitted.")
        );
    }

    #[test]
    fn test_job_timestamps() {
        let body = r#"{"id": "list123", "status": "completed", "created_at": 1590080191,
            "quantity": 10, "records_processed": 10,
            "summary": {"result": {"deliverable": 7, "undeliverable": 3},
                        "risk": {"low": 7, "high": 3}}}"#;
        let job: BulkJob = serde_json::from_str(body).unwrap();
        assert!(job.is_completed());
        assert_eq!(job.created().unwrap().timestamp(), 1_590_080_191);
        let summary = job.summary.unwrap();
        assert_eq!(summary.result.deliverable, 7);
        assert_eq!(summary.risk.unknown, 0);
    }

    #[test]
    fn test_preview_summary_is_fractional() {
        let body = r#"{"preview": {"id": "test_500", "valid": true, "status": "preview_complete",
            "quantity": 8, "created_at": 1590080191,
            "summary": {"result": {"deliverable": 37.5, "undeliverable": 62.5},
                        "risk": {"low": 37.5, "high": 50.0, "medium": 12.5}}}}"#;
        let envelope: PreviewEnvelope = serde_json::from_str(body).unwrap();
        let preview = envelope.preview;
        assert_eq!(preview.status(), PreviewStatus::PreviewComplete);
        let summary = preview.summary.unwrap();
        assert_eq!(summary.result.deliverable, 37.5);
        assert_eq!(summary.risk.medium, 12.5);
        assert_eq!(summary.result.unknown, 0.0);
    }
}
