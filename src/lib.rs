//! # Email Validation
//!
//! A blocking client for the Mailgun v4 email address validation API.
//!
//! ## Features
//!
//! - **Single validation**: verdict, risk and reasons for one address
//! - **Bulk jobs**: upload a list from disk or memory, track and delete it
//! - **Bulk previews**: sample a list cheaply, then promote it to a full job
//! - **Pluggable transport**: requests go through the [`api::Transport`] trait
//! - **Error Handling**: error codes with actionable suggestions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use email_validation::{
//!     api::EmailValidationClient,
//!     config::{ClientConfig, Region},
//!     upload::FileSource,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::for_region(Region::Eu)?.with_api_key("key-...");
//! let client = EmailValidationClient::new(&config)?;
//!
//! let result = client.validate("alice@example.com", true)?;
//! println!("{}: {} ({} risk)", result.address, result.result, result.risk);
//!
//! let job = client.create_bulk_job("march", FileSource::path("/tmp/addresses.csv"))?;
//! println!("submitted {}", job.id());
//! # Ok(())
//! # }
//! ```

/// API client, transport and response models
pub mod api;

/// Base URL, credentials and timeouts
pub mod config;

/// Request failures reported by the service
pub mod errors;

/// Validated addresses, identifiers and page sizes
pub mod identifiers;

/// Upload sources: files on disk or list content in memory
pub mod upload;
