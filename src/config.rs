use std::{env, fmt, time::Duration};

use url::Url;

use crate::api::ApiClientError;
use crate::identifiers::InputError;

pub const API_KEY_VAR: &str = "MAILGUN_API_KEY";
pub const API_BASE_VAR: &str = "MAILGUN_API_BASE";
pub const TIMEOUT_VAR: &str = "MAILGUN_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Data residency region of the account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Region {
    #[default]
    Us,
    Eu,
}

impl Region {
    pub const fn base_url_str(self) -> &'static str {
        match self {
            Self::Us => "https://api.mailgun.net",
            Self::Eu => "https://api.eu.mailgun.net",
        }
    }

    /// # Errors
    ///
    /// Never fails in practice, the region URLs are constants.
    pub fn base_url(self) -> Result<Url, ApiClientError> {
        Ok(Url::parse(self.base_url_str())?)
    }
}

impl clap::ValueEnum for Region {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Us, Self::Eu]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Us => clap::builder::PossibleValue::new("us").help("api.mailgun.net"),
            Self::Eu => clap::builder::PossibleValue::new("eu").help("api.eu.mailgun.net"),
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Us => write!(f, "us"),
            Self::Eu => write!(f, "eu"),
        }
    }
}

#[derive(Clone)]
pub struct ClientConfig {
    pub base: Url,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// # Errors
    ///
    /// See [`Region::base_url`].
    pub fn for_region(region: Region) -> Result<Self, ApiClientError> {
        Ok(Self::new(region.base_url()?))
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `MAILGUN_API_BASE`, `MAILGUN_API_KEY` and
    /// `MAILGUN_TIMEOUT_SECS`. Missing values fall back to the US region,
    /// no key, and a 30 second timeout.
    ///
    /// # Errors
    ///
    /// Fails if `MAILGUN_API_BASE` is not a valid URL or
    /// `MAILGUN_TIMEOUT_SECS` is not a whole number of seconds.
    pub fn from_env() -> Result<Self, ApiClientError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiClientError> {
        let base = match lookup(API_BASE_VAR) {
            Some(raw) => Url::parse(&raw)?,
            None => Region::default().base_url()?,
        };
        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| InputError::InvalidTimeout(raw))?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            base,
            api_key: lookup(API_KEY_VAR).filter(|key| !key.is_empty()),
            timeout,
        })
    }
}

// Keeps the key out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base", &self.base.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_region_base_urls() {
        assert_eq!(
            Region::Us.base_url().unwrap().as_str(),
            "https://api.mailgun.net/"
        );
        assert_eq!(
            Region::Eu.base_url().unwrap().as_str(),
            "https://api.eu.mailgun.net/"
        );
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base, Region::Us.base_url().unwrap());
        assert_eq!(config.api_key, None);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_environment_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (API_BASE_VAR, "http://localhost:8080"),
            (API_KEY_VAR, "key-123"),
            (TIMEOUT_VAR, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base.as_str(), "http://localhost:8080/");
        assert_eq!(config.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let error = ClientConfig::from_lookup(lookup_from(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        assert_eq!(error.error_code(), "E001");
        assert!(format!("{error}").contains("got 'soon'"));

        let error = ClientConfig::from_lookup(lookup_from(&[(TIMEOUT_VAR, "-5")])).unwrap_err();
        assert!(matches!(
            error,
            ApiClientError::InvalidInput(InputError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        let error = ClientConfig::from_lookup(lookup_from(&[(API_BASE_VAR, "not a url")]))
            .unwrap_err();
        assert_eq!(error.error_code(), "E007");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::for_region(Region::Eu)
            .unwrap()
            .with_api_key("secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }
}
