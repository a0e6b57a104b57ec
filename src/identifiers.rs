use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("address is {0} characters long, at most 512 are allowed")]
    AddressTooLong(usize),
    #[error("limit must be a positive integer, got {0}")]
    NonPositiveLimit(i64),
    #[error("limit must be a positive integer, got '{0}'")]
    NotAnInteger(String),
    #[error("timeout must be a whole number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

/// Email address submitted for single validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    pub const MAX_LENGTH: usize = 512;

    /// # Errors
    ///
    /// Will fail if `raw` is empty or longer than
    /// [`Address::MAX_LENGTH`] characters.
    pub fn new(raw: &str) -> Result<Self, InputError> {
        if raw.is_empty() {
            return Err(InputError::Empty("address"));
        }

        let length = raw.chars().count();
        if length > Self::MAX_LENGTH {
            Err(InputError::AddressTooLong(length))
        } else {
            Ok(Self(raw.into()))
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Identifier of a bulk validation job, chosen by the caller at upload time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListId(String);

impl ListId {
    /// # Errors
    ///
    /// Will fail if `raw` is empty.
    pub fn new(raw: &str) -> Result<Self, InputError> {
        non_empty("list id", raw).map(Self)
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ListId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Identifier of a bulk preview, chosen by the caller at upload time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PreviewId(String);

impl PreviewId {
    /// # Errors
    ///
    /// Will fail if `raw` is empty.
    pub fn new(raw: &str) -> Result<Self, InputError> {
        non_empty("preview id", raw).map(Self)
    }
}

impl fmt::Display for PreviewId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PreviewId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

fn non_empty(what: &'static str, raw: &str) -> Result<String, InputError> {
    if raw.is_empty() {
        Err(InputError::Empty(what))
    } else {
        Ok(raw.to_owned())
    }
}

/// Page size for the job and preview listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Limit(u64);

impl Limit {
    pub const DEFAULT: Self = Self(500);

    /// # Errors
    ///
    /// Will fail unless `raw` is strictly positive.
    pub fn new(raw: i64) -> Result<Self, InputError> {
        u64::try_from(raw)
            .ok()
            .filter(|value| *value > 0)
            .map(Self)
            .ok_or(InputError::NonPositiveLimit(raw))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Limit {
    type Err = InputError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| InputError::NotAnInteger(raw.to_owned()))?;
        Self::new(value)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
