// ABOUTME: Validated cloud region identifier.
// ABOUTME: Regions are short lowercase alphanumeric codes like "eastus".

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("region cannot be empty")]
    Empty,

    #[error("region exceeds maximum length of 32 characters")]
    TooLong,

    #[error("region must be lowercase")]
    NotLowercase,

    #[error("invalid character in region: '{0}'")]
    InvalidChar(char),
}

/// A provider region code, e.g. "eastus" or "westeurope".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region(String);

impl Region {
    pub fn new(value: &str) -> Result<Self, RegionError> {
        if value.is_empty() {
            return Err(RegionError::Empty);
        }

        if value.len() > 32 {
            return Err(RegionError::TooLong);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(RegionError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() {
                return Err(RegionError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Region {
    fn default() -> Self {
        Region("eastus".to_string())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
