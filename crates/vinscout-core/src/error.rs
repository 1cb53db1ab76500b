//! Error taxonomy for VINScout.
//!
//! Every variant is flat: at most one attached detail string, no nested
//! causes. Display strings are written to be shown to a user as-is.

use thiserror::Error;

/// Local VIN validation failures. None of these ever reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("A VIN must be exactly 17 characters long.")]
    InvalidLength,

    #[error("A VIN may only contain uppercase letters and digits, excluding I, O, and Q.")]
    InvalidCharacters,

    #[error("The VIN check digit is invalid. Please verify you entered the VIN correctly.")]
    InvalidCheckDigit,
}

/// Every way a single lookup can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("A VIN must be exactly 17 characters long.")]
    InvalidLength,

    #[error("A VIN may only contain uppercase letters and digits, excluding I, O, and Q.")]
    InvalidCharacters,

    #[error("The VIN check digit is invalid. Please verify you entered the VIN correctly.")]
    InvalidCheckDigit,

    #[error("The request timed out. Please check your internet connection and try again.")]
    Timeout,

    #[error("A network error occurred: {0}")]
    NetworkIssue(String),

    /// The API answered 200 OK but flagged the VIN as unresolved.
    #[error("The decoding API reported an error: {0}")]
    ApiError(String),

    #[error("Failed to decode the server response: {0}")]
    DecodingError(String),
}

impl LookupError {
    /// Short machine-readable name, used as the `outcome` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::InvalidLength => "invalid_length",
            LookupError::InvalidCharacters => "invalid_characters",
            LookupError::InvalidCheckDigit => "invalid_check_digit",
            LookupError::Timeout => "timeout",
            LookupError::NetworkIssue(_) => "network_issue",
            LookupError::ApiError(_) => "api_error",
            LookupError::DecodingError(_) => "decoding_error",
        }
    }

    /// True for the three local validation variants.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LookupError::InvalidLength
                | LookupError::InvalidCharacters
                | LookupError::InvalidCheckDigit
        )
    }
}

impl From<ValidationError> for LookupError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidLength => LookupError::InvalidLength,
            ValidationError::InvalidCharacters => LookupError::InvalidCharacters,
            ValidationError::InvalidCheckDigit => LookupError::InvalidCheckDigit,
        }
    }
}

/// Transport-level failure, classified only as far as the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

/// Errors from a [`HistoryStore`](crate::storage_traits::HistoryStore) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("history store lock poisoned")]
    LockPoisoned,
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type for lookups.
pub type Result<T> = std::result::Result<T, LookupError>;
