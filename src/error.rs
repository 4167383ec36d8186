//! Error types for reading persisted label offsets.
//!
//! None of these reach the user: the store logs them and falls back to the
//! zero offset for the affected annotation.

use thiserror::Error;

/// Errors that can occur while reading an offset back from metadata.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OffsetError {
    /// Value is present but is not a number
    #[error("Metadata key '{key}' holds non-numeric value '{value}'")]
    Malformed {
        /// The metadata key that was read
        key: String,
        /// The raw value as found
        value: String,
    },

    /// Value parsed but is NaN or infinite
    #[error("Metadata key '{key}' holds non-finite value {value}")]
    NonFinite {
        /// The metadata key that was read
        key: String,
        /// The parsed value
        value: f64,
    },

    /// Only one of the two offset keys is present
    #[error("Metadata key '{missing}' is missing while '{present}' is set")]
    Partial {
        /// The key that was found
        present: String,
        /// The key that was expected alongside it
        missing: String,
    },
}

impl OffsetError {
    /// Create a malformed value error.
    pub fn malformed(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a partial pair error.
    pub fn partial(present: impl Into<String>, missing: impl Into<String>) -> Self {
        Self::Partial {
            present: present.into(),
            missing: missing.into(),
        }
    }
}
