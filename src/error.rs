//! Defines the error type of this crate.
use std::io;


/// Errors from building a decision tree or querying a fitted one.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The training data is empty or malformed.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the data.
        reason: String,
    },

    /// A parameter is outside its valid range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Which parameter and why.
        reason: String,
    },

    /// A record lacks a value required by a split rule.
    /// Raised at prediction time; this crate performs no imputation.
    #[error("record {row} has no usable value for attribute `{attribute}`")]
    MissingAttribute {
        /// Name of the attribute the rule tests.
        attribute: String,
        /// Zero-based index of the offending record.
        row: usize,
    },

    /// Reading or writing a file failed.
    #[error("I/O failure")]
    Io(#[from] io::Error),

    /// Serializing or deserializing a fitted tree failed.
    #[error("JSON (de)serialization failure")]
    Json(#[from] serde_json::Error),
}


impl TreeError {
    #[inline]
    pub(crate) fn invalid_input<S: Into<String>>(reason: S) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }


    #[inline]
    pub(crate) fn invalid_config<S: Into<String>>(reason: S) -> Self {
        Self::InvalidConfig { reason: reason.into() }
    }
}
