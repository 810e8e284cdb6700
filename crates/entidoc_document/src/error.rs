//! Error types for the document crate.

use thiserror::Error;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that can occur while converting, writing, or parsing documents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A Rust value could not be converted into a document value.
    #[error("conversion failed: {message}")]
    ConversionFailed {
        /// Description of the conversion error.
        message: String,
    },

    /// Writing JSON text failed.
    #[error("JSON encoding failed: {message}")]
    JsonEncoding {
        /// Description of the encoding error.
        message: String,
    },

    /// Parsing JSON text failed.
    #[error("JSON decoding failed at line {line}, column {column}: {message}")]
    JsonDecoding {
        /// Description of the decoding error.
        message: String,
        /// One-based line of the failure.
        line: usize,
        /// One-based column of the failure.
        column: usize,
    },

    /// Writing CBOR bytes failed.
    #[error("CBOR encoding failed: {message}")]
    CborEncoding {
        /// Description of the encoding error.
        message: String,
    },

    /// Parsing CBOR bytes failed.
    #[error("CBOR decoding failed: {message}")]
    CborDecoding {
        /// Description of the decoding error.
        message: String,
    },

    /// Integer does not fit in the document's signed 64-bit range.
    #[error("integer overflow: {value}")]
    IntegerOverflow {
        /// Textual form of the offending number.
        value: String,
    },
}

impl DocumentError {
    /// Create a conversion failed error.
    pub fn conversion_failed(message: impl Into<String>) -> Self {
        Self::ConversionFailed {
            message: message.into(),
        }
    }

    /// Create a JSON encoding error from a `serde_json` failure.
    pub fn json_encoding(err: &serde_json::Error) -> Self {
        Self::JsonEncoding {
            message: err.to_string(),
        }
    }

    /// Create a JSON decoding error from a `serde_json` failure.
    pub fn json_decoding(err: &serde_json::Error) -> Self {
        Self::JsonDecoding {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }

    /// Create a CBOR encoding error.
    pub fn cbor_encoding(message: impl Into<String>) -> Self {
        Self::CborEncoding {
            message: message.into(),
        }
    }

    /// Create a CBOR decoding error.
    pub fn cbor_decoding(message: impl Into<String>) -> Self {
        Self::CborDecoding {
            message: message.into(),
        }
    }
}
