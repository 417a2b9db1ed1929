//! Source URL decoding errors
//!
//! `Display` is the internal message and may echo the raw token for logs.
//! Clients only ever see [`UrlError::public_message`].

use thiserror::Error;

/// Errors that can occur while decoding the source URL from path segments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// No payload before the format suffix, or no segments at all
    #[error("Image URL is empty")]
    EmptyInput,

    /// More than one format suffix separator in the token
    #[error("Multiple formats are specified: {encoded}")]
    MultipleFormatsSpecified { encoded: String },

    /// Bad base64, bad percent-escape, or non UTF-8 result
    #[error("Invalid url encoding: {encoded}")]
    InvalidEncoding { encoded: String },
}

impl UrlError {
    /// Maps URL errors to HTTP status codes
    ///
    /// An address that can't be decoded names no resource, so every
    /// variant maps to 404 (Not Found).
    pub fn to_http_status(&self) -> u16 {
        404
    }

    /// Client-safe message. Never contains request input.
    pub fn public_message(&self) -> &'static str {
        "Invalid URL"
    }

    pub fn multiple_formats(encoded: impl Into<String>) -> Self {
        UrlError::MultipleFormatsSpecified {
            encoded: encoded.into(),
        }
    }

    pub fn invalid_encoding(encoded: impl Into<String>) -> Self {
        UrlError::InvalidEncoding {
            encoded: encoded.into(),
        }
    }
}
