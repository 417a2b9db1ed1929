// Error types module

use thiserror::Error;

use crate::options::UrlError;
use crate::security::SecurityError;

/// Centralized error type for the request pre-flight layer
///
/// Each variant knows the HTTP status the response writer should use and a
/// public message that is safe to send to the client. `Display` gives the
/// internal message for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// Configuration errors (invalid YAML, missing env vars, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source URL could not be decoded from the request path
    #[error(transparent)]
    Url(#[from] UrlError),

    /// Source image failed a security check
    #[error(transparent)]
    Security(#[from] SecurityError),
}

impl ProxyError {
    pub fn to_http_status(&self) -> u16 {
        match self {
            ProxyError::Config(_) => 500,
            ProxyError::Url(e) => e.to_http_status(),
            ProxyError::Security(e) => e.to_http_status(),
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            ProxyError::Config(_) => "Internal error",
            ProxyError::Url(e) => e.public_message(),
            ProxyError::Security(e) => e.public_message(),
        }
    }
}
