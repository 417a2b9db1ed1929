//! Request option decoding
//!
//! Turns the source part of an inbound request path into an absolute source
//! image address plus an optional output format hint.
//!
//! # URL Formats
//!
//! ## Base64 (default)
//! ```text
//! /aHR0cDovL2V4YW1wbGUuY29tL2NhdC5qcGc.webp
//! /aHR0cDovL2V4YW1wbGUuY2/9tL2NhdC5qcGc.webp   (same token, split by the router)
//! ```
//!
//! ## Plain
//! ```text
//! /plain/http%3A%2F%2Fexample.com%2Fcat.jpg@webp
//! ```

pub mod error;
pub mod url;

pub use error::UrlError;
pub use url::{decode_base64_url, decode_plain_url, decode_url, DecodedUrl, UrlMode};
