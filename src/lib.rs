// Imgpath: source URL decoding and pre-flight checks for an image proxy

pub mod config;
pub mod constants;
pub mod error;
pub mod imagetype;
pub mod logging;
pub mod options;
pub mod security;

pub use error::ProxyError;
pub use imagetype::ImageType;
pub use options::{decode_url, DecodedUrl, UrlError};
pub use security::{check_dimensions, SecurityConfig, SecurityError};
