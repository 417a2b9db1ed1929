//! Source URL decoding
//!
//! The source address arrives as the tail of the request path in one of two
//! encodings:
//!
//! ```text
//! /<urlsafe-base64-no-padding>[.<format>]      (may be split across segments)
//! /plain/<percent-encoded-address>[@<format>]
//! ```

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::Serialize;

use super::error::UrlError;
use crate::constants::{BASE64_FORMAT_SEPARATOR, PLAIN_FORMAT_SEPARATOR, URL_TOKEN_PLAIN};
use crate::imagetype::ImageType;

/// URL-safe alphabet without padding. Non-zero trailing bits are tolerated
/// so hand-built tokens from lenient encoders still decode.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// Result of decoding the source part of a request path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedUrl {
    /// Absolute source image address (base URL + decoded address)
    pub source_url: String,
    /// Requested output format suffix, empty when none was given
    pub format: String,
}

impl DecodedUrl {
    pub fn has_format(&self) -> bool {
        !self.format.is_empty()
    }

    /// Format hint resolved through the image type registry
    pub fn format_type(&self) -> ImageType {
        ImageType::parse(&self.format)
    }
}

/// How the source address is encoded in the path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlMode {
    Base64,
    Plain,
}

impl UrlMode {
    /// Select the mode and the segments it should decode.
    ///
    /// `plain` only acts as a marker when something follows it. A lone
    /// `plain` segment is handed to the base64 decoder as payload.
    pub fn detect<S: AsRef<str>>(parts: &[S]) -> Option<(UrlMode, &[S])> {
        match parts {
            [] => None,
            [first, rest @ ..] if first.as_ref() == URL_TOKEN_PLAIN && !rest.is_empty() => {
                Some((UrlMode::Plain, rest))
            }
            _ => Some((UrlMode::Base64, parts)),
        }
    }
}

/// Decode the source URL and format hint from path segments
///
/// # Arguments
/// * `parts` - Path segments following the processing options
/// * `base_url` - Configured prefix prepended to the decoded address
///
/// # Returns
/// * `DecodedUrl` with the absolute source address and format hint
/// * `UrlError` describing why the segments could not be decoded
pub fn decode_url<S: AsRef<str>>(parts: &[S], base_url: &str) -> Result<DecodedUrl, UrlError> {
    let (mode, parts) = UrlMode::detect(parts).ok_or(UrlError::EmptyInput)?;

    let result = match mode {
        UrlMode::Base64 => decode_base64_url(parts, base_url),
        UrlMode::Plain => decode_plain_url(parts, base_url),
    };

    if let Err(e) = &result {
        tracing::debug!(mode = ?mode, error = %e, "Failed to decode source URL");
    }

    result
}

/// Decode `<base64>[.<format>]`. Segments are joined without a separator.
pub fn decode_base64_url<S: AsRef<str>>(
    parts: &[S],
    base_url: &str,
) -> Result<DecodedUrl, UrlError> {
    let encoded = join(parts, "");
    let (payload, format) = split_format(&encoded, BASE64_FORMAT_SEPARATOR)?;

    let bytes = URL_SAFE_LENIENT
        .decode(payload.trim_end_matches('='))
        .map_err(|_| UrlError::invalid_encoding(&encoded))?;
    let address = String::from_utf8(bytes).map_err(|_| UrlError::invalid_encoding(&encoded))?;

    Ok(DecodedUrl {
        source_url: format!("{}{}", base_url, address),
        format: format.to_string(),
    })
}

/// Decode `<percent-encoded>[@<format>]`. Segments are joined with `/`.
pub fn decode_plain_url<S: AsRef<str>>(
    parts: &[S],
    base_url: &str,
) -> Result<DecodedUrl, UrlError> {
    let encoded = join(parts, "/");
    let (address, format) = split_format(&encoded, PLAIN_FORMAT_SEPARATOR)?;

    let address = path_unescape(address).ok_or_else(|| UrlError::invalid_encoding(&encoded))?;

    Ok(DecodedUrl {
        source_url: format!("{}{}", base_url, address),
        format: format.to_string(),
    })
}

fn join<S: AsRef<str>>(parts: &[S], separator: &str) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(separator)
}

/// Split `encoded` into address and format hint at `separator`.
///
/// An empty suffix (`abc.`) counts as no format.
fn split_format(encoded: &str, separator: char) -> Result<(&str, &str), UrlError> {
    let mut pieces = encoded.split(separator);

    let address = pieces.next().unwrap_or_default();
    let format = pieces.next().unwrap_or_default();

    if address.is_empty() {
        return Err(UrlError::EmptyInput);
    }

    if pieces.next().is_some() {
        return Err(UrlError::multiple_formats(encoded));
    }

    Ok((address, format))
}

/// Percent-decode a path. `+` stays literal, every `%` must start a two
/// digit hex escape, and the result must be UTF-8.
fn path_unescape(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(s).ok().map(|decoded| decoded.into_owned())
}
