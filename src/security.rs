//! Source Image Security Module
//!
//! Rejects source images whose pixel count exceeds the configured ceiling.
//! Call this as soon as the dimensions are known from the image header,
//! BEFORE the image is fully decoded, so a small file that expands to a
//! huge bitmap is refused cheaply.
//!
//! Returns 422 Unprocessable Entity for oversized images. The response body
//! only ever carries the generic public message.

use thiserror::Error;

use crate::constants::DEFAULT_MAX_SRC_RESOLUTION;

/// Security validation error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    /// Source image has more pixels than allowed (422)
    #[error("Source image resolution is too big")]
    ResolutionTooBig {
        width: u64,
        height: u64,
        max_pixels: u64,
    },
}

impl SecurityError {
    pub fn to_http_status(&self) -> u16 {
        match self {
            SecurityError::ResolutionTooBig { .. } => 422,
        }
    }

    /// Client-safe message
    pub fn public_message(&self) -> &'static str {
        match self {
            SecurityError::ResolutionTooBig { .. } => "Invalid source image",
        }
    }
}

/// Limits applied to source images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityConfig {
    /// Maximum allowed total pixels (width * height)
    pub max_src_resolution: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_src_resolution: DEFAULT_MAX_SRC_RESOLUTION,
        }
    }
}

/// Validate source image dimensions against the resolution limit
///
/// A pixel count exactly at the limit is accepted. The product is computed
/// with `checked_mul`, so dimensions whose product does not fit in a `u64`
/// are rejected instead of wrapping around.
pub fn check_dimensions(
    width: u64,
    height: u64,
    config: &SecurityConfig,
) -> Result<(), SecurityError> {
    let max_pixels = config.max_src_resolution;

    let too_big = match width.checked_mul(height) {
        Some(pixels) => pixels > max_pixels,
        None => true,
    };

    if too_big {
        tracing::debug!(
            width,
            height,
            max_pixels,
            "Source image resolution exceeds limit"
        );
        return Err(SecurityError::ResolutionTooBig {
            width,
            height,
            max_pixels,
        });
    }

    Ok(())
}
