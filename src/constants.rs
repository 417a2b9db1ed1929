// Constants module - centralized default values for configuration
//
// This module defines all default values used throughout the codebase.
// Using constants instead of magic numbers improves maintainability
// and makes it easier to understand and modify defaults.

// =============================================================================
// Source URL defaults
// =============================================================================

/// Default base URL prepended to decoded source addresses (none)
pub const DEFAULT_BASE_URL: &str = "";

/// First path segment that switches the decoder to plain (percent-encoded) mode
pub const URL_TOKEN_PLAIN: &str = "plain";

/// Separator between the base64 payload and the format suffix
pub const BASE64_FORMAT_SEPARATOR: char = '.';

/// Separator between the plain address and the format suffix
pub const PLAIN_FORMAT_SEPARATOR: char = '@';

// =============================================================================
// Security defaults
// =============================================================================

/// Default maximum source image resolution (16.8 megapixels)
pub const DEFAULT_MAX_SRC_RESOLUTION: u64 = 16_800_000;

// =============================================================================
// Response header defaults
// =============================================================================

/// MIME type used when the image type is unknown
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Filename used in Content-Disposition when none can be derived from the source URL
pub const CONTENT_DISPOSITION_FILENAME_FALLBACK: &str = "image";

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in configuration
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
