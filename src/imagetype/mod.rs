//! Image type registry
//!
//! Closed set of image formats the proxy knows how to name. Every fact about a
//! type (aliases, MIME, Content-Disposition extension, capabilities) is constant
//! data resolved by `match`, so lookups are allocation-free and identical on
//! every thread.
//!
//! ```
//! use imgpath::imagetype::ImageType;
//!
//! let t = ImageType::parse("jpg");
//! assert_eq!(t, ImageType::Jpeg);
//! assert_eq!(t.as_str(), "jpeg");
//! assert_eq!(t.mime(), "image/jpeg");
//! assert!(!t.supports_alpha());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::constants::{CONTENT_DISPOSITION_FILENAME_FALLBACK, FALLBACK_MIME};

/// Image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageType {
    #[default]
    Unknown,
    Jpeg,
    Png,
    WebP,
    Gif,
    Ico,
    Svg,
    Heic,
    Avif,
    Bmp,
    Tiff,
}

/// Accepted parse aliases. JPEG is the only type with more than one.
const ALIASES: &[(&str, ImageType)] = &[
    ("jpeg", ImageType::Jpeg),
    ("jpg", ImageType::Jpeg),
    ("png", ImageType::Png),
    ("webp", ImageType::WebP),
    ("gif", ImageType::Gif),
    ("ico", ImageType::Ico),
    ("svg", ImageType::Svg),
    ("heic", ImageType::Heic),
    ("avif", ImageType::Avif),
    ("bmp", ImageType::Bmp),
    ("tiff", ImageType::Tiff),
];

impl ImageType {
    /// Every known type, in declaration order (Unknown excluded)
    pub const ALL: [ImageType; 10] = [
        ImageType::Jpeg,
        ImageType::Png,
        ImageType::WebP,
        ImageType::Gif,
        ImageType::Ico,
        ImageType::Svg,
        ImageType::Heic,
        ImageType::Avif,
        ImageType::Bmp,
        ImageType::Tiff,
    ];

    /// Look up a type by alias. Matching is case-sensitive; anything
    /// unrecognised is `Unknown`.
    pub fn parse(alias: &str) -> Self {
        ALIASES
            .iter()
            .find(|(name, _)| *name == alias)
            .map(|(_, t)| *t)
            .unwrap_or(ImageType::Unknown)
    }

    /// Canonical alias. Empty for `Unknown`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Gif => "gif",
            Self::Ico => "ico",
            Self::Svg => "svg",
            Self::Heic => "heic",
            Self::Avif => "avif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != ImageType::Unknown
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Unknown => FALLBACK_MIME,
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
            Self::Ico => "image/x-icon",
            Self::Svg => "image/svg+xml",
            Self::Heic => "image/heif",
            Self::Avif => "image/avif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    /// Filename extension used in Content-Disposition. `None` for `Unknown`.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::Jpeg => Some("jpg"),
            other => Some(other.as_str()),
        }
    }

    /// Content-Disposition header value for `filename`.
    ///
    /// The type's own extension is always appended, so the caller passes the
    /// bare name. Quotes and control characters are removed from the name.
    /// Unknown types get a plain `inline`.
    pub fn content_disposition(&self, filename: &str) -> String {
        match self.extension() {
            Some(ext) => format!(
                "inline; filename=\"{}.{}\"",
                sanitize_filename(filename),
                ext
            ),
            None => "inline".to_string(),
        }
    }

    /// Content-Disposition header value with the filename derived from the
    /// last path segment of `source_url`, minus its extension.
    ///
    /// Falls back to `image` when the URL can't be parsed or yields no name.
    pub fn content_disposition_from_url(&self, source_url: &str) -> String {
        let filename = filename_from_url(source_url)
            .unwrap_or_else(|| CONTENT_DISPOSITION_FILENAME_FALLBACK.to_string());

        self.content_disposition(&filename)
    }

    pub fn supports_alpha(&self) -> bool {
        !matches!(self, Self::Jpeg | Self::Bmp)
    }

    pub fn supports_animation(&self) -> bool {
        matches!(self, Self::Gif | Self::WebP)
    }

    pub fn supports_colour_profile(&self) -> bool {
        matches!(self, Self::Jpeg | Self::WebP | Self::Avif)
    }
}

/// Extract the extension-less file name of the last path segment.
///
/// The whole path is percent-decoded before splitting, so an encoded `/`
/// still separates segments.
fn filename_from_url(source_url: &str) -> Option<String> {
    let path = source_path(source_url)?;
    let path = urlencoding::decode(&path).ok()?;

    let last = path.rsplit('/').next().unwrap_or_default();
    let stem = match last.rfind('.') {
        Some(idx) => &last[..idx],
        None => last,
    };

    let stem = sanitize_filename(stem);
    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}

/// Percent-encoded path of `source_url`.
///
/// Absolute URLs are parsed as-is and bare paths are resolved against a
/// placeholder origin, so `dir/pic.png` still yields a path. When only the
/// authority is malformed (bad port, bad host) the raw path after it is used.
fn source_path(source_url: &str) -> Option<String> {
    use url::ParseError;

    match Url::parse(source_url) {
        Ok(url) => Some(url.path().to_string()),
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse("http://localhost/")
            .and_then(|base| base.join(source_url))
            .ok()
            .map(|url| url.path().to_string()),
        Err(
            ParseError::EmptyHost
            | ParseError::IdnaError
            | ParseError::InvalidPort
            | ParseError::InvalidIpv4Address
            | ParseError::InvalidIpv6Address
            | ParseError::InvalidDomainCharacter,
        ) => raw_path(source_url).map(str::to_string),
        Err(_) => None,
    }
}

/// Path component of `scheme://authority/path?query#fragment`, unparsed
fn raw_path(source_url: &str) -> Option<&str> {
    let (_, rest) = source_url.split_once("://")?;
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    rest.find('/').map(|idx| &rest[idx..])
}

/// Drop characters that can't appear inside a quoted header parameter
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_control() && *c != '"')
        .collect()
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ImageType::parse(s))
    }
}

impl Serialize for ImageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_known() {
            serializer.serialize_str(self.as_str())
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de> Deserialize<'de> for ImageType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let alias: Option<String> = Option::deserialize(deserializer)?;
        Ok(alias
            .as_deref()
            .map(ImageType::parse)
            .unwrap_or(ImageType::Unknown))
    }
}
