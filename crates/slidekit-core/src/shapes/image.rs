//! Image shape for placing raster images.

use super::{ShapeTrait, is_zero};
use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image format recognised when embedding raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Gif,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
        }
    }

    /// Detect format from a MIME type such as `image/png`.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" => Some(ImageFormat::Jpeg),
            "image/webp" => Some(ImageFormat::WebP),
            "image/gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // GIF87a / GIF89a
        if data.starts_with(b"GIF8") {
            return Some(ImageFormat::Gif);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        None
    }
}

/// Where an image's pixels come from.
///
/// Usually an opaque URL or a session-local blob reference handed over by
/// the host's file picker. Those are not portable across sessions; use
/// [`ImageSource::from_bytes`] to embed the data as a `data:` URL instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSource(String);

impl ImageSource {
    const DATA_PREFIX: &'static str = "data:";
    const BASE64_MARKER: &'static str = ";base64,";

    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Embed raw image bytes, detecting the format from magic bytes.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        ImageFormat::from_magic_bytes(data).map(|format| Self::from_bytes_with_format(data, format))
    }

    /// Embed raw image bytes of a known format.
    pub fn from_bytes_with_format(data: &[u8], format: ImageFormat) -> Self {
        Self(format!(
            "{}{}{}{}",
            Self::DATA_PREFIX,
            format.mime_type(),
            Self::BASE64_MARKER,
            STANDARD.encode(data)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_url(&self) -> bool {
        self.0.starts_with(Self::DATA_PREFIX)
    }

    /// Session-local references that will not resolve after a reload.
    pub fn is_blob(&self) -> bool {
        self.0.starts_with("blob:")
    }

    /// Decode an embedded base64 `data:` URL back into its format and bytes.
    pub fn decode_data_url(&self) -> Option<(ImageFormat, Vec<u8>)> {
        let rest = self.0.strip_prefix(Self::DATA_PREFIX)?;
        let (mime, payload) = rest.split_once(Self::BASE64_MARKER)?;
        let format = ImageFormat::from_mime_type(mime)?;
        let bytes = STANDARD.decode(payload).ok()?;
        Some((format, bytes))
    }
}

impl From<&str> for ImageSource {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An image shape anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rotation: f64,
    pub src: ImageSource,
    pub width: f64,
    pub height: f64,
}

impl Image {
    /// Create a new image shape with explicit display dimensions.
    pub fn new(position: Point, src: impl Into<ImageSource>, width: f64, height: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            rotation: 0.0,
            src: src.into(),
            width,
            height,
        }
    }

    /// Get the bounding rectangle.
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl ShapeTrait for Image {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn bounds(&self) -> Rect {
        self.as_rect().abs()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }
}
