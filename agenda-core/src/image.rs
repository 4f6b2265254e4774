//! Image loading for agenda records.
//!
//! Images are stored inline as `data:` URIs, so loading one means reading the
//! whole file and base64-encoding it.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::constants::MAX_IMAGE_BYTES;
use crate::error::{AgendaError, AgendaResult};

/// Image formats accepted for agenda records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
    Svg,
}

impl ImageFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::Webp),
            "bmp" => Some(ImageFormat::Bmp),
            "svg" => Some(ImageFormat::Svg),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Svg => "image/svg+xml",
        }
    }
}

/// An image ready to be attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub data_uri: String,
    pub file_name: Option<String>,
}

impl ImageData {
    pub fn from_bytes(bytes: &[u8], mime_type: &str, file_name: Option<&str>) -> Self {
        ImageData {
            data_uri: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
            file_name: file_name.map(String::from),
        }
    }

    /// Reuse an image already stored on a record.
    pub fn from_stored(data_uri: String, file_name: Option<String>) -> Self {
        ImageData {
            data_uri,
            file_name,
        }
    }
}

/// Read an image file into a data URI.
///
/// Files over `MAX_IMAGE_BYTES` are rejected before the content is read.
pub async fn load_image(path: &Path) -> AgendaResult<ImageData> {
    let size = tokio::fs::metadata(path).await?.len();
    if size > MAX_IMAGE_BYTES {
        return Err(AgendaError::ImageTooLarge {
            size,
            max: MAX_IMAGE_BYTES,
        });
    }

    let format = ImageFormat::from_path(path)
        .ok_or_else(|| AgendaError::NotAnImage(path.display().to_string()))?;

    let bytes = tokio::fs::read(path).await?;
    let file_name = path.file_name().and_then(|n| n.to_str());

    Ok(ImageData::from_bytes(&bytes, format.mime_type(), file_name))
}
