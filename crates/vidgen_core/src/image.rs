//! Source images attached to a submission.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use vidgen_error::{ValidationError, ValidationErrorKind};

/// Largest accepted source image, in bytes (4 MiB).
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// Raster formats the generator accepts as a starting frame.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum ImageMime {
    /// PNG
    #[serde(rename = "image/png")]
    #[strum(serialize = "image/png")]
    Png,
    /// JPEG
    #[serde(rename = "image/jpeg")]
    #[strum(serialize = "image/jpeg")]
    Jpeg,
    /// WebP
    #[serde(rename = "image/webp")]
    #[strum(serialize = "image/webp")]
    Webp,
}

/// An image used as the first frame of the generated video.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SourceImage {
    /// Raw image bytes
    bytes: Vec<u8>,
    /// Image format
    mime: ImageMime,
}

impl SourceImage {
    /// Validate and wrap an uploaded image.
    ///
    /// # Errors
    ///
    /// Fails when the MIME type is not PNG, JPEG or WebP, or when the image
    /// exceeds [`MAX_IMAGE_BYTES`].
    ///
    /// # Examples
    ///
    /// ```
    /// use vidgen_core::{ImageMime, SourceImage};
    ///
    /// let image = SourceImage::new(vec![0x89, b'P', b'N', b'G'], "image/png").unwrap();
    /// assert_eq!(*image.mime(), ImageMime::Png);
    /// assert!(SourceImage::new(vec![0; 8], "image/gif").is_err());
    /// ```
    pub fn new(bytes: Vec<u8>, mime: &str) -> Result<Self, ValidationError> {
        let mime = mime.trim().to_ascii_lowercase().parse::<ImageMime>().map_err(|_| {
            ValidationError::new(ValidationErrorKind::UnsupportedImageType(mime.to_string()))
        })?;

        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::new(ValidationErrorKind::ImageTooLarge {
                size: bytes.len(),
                limit: MAX_IMAGE_BYTES,
            }));
        }

        Ok(Self { bytes, mime })
    }
}
