//! Input image normalization and PNG/base64 encoding
//!
//! Callers hand over images either already decoded or as raw interleaved pixel
//! arrays. Everything is turned into a [`DynamicImage`] before encoding; no
//! resizing or colour conversion happens on the way.

pub mod codec;

pub use codec::{decode_base64_image, decode_image_bytes, encode_png, to_content_part, PNG_MIME};

use crate::{Error, Result};
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

/// Interleaved 8-bit pixels in row-major, height × width × channels order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPixels {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub data: Vec<u8>,
}

impl RawPixels {
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Convert a float array with samples in `[0, 1]` to 8-bit pixels.
    ///
    /// Out-of-range samples are clamped.
    pub fn from_unit_floats(width: u32, height: u32, channels: u8, samples: &[f32]) -> Self {
        let data = samples
            .iter()
            .map(|s| (s.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect();
        Self::new(width, height, channels, data)
    }

    fn into_dynamic(self) -> Result<DynamicImage> {
        let expected = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(self.channels as usize))
            .ok_or_else(|| {
                Error::InvalidImage(format!(
                    "dimensions overflow: {}x{}x{}",
                    self.width, self.height, self.channels
                ))
            })?;
        if self.data.len() != expected {
            return Err(Error::InvalidImage(format!(
                "pixel buffer holds {} bytes, expected {} for {}x{}x{}",
                self.data.len(),
                expected,
                self.width,
                self.height,
                self.channels
            )));
        }

        let (width, height, data) = (self.width, self.height, self.data);
        let image = match self.channels {
            1 => GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
            2 => GrayAlphaImage::from_raw(width, height, data).map(DynamicImage::ImageLumaA8),
            3 => RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8),
            other => {
                return Err(Error::InvalidImage(format!(
                    "unsupported channel count {}",
                    other
                )))
            }
        };

        image.ok_or_else(|| Error::Invariant("pixel buffer length mismatch".to_string()))
    }
}

/// An image as supplied by the caller.
#[derive(Debug, Clone)]
pub enum InputImage {
    Decoded(DynamicImage),
    Raw(RawPixels),
}

impl InputImage {
    /// Produce the canonical decoded form.
    pub fn into_canonical(self) -> Result<DynamicImage> {
        match self {
            InputImage::Decoded(image) => Ok(image),
            InputImage::Raw(raw) => raw.into_dynamic(),
        }
    }
}

impl From<DynamicImage> for InputImage {
    fn from(image: DynamicImage) -> Self {
        InputImage::Decoded(image)
    }
}

impl From<RawPixels> for InputImage {
    fn from(raw: RawPixels) -> Self {
        InputImage::Raw(raw)
    }
}
