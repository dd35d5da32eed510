use crate::ai::ContentPart;
use crate::{Error, Result};
use base64::Engine as _;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

pub const PNG_MIME: &str = "image/png";

/// Serialize an image to lossless PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encode an image as a base64 PNG content part.
pub fn to_content_part(image: &DynamicImage) -> Result<ContentPart> {
    let bytes = encode_png(image)?;
    tracing::debug!(
        "Encoded {}x{} image as {} PNG bytes",
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(ContentPart::Image {
        mime_type: PNG_MIME.to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
    })
}

/// Decode an image payload returned by the service.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| Error::ResponseParse(format!("Failed to decode image payload: {}", e)))
}

/// Decode a base64 image payload returned by the service.
pub fn decode_base64_image(data: &str) -> Result<DynamicImage> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| Error::ResponseParse(format!("Failed to decode base64 image: {}", e)))?;
    decode_image_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gradient_image() -> DynamicImage {
        let img = RgbaImage::from_fn(16, 8, |x, y| {
            Rgba([(x * 16) as u8, (y * 32) as u8, ((x + y) * 7) as u8, 200])
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_png_base64_is_lossless() {
        let original = gradient_image();

        let part = to_content_part(&original).unwrap();
        let ContentPart::Image { mime_type, data } = part else {
            panic!("expected an image part");
        };
        assert_eq!(mime_type, "image/png");

        let decoded = decode_base64_image(&data).unwrap();
        assert_eq!(decoded.to_rgba8(), original.to_rgba8());
    }

    #[test]
    fn test_encode_png_writes_png_signature() {
        let bytes = encode_png(&gradient_image()).unwrap();
        assert_eq!(&bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_invalid_base64_is_parse_error() {
        let err = decode_base64_image("!!!invalid-base64!!!").unwrap_err();
        assert!(matches!(err, Error::ResponseParse(_)));
    }

    #[test]
    fn test_non_image_bytes_are_parse_error() {
        let err = decode_image_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::ResponseParse(_)));
    }
}
