//! Response shapes returned by the generation service.
//!
//! [`RawResponse`] mirrors the three optional fields the service can expose.
//! It is collapsed exactly once into [`ApiResponse`], which fixes the
//! priority order: direct image, then typed parts, then plain text.

use super::mime::is_image_mime;

/// A response part that carries a MIME type and a base64 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedPart {
    pub mime_type: String,
    pub data: String,
}

impl TypedPart {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }
}

/// Boundary view of a response before the priority order is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub image: Option<Vec<u8>>,
    pub parts: Option<Vec<TypedPart>>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    /// Raw encoded image bytes.
    Image(Vec<u8>),
    Parts(Vec<TypedPart>),
    Text(String),
    Empty,
}

impl ApiResponse {
    /// First part whose type is in the `image/` family. Later image parts are ignored.
    pub fn first_image_part(parts: &[TypedPart]) -> Option<&TypedPart> {
        parts.iter().find(|part| part.is_image())
    }
}

impl From<RawResponse> for ApiResponse {
    fn from(raw: RawResponse) -> Self {
        match raw {
            RawResponse {
                image: Some(bytes), ..
            } if !bytes.is_empty() => ApiResponse::Image(bytes),
            RawResponse {
                parts: Some(parts), ..
            } => ApiResponse::Parts(parts),
            RawResponse {
                text: Some(text), ..
            } => ApiResponse::Text(text),
            _ => ApiResponse::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_image_beats_parts_and_text() {
        let raw = RawResponse {
            image: Some(vec![1, 2, 3]),
            parts: Some(vec![TypedPart::new("image/png", "AAAA")]),
            text: Some("caption".to_string()),
        };

        assert_eq!(ApiResponse::from(raw), ApiResponse::Image(vec![1, 2, 3]));
    }

    #[test]
    fn test_parts_beat_text() {
        let parts = vec![TypedPart::new("image/png", "AAAA")];
        let raw = RawResponse {
            image: None,
            parts: Some(parts.clone()),
            text: Some("caption".to_string()),
        };

        assert_eq!(ApiResponse::from(raw), ApiResponse::Parts(parts));
    }

    #[test]
    fn test_empty_direct_image_is_ignored() {
        let raw = RawResponse {
            image: Some(Vec::new()),
            parts: None,
            text: Some("only text".to_string()),
        };

        assert_eq!(
            ApiResponse::from(raw),
            ApiResponse::Text("only text".to_string())
        );
    }

    #[test]
    fn test_nothing_is_empty() {
        assert_eq!(ApiResponse::from(RawResponse::default()), ApiResponse::Empty);
    }

    #[test]
    fn test_first_image_part_skips_non_image_parts() {
        let parts = vec![
            TypedPart::new("application/json", "e30="),
            TypedPart::new("audio/wav", "UklGRg=="),
            TypedPart::new("image/png", "first"),
            TypedPart::new("image/jpeg", "second"),
        ];

        let selected = ApiResponse::first_image_part(&parts).unwrap();
        assert_eq!(selected.data, "first");
    }

    #[test]
    fn test_first_image_part_none_without_images() {
        let parts = vec![TypedPart::new("application/pdf", "JVBERi0=")];
        assert!(ApiResponse::first_image_part(&parts).is_none());
    }
}
