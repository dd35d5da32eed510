//! Gemini integration for multimodal image editing
//!
//! Requests are an ordered list of [`ContentPart`]s (input images first, the
//! prompt last). Responses are decoded once into an [`ApiResponse`].

pub mod gemini;
pub mod mime;
pub mod mock;
pub mod response;

pub use gemini::GeminiImageClient;
pub use mock::MockGenerationClient;
pub use response::{ApiResponse, RawResponse, TypedPart};

use crate::Result;
use async_trait::async_trait;

/// One unit of a multimodal request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    /// Base64-encoded image bytes tagged with their MIME type.
    Image { mime_type: String, data: String },
    Text(String),
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Submit `contents` to `model` in a single call and return the decoded response.
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        contents: &[ContentPart],
    ) -> Result<ApiResponse>;
}
