//! Gemini `generateContent` payload types.

use crate::ai::{ContentPart, RawResponse, TypedPart};
use serde::{Deserialize, Serialize};

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding. `Other` absorbs
/// part kinds this crate does not use (function calls, file references).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        thought: bool,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        thought: bool,
    },
    Other(serde_json::Value),
}

/// Base64 inline payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl From<&ContentPart> for Part {
    fn from(part: &ContentPart) -> Self {
        match part {
            ContentPart::Image { mime_type, data } => Part::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.clone(),
                    data: data.clone(),
                },
                thought: false,
            },
            ContentPart::Text(text) => Part::Text {
                text: text.clone(),
                thought: false,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

impl GenerateContentRequest {
    /// Single user turn carrying `parts` in order, asking for text and image output.
    pub fn user_turn(parts: &[ContentPart]) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: parts.iter().map(Part::from).collect(),
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            },
        }
    }
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

/// Candidate completion item returned by Gemini.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl From<GenerateContentResponse> for RawResponse {
    fn from(response: GenerateContentResponse) -> Self {
        let Some(candidate) = response.candidates.into_iter().next() else {
            if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
                tracing::warn!("Gemini blocked the prompt: {}", reason);
            }
            return RawResponse::default();
        };

        if let Some(reason) = &candidate.finish_reason {
            tracing::debug!("Gemini finish reason: {}", reason);
        }

        let mut typed = Vec::new();
        let mut texts = Vec::new();
        for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
            match part {
                Part::InlineData {
                    inline_data,
                    thought: false,
                } => typed.push(TypedPart::new(inline_data.mime_type, inline_data.data)),
                Part::Text {
                    text,
                    thought: false,
                } => texts.push(text),
                Part::InlineData { thought: true, .. }
                | Part::Text { thought: true, .. }
                | Part::Other(_) => {}
            }
        }

        RawResponse {
            image: None,
            parts: (!typed.is_empty()).then_some(typed),
            text: (!texts.is_empty()).then(|| texts.concat()),
        }
    }
}
