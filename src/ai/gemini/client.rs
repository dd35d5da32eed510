use crate::ai::mime::{is_image_mime, sniff_image_mime};
use crate::ai::RawResponse;
use crate::config::DEFAULT_BASE_URL;
use crate::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::types::GenerateContentResponse;

/// Lightweight Gemini REST client for `generateContent`.
///
/// The API key and model are supplied per call so one client can serve
/// requests with different credentials.
pub struct GeminiHttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl GeminiHttpClient {
    pub fn new(timeout: Duration) -> Self {
        Self::new_with_client(timeout, Client::new())
    }

    pub fn new_with_client(timeout: Duration, client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Calls Gemini's `generateContent` endpoint.
    ///
    /// `model` may be a bare ID or carry a `models/` prefix.
    pub async fn generate_content<Req: Serialize>(
        &self,
        api_key: &str,
        model: &str,
        request: &Req,
    ) -> Result<RawResponse> {
        let model = model.strip_prefix("models/").unwrap_or(model);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, model
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                Error::RemoteService(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            return Err(Error::RemoteService(format!(
                "status {}: {}",
                status, error_text
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let body = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read Gemini response body: {}", e);
            Error::RemoteService(e.to_string())
        })?;
        tracing::debug!(
            "Gemini responded with {} bytes ({})",
            body.len(),
            content_type
        );

        if is_image_mime(&content_type)
            || (!content_type.contains("json") && sniff_image_mime(&body).is_some())
        {
            return Ok(RawResponse {
                image: Some(body.to_vec()),
                ..RawResponse::default()
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(
                "Failed to parse Gemini response: {}\nBody: {}",
                e,
                String::from_utf8_lossy(&body)
            );
            Error::ResponseParse(e.to_string())
        })?;

        Ok(parsed.into())
    }
}
