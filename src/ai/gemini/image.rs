use super::client::GeminiHttpClient;
use super::types::GenerateContentRequest;
use crate::ai::{ApiResponse, ContentPart, GenerationService};
use crate::config::Config;
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(timeout: Duration) -> Self {
        Self::new_with_client(timeout, reqwest::Client::new())
    }

    pub fn new_with_client(timeout: Duration, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(timeout, client),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.timeout).with_base_url(config.base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl GenerationService for GeminiImageClient {
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        contents: &[ContentPart],
    ) -> Result<ApiResponse> {
        tracing::debug!(
            "Sending {} content parts to Gemini model {}",
            contents.len(),
            model
        );

        let request = GenerateContentRequest::user_turn(contents);
        let raw = self.http.generate_content(api_key, model, &request).await?;
        Ok(raw.into())
    }
}
