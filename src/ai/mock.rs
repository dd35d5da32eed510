use super::{ApiResponse, ContentPart, GenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A recorded call to [`MockGenerationClient`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub api_key: String,
    pub model: String,
    pub contents: Vec<ContentPart>,
}

/// In-memory stand-in for the Gemini client.
///
/// Responses are replayed in order and cycle once exhausted. With no
/// configured responses every call yields [`ApiResponse::Empty`].
pub struct MockGenerationClient {
    responses: Arc<Mutex<Vec<ApiResponse>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_response(self, response: ApiResponse) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Make every call fail with [`Error::RemoteService`].
    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// A handle sharing this mock's state, for inspecting calls after the
    /// mock itself has been boxed into an adapter.
    pub fn handle(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            calls: Arc::clone(&self.calls),
            failure: Arc::clone(&self.failure),
        }
    }
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationService for MockGenerationClient {
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        contents: &[ContentPart],
    ) -> Result<ApiResponse> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                api_key: api_key.to_string(),
                model: model.to_string(),
                contents: contents.to_vec(),
            });
            calls.len() - 1
        };

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::RemoteService(message));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(ApiResponse::Empty)
        } else {
            Ok(responses[index % responses.len()].clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let client = MockGenerationClient::new();
        let contents = vec![ContentPart::Text("hello".to_string())];

        client
            .generate_content("key", "model-a", &contents)
            .await
            .unwrap();

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].api_key, "key");
        assert_eq!(calls[0].model, "model-a");
        assert_eq!(calls[0].contents, contents);
    }

    #[tokio::test]
    async fn test_mock_cycles_responses() {
        let client = MockGenerationClient::new()
            .with_response(ApiResponse::Text("one".to_string()))
            .with_response(ApiResponse::Text("two".to_string()));

        let first = client.generate_content("k", "m", &[]).await.unwrap();
        let second = client.generate_content("k", "m", &[]).await.unwrap();
        let third = client.generate_content("k", "m", &[]).await.unwrap();

        assert_eq!(first, ApiResponse::Text("one".to_string()));
        assert_eq!(second, ApiResponse::Text("two".to_string()));
        assert_eq!(third, ApiResponse::Text("one".to_string()));
    }

    #[tokio::test]
    async fn test_mock_defaults_to_empty() {
        let client = MockGenerationClient::new();
        let response = client.generate_content("k", "m", &[]).await.unwrap();
        assert_eq!(response, ApiResponse::Empty);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let client = MockGenerationClient::new().with_failure("boom".to_string());

        let err = client.generate_content("k", "m", &[]).await.unwrap_err();
        assert!(matches!(err, Error::RemoteService(_)));

        let handle = client.handle();
        assert_eq!(handle.get_call_count(), 1);
    }
}
