//! Primary provider: Cohere's chat API.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::info;

use super::http::{auth_headers, build_client, post_json};
use super::provider::SummaryProvider;
use crate::core::config::AppConfig;
use crate::errors::{ClarioError, ProviderError};

/// Instruction-following chat model. Receives the templated prompt.
pub struct CohereClient {
    http: Client,
    headers: HeaderMap,
    endpoint: String,
    model: String,
}

impl CohereClient {
    pub fn new(
        api_key: &str,
        model: String,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ClarioError> {
        Ok(Self {
            http: build_client(timeout)?,
            headers: auth_headers(api_key)?,
            endpoint: format!("{}/v2/chat", base_url.trim_end_matches('/')),
            model,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClarioError> {
        Self::new(
            &config.cohere_api_key,
            config.cohere_model.clone(),
            config.cohere_base_url.as_str(),
            config.provider_timeout,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Chat request carrying `prompt` as the only user message.
    #[must_use]
    pub fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }]
        })
    }
}

/// Pulls the first content block's text out of a chat response.
pub fn extract_chat_text(response: &Value) -> Result<String, ProviderError> {
    response
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_array())
        .and_then(|blocks| blocks.first())
        .and_then(|block| block.get("text"))
        .and_then(|t| t.as_str())
        .filter(|t| !t.trim().is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| ProviderError::Malformed("No text in chat response".to_string()))
}

#[async_trait]
impl SummaryProvider for CohereClient {
    fn name(&self) -> &str {
        "cohere"
    }

    async fn summarize(&self, input: &str) -> Result<String, ProviderError> {
        #[cfg(feature = "debug-logs")]
        info!("Using Cohere prompt:\n{}", input);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model,
            prompt_chars = input.chars().count(),
            "Requesting summary from Cohere"
        );

        let body = self.request_body(input);
        let response = post_json(&self.http, &self.endpoint, &self.headers, &body).await?;
        extract_chat_text(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CohereClient {
        CohereClient::new(
            "test_key",
            "command-a-03-2025".to_string(),
            "https://api.cohere.com/",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let body = client().request_body("prompt text");
        assert_eq!(body["model"], "command-a-03-2025");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "prompt text");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(client().endpoint(), "https://api.cohere.com/v2/chat");
    }

    #[test]
    fn test_extract_first_block() {
        let response = json!({
            "id": "abc",
            "message": {
                "role": "assistant",
                "content": [
                    { "type": "text", "text": "first" },
                    { "type": "text", "text": "second" }
                ]
            }
        });
        assert_eq!(extract_chat_text(&response).unwrap(), "first");
    }

    #[test]
    fn test_extract_rejects_missing_or_blank_text() {
        assert!(extract_chat_text(&json!({ "message": { "content": [] } })).is_err());
        let blank = json!({ "message": { "content": [{ "text": "  " }] } });
        assert!(extract_chat_text(&blank).is_err());
        assert!(extract_chat_text(&json!({ "unexpected": true })).is_err());
    }
}
