//! Fallback provider: a Hugging Face hosted summarization model.
//!
//! The model has no instruction following. It must be sent the raw user text,
//! never the primary prompt template.

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

pub struct HuggingFaceClient {
    http: Client,
    headers: HeaderMap,
    endpoint: String,
    model: String,
}

impl HuggingFaceClient {
    pub fn new(
        token: &str,
        model: String,
        provider: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ClarioError> {
        Ok(Self {
            http: build_client(timeout)?,
            headers: auth_headers(token)?,
            endpoint: format!(
                "{}/{}/models/{}",
                base_url.trim_end_matches('/'),
                provider.trim_matches('/'),
                model.trim_matches('/')
            ),
            model,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClarioError> {
        Self::new(
            &config.hf_token,
            config.hf_model.clone(),
            &config.hf_provider,
            config.hf_base_url.as_str(),
            config.provider_timeout,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn request_body(input: &str) -> Value {
        json!({ "inputs": input })
    }
}

/// Reads `summary_text` from either `[{...}]` or a bare object.
pub fn extract_summary_text(response: &Value) -> Result<String, ProviderError> {
    let item = match response {
        Value::Array(items) => items.first(),
        other => Some(other),
    };

    item.and_then(|i| i.get("summary_text"))
        .and_then(|t| t.as_str())
        .filter(|t| !t.trim().is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| ProviderError::Malformed("No summary_text in response".to_string()))
}

#[async_trait]
impl SummaryProvider for HuggingFaceClient {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn summarize(&self, input: &str) -> Result<String, ProviderError> {
        info!(
            model = %self.model,
            input_chars = input.chars().count(),
            "Requesting summary from Hugging Face"
        );

        let body = Self::request_body(input);
        let response = post_json(&self.http, &self.endpoint, &self.headers, &body).await?;
        extract_summary_text(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_layout() {
        let client = HuggingFaceClient::new(
            "hf_token",
            "sshleifer/distilbart-cnn-12-6".to_string(),
            "hf-inference",
            "https://router.huggingface.co/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://router.huggingface.co/hf-inference/models/sshleifer/distilbart-cnn-12-6"
        );
    }

    #[test]
    fn test_body_carries_raw_input_only() {
        let body = HuggingFaceClient::request_body("raw text");
        assert_eq!(body, json!({ "inputs": "raw text" }));
    }

    #[test]
    fn test_extract_from_array_and_object() {
        let array = json!([{ "summary_text": "from array" }]);
        let object = json!({ "summary_text": "from object" });
        assert_eq!(extract_summary_text(&array).unwrap(), "from array");
        assert_eq!(extract_summary_text(&object).unwrap(), "from object");
    }

    #[test]
    fn test_extract_missing_field() {
        assert!(extract_summary_text(&json!([])).is_err());
        assert!(extract_summary_text(&json!({ "error": "loading" })).is_err());
    }
}
