//! HTTP plumbing shared by the hosted providers.

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::errors::{ClarioError, ProviderError};

/// Builds a client whose requests give up after `timeout`.
pub fn build_client(timeout: Duration) -> Result<Client, ClarioError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ClarioError::HttpError(format!("Failed to build provider HTTP client: {e}")))
}

pub fn auth_headers(token: &str) -> Result<HeaderMap, ClarioError> {
    let mut headers = HeaderMap::new();
    let auth_value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| ClarioError::ConfigError(format!("Invalid Authorization header: {e}")))?;
    headers.insert(AUTHORIZATION, auth_value);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// POSTs `body` and returns the parsed JSON of a 2xx reply.
///
/// Non-2xx replies become [`ProviderError::Status`] carrying the raw body.
pub async fn post_json(
    client: &Client,
    url: &str,
    headers: &HeaderMap,
    body: &Value,
) -> Result<Value, ProviderError> {
    let response = client
        .post(url)
        .headers(headers.clone())
        .json(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_else(|e| {
            format!("Failed to read error response body (status {status}): {e}")
        });
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body: error_text,
        });
    }

    debug!(url = %url, status = %status, "Provider responded");

    response
        .json::<Value>()
        .await
        .map_err(|e| ProviderError::Malformed(format!("Failed to parse provider response: {e}")))
}
