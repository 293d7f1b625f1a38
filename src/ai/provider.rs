//! Capability boundary shared by every summarization backend.

use async_trait::async_trait;

use crate::errors::ProviderError;

/// Primary failures with these statuses are handed to the fallback provider:
/// model not found or misconfigured, rate limited, server error.
pub const RETRYABLE_STATUSES: [u16; 3] = [404, 429, 500];

/// A remote service that turns an input string into summary text.
///
/// Implementations hold no per-request state and can be shared across tasks.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn summarize(&self, input: &str) -> Result<String, ProviderError>;
}

/// What a single provider call means for the dispatcher's control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Success { text: String },
    /// `status` is `None` when the call timed out.
    RetryableFailure { status: Option<u16>, detail: String },
    FatalFailure { message: String },
}

impl ProviderOutcome {
    #[must_use]
    pub fn classify(result: Result<String, ProviderError>) -> Self {
        match result {
            Ok(text) => ProviderOutcome::Success { text },
            Err(ProviderError::Status { status, body }) if RETRYABLE_STATUSES.contains(&status) => {
                ProviderOutcome::RetryableFailure {
                    status: Some(status),
                    detail: body,
                }
            }
            Err(ProviderError::Timeout) => ProviderOutcome::RetryableFailure {
                status: None,
                detail: ProviderError::Timeout.to_string(),
            },
            Err(other) => ProviderOutcome::FatalFailure {
                message: other.to_string(),
            },
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, ProviderOutcome::RetryableFailure { .. })
    }
}
