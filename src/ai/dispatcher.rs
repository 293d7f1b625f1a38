//! Summarization with a primary provider and a single fallback attempt.
//!
//! The dispatcher owns the only decision in the request path: whether a
//! primary failure is worth handing to the fallback. Every call yields exactly
//! one [`SummarizationResult`]; provider errors never escape.

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use super::cohere::CohereClient;
use super::huggingface::HuggingFaceClient;
use super::provider::{ProviderOutcome, SummaryProvider};
use crate::auth::CallerIdentity;
use crate::core::config::AppConfig;
use crate::errors::{ClarioError, ProviderError};
use crate::prompt::{IDENTITY_REPLY, SENTINEL, build_primary_prompt, validate_input};

/// User-facing message for every provider failure. Details stay in the logs.
pub const GENERIC_FAILURE_MESSAGE: &str = "An issue occurred when summarizing text";

pub const UNAUTHORIZED_MESSAGE: &str = "You must be logged in to summarize text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unauthorized,
    Validation,
    /// Primary failed in a way the fallback cannot help with.
    Fatal,
    /// Primary failed retryably and the fallback failed too.
    RetryExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizationResult {
    Ok { summary: String },
    Error { failure: FailureKind, message: String },
}

impl SummarizationResult {
    fn ok(summary: String) -> Self {
        SummarizationResult::Ok { summary }
    }

    fn error(failure: FailureKind, message: impl Into<String>) -> Self {
        SummarizationResult::Error {
            failure,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        match self {
            SummarizationResult::Ok { summary } => Some(summary),
            SummarizationResult::Error { .. } => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            SummarizationResult::Ok { .. } => None,
            SummarizationResult::Error { failure, .. } => Some(*failure),
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    primary: Arc<dyn SummaryProvider>,
    fallback: Arc<dyn SummaryProvider>,
    timeout: Duration,
}

impl Dispatcher {
    /// `timeout` bounds each provider call separately.
    pub fn new(
        primary: Arc<dyn SummaryProvider>,
        fallback: Arc<dyn SummaryProvider>,
        timeout: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            timeout,
        }
    }

    /// Cohere as primary, Hugging Face as fallback.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClarioError> {
        Ok(Self::new(
            Arc::new(CohereClient::from_config(config)?),
            Arc::new(HuggingFaceClient::from_config(config)?),
            config.provider_timeout,
        ))
    }

    pub async fn summarize(&self, text: &str, identity: &CallerIdentity) -> SummarizationResult {
        if !identity.is_authenticated() {
            warn!("Rejected summarization request without a session");
            return SummarizationResult::error(FailureKind::Unauthorized, UNAUTHORIZED_MESSAGE);
        }

        if text == SENTINEL {
            info!("Answering identity sentinel without contacting providers");
            return SummarizationResult::ok(IDENTITY_REPLY.to_string());
        }

        if let Err(e) = validate_input(text) {
            info!(reason = %e, "Rejected summarization input");
            return SummarizationResult::error(FailureKind::Validation, e.to_string());
        }

        let prompt = build_primary_prompt(text);
        let primary = self.primary.as_ref();

        match self.attempt(primary, &prompt).await {
            ProviderOutcome::Success { text: summary } => {
                info!(provider = primary.name(), retried = false, "Summary generated");
                SummarizationResult::ok(summary)
            }
            ProviderOutcome::FatalFailure { message } => {
                error!(
                    provider = primary.name(),
                    retried = false,
                    error = %message,
                    "Primary provider failed with a non-retryable error"
                );
                SummarizationResult::error(FailureKind::Fatal, GENERIC_FAILURE_MESSAGE)
            }
            ProviderOutcome::RetryableFailure { status, detail } => {
                warn!(
                    provider = primary.name(),
                    retried = true,
                    status = ?status,
                    error = %detail,
                    "Primary provider failed, switching to {}",
                    self.fallback.name()
                );
                self.fall_back(text).await
            }
        }
    }

    /// The fallback gets the caller's raw text, not the prompt template.
    async fn fall_back(&self, text: &str) -> SummarizationResult {
        let fallback = self.fallback.as_ref();

        match self.attempt(fallback, text).await {
            ProviderOutcome::Success { text: summary } => {
                info!(provider = fallback.name(), retried = true, "Summary generated");
                SummarizationResult::ok(summary)
            }
            ProviderOutcome::RetryableFailure { detail: message, .. }
            | ProviderOutcome::FatalFailure { message } => {
                error!(
                    provider = fallback.name(),
                    retried = true,
                    error = %message,
                    "Both providers failed"
                );
                SummarizationResult::error(FailureKind::RetryExhausted, GENERIC_FAILURE_MESSAGE)
            }
        }
    }

    async fn attempt(&self, provider: &dyn SummaryProvider, input: &str) -> ProviderOutcome {
        let result = tokio::time::timeout(self.timeout, provider.summarize(input))
            .await
            .unwrap_or(Err(ProviderError::Timeout));
        ProviderOutcome::classify(result)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}
