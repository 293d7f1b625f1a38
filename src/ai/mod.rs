//! All AI/LLM functionality

pub mod cohere;
pub mod dispatcher;
pub mod http;
pub mod huggingface;
pub mod mock;
pub mod provider;

// Re-export main types for convenience
pub use cohere::CohereClient;
pub use dispatcher::{Dispatcher, FailureKind, GENERIC_FAILURE_MESSAGE, SummarizationResult};
pub use huggingface::HuggingFaceClient;
pub use provider::{ProviderOutcome, RETRYABLE_STATUSES, SummaryProvider};
