use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::provider::SummaryProvider;
use crate::errors::ProviderError;

/// A scripted provider for tests. Replays the same result on every call and
/// records what it was asked to summarize.
pub struct MockProvider {
    name: String,
    result: Result<String, ProviderError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(name: &str, result: Result<String, ProviderError>) -> Self {
        Self {
            name: name.to_string(),
            result,
            delay: None,
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding(name: &str, summary: &str) -> Self {
        Self::new(name, Ok(summary.to_string()))
    }

    pub fn failing_with_status(name: &str, status: u16, body: &str) -> Self {
        Self::new(
            name,
            Err(ProviderError::Status {
                status,
                body: body.to_string(),
            }),
        )
    }

    /// Sleeps for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs
            .lock()
            .map(|inputs| inputs.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SummaryProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn summarize(&self, input: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut inputs) = self.inputs.lock() {
            inputs.push(input.to_string());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}
