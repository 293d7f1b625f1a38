use std::sync::Arc;

use crate::ai::Dispatcher;
use crate::auth::{CredentialStore, InMemoryCredentialStore, SessionStore};
use crate::core::config::AppConfig;
use crate::errors::ClarioError;

/// Everything the handlers share. Nothing here is mutated per request except
/// the session and credential stores, which guard themselves.
pub struct AppState {
    pub config: AppConfig,
    pub dispatcher: Dispatcher,
    pub credentials: Arc<dyn CredentialStore>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        dispatcher: Dispatcher,
        credentials: Arc<dyn CredentialStore>,
    ) -> Arc<Self> {
        let sessions = SessionStore::new(&config.session_secret);
        Arc::new(Self {
            config,
            dispatcher,
            credentials,
            sessions,
        })
    }

    /// Hosted providers plus in-memory account and session storage.
    pub fn from_config(config: AppConfig) -> Result<Arc<Self>, ClarioError> {
        let dispatcher = Dispatcher::from_config(&config)?;
        Ok(Self::new(
            config,
            dispatcher,
            Arc::new(InMemoryCredentialStore::new()),
        ))
    }
}
