use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClarioError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to access credential store: {0}")]
    StoreError(String),

    #[error("Failed to hash password: {0}")]
    PasswordError(String),

    #[error("Failed to run HTTP server: {0}")]
    ServerError(String),
}

impl From<bcrypt::BcryptError> for ClarioError {
    fn from(error: bcrypt::BcryptError) -> Self {
        ClarioError::PasswordError(error.to_string())
    }
}

impl From<anyhow::Error> for ClarioError {
    fn from(error: anyhow::Error) -> Self {
        ClarioError::ServerError(error.to_string())
    }
}

impl From<std::io::Error> for ClarioError {
    fn from(error: std::io::Error) -> Self {
        ClarioError::ServerError(error.to_string())
    }
}

/// Failure of a single call to a summarization provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("provider responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider call timed out")]
    Timeout,

    #[error("provider request failed: {0}")]
    Transport(String),

    #[error("provider response was malformed: {0}")]
    Malformed(String),
}

impl ProviderError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ProviderError::Timeout
        } else if let Some(status) = error.status() {
            ProviderError::Status {
                status: status.as_u16(),
                body: error.to_string(),
            }
        } else if error.is_decode() {
            ProviderError::Malformed(error.to_string())
        } else {
            ProviderError::Transport(error.to_string())
        }
    }
}

/// Input rejected before any provider is contacted.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter some text to summarize")]
    Empty,

    #[error("Please enter text to summarize, not a number")]
    NumericOnly,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Username or password is incorrect")]
    InvalidCredentials,

    #[error("Username and password are required")]
    MissingFields,

    #[error(transparent)]
    Internal(#[from] ClarioError),
}
