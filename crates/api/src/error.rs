use postboard_types::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Status code {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request cannot be retried")]
    NotRetryable,
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { code, .. } => Some(*code),
            Error::Unauthorized => Some(401),
            Error::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Transport failures, timeouts, 429 and 5xx are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Reqwest(e) => !e.is_builder() && !e.is_decode(),
            Error::Status { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}
