use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("{0}")]
    Other(String),
}

impl From<crate::services::upstream::FetchError> for AppError {
    fn from(err: crate::services::upstream::FetchError) -> Self {
        use crate::services::upstream::FetchError;
        match err {
            FetchError::Config(msg) => AppError::Config(msg),
            FetchError::RateLimit => AppError::RateLimit,
            FetchError::Network(msg) => AppError::Network(msg),
            FetchError::Status(code) => AppError::Network(format!("HTTP status {}", code)),
            FetchError::Parse(msg) => AppError::Parse(msg),
            FetchError::NoData(msg) => AppError::NotFound(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

// Alias for convenience
pub type Error = AppError;
