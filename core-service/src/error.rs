use thiserror::Error;

/// Failure of a single duration lookup.
///
/// Every variant maps to one HTTP status and one caller-facing category
/// string; see [`DurationError::status_code`] and [`DurationError::category`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DurationError {
    #[error("URL is required")]
    UrlRequired,

    #[error("Invalid URL format")]
    InvalidUrl,

    #[error("Failed to fetch audio file: {0}")]
    Network(String),

    #[error("Audio file not found")]
    NotFound,

    #[error("Access denied to audio file")]
    Forbidden,

    #[error("Failed to fetch audio file: {status} {reason}")]
    UpstreamStatus { status: u16, reason: String },

    #[error("URL does not point to an audio file")]
    UnsupportedMediaType,

    #[error("Failed to parse audio metadata: {0}")]
    Parse(String),

    #[error("Could not extract duration from audio file")]
    MissingDuration,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`DurationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Forbidden,
    UpstreamStatus,
    UnsupportedMediaType,
    NetworkError,
    ParseError,
    InternalError,
}

impl DurationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DurationError::UrlRequired | DurationError::InvalidUrl => ErrorKind::InvalidInput,
            DurationError::Network(_) => ErrorKind::NetworkError,
            DurationError::NotFound => ErrorKind::NotFound,
            DurationError::Forbidden => ErrorKind::Forbidden,
            DurationError::UpstreamStatus { .. } => ErrorKind::UpstreamStatus,
            DurationError::UnsupportedMediaType => ErrorKind::UnsupportedMediaType,
            DurationError::Parse(_) | DurationError::MissingDuration => ErrorKind::ParseError,
            DurationError::Internal(_) => ErrorKind::InternalError,
        }
    }

    /// HTTP status reported to the caller
    pub fn status_code(&self) -> u16 {
        match self {
            DurationError::UrlRequired | DurationError::InvalidUrl => 400,
            DurationError::Forbidden => 403,
            DurationError::NotFound => 404,
            DurationError::UnsupportedMediaType => 415,
            DurationError::UpstreamStatus { status, .. } => *status,
            DurationError::Network(_)
            | DurationError::Parse(_)
            | DurationError::MissingDuration
            | DurationError::Internal(_) => 500,
        }
    }

    /// Human-readable category, the `error` field of the response body
    pub fn category(&self) -> String {
        match self {
            DurationError::Network(_) => "Failed to fetch audio file".to_string(),
            DurationError::Parse(_) => "Failed to parse audio metadata".to_string(),
            DurationError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Underlying detail, the optional `message` field of the response body
    pub fn detail(&self) -> Option<String> {
        match self {
            DurationError::Network(message)
            | DurationError::Parse(message)
            | DurationError::Internal(message) => Some(message.clone()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DurationError>;

/// Failure while assembling the service at startup
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Core initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Configuration error: {0}")]
    Config(#[from] core_runtime::Error),
}
