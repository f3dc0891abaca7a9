use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Description is empty")]
    EmptyInput,

    #[error("Drawing service unavailable: {reason}")]
    ServiceUnavailable { reason: String },

    #[error("Generation failed: {message}")]
    GenerationFailed { message: String },

    #[error("Malformed AI response: {detail}")]
    MalformedResponse { detail: String },

    #[error("Sign-in was cancelled")]
    AuthCancelled,

    #[error("Persistence failed: {message}")]
    PersistenceFailed { message: String },

    #[error("No generated drawing available")]
    NoResult,

    #[error("Generation superseded by a newer request")]
    Superseded,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason} (got '{value}')")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DrawError {
    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            message: message.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    pub fn persistence_failed(message: impl Into<String>) -> Self {
        Self::PersistenceFailed {
            message: message.into(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            reason: reason.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DrawError::EmptyInput | DrawError::NoResult | DrawError::Superseded => {
                ErrorSeverity::Low
            }
            DrawError::ServiceUnavailable { .. }
            | DrawError::GenerationFailed { .. }
            | DrawError::HttpError(_)
            | DrawError::AuthCancelled => ErrorSeverity::Medium,
            DrawError::MalformedResponse { .. }
            | DrawError::PersistenceFailed { .. }
            | DrawError::SerializationError(_) => ErrorSeverity::High,
            DrawError::IoError(_)
            | DrawError::ConfigError { .. }
            | DrawError::InvalidConfigValueError { .. }
            | DrawError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Inline message shown to the user; never contains internal details.
    pub fn user_friendly_message(&self) -> String {
        match self {
            DrawError::EmptyInput => "Please describe the drawing first.".to_string(),
            DrawError::ServiceUnavailable { .. } => {
                "The drawing service is unreachable right now.".to_string()
            }
            DrawError::GenerationFailed { message } => {
                if message.is_empty() {
                    "Generation failed. Please try again.".to_string()
                } else {
                    message.clone()
                }
            }
            DrawError::HttpError(_) => "Generation failed. Please try again.".to_string(),
            DrawError::MalformedResponse { .. } => {
                "The AI returned a response that could not be read. Please try again.".to_string()
            }
            DrawError::AuthCancelled => "Please login to save models".to_string(),
            DrawError::PersistenceFailed { .. } => "Failed to save. Please try again.".to_string(),
            DrawError::NoResult => "Nothing to save or export yet.".to_string(),
            DrawError::Superseded => "A newer generation replaced this one.".to_string(),
            DrawError::IoError(e) => format!("File system error: {}", e),
            DrawError::SerializationError(_) => "Could not encode model metadata.".to_string(),
            DrawError::ConfigError { message } => format!("Configuration error: {}", message),
            DrawError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            DrawError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DrawError::EmptyInput => "Pass a description or pick one with --preset",
            DrawError::ServiceUnavailable { .. } => {
                "Check the service endpoint and your network connection, then retry"
            }
            DrawError::GenerationFailed { .. } | DrawError::HttpError(_) => {
                "Resubmit the request; try another model with --model if it keeps failing"
            }
            DrawError::MalformedResponse { .. } => "Resubmit the request",
            DrawError::AuthCancelled => "Sign in (provide --token) before saving",
            DrawError::PersistenceFailed { .. } => "Retry the save once the service responds",
            DrawError::NoResult => "Generate a drawing first",
            DrawError::Superseded => "No action needed",
            DrawError::IoError(_) => "Check that the output path exists and is writable",
            DrawError::SerializationError(_) => "Report this as a bug",
            DrawError::ConfigError { .. }
            | DrawError::InvalidConfigValueError { .. }
            | DrawError::MissingConfigError { .. } => "Fix the configuration and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, DrawError>;
