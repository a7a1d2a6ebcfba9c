use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Unexpected response shape from {endpoint}: {message}")]
    ResponseShapeError { endpoint: String, message: String },

    #[error("Step '{step}' timed out after {timeout_ms}ms")]
    TimeoutError { step: String, timeout_ms: u64 },

    #[error("Step '{step}' was cancelled")]
    CancelledError { step: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ContentError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContentError::HttpError(_)
            | ContentError::TimeoutError { .. }
            | ContentError::CancelledError { .. } => ErrorCategory::Network,
            ContentError::ApiError { .. } => ErrorCategory::Upstream,
            ContentError::SerializationError(_) | ContentError::ResponseShapeError { .. } => {
                ErrorCategory::Data
            }
            ContentError::ConfigError { .. }
            | ContentError::MissingConfigError { .. }
            | ContentError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ContentError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Upstream => match self {
                ContentError::CancelledError { .. } => ErrorSeverity::Low,
                _ => ErrorSeverity::Medium,
            },
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Transient failures are worth another attempt later.
    pub fn is_retryable(&self) -> bool {
        match self {
            ContentError::HttpError(e) => e.is_timeout() || e.is_connect(),
            ContentError::ApiError { status, .. } => *status == 429 || *status >= 500,
            ContentError::TimeoutError { .. } => true,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ContentError::HttpError(_) => "Could not reach the content service".to_string(),
            ContentError::ApiError { status, message } => {
                format!("The content service answered with {}: {}", status, message)
            }
            ContentError::TimeoutError { step, .. } => {
                format!("The content service took too long during {}", step)
            }
            ContentError::CancelledError { step } => format!("Request cancelled during {}", step),
            ContentError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            ContentError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the backend URL is reachable and try again",
            ErrorCategory::Upstream => "Check the backend logs and the Notion integration access",
            ErrorCategory::Data => "The upstream payload changed shape; inspect it with --verbose",
            ErrorCategory::Configuration => {
                "Fix the configuration file or the NOTION_* / FOLIO_* environment variables"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
