use crate::bank::BankError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Account error: {0}")]
    AccountError(#[from] BankError),

    #[error("{service} returned an error (status {status}): {message}")]
    ExternalServiceError {
        service: String,
        status: u16,
        message: String,
    },

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

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid input '{value}' for {field}: {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

/// 錯誤分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Configuration,
    Input,
    Domain,
}

/// 錯誤嚴重程度，決定程式結束碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl DrillError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DrillError::ApiError(_) | DrillError::ExternalServiceError { .. } => {
                ErrorCategory::Network
            }
            DrillError::IoError(_) | DrillError::SerializationError(_) => ErrorCategory::Io,
            DrillError::ConfigError { .. }
            | DrillError::MissingConfigError { .. }
            | DrillError::InvalidConfigValueError { .. }
            | DrillError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            DrillError::InvalidInput { .. } | DrillError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            DrillError::AccountError(_) | DrillError::ProcessingError { .. } => {
                ErrorCategory::Domain
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Domain => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DrillError::ApiError(_) => {
                "Check your network connection and the service endpoint, then try again".to_string()
            }
            DrillError::ExternalServiceError { service, status, .. } => match status {
                401 | 403 => format!("Check the API key configured for {}", service),
                429 => format!("{} is rate limiting requests; wait a moment and retry", service),
                _ => format!("{} may be unavailable; try again later", service),
            },
            DrillError::IoError(_) => "Make sure the file exists and is readable".to_string(),
            DrillError::SerializationError(_) => "Check that the input is valid JSON".to_string(),
            DrillError::MissingConfigError { field } => {
                format!("Set '{}' in the config file or the environment", field)
            }
            DrillError::ConfigError { .. }
            | DrillError::InvalidConfigValueError { .. }
            | DrillError::ConfigValidationError { .. } => {
                "Fix the configuration file and run again (try --dry-run)".to_string()
            }
            DrillError::InvalidInput { .. } | DrillError::ValidationError { .. } => {
                "Correct the input and try again".to_string()
            }
            DrillError::AccountError(_) => "Review the account operation and retry".to_string(),
            DrillError::ProcessingError { .. } => "Run again with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach an external service: {}", self),
            ErrorCategory::Io => format!("Could not read or write a file: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Domain => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DrillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_maps_to_exit_code() {
        let err = DrillError::MissingConfigError {
            field: "llm.api_key".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity().exit_code(), 3);

        let err = DrillError::InvalidInput {
            field: "age".to_string(),
            value: "abc".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(err.severity().exit_code(), 0);
    }

    #[test]
    fn test_bank_error_converts() {
        let err: DrillError = BankError::NotAuthenticated.into();
        assert_eq!(err.category(), ErrorCategory::Domain);
        assert!(err.to_string().contains("not authenticated"));
    }

    #[test]
    fn test_rate_limit_suggestion() {
        let err = DrillError::ExternalServiceError {
            service: "Groq".to_string(),
            status: 429,
            message: "slow down".to_string(),
        };
        assert!(err.recovery_suggestion().contains("rate limiting"));
    }
}
