use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    ValidationError(String),
    ParseError(String),
    LoadError(String),
    WeatherError(String),
    LLMError(String),
    ConfigError(String),
    IoError(String),
}

impl AppError {
    /// The bare message without the category prefix, as shown to API clients.
    pub fn message(&self) -> &str {
        match self {
            AppError::Internal(msg)
            | AppError::ValidationError(msg)
            | AppError::ParseError(msg)
            | AppError::LoadError(msg)
            | AppError::WeatherError(msg)
            | AppError::LLMError(msg)
            | AppError::ConfigError(msg)
            | AppError::IoError(msg) => msg,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::ValidationError(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::LoadError(msg) => write!(f, "Load error: {}", msg),
            AppError::WeatherError(msg) => write!(f, "Weather error: {}", msg),
            AppError::LLMError(msg) => write!(f, "LLM error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        AppError::ValidationError(format!(
            "Please fill all required fields ({})",
            fields.join(", ")
        ))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_strips_category() {
        let err = AppError::WeatherError("WEATHER_API_KEY is not configured".to_string());
        assert_eq!(err.message(), "WEATHER_API_KEY is not configured");
        assert_eq!(
            err.to_string(),
            "Weather error: WEATHER_API_KEY is not configured"
        );
    }

    #[test]
    fn test_only_validation_is_client_error() {
        assert!(AppError::ValidationError("x".to_string()).is_validation());
        assert!(!AppError::LoadError("x".to_string()).is_validation());
    }
}
