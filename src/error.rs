//! Error types and handling for the citytour application

use thiserror::Error;

/// Main error type for the citytour application
#[derive(Error, Debug)]
pub enum TourError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The place search produced nothing to plan a route with
    #[error("No attractions found for '{city}'")]
    NoAttractions { city: String },

    /// A request referenced a stop that is not in the working set
    #[error("Unknown stop: {id}")]
    UnknownStop { id: String },

    /// Operation needs a plan but the session has none yet
    #[error("No trip has been planned in this session")]
    NoPlan,

}

impl TourError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TourError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TourError::Validation { message } => format!("Invalid input: {message}"),
            TourError::NoAttractions { city } => {
                format!("No attractions found for '{city}', so no route could be planned.")
            }
            TourError::UnknownStop { .. } => "That stop is not part of the current trip.".to_string(),
            TourError::NoPlan => "Plan a trip first.".to_string(),
        }
    }
}

/// Failure of a single call to an external collaborator.
///
/// Callers decide the fallback; this type only makes the failure explicit and
/// loggable.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Provider error {code}: {message}")]
    Provider { code: String, message: String },

    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for FetchError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(err) => err.into(),
            reqwest_middleware::Error::Middleware(err) => FetchError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TourError::config("missing API key");
        assert!(matches!(config_err, TourError::Config { .. }));

        let validation_err = TourError::validation("empty city");
        assert!(matches!(validation_err, TourError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = TourError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let validation_err = TourError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));

        let empty = TourError::NoAttractions { city: "Atlantis".to_string() };
        assert!(empty.user_message().contains("Atlantis"));
    }

    #[test]
    fn test_session_errors_name_the_problem() {
        assert!(TourError::NoPlan.user_message().contains("Plan a trip"));
        let unknown = TourError::UnknownStop { id: "nowhere".to_string() };
        assert_eq!(unknown.to_string(), "Unknown stop: nowhere");
    }

    #[test]
    fn test_json_error_becomes_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(FetchError::from(err), FetchError::Parse(_)));
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Provider {
            code: "403".to_string(),
            message: "Invalid Host".to_string(),
        };
        assert_eq!(err.to_string(), "Provider error 403: Invalid Host");
        assert_eq!(FetchError::NotConfigured("weather API key").to_string(), "weather API key is not configured");
    }
}
