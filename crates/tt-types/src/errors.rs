use thiserror::Error;

/// Main error type for TrialTrack.
#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Tracking client is not configured: {message}")]
    NotConfigured { message: String },

    #[error("Transport error during {operation}: {message}")]
    Transport { operation: String, message: String },

    #[error("Request rejected by tracking service: {reason}")]
    Rejected { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackingError {
    /// Whether this error means the client exists but has no credential.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured { .. })
    }
}

/// Result type alias for TrialTrack operations
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::TrackingError::Config(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = TrackingError::Transport {
            operation: "log_metrics".to_string(),
            message: "connection reset".to_string(),
        };

        assert!(error.to_string().contains("log_metrics"));
        assert!(error.to_string().contains("connection reset"));
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TrackingError = json_err.into();

        match err {
            TrackingError::Serialization(_) => (),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_not_configured_predicate() {
        let err = TrackingError::NotConfigured {
            message: "missing api key".into(),
        };
        assert!(err.is_not_configured());
        assert!(!config_error!("bad metric {}", "x").is_not_configured());
    }

    #[test]
    fn test_config_macro() {
        let config_err = config_error!("Missing field: {}", "metric_name");
        assert!(config_err.to_string().contains("metric_name"));
    }
}
