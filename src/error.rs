// src/error.rs
// Classified failure taxonomy for the discovery pipeline. Fallback layers
// match on the class, never on provider message text.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    /// Required API key or setting is absent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network failure, timeout, or non-success status from an external call.
    #[error("transport error ({endpoint}): {message}")]
    Transport {
        /// Short endpoint label for diagnostics ("gemini", "serper").
        endpoint: &'static str,
        message: String,
    },

    /// The response did not contain the expected text path or parseable JSON.
    #[error("unexpected AI output format: {0}")]
    Format(String),

    /// JSON parsed but required keys were missing or mistyped.
    #[error("AI output missing required fields: {0}")]
    Shape(String),
}

impl ScoutError {
    pub fn transport(endpoint: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            endpoint,
            message: err.to_string(),
        }
    }
}

/// Result alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_endpoint_label() {
        let err = ScoutError::transport("serper", "connection refused");
        assert_eq!(
            err.to_string(),
            "transport error (serper): connection refused"
        );
    }

    #[test]
    fn shape_and_format_are_distinct_classes() {
        let shape = ScoutError::Shape("trending_categories".into());
        let format = ScoutError::Format("no JSON found".into());
        assert!(matches!(shape, ScoutError::Shape(_)));
        assert!(matches!(format, ScoutError::Format(_)));
    }
}
