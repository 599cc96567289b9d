//! Error types shared by the library modules

use thiserror::Error;

/// Errors raised while reading reference data or building reports
#[derive(Error, Debug)]
pub enum TpsError {
    /// The caller named something that doesn't exist or has the wrong kind
    #[error("Validation error: {0}")]
    Validation(String),

    /// The reference data itself is incomplete for the request
    #[error("Configuration error: {subject} {message}")]
    Configuration { subject: String, message: String },

    /// An option outside its closed set (sort column, strategy, format...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to render graph: {0}")]
    Render(String),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse reference data: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TpsResult<T> = Result<T, TpsError>;

impl TpsError {
    pub fn configuration(subject: impl Into<String>, message: impl Into<String>) -> Self {
        TpsError::Configuration {
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Prefix the subject of a configuration error with its owner
    /// (e.g. the hospital an illness was requested for).
    pub fn within(self, owner: &str) -> Self {
        match self {
            TpsError::Configuration { subject, message } => TpsError::Configuration {
                subject: format!("{owner} has an illness, {subject},"),
                message,
            },
            other => other,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TpsError::Validation(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, TpsError::Configuration { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, TpsError::InvalidArgument(_))
    }
}
