//! Error types for field synchronization and paging.

use thiserror::Error;

/// Unified error type for Fieldsync.
///
/// Field mismatches and malformed page requests are never errors: they are
/// skipped or normalized. What remains are guard violations and problems
/// with the surrounding configuration.
#[derive(Error, Debug)]
pub enum FieldSyncError {
    /// Flattening recursed past the configured depth limit.
    #[error("Flattening exceeded maximum depth {max_depth} at prefix '{prefix}'")]
    FlattenDepthExceeded { prefix: String, max_depth: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FieldSyncError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::FlattenDepthExceeded { .. } => "FLATTEN_DEPTH_EXCEEDED",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Depth overruns mean the options do not fit the shapes being copied,
    /// so they count as configuration problems alongside loader failures.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::FlattenDepthExceeded { .. } | Self::Configuration(_)
        )
    }
}

impl From<serde_json::Error> for FieldSyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::Configuration(format!("JSON serialization error: {}", err))
    }
}
