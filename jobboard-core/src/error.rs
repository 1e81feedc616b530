//! Unified error handling system
//!
//! Provides structured error types with context, recovery suggestions, and proper error chaining

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type JobBoardResult<T> = Result<T, JobBoardError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: std::collections::HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: std::collections::HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Infrastructure error type shared by every job board crate
#[derive(Error, Debug)]
pub enum JobBoardError {
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        context: ErrorContext,
    },

    #[error("Resource not found: {resource}")]
    NotFound {
        resource: String,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl JobBoardError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            JobBoardError::Storage { context, .. } => Some(context),
            JobBoardError::Config { context, .. } => Some(context),
            JobBoardError::Validation { context, .. } => Some(context),
            JobBoardError::NotFound { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Check if error is recoverable
    ///
    /// Storage and IO failures may clear up on a later attempt; everything
    /// else needs different input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, JobBoardError::Storage { .. } | JobBoardError::Io(_))
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            JobBoardError::Config { .. } | JobBoardError::Validation { .. } => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Configuration or validation error"
                );
            }
            JobBoardError::Storage { .. } | JobBoardError::Io(_) => {
                warn!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Storage error (may be recoverable)"
                );
            }
            _ => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Error occurred"
                );
            }
        }
    }
}

/// Convenience macros for creating errors with context
#[macro_export]
macro_rules! storage_error {
    ($msg:expr, $component:expr) => {
        $crate::JobBoardError::Storage {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        $crate::JobBoardError::Storage {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: $crate::ErrorContext::new($component),
        }
    };
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr, $component:expr) => {
        $crate::JobBoardError::Config {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check your configuration file"),
        }
    };
}

#[macro_export]
macro_rules! not_found_error {
    ($resource:expr, $component:expr) => {
        $crate::JobBoardError::NotFound {
            resource: $resource.to_string(),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check if the resource exists"),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let context = ErrorContext::new("storage")
            .with_operation("write")
            .with_metadata("key", "user")
            .with_suggestion("Check permissions");

        assert_eq!(context.component, "storage");
        assert_eq!(context.operation.as_deref(), Some("write"));
        assert_eq!(context.metadata.get("key").map(String::as_str), Some("user"));
        assert_eq!(context.recovery_suggestions.len(), 1);
        assert!(!context.error_id.is_empty());
    }

    #[test]
    fn test_recoverability() {
        let storage = storage_error!("disk full", "file_store");
        assert!(storage.is_recoverable());
        assert!(storage.context().is_some());

        let config = config_error!("bad key", "config");
        assert!(!config.is_recoverable());

        let json: JobBoardError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(!json.is_recoverable());
        assert!(json.context().is_none());
    }
}
