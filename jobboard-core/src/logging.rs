//! Unified logging system
//!
//! Provides structured logging with performance monitoring and configurable output

use serde::{Deserialize, Serialize};
use std::io;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Whether to include file and line information
    pub include_location: bool,
    /// Whether to include thread information
    pub include_thread: bool,
    /// Whether to include timestamps
    pub include_timestamp: bool,
    /// Whether to log to file
    pub log_to_file: bool,
    /// Log file path (if log_to_file is true)
    pub log_file_path: Option<String>,
    /// Whether to enable performance monitoring
    pub enable_performance_monitoring: bool,
    /// Custom filter directives
    pub filter_directives: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            include_location: true,
            include_thread: false,
            include_timestamp: true,
            log_to_file: false,
            log_file_path: None,
            enable_performance_monitoring: true,
            filter_directives: vec![
                "jobboard_core=debug".to_string(),
                "jobboard_applications=debug".to_string(),
            ],
        }
    }
}

/// Initialize the logging system
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    for directive in &config.filter_directives {
        filter = filter.add_directive(directive.parse()?);
    }

    let span_events = if config.enable_performance_monitoring {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let file = if config.log_to_file {
        let log_path = config
            .log_file_path
            .as_ref()
            .ok_or("log_file_path must be specified when log_to_file is true")?;
        Some(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?,
        )
    } else {
        None
    };

    let registry = tracing_subscriber::registry().with(filter);

    // Each format yields a distinct layer type, so the writer is chosen per arm.
    macro_rules! install {
        ($layer:expr) => {{
            let layer = $layer
                .with_span_events(span_events)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_thread_ids(config.include_thread)
                .with_thread_names(config.include_thread);
            match (file, config.include_timestamp) {
                (Some(file), true) => registry.with(layer.with_writer(file)).try_init()?,
                (Some(file), false) => registry
                    .with(layer.without_time().with_writer(file))
                    .try_init()?,
                (None, true) => registry.with(layer.with_writer(io::stdout)).try_init()?,
                (None, false) => registry
                    .with(layer.without_time().with_writer(io::stdout))
                    .try_init()?,
            }
        }};
    }

    match config.format {
        LogFormat::Json => install!(fmt::layer().json()),
        LogFormat::Pretty => install!(fmt::layer().pretty()),
        LogFormat::Compact => install!(fmt::layer().compact()),
    }

    Ok(())
}

/// Performance monitoring utilities
pub mod performance {
    use std::time::Instant;
    use tracing::info_span;

    /// Measure and log execution time of a synchronous operation
    pub fn measure_sync<F, T>(operation_name: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let _span = info_span!("performance", operation = operation_name).entered();
        let start = Instant::now();

        let result = f();

        let duration = start.elapsed();
        tracing::debug!(
            target: "performance",
            operation = operation_name,
            duration_us = duration.as_micros() as u64,
            "Operation completed"
        );

        result
    }
}

/// Logging macros for common patterns
#[macro_export]
macro_rules! log_operation_start {
    ($operation:expr) => {
        tracing::debug!(
            operation = $operation,
            "Starting operation"
        );
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::debug!(
            operation = $operation,
            $($field)*,
            "Starting operation"
        );
    };
}

#[macro_export]
macro_rules! log_operation_success {
    ($operation:expr) => {
        tracing::info!(
            operation = $operation,
            "Operation completed successfully"
        );
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::info!(
            operation = $operation,
            $($field)*,
            "Operation completed successfully"
        );
    };
}

#[macro_export]
macro_rules! log_operation_error {
    ($operation:expr, $error:expr) => {
        tracing::warn!(
            operation = $operation,
            error = %$error,
            "Operation failed"
        );
    };
    ($operation:expr, $error:expr, $($field:tt)*) => {
        tracing::warn!(
            operation = $operation,
            error = %$error,
            $($field)*,
            "Operation failed"
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logging_requires_path() {
        let config = LoggingConfig {
            log_to_file: true,
            log_file_path: None,
            ..LoggingConfig::default()
        };
        assert!(init_logging(&config).is_err());
    }

    #[test]
    fn test_measure_sync_returns_value() {
        let value = performance::measure_sync("add", || 2 + 2);
        assert_eq!(value, 4);
    }
}
