//! Job board core - shared data types and environment capabilities
//!
//! Defines the data model, the error type, configuration, logging setup and
//! the two capabilities the application layer consumes from its environment:
//! key-value persistence and a clock.

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod storage;
pub mod types;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use logging::*;
pub use storage::*;
pub use types::*;

// Re-export commonly used external types
pub use chrono;
pub use tracing;
