//! Notification Module
//!
//! Per-user notifications raised by the hiring workflow.

pub mod center;
pub mod types;

pub use center::{format_relative, NotificationCenter};
pub use types::*;
