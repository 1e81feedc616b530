//! Job board applications - sessions, listings and hiring workflow
//!
//! This crate provides the stateful services the rendering layer talks to:
//!
//! - Single-session identity with durable restore (`session`)
//! - Role permissions (`auth`)
//! - The listing catalog with ownership-checked mutations and search (`catalog`)
//! - Application tracking for candidates and recruiters (`tracker`)
//! - Per-user notifications (`notifications`)
//!
//! ## Architecture
//!
//! - **Core** (jobboard-core): data types, storage and clock capabilities
//! - **Applications** (this crate): services and the `JobBoard` context object
//! - **Presentation**: any UI that holds a `JobBoard` and renders its results
//!
//! All services are synchronous and expect to be driven from a single
//! thread, one user action at a time.

pub mod auth;
pub mod board;
pub mod catalog;
pub mod notifications;
pub mod session;
pub mod tracker;

pub use auth::{Credentials, Permission, Registration};
pub use board::{JobBoard, JobBoardBuilder};
pub use catalog::{CatalogStats, ListingCatalog, ListingDraft, ListingFields};
pub use notifications::{
    format_relative, NewNotification, Notification, NotificationCenter, NotificationKind,
    NotificationPriority,
};
pub use session::SessionStore;
pub use tracker::{
    ApplicationStatus, ApplicationSubmission, ApplicationTracker, Interview, JobApplication,
    StatusFilter,
};

use jobboard_core::JobBoardError;

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Core error: {0}")]
    Core(#[from] JobBoardError),

    #[error("No account is registered")]
    NotRegistered,

    #[error("Invalid email, password or account type")]
    InvalidCredentials,

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid salary range: minimum {min} is greater than maximum {max}")]
    InvalidRange { min: u64, max: u64 },

    #[error("Invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("Already applied to listing {listing_id}")]
    AlreadyApplied { listing_id: String },

    #[error("Cannot move application from {from} to {to}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

impl ApplicationError {
    /// Create an unauthorized error
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(entity: &'static str, id: S) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for failures caused by user input rather than the environment
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Core(_) | Self::Serialization(_))
    }
}
