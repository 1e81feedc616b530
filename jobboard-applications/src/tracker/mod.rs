//! Application Tracking Module
//!
//! Candidates apply to listings; the recruiter owning a listing moves each
//! application through review, interview and a final decision.

pub mod manager;
pub mod types;

pub use manager::ApplicationTracker;
pub use types::*;
