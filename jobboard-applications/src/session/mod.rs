//! Session Management Module
//!
//! Owns the single active identity and its persisted record under one fixed
//! storage key, so a restart restores whoever was signed in.

pub mod record;
pub mod store;

pub use record::StoredAccount;
pub use store::SessionStore;
