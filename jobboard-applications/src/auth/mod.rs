//! Authentication and Authorization Module
//!
//! Sign-in forms and role permissions:
//! - `identity`: registration and credential forms
//! - `permissions`: what each role may do, checked at every mutation boundary

pub mod identity;
pub mod permissions;

pub use identity::{Credentials, Registration};
pub use permissions::{default_permissions, has_permission, require, require_session, Permission};
