//! Listing Catalog Module
//!
//! The in-memory collection of job listings, newest first, with
//! ownership-checked mutations and read-side search.

pub mod draft;
pub mod manager;
pub mod seed;

pub use draft::{ListingDraft, ListingFields};
pub use manager::{CatalogStats, ListingCatalog};
