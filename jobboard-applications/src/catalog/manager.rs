//! Listing Catalog - ownership-checked CRUD and search
//!
//! Mutations run lookup, then ownership, then field validation, and only
//! touch the collection once all three pass.

use super::ListingFields;
use crate::auth::{require, Permission};
use crate::{ApplicationError, ApplicationResult};
use jobboard_core::performance::measure_sync;
use jobboard_core::{
    log_operation_success, Clock, FilterCriteria, JobListing, Session, SessionConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Dashboard counters over a set of listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total: usize,
    pub distinct_locations: usize,
    pub distinct_organizations: usize,
}

impl CatalogStats {
    pub fn collect<'a, I>(listings: I) -> Self
    where
        I: IntoIterator<Item = &'a JobListing>,
    {
        let mut total = 0;
        let mut locations = HashSet::new();
        let mut organizations = HashSet::new();

        for listing in listings {
            total += 1;
            locations.insert(listing.location.as_str());
            organizations.insert(listing.organization.as_str());
        }

        Self {
            total,
            distinct_locations: locations.len(),
            distinct_organizations: organizations.len(),
        }
    }
}

pub struct ListingCatalog {
    /// Newest first
    listings: Vec<JobListing>,
    clock: Arc<dyn Clock>,
    /// Shown on listings posted by a recruiter with a blank organization
    default_organization: String,
}

impl ListingCatalog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::from_listings(clock, Vec::new())
    }

    /// Build a catalog from existing listings, kept in the given order
    pub fn from_listings(clock: Arc<dyn Clock>, listings: Vec<JobListing>) -> Self {
        Self {
            listings,
            clock,
            default_organization: SessionConfig::default().default_organization,
        }
    }

    pub fn with_default_organization(mut self, organization: impl Into<String>) -> Self {
        self.default_organization = organization.into();
        self
    }

    /// Post a new listing owned by `actor`
    pub fn create(
        &mut self,
        actor: &Session,
        fields: ListingFields,
    ) -> ApplicationResult<JobListing> {
        require(actor, Permission::ManageListings)?;
        let organization = actor
            .organization()
            .ok_or_else(|| ApplicationError::unauthorized("only recruiters can post listings"))?;
        let organization = if organization.trim().is_empty() {
            self.default_organization.clone()
        } else {
            organization.to_string()
        };
        fields.check()?;

        let listing = JobListing {
            id: uuid::Uuid::new_v4().to_string(),
            title: fields.title,
            owner_id: actor.id.clone(),
            organization,
            location: fields.location,
            kind: fields.kind,
            salary: fields.salary,
            description: fields.description,
            requirements: fields.requirements,
            benefits: fields.benefits,
            created_at: self.clock.now(),
            active: true,
        };

        log_operation_success!(
            "listing_create",
            listing_id = %listing.id,
            owner_id = %listing.owner_id
        );
        self.listings.insert(0, listing.clone());
        Ok(listing)
    }

    /// Replace the editable fields of an owned listing in place
    pub fn update(
        &mut self,
        actor: &Session,
        listing_id: &str,
        fields: ListingFields,
    ) -> ApplicationResult<JobListing> {
        let index = self.owned_index(actor, listing_id)?;
        fields.check()?;

        let listing = &mut self.listings[index];
        listing.title = fields.title;
        listing.location = fields.location;
        listing.kind = fields.kind;
        listing.salary = fields.salary;
        listing.description = fields.description;
        listing.requirements = fields.requirements;
        listing.benefits = fields.benefits;

        log_operation_success!("listing_update", listing_id = %listing_id);
        Ok(listing.clone())
    }

    /// Remove an owned listing; a second delete reports `NotFound`
    pub fn delete(&mut self, actor: &Session, listing_id: &str) -> ApplicationResult<()> {
        let index = self.owned_index(actor, listing_id)?;
        self.listings.remove(index);
        log_operation_success!("listing_delete", listing_id = %listing_id);
        Ok(())
    }

    /// Open or close an owned listing to new applications
    pub fn set_active(
        &mut self,
        actor: &Session,
        listing_id: &str,
        active: bool,
    ) -> ApplicationResult<JobListing> {
        let index = self.owned_index(actor, listing_id)?;
        let listing = &mut self.listings[index];
        listing.active = active;
        debug!("Listing {} active = {}", listing_id, active);
        Ok(listing.clone())
    }

    pub fn list(&self) -> &[JobListing] {
        &self.listings
    }

    /// Stable filter over `list()`
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&JobListing> {
        measure_sync("catalog_filter", || {
            self.listings
                .iter()
                .filter(|listing| criteria.matches(listing))
                .collect()
        })
    }

    pub fn get(&self, listing_id: &str) -> Option<&JobListing> {
        self.listings.iter().find(|listing| listing.id == listing_id)
    }

    pub fn listings_by_owner(&self, owner_id: &str) -> Vec<&JobListing> {
        self.listings
            .iter()
            .filter(|listing| listing.owner_id == owner_id)
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::collect(&self.listings)
    }

    /// Resolve a listing the actor owns, without changing anything
    pub fn owned(&self, actor: &Session, listing_id: &str) -> ApplicationResult<&JobListing> {
        let index = self.owned_index(actor, listing_id)?;
        Ok(&self.listings[index])
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    fn owned_index(&self, actor: &Session, listing_id: &str) -> ApplicationResult<usize> {
        let index = self
            .listings
            .iter()
            .position(|listing| listing.id == listing_id)
            .ok_or_else(|| ApplicationError::not_found("listing", listing_id))?;

        if self.listings[index].owner_id != actor.id {
            return Err(ApplicationError::unauthorized(format!(
                "listing {} belongs to another recruiter",
                listing_id
            )));
        }

        Ok(index)
    }
}
