//! Job Board - the context object handed to the presentation layer
//!
//! Owns exactly one session store, catalog, tracker and notification center.
//! Every operation acts on behalf of the current session.

use crate::auth::{require, require_session, Credentials, Permission, Registration};
use crate::catalog::{CatalogStats, ListingCatalog, ListingDraft};
use crate::notifications::{
    NewNotification, Notification, NotificationCenter, NotificationKind, NotificationPriority,
};
use crate::session::SessionStore;
use crate::tracker::{
    ApplicationStatus, ApplicationSubmission, ApplicationTracker, Interview, JobApplication,
};
use crate::{ApplicationError, ApplicationResult};
use jobboard_core::{
    open_store, Clock, FilterCriteria, JobBoardConfig, JobListing, KeyValueStore, Session,
    SystemClock,
};
use std::sync::Arc;
use tracing::debug;

pub struct JobBoard<S: KeyValueStore> {
    config: JobBoardConfig,
    clock: Arc<dyn Clock>,
    sessions: SessionStore<S>,
    catalog: ListingCatalog,
    tracker: ApplicationTracker,
    notifications: NotificationCenter,
}

/// Builder for JobBoard
pub struct JobBoardBuilder {
    config: JobBoardConfig,
    clock: Option<Arc<dyn Clock>>,
}

impl JobBoardBuilder {
    pub fn new(config: JobBoardConfig) -> Self {
        Self {
            config,
            clock: None,
        }
    }

    /// Use a specific clock instead of the wall clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the board over `storage`, restoring any persisted session
    pub fn build<S: KeyValueStore>(self, storage: S) -> JobBoard<S> {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let catalog = if self.config.catalog.seed_demo_listings {
            ListingCatalog::with_seed_listings(clock.clone(), &self.config.catalog.default_currency)
        } else {
            ListingCatalog::new(clock.clone())
        }
        .with_default_organization(self.config.session.default_organization.clone());

        JobBoard {
            sessions: SessionStore::open(storage, &self.config.session),
            catalog,
            tracker: ApplicationTracker::new(clock.clone()),
            notifications: NotificationCenter::new(clock.clone()),
            clock,
            config: self.config,
        }
    }
}

impl Default for JobBoardBuilder {
    fn default() -> Self {
        Self::new(JobBoardConfig::default())
    }
}

impl JobBoard<Box<dyn KeyValueStore>> {
    /// Build a board over the storage backend named in `config`
    pub fn open(config: JobBoardConfig) -> ApplicationResult<Self> {
        let storage = open_store(&config.storage)?;
        Ok(JobBoardBuilder::new(config).build(storage))
    }
}

impl<S: KeyValueStore> JobBoard<S> {
    pub fn config(&self) -> &JobBoardConfig {
        &self.config
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn catalog(&self) -> &ListingCatalog {
        &self.catalog
    }

    pub fn tracker(&self) -> &ApplicationTracker {
        &self.tracker
    }

    pub fn storage(&self) -> &S {
        self.sessions.storage()
    }

    pub fn storage_mut(&mut self) -> &mut S {
        self.sessions.storage_mut()
    }

    /// Hand the storage capability back, dropping all in-memory state
    pub fn into_storage(self) -> S {
        self.sessions.into_storage()
    }

    // Session

    pub fn register(&mut self, registration: Registration) -> ApplicationResult<Session> {
        self.sessions.register(registration)
    }

    pub fn login(&mut self, credentials: &Credentials) -> ApplicationResult<Session> {
        self.sessions.login(credentials)
    }

    pub fn logout(&mut self) -> ApplicationResult<()> {
        self.sessions.logout()
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.sessions.current_session()
    }

    // Listings

    pub fn post_listing(&mut self, draft: &ListingDraft) -> ApplicationResult<JobListing> {
        let actor = self.actor()?;
        require(&actor, Permission::ManageListings)?;
        let fields = draft.validate(&self.config.catalog.default_currency)?;
        self.catalog.create(&actor, fields)
    }

    pub fn update_listing(
        &mut self,
        listing_id: &str,
        draft: &ListingDraft,
    ) -> ApplicationResult<JobListing> {
        let actor = self.actor()?;
        match draft.validate(&self.config.catalog.default_currency) {
            Ok(fields) => self.catalog.update(&actor, listing_id, fields),
            Err(e) => {
                // Lookup and ownership failures take precedence over field errors
                self.catalog.owned(&actor, listing_id)?;
                Err(e)
            }
        }
    }

    /// Delete a listing along with the applications made to it
    pub fn remove_listing(&mut self, listing_id: &str) -> ApplicationResult<()> {
        let actor = self.actor()?;
        self.catalog.delete(&actor, listing_id)?;
        self.tracker.remove_for_listing(listing_id);
        Ok(())
    }

    pub fn set_listing_active(
        &mut self,
        listing_id: &str,
        active: bool,
    ) -> ApplicationResult<JobListing> {
        let actor = self.actor()?;
        self.catalog.set_active(&actor, listing_id, active)
    }

    /// Public search over every listing; no session needed
    pub fn browse(&self, criteria: &FilterCriteria) -> Vec<&JobListing> {
        self.catalog.filter(criteria)
    }

    /// Listings owned by the current recruiter
    pub fn my_listings(&self) -> ApplicationResult<Vec<&JobListing>> {
        let actor = require_session(self.sessions.current_session())?;
        require(actor, Permission::ManageListings)?;
        Ok(self.catalog.listings_by_owner(&actor.id))
    }

    pub fn stats(&self, criteria: &FilterCriteria) -> CatalogStats {
        CatalogStats::collect(self.catalog.filter(criteria))
    }

    pub fn application_count(&self, listing_id: &str) -> usize {
        self.tracker.application_count(listing_id)
    }

    // Applications

    /// Apply to a listing and notify its owner
    pub fn apply(
        &mut self,
        listing_id: &str,
        submission: ApplicationSubmission,
    ) -> ApplicationResult<JobApplication> {
        let actor = self.actor()?;
        let listing = self
            .catalog
            .get(listing_id)
            .ok_or_else(|| ApplicationError::not_found("listing", listing_id))?;

        let application = self.tracker.apply(&actor, listing, submission)?;

        self.notifications.push(
            NewNotification::new(
                application.recruiter_id.clone(),
                NotificationKind::ApplicationStatus,
                "New Application",
                format!(
                    "{} applied for {}",
                    application.candidate_name, application.listing_title
                ),
            )
            .with_action_url(format!("/applications/{}", application.id)),
        );

        Ok(application)
    }

    pub fn my_applications(&self) -> ApplicationResult<Vec<&JobApplication>> {
        let actor = require_session(self.sessions.current_session())?;
        require(actor, Permission::ApplyToListings)?;
        Ok(self.tracker.for_candidate(&actor.id))
    }

    pub fn inbox(&self) -> ApplicationResult<Vec<&JobApplication>> {
        let actor = require_session(self.sessions.current_session())?;
        self.tracker.inbox(actor)
    }

    pub fn review_application(
        &mut self,
        application_id: &str,
    ) -> ApplicationResult<JobApplication> {
        let actor = self.actor()?;
        let application = self.tracker.review(&actor, application_id)?;
        self.notify_status(&application);
        Ok(application)
    }

    pub fn schedule_interview(
        &mut self,
        application_id: &str,
        interview: Interview,
    ) -> ApplicationResult<JobApplication> {
        let actor = self.actor()?;
        let application = self
            .tracker
            .schedule_interview(&actor, application_id, interview)?;
        self.notify_status(&application);
        Ok(application)
    }

    pub fn accept_application(
        &mut self,
        application_id: &str,
    ) -> ApplicationResult<JobApplication> {
        let actor = self.actor()?;
        let application = self.tracker.accept(&actor, application_id)?;
        self.notify_status(&application);
        Ok(application)
    }

    pub fn reject_application(
        &mut self,
        application_id: &str,
        feedback: Option<String>,
    ) -> ApplicationResult<JobApplication> {
        let actor = self.actor()?;
        let application = self.tracker.reject(&actor, application_id, feedback)?;
        self.notify_status(&application);
        Ok(application)
    }

    // Notifications

    pub fn notifications(&self) -> ApplicationResult<Vec<&Notification>> {
        let recipient = self.recipient()?;
        Ok(self.notifications.for_recipient(&recipient.id))
    }

    pub fn unread_notifications(&self) -> ApplicationResult<usize> {
        let recipient = self.recipient()?;
        Ok(self.notifications.unread_count(&recipient.id))
    }

    pub fn mark_notification_read(&mut self, notification_id: &str) -> ApplicationResult<()> {
        let recipient = self.recipient()?.id.clone();
        self.notifications.mark_read(&recipient, notification_id)
    }

    pub fn mark_all_notifications_read(&mut self) -> ApplicationResult<usize> {
        let recipient = self.recipient()?.id.clone();
        Ok(self.notifications.mark_all_read(&recipient))
    }

    pub fn dismiss_notification(
        &mut self,
        notification_id: &str,
    ) -> ApplicationResult<Notification> {
        let recipient = self.recipient()?.id.clone();
        self.notifications.remove(&recipient, notification_id)
    }

    fn actor(&self) -> ApplicationResult<Session> {
        require_session(self.sessions.current_session()).cloned()
    }

    /// The current session, provided its role receives notifications
    fn recipient(&self) -> ApplicationResult<&Session> {
        let actor = require_session(self.sessions.current_session())?;
        require(actor, Permission::ReceiveNotifications)?;
        Ok(actor)
    }

    fn notify_status(&mut self, application: &JobApplication) {
        let position = format!(
            "{} at {}",
            application.listing_title, application.organization
        );

        let notification = match application.status {
            ApplicationStatus::InterviewScheduled => {
                let when = application
                    .interview
                    .as_ref()
                    .map(|i| i.scheduled_for.format("%b %d, %Y at %H:%M").to_string())
                    .unwrap_or_default();
                NewNotification::new(
                    application.candidate_id.clone(),
                    NotificationKind::InterviewScheduled,
                    "Interview Scheduled",
                    format!("Interview for {} scheduled for {}", position, when),
                )
                .with_priority(NotificationPriority::High)
            }
            ApplicationStatus::Accepted => NewNotification::new(
                application.candidate_id.clone(),
                NotificationKind::ApplicationStatus,
                "Application Accepted",
                format!("Your application for {} has been accepted!", position),
            )
            .with_priority(NotificationPriority::High),
            ApplicationStatus::Rejected => NewNotification::new(
                application.candidate_id.clone(),
                NotificationKind::ApplicationStatus,
                "Application Rejected",
                format!(
                    "Unfortunately, your application for {} was not successful.",
                    position
                ),
            )
            .with_priority(NotificationPriority::Medium),
            ApplicationStatus::Reviewing | ApplicationStatus::Pending => NewNotification::new(
                application.candidate_id.clone(),
                NotificationKind::ApplicationStatus,
                "Application Update",
                format!(
                    "Your application for {} is {}",
                    position,
                    application.status.label().to_lowercase()
                ),
            ),
        };

        debug!(
            "Notifying {} about application {}",
            application.candidate_id, application.id
        );
        self.notifications.push(notification);
    }
}
