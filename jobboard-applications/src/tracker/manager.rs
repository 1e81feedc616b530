//! Application Tracker - applications and their review workflow

use super::{ApplicationStatus, ApplicationSubmission, Interview, JobApplication, StatusFilter};
use crate::auth::{require, Permission};
use crate::{ApplicationError, ApplicationResult};
use jobboard_core::{log_operation_success, Clock, JobListing, Session};
use std::sync::Arc;
use tracing::debug;

pub struct ApplicationTracker {
    /// Newest first
    applications: Vec<JobApplication>,
    clock: Arc<dyn Clock>,
}

impl ApplicationTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            applications: Vec::new(),
            clock,
        }
    }

    /// Submit `candidate`'s application to an open listing
    pub fn apply(
        &mut self,
        candidate: &Session,
        listing: &JobListing,
        submission: ApplicationSubmission,
    ) -> ApplicationResult<JobApplication> {
        require(candidate, Permission::ApplyToListings)?;

        if !listing.active {
            return Err(ApplicationError::invalid_field(
                "listing",
                format!("{} is not accepting applications", listing.title),
            ));
        }

        if self
            .applications
            .iter()
            .any(|app| app.listing_id == listing.id && app.candidate_id == candidate.id)
        {
            return Err(ApplicationError::AlreadyApplied {
                listing_id: listing.id.clone(),
            });
        }

        let application = JobApplication {
            id: uuid::Uuid::new_v4().to_string(),
            listing_id: listing.id.clone(),
            listing_title: listing.title.clone(),
            organization: listing.organization.clone(),
            recruiter_id: listing.owner_id.clone(),
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.display_name.clone(),
            candidate_email: candidate.email.clone(),
            status: ApplicationStatus::Pending,
            applied_at: self.clock.now(),
            resume: submission.resume,
            cover_letter: submission.cover_letter,
            feedback: None,
            interview: None,
        };

        log_operation_success!(
            "application_submit",
            candidate_id = %candidate.id,
            listing_id = %listing.id
        );
        self.applications.insert(0, application.clone());
        Ok(application)
    }

    pub fn get(&self, application_id: &str) -> Option<&JobApplication> {
        self.applications.iter().find(|app| app.id == application_id)
    }

    /// The candidate's own applications, newest first
    pub fn for_candidate(&self, candidate_id: &str) -> Vec<&JobApplication> {
        self.applications
            .iter()
            .filter(|app| app.candidate_id == candidate_id)
            .collect()
    }

    /// Applications to listings owned by `recruiter`, newest first
    pub fn inbox(&self, recruiter: &Session) -> ApplicationResult<Vec<&JobApplication>> {
        require(recruiter, Permission::ReviewApplications)?;
        Ok(self
            .applications
            .iter()
            .filter(|app| app.recruiter_id == recruiter.id)
            .collect())
    }

    pub fn filter_by_status<'a>(
        applications: &[&'a JobApplication],
        filter: StatusFilter,
    ) -> Vec<&'a JobApplication> {
        applications
            .iter()
            .copied()
            .filter(|app| filter.matches(app.status))
            .collect()
    }

    pub fn pending_count(applications: &[&JobApplication]) -> usize {
        applications
            .iter()
            .filter(|app| app.status == ApplicationStatus::Pending)
            .count()
    }

    pub fn application_count(&self, listing_id: &str) -> usize {
        self.applications
            .iter()
            .filter(|app| app.listing_id == listing_id)
            .count()
    }

    pub fn review(
        &mut self,
        actor: &Session,
        application_id: &str,
    ) -> ApplicationResult<JobApplication> {
        self.transition(actor, application_id, ApplicationStatus::Reviewing, |_| {})
    }

    /// Schedule, or reschedule, an interview
    pub fn schedule_interview(
        &mut self,
        actor: &Session,
        application_id: &str,
        interview: Interview,
    ) -> ApplicationResult<JobApplication> {
        self.transition(
            actor,
            application_id,
            ApplicationStatus::InterviewScheduled,
            |app| app.interview = Some(interview),
        )
    }

    pub fn accept(
        &mut self,
        actor: &Session,
        application_id: &str,
    ) -> ApplicationResult<JobApplication> {
        self.transition(actor, application_id, ApplicationStatus::Accepted, |_| {})
    }

    pub fn reject(
        &mut self,
        actor: &Session,
        application_id: &str,
        feedback: Option<String>,
    ) -> ApplicationResult<JobApplication> {
        self.transition(actor, application_id, ApplicationStatus::Rejected, |app| {
            app.feedback = feedback
        })
    }

    /// Drop every application to a removed listing; returns how many went
    pub fn remove_for_listing(&mut self, listing_id: &str) -> usize {
        let before = self.applications.len();
        self.applications.retain(|app| app.listing_id != listing_id);
        let removed = before - self.applications.len();
        if removed > 0 {
            debug!("Removed {} applications to listing {}", removed, listing_id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }

    fn transition<F>(
        &mut self,
        actor: &Session,
        application_id: &str,
        next: ApplicationStatus,
        update: F,
    ) -> ApplicationResult<JobApplication>
    where
        F: FnOnce(&mut JobApplication),
    {
        require(actor, Permission::ReviewApplications)?;

        let application = self
            .applications
            .iter_mut()
            .find(|app| app.id == application_id)
            .ok_or_else(|| ApplicationError::not_found("application", application_id))?;

        if application.recruiter_id != actor.id {
            return Err(ApplicationError::unauthorized(format!(
                "application {} is for another recruiter's listing",
                application_id
            )));
        }

        if !application.status.can_transition_to(next) {
            return Err(ApplicationError::InvalidTransition {
                from: application.status,
                to: next,
            });
        }

        let from = application.status;
        application.status = next;
        update(application);

        log_operation_success!(
            "application_transition",
            application_id = %application_id,
            from = %from,
            to = %next
        );
        Ok(application.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_core::{EmploymentKind, ManualClock, Role, SalaryRange};

    fn session(id: &str, role: Role) -> Session {
        Session {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            display_name: id.to_uppercase(),
            role,
        }
    }

    fn candidate(id: &str) -> Session {
        session(id, Role::Candidate)
    }

    fn recruiter(id: &str) -> Session {
        session(
            id,
            Role::Recruiter {
                organization: "TechCorp".to_string(),
            },
        )
    }

    fn listing(id: &str, owner: &str) -> JobListing {
        JobListing {
            id: id.to_string(),
            title: "Engineer".to_string(),
            owner_id: owner.to_string(),
            organization: "TechCorp".to_string(),
            location: "Remote".to_string(),
            kind: EmploymentKind::FullTime,
            salary: SalaryRange {
                min: 1,
                max: 2,
                currency: "$".to_string(),
            },
            description: "Work".to_string(),
            requirements: Vec::new(),
            benefits: Vec::new(),
            created_at: chrono::Utc::now(),
            active: true,
        }
    }

    fn tracker() -> ApplicationTracker {
        ApplicationTracker::new(Arc::new(ManualClock::new(chrono::Utc::now())))
    }

    #[test]
    fn test_apply_once_per_listing() {
        let mut tracker = tracker();
        let job = listing("l1", "r1");

        let app = tracker
            .apply(&candidate("c1"), &job, ApplicationSubmission::default())
            .unwrap();
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(app.recruiter_id, "r1");

        let again = tracker.apply(&candidate("c1"), &job, ApplicationSubmission::default());
        assert!(matches!(again, Err(ApplicationError::AlreadyApplied { .. })));

        tracker
            .apply(&candidate("c2"), &job, ApplicationSubmission::default())
            .unwrap();
        assert_eq!(tracker.application_count("l1"), 2);
    }

    #[test]
    fn test_apply_rules() {
        let mut tracker = tracker();
        let mut job = listing("l1", "r1");

        let err = tracker
            .apply(&recruiter("r2"), &job, ApplicationSubmission::default())
            .unwrap_err();
        assert!(err.is_unauthorized());

        job.active = false;
        assert!(matches!(
            tracker.apply(&candidate("c1"), &job, ApplicationSubmission::default()),
            Err(ApplicationError::InvalidField { field: "listing", .. })
        ));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_review_workflow() {
        let mut tracker = tracker();
        let owner = recruiter("r1");
        let app = tracker
            .apply(&candidate("c1"), &listing("l1", "r1"), ApplicationSubmission::default())
            .unwrap();

        tracker.review(&owner, &app.id).unwrap();
        let interview = Interview {
            scheduled_for: chrono::Utc::now(),
            location: Some("123 Tech Street".to_string()),
            notes: None,
        };
        let scheduled = tracker
            .schedule_interview(&owner, &app.id, interview.clone())
            .unwrap();
        assert_eq!(scheduled.interview, Some(interview));

        let rejected = tracker
            .reject(&owner, &app.id, Some("Position filled".to_string()))
            .unwrap();
        assert_eq!(rejected.feedback.as_deref(), Some("Position filled"));

        assert!(matches!(
            tracker.accept(&owner, &app.id),
            Err(ApplicationError::InvalidTransition {
                from: ApplicationStatus::Rejected,
                to: ApplicationStatus::Accepted
            })
        ));
    }

    #[test]
    fn test_only_owner_reviews() {
        let mut tracker = tracker();
        let app = tracker
            .apply(&candidate("c1"), &listing("l1", "r1"), ApplicationSubmission::default())
            .unwrap();

        assert!(tracker.accept(&recruiter("r2"), &app.id).unwrap_err().is_unauthorized());
        assert!(tracker.accept(&candidate("c1"), &app.id).unwrap_err().is_unauthorized());
        assert!(tracker.accept(&recruiter("r1"), "missing").unwrap_err().is_not_found());
        assert_eq!(tracker.get(&app.id).unwrap().status, ApplicationStatus::Pending);
    }

    #[test]
    fn test_inbox_and_status_filters() {
        let mut tracker = tracker();
        let owner = recruiter("r1");
        let first = tracker
            .apply(&candidate("c1"), &listing("l1", "r1"), ApplicationSubmission::default())
            .unwrap();
        tracker
            .apply(&candidate("c2"), &listing("l1", "r1"), ApplicationSubmission::default())
            .unwrap();
        tracker
            .apply(&candidate("c1"), &listing("l2", "r2"), ApplicationSubmission::default())
            .unwrap();
        tracker.accept(&owner, &first.id).unwrap();

        let inbox = tracker.inbox(&owner).unwrap();
        assert_eq!(inbox.len(), 2);
        assert_eq!(ApplicationTracker::pending_count(&inbox), 1);

        let accepted = ApplicationTracker::filter_by_status(
            &inbox,
            StatusFilter::Only(ApplicationStatus::Accepted),
        );
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].id, first.id);

        assert_eq!(tracker.for_candidate("c1").len(), 2);
        assert!(tracker.inbox(&candidate("c1")).unwrap_err().is_unauthorized());

        assert_eq!(tracker.remove_for_listing("l1"), 2);
        assert_eq!(tracker.len(), 1);
    }
}
