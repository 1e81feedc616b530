//! Application tracking types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stage of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    InterviewScheduled,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewing,
        ApplicationStatus::InterviewScheduled,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::InterviewScheduled => "interview-scheduled",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Reviewing => "Reviewing",
            ApplicationStatus::InterviewScheduled => "Interview Scheduled",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Accepted and rejected applications never move again
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }

    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;

        match (self, next) {
            (Pending, Reviewing | InterviewScheduled | Accepted | Rejected) => true,
            (Reviewing, InterviewScheduled | Accepted | Rejected) => true,
            // Rescheduling keeps the status
            (InterviewScheduled, InterviewScheduled | Accepted | Rejected) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| format!("Unknown application status: {}", s))
    }
}

/// Status selector of the tracker and inbox views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub scheduled_for: DateTime<Utc>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// What a candidate submits alongside an application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    /// Opaque reference to an uploaded resume
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}

/// A candidate's application to one listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: String,
    #[serde(rename = "jobId")]
    pub listing_id: String,
    #[serde(rename = "jobTitle")]
    pub listing_title: String,
    #[serde(rename = "company")]
    pub organization: String,
    pub recruiter_id: String,
    pub candidate_id: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub feedback: Option<String>,
    pub interview: Option<Interview>,
}
