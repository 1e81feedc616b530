//! Core data type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role selector used by sign-in and registration forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Candidate,
    Recruiter,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Candidate => write!(f, "candidate"),
            AccountKind::Recruiter => write!(f, "recruiter"),
        }
    }
}

impl FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "candidate" => Ok(AccountKind::Candidate),
            "recruiter" => Ok(AccountKind::Recruiter),
            _ => Err(format!("Unknown account kind: {}", s)),
        }
    }
}

/// Role of a session; only recruiters carry an organization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Recruiter {
        #[serde(rename = "company")]
        organization: String,
    },
}

impl Role {
    pub fn kind(&self) -> AccountKind {
        match self {
            Role::Candidate => AccountKind::Candidate,
            Role::Recruiter { .. } => AccountKind::Recruiter,
        }
    }

    pub fn organization(&self) -> Option<&str> {
        match self {
            Role::Candidate => None,
            Role::Recruiter { organization } => Some(organization),
        }
    }
}

/// The single authenticated identity active in the process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub email: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(flatten)]
    pub role: Role,
}

impl Session {
    pub fn kind(&self) -> AccountKind {
        self.role.kind()
    }

    pub fn organization(&self) -> Option<&str> {
        self.role.organization()
    }

    pub fn is_recruiter(&self) -> bool {
        matches!(self.role, Role::Recruiter { .. })
    }

    pub fn is_candidate(&self) -> bool {
        matches!(self.role, Role::Candidate)
    }
}

/// Employment kind of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentKind {
    FullTime,
    PartTime,
    Contract,
    Freelance,
}

impl EmploymentKind {
    pub const ALL: [EmploymentKind; 4] = [
        EmploymentKind::FullTime,
        EmploymentKind::PartTime,
        EmploymentKind::Contract,
        EmploymentKind::Freelance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentKind::FullTime => "full-time",
            EmploymentKind::PartTime => "part-time",
            EmploymentKind::Contract => "contract",
            EmploymentKind::Freelance => "freelance",
        }
    }

    /// Human readable label ("Full Time")
    pub fn label(&self) -> &'static str {
        match self {
            EmploymentKind::FullTime => "Full Time",
            EmploymentKind::PartTime => "Part Time",
            EmploymentKind::Contract => "Contract",
            EmploymentKind::Freelance => "Freelance",
        }
    }
}

impl fmt::Display for EmploymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full-time" => Ok(EmploymentKind::FullTime),
            "part-time" => Ok(EmploymentKind::PartTime),
            "contract" => Ok(EmploymentKind::Contract),
            "freelance" => Ok(EmploymentKind::Freelance),
            _ => Err(format!("Unknown employment kind: {}", s)),
        }
    }
}

/// Salary range; `min <= max` is enforced where listings are validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u64,
    pub max: u64,
    pub currency: String,
}

impl SalaryRange {
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

impl fmt::Display for SalaryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} - {}{}",
            self.currency, self.min, self.currency, self.max
        )
    }
}

/// A recruiter-owned job posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    #[serde(rename = "recruiterId")]
    pub owner_id: String,
    #[serde(rename = "company")]
    pub organization: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: EmploymentKind,
    pub salary: SalaryRange,
    pub description: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    #[serde(rename = "postedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "isActive")]
    pub active: bool,
}

/// Employment-kind selector of a listing search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(EmploymentKind),
}

impl KindFilter {
    pub fn matches(&self, kind: EmploymentKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(wanted) => *wanted == kind,
        }
    }
}

impl FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(KindFilter::All)
        } else {
            s.parse().map(KindFilter::Only)
        }
    }
}

/// Listing search criteria, recomputed per query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub kind: KindFilter,
}

impl FilterCriteria {
    pub fn new(query: impl Into<String>, kind: KindFilter) -> Self {
        Self {
            query: query.into(),
            kind,
        }
    }

    /// Case-insensitive substring match on title, organization or location,
    /// combined with the kind selector. An empty query matches everything.
    pub fn matches(&self, listing: &JobListing) -> bool {
        if !self.kind.matches(listing.kind) {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }

        let needle = self.query.to_lowercase();
        [&listing.title, &listing.organization, &listing.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
