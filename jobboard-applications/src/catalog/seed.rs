//! Demonstration listings loaded into a fresh catalog

use super::ListingCatalog;
use chrono::Duration;
use jobboard_core::{Clock, EmploymentKind, JobListing, SalaryRange};
use std::sync::Arc;

struct SeedListing {
    id: &'static str,
    title: &'static str,
    organization: &'static str,
    location: &'static str,
    kind: EmploymentKind,
    salary: (u64, u64),
    description: &'static str,
    requirements: &'static [&'static str],
    benefits: &'static [&'static str],
    days_ago: i64,
    owner_id: &'static str,
}

const SEED_LISTINGS: &[SeedListing] = &[
    SeedListing {
        id: "1",
        title: "Senior Frontend Developer",
        organization: "TechCorp Inc.",
        location: "San Francisco, CA",
        kind: EmploymentKind::FullTime,
        salary: (120_000, 180_000),
        description: "We are looking for a skilled Frontend Developer to join our team and help build amazing user experiences. You will work with React, TypeScript, and modern development tools.",
        requirements: &["React", "TypeScript", "Node.js", "5+ years experience"],
        benefits: &["Health Insurance", "Remote Work", "401k", "Stock Options"],
        days_ago: 2,
        owner_id: "recruiter1",
    },
    SeedListing {
        id: "2",
        title: "UX/UI Designer",
        organization: "Design Studio",
        location: "New York, NY",
        kind: EmploymentKind::FullTime,
        salary: (80_000, 120_000),
        description: "Join our creative team to design beautiful and intuitive user interfaces. You will work closely with developers and product managers.",
        requirements: &["Figma", "Adobe Creative Suite", "User Research", "3+ years experience"],
        benefits: &["Health Insurance", "Flexible Hours", "Creative Freedom"],
        days_ago: 5,
        owner_id: "recruiter2",
    },
    SeedListing {
        id: "3",
        title: "Data Scientist",
        organization: "Analytics Pro",
        location: "Austin, TX",
        kind: EmploymentKind::Contract,
        salary: (90_000, 140_000),
        description: "Analyze complex datasets and build machine learning models to drive business insights and decision making.",
        requirements: &["Python", "Machine Learning", "SQL", "Statistics"],
        benefits: &["Flexible Schedule", "Learning Budget", "Remote Options"],
        days_ago: 7,
        owner_id: "recruiter3",
    },
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl ListingCatalog {
    /// A catalog pre-filled with the demonstration listings, newest first
    pub fn with_seed_listings(clock: Arc<dyn Clock>, currency: &str) -> Self {
        let now = clock.now();
        let listings = SEED_LISTINGS
            .iter()
            .map(|seed| JobListing {
                id: seed.id.to_string(),
                title: seed.title.to_string(),
                owner_id: seed.owner_id.to_string(),
                organization: seed.organization.to_string(),
                location: seed.location.to_string(),
                kind: seed.kind,
                salary: SalaryRange {
                    min: seed.salary.0,
                    max: seed.salary.1,
                    currency: currency.to_string(),
                },
                description: seed.description.to_string(),
                requirements: strings(seed.requirements),
                benefits: strings(seed.benefits),
                created_at: now - Duration::days(seed.days_ago),
                active: true,
            })
            .collect();

        Self::from_listings(clock, listings)
    }
}
