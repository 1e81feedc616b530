//! Common test utilities for job board tests
//!
//! Shared board setup, sign-up helpers and listing forms.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use jobboard_applications::{JobBoard, JobBoardBuilder, ListingDraft, Registration};
use jobboard_core::{JobBoardConfig, ManualClock, MemoryStore, Session};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

/// Initialize logging for tests
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("jobboard_applications=debug,info")
            .with_test_writer()
            .try_init();
    });
}

pub fn fixed_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
    ))
}

/// A board with no demonstration listings
pub fn empty_board(clock: Arc<ManualClock>) -> JobBoard<MemoryStore> {
    init_logging();
    let mut config = JobBoardConfig::default();
    config.catalog.seed_demo_listings = false;
    JobBoardBuilder::new(config)
        .with_clock(clock)
        .build(MemoryStore::new())
}

pub fn seeded_board(clock: Arc<ManualClock>) -> JobBoard<MemoryStore> {
    init_logging();
    JobBoardBuilder::new(JobBoardConfig::default())
        .with_clock(clock)
        .build(MemoryStore::new())
}

pub fn sign_up_recruiter(board: &mut JobBoard<MemoryStore>, name: &str, org: &str) -> Session {
    board
        .register(Registration::recruiter(
            format!("{}@{}.com", name.to_lowercase(), org.to_lowercase().replace(' ', "")),
            "recruiter-pw",
            name,
            org,
        ))
        .unwrap()
}

pub fn sign_up_candidate(board: &mut JobBoard<MemoryStore>, name: &str) -> Session {
    board
        .register(Registration::candidate(
            format!("{}@example.com", name.to_lowercase()),
            "candidate-pw",
            name,
        ))
        .unwrap()
}

pub fn draft(title: &str, location: &str, kind: &str, min: u64, max: u64) -> ListingDraft {
    ListingDraft {
        title: title.to_string(),
        location: location.to_string(),
        kind: kind.to_string(),
        salary_min: min.to_string(),
        salary_max: max.to_string(),
        currency: None,
        description: format!("{} role", title),
        requirements: "Communication, Teamwork".to_string(),
        benefits: "Health Insurance".to_string(),
    }
}
