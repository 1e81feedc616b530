//! Persisted account record
//!
//! The stored JSON object carries the session fields plus the password the
//! sign-in form is compared against: `{id, email, name, type, company?, password}`.

use jobboard_core::Session;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAccount {
    #[serde(flatten)]
    pub session: Session,
    pub password: String,
}

impl StoredAccount {
    pub fn new(session: Session, password: impl Into<String>) -> Self {
        Self {
            session,
            password: password.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

impl From<StoredAccount> for Session {
    fn from(record: StoredAccount) -> Self {
        record.session
    }
}

impl fmt::Debug for StoredAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredAccount")
            .field("session", &self.session)
            .field("password", &"<redacted>")
            .finish()
    }
}
