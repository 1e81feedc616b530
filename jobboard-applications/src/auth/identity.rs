//! Sign-in and registration forms

use jobboard_core::{AccountKind, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registration form
#[derive(Clone, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub kind: AccountKind,
    /// Only meaningful for recruiters; ignored for candidates
    pub organization: Option<String>,
}

impl Registration {
    pub fn candidate(
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            display_name: display_name.into(),
            kind: AccountKind::Candidate,
            organization: None,
        }
    }

    pub fn recruiter(
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            display_name: display_name.into(),
            kind: AccountKind::Recruiter,
            organization: Some(organization.into()),
        }
    }

    /// Build the tagged role. A recruiter's organization is kept exactly as
    /// entered; a missing one becomes the empty string.
    pub fn role(&self) -> Role {
        match self.kind {
            AccountKind::Candidate => Role::Candidate,
            AccountKind::Recruiter => Role::Recruiter {
                organization: self.organization.clone().unwrap_or_default(),
            },
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("kind", &self.kind)
            .field("organization", &self.organization)
            .finish()
    }
}

/// Sign-in form
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub kind: AccountKind,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            kind,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("kind", &self.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_ignores_organization() {
        let mut registration = Registration::candidate("c@x.com", "pw", "Cara");
        registration.organization = Some("Ignored Inc".to_string());
        assert_eq!(registration.role(), Role::Candidate);
    }

    #[test]
    fn test_recruiter_organization_kept_verbatim() {
        let registration = Registration::recruiter("r@x.com", "pw", "Rob", "TechCorp");
        assert_eq!(registration.role().organization(), Some("TechCorp"));

        let padded = Registration::recruiter("r@x.com", "pw", "Rob", " TechCorp ");
        assert_eq!(padded.role().organization(), Some(" TechCorp "));

        let blank = Registration::recruiter("r@x.com", "pw", "Rob", "   ");
        assert_eq!(blank.role().organization(), Some("   "));

        let mut missing = blank.clone();
        missing.organization = None;
        assert_eq!(missing.role().organization(), Some(""));
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = Credentials::new("a@b.c", "hunter2", AccountKind::Candidate);
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
