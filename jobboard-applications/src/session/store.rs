//! Session Store - single-session identity over a key-value capability
//!
//! Every successful register or login writes the full account record through
//! to storage; logout removes it. A failed login changes nothing.

use super::StoredAccount;
use crate::auth::{Credentials, Registration};
use crate::{ApplicationError, ApplicationResult};
use jobboard_core::{
    log_operation_error, log_operation_start, log_operation_success, KeyValueStore, Session,
    SessionConfig,
};
use tracing::{debug, info, warn};

pub struct SessionStore<S: KeyValueStore> {
    storage: S,
    storage_key: String,
    current: Option<Session>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Open the store and restore the persisted session, if any.
    ///
    /// A missing, unreadable or malformed record yields no session.
    pub fn open(storage: S, config: &SessionConfig) -> Self {
        let mut store = Self {
            storage,
            storage_key: config.storage_key.clone(),
            current: None,
        };

        store.current = match store.load_record() {
            Ok(Some(record)) => {
                debug!("Restored session for {}", record.session.email);
                Some(record.into())
            }
            Ok(None) => None,
            Err(ApplicationError::Core(e)) => {
                e.log();
                None
            }
            Err(e) => {
                warn!(
                    "Ignoring unreadable session record under '{}': {}",
                    store.storage_key, e
                );
                None
            }
        };

        store
    }

    /// Create a fresh account, persist it and make it current
    pub fn register(&mut self, registration: Registration) -> ApplicationResult<Session> {
        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            email: registration.email.clone(),
            display_name: registration.display_name.clone(),
            role: registration.role(),
        };

        let record = StoredAccount::new(session.clone(), registration.password);
        self.storage.set(&self.storage_key, &record.to_json()?)?;

        log_operation_success!(
            "session_register",
            kind = %session.kind(),
            account_id = %session.id
        );
        self.current = Some(session.clone());
        Ok(session)
    }

    /// Sign in against the persisted record.
    ///
    /// Email, password and account kind must all match exactly.
    pub fn login(&mut self, credentials: &Credentials) -> ApplicationResult<Session> {
        log_operation_start!("session_login", email = %credentials.email);

        let record = match self.load_record() {
            Ok(Some(record)) => record,
            Ok(None) => return Err(ApplicationError::NotRegistered),
            Err(ApplicationError::Serialization(e)) => {
                warn!("Stored account record is malformed: {}", e);
                return Err(ApplicationError::NotRegistered);
            }
            Err(e) => {
                log_operation_error!("session_login", e);
                return Err(e);
            }
        };

        if record.session.email != credentials.email
            || record.password != credentials.password
            || record.session.kind() != credentials.kind
        {
            debug!("Rejected sign-in for {}", credentials.email);
            return Err(ApplicationError::InvalidCredentials);
        }

        // Write through so a restart restores this session
        self.storage.set(&self.storage_key, &record.to_json()?)?;

        let session = Session::from(record);
        log_operation_success!(
            "session_login",
            kind = %session.kind(),
            account_id = %session.id
        );
        self.current = Some(session.clone());
        Ok(session)
    }

    /// Clear the current session and its persisted record. Idempotent.
    pub fn logout(&mut self) -> ApplicationResult<()> {
        self.storage.remove(&self.storage_key)?;
        if let Some(session) = self.current.take() {
            info!("Signed out account {}", session.id);
        }
        Ok(())
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Direct access to the backing store; the current session is unaffected
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Hand the storage capability back, dropping in-memory state
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn load_record(&self) -> ApplicationResult<Option<StoredAccount>> {
        match self.storage.get(&self.storage_key)? {
            Some(raw) => Ok(Some(StoredAccount::from_json(&raw)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_core::{AccountKind, MemoryStore};

    fn open(storage: MemoryStore) -> SessionStore<MemoryStore> {
        SessionStore::open(storage, &SessionConfig::default())
    }

    #[test]
    fn test_register_sets_current_and_persists() {
        let mut store = open(MemoryStore::new());
        assert!(!store.is_authenticated());

        let session = store
            .register(Registration::candidate("cara@example.com", "pw", "Cara"))
            .unwrap();

        assert_eq!(store.current_session(), Some(&session));
        assert!(store.storage().get("user").unwrap().is_some());
    }

    #[test]
    fn test_login_requires_registration() {
        let mut store = open(MemoryStore::new());
        let result = store.login(&Credentials::new("a@b.c", "pw", AccountKind::Candidate));
        assert!(matches!(result, Err(ApplicationError::NotRegistered)));
    }

    #[test]
    fn test_failed_login_keeps_state() {
        let mut store = open(MemoryStore::new());
        store
            .register(Registration::candidate("cara@example.com", "pw", "Cara"))
            .unwrap();
        let before = store.storage().get("user").unwrap();

        let result = store.login(&Credentials::new(
            "cara@example.com",
            "wrong",
            AccountKind::Candidate,
        ));
        assert!(matches!(result, Err(ApplicationError::InvalidCredentials)));
        assert_eq!(store.storage().get("user").unwrap(), before);
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let mut store = open(MemoryStore::new());
        store
            .register(Registration::candidate("cara@example.com", "pw", "Cara"))
            .unwrap();

        store.logout().unwrap();
        store.logout().unwrap();
        assert!(store.current_session().is_none());
        assert!(store.storage().is_empty());
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> jobboard_core::JobBoardResult<Option<String>> {
            Err(jobboard_core::storage_error!("disk unavailable", "test_store"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> jobboard_core::JobBoardResult<()> {
            Err(jobboard_core::storage_error!("disk unavailable", "test_store"))
        }

        fn remove(&mut self, _key: &str) -> jobboard_core::JobBoardResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_storage_failure_on_open_yields_no_session() {
        let mut store = SessionStore::open(FailingStore, &SessionConfig::default());
        assert!(store.current_session().is_none());

        let result = store.login(&Credentials::new("a@b.c", "pw", AccountKind::Candidate));
        assert!(matches!(result, Err(ApplicationError::Core(_))));
    }

    #[test]
    fn test_malformed_record_yields_no_session() {
        let mut storage = MemoryStore::new();
        storage.set("user", "{broken").unwrap();

        let mut store = open(storage);
        assert!(store.current_session().is_none());

        let result = store.login(&Credentials::new("a@b.c", "pw", AccountKind::Candidate));
        assert!(matches!(result, Err(ApplicationError::NotRegistered)));
    }
}
