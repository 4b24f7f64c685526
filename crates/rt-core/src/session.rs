//! # Session Holder
//!
//! The single persisted session slot. Logging in overwrites whatever
//! session was there; logging out clears it.

use std::sync::Arc;

use log::info;

use crate::error::Result;
use crate::models::{Session, User};
use crate::storage::{self, SESSION_KEY};
use crate::traits::{AuthProvider, KeyValueStore};

pub struct SessionHolder {
    store: Arc<dyn KeyValueStore>,
    auth: Arc<dyn AuthProvider>,
}

impl SessionHolder {
    pub fn new(store: Arc<dyn KeyValueStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { store, auth }
    }

    /// Mints a token for `user` and persists the session, replacing any prior one.
    pub fn login(&self, user: User) -> Result<Session> {
        let session = Session {
            user,
            token: self.auth.mint_token()?,
        };

        storage::save(&*self.store, SESSION_KEY, &session)?;

        info!("{} login: new session", session.user.email);
        Ok(session)
    }

    /// The persisted session; `None` if absent or unreadable.
    pub fn current(&self) -> Result<Option<Session>> {
        storage::load(&*self.store, SESSION_KEY)
    }

    pub fn logout(&self) -> Result<()> {
        self.store.remove(SESSION_KEY)?;
        info!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::test_support::{fake_auth, user};

    fn holder() -> (Arc<MemoryStore>, SessionHolder) {
        let store = Arc::new(MemoryStore::new());
        let holder = SessionHolder::new(store.clone(), Arc::new(fake_auth()));
        (store, holder)
    }

    #[test]
    fn login_persists_session() {
        let (_, sessions) = holder();
        let alice = user("a@x.com");

        let session = sessions.login(alice.clone()).unwrap();

        assert_eq!(session.user, alice);
        assert!(!session.token.is_empty());
        assert_eq!(sessions.current().unwrap(), Some(session));
    }

    #[test]
    fn login_replaces_previous_session() {
        let (_, sessions) = holder();

        let first = sessions.login(user("a@x.com")).unwrap();
        let second = sessions.login(user("b@x.com")).unwrap();

        assert_ne!(first.token, second.token);
        assert_eq!(sessions.current().unwrap(), Some(second));
    }

    #[test]
    fn logout_clears_and_is_idempotent() {
        let (_, sessions) = holder();
        sessions.login(user("a@x.com")).unwrap();

        sessions.logout().unwrap();
        assert_eq!(sessions.current().unwrap(), None);

        sessions.logout().unwrap();
        assert_eq!(sessions.current().unwrap(), None);
    }

    #[test]
    fn unparsable_session_reads_as_none() {
        let (store, sessions) = holder();
        store.set(SESSION_KEY, "{\"user\":").unwrap();

        assert_eq!(sessions.current().unwrap(), None);
    }
}
