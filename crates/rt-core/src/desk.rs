//! # Ticket Desk
//!
//! Composes the user directory, the session holder and the ticket
//! repository into the flows a front end drives: sign up, sign in, resume,
//! sign out, and ticket work on behalf of the signed-in user.
//!
//! Ticket operations hang off [`AuthedDesk`], which carries the [`Session`]
//! explicitly instead of re-reading the persisted slot on every call.

use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::directory::UserDirectory;
use crate::error::{AppError, Result};
use crate::models::{Session, Ticket, TicketPatch, TicketStats, User};
use crate::session::SessionHolder;
use crate::tickets::TicketRepository;
use crate::traits::{AuthProvider, Clock, KeyValueStore, SystemClock};
use crate::validation::{self, LoginForm, SignupForm, TicketForm};

pub struct TicketDesk {
    users: UserDirectory,
    sessions: SessionHolder,
    tickets: TicketRepository,
}

impl TicketDesk {
    pub fn new(store: Arc<dyn KeyValueStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self::with_clock(store, auth, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn KeyValueStore>,
        auth: Arc<dyn AuthProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users: UserDirectory::new(Arc::clone(&store), Arc::clone(&auth)),
            sessions: SessionHolder::new(Arc::clone(&store), auth),
            tickets: TicketRepository::with_clock(store, clock),
        }
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn sessions(&self) -> &SessionHolder {
        &self.sessions
    }

    pub fn tickets(&self) -> &TicketRepository {
        &self.tickets
    }

    /// Validates the form, registers the user and logs them straight in.
    pub fn sign_up(&self, form: &SignupForm) -> Result<AuthedDesk<'_>> {
        validation::validate_signup(form)?;

        let user = self.users.register(&form.email, &form.password, &form.name)?;
        let session = self.sessions.login(user)?;

        Ok(AuthedDesk::new(self, session))
    }

    /// Fails with [`AppError::InvalidCredentials`] and leaves the session slot
    /// untouched if no user matches.
    pub fn sign_in(&self, form: &LoginForm) -> Result<AuthedDesk<'_>> {
        validation::validate_login(form)?;

        let user = self
            .users
            .find_by_credentials(&form.email, &form.password)?
            .ok_or_else(|| {
                warn!("rejecting login for {}", form.email);
                AppError::InvalidCredentials
            })?;

        let session = self.sessions.login(user)?;
        Ok(AuthedDesk::new(self, session))
    }

    /// Picks up the persisted session, if there is one.
    pub fn resume(&self) -> Result<Option<AuthedDesk<'_>>> {
        Ok(self
            .sessions
            .current()?
            .map(|session| AuthedDesk::new(self, session)))
    }
}

/// A desk bound to a signed-in user.
pub struct AuthedDesk<'a> {
    desk: &'a TicketDesk,
    session: Session,
}

impl<'a> AuthedDesk<'a> {
    fn new(desk: &'a TicketDesk, session: Session) -> Self {
        Self { desk, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> &User {
        &self.session.user
    }

    fn owner(&self) -> Uuid {
        self.session.user.id
    }

    /// The signed-in user's tickets.
    pub fn tickets(&self) -> Result<Vec<Ticket>> {
        self.desk.tickets.list(Some(self.owner()))
    }

    pub fn ticket(&self, id: Uuid) -> Result<Option<Ticket>> {
        self.desk.tickets.get(id)
    }

    pub fn create_ticket(&self, form: TicketForm) -> Result<Ticket> {
        validation::validate_ticket(&form)?;
        self.desk.tickets.create(form.into(), self.owner())
    }

    /// Applies an edit form, replacing every editable field.
    pub fn update_ticket(&self, id: Uuid, form: TicketForm) -> Result<Ticket> {
        validation::validate_ticket(&form)?;
        self.desk.tickets.update(id, form.into())
    }

    /// Applies a partial change such as a status flip.
    pub fn patch_ticket(&self, id: Uuid, patch: TicketPatch) -> Result<Ticket> {
        self.desk.tickets.update(id, patch)
    }

    pub fn delete_ticket(&self, id: Uuid) -> Result<bool> {
        self.desk.tickets.delete(id)
    }

    pub fn stats(&self) -> Result<TicketStats> {
        self.desk.tickets.stats(Some(self.owner()))
    }

    pub fn sign_out(self) -> Result<()> {
        info!("{} logout", self.session.user.email);
        self.desk.sessions.logout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::{Priority, TicketStatus};
    use crate::test_support::fake_auth;

    fn desk() -> TicketDesk {
        TicketDesk::new(Arc::new(MemoryStore::new()), Arc::new(fake_auth()))
    }

    fn alice_signup() -> SignupForm {
        SignupForm {
            name: "Alice".into(),
            email: "a@x.com".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
        }
    }

    fn login(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn sign_up_logs_in() {
        let desk = desk();

        let authed = desk.sign_up(&alice_signup()).unwrap();

        assert_eq!(authed.user().email, "a@x.com");
        let current = desk.sessions().current().unwrap().unwrap();
        assert_eq!(&current, authed.session());
    }

    #[test]
    fn invalid_signup_registers_nobody() {
        let desk = desk();
        let mut form = alice_signup();
        form.confirm_password = "different".into();

        assert!(matches!(desk.sign_up(&form), Err(AppError::InvalidForm(_))));
        assert!(desk.users().all().unwrap().is_empty());
    }

    #[test]
    fn wrong_password_leaves_session_unset() {
        let desk = desk();
        desk.sign_up(&alice_signup()).unwrap().sign_out().unwrap();

        let err = desk.sign_in(&login("a@x.com", "wrong")).err().unwrap();

        assert!(matches!(err, AppError::InvalidCredentials));
        assert!(desk.sessions().current().unwrap().is_none());
    }

    #[test]
    fn resume_picks_up_persisted_session() {
        let desk = desk();
        assert!(desk.resume().unwrap().is_none());

        let token = desk.sign_up(&alice_signup()).unwrap().session().token.clone();

        let resumed = desk.resume().unwrap().unwrap();
        assert_eq!(resumed.session().token, token);
    }

    #[test]
    fn ticket_work_is_scoped_to_the_session_user() {
        let desk = desk();
        let alice = desk.sign_up(&alice_signup()).unwrap();
        let bob_id = desk.users().register("b@x.com", "secret", "Bob").unwrap().id;
        desk.tickets()
            .create(TicketForm::new("Bob's", "not Alice's").into(), bob_id)
            .unwrap();

        let bug = alice
            .create_ticket(
                TicketForm::new("Bug", "Crashes on load")
                    .with_priority(Priority::High),
            )
            .unwrap();
        alice
            .patch_ticket(bug.id, TicketPatch::status(TicketStatus::InProgress))
            .unwrap();

        let mine = alice.tickets().unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Bug");
        assert_eq!(mine[0].status, TicketStatus::InProgress);
        assert_eq!(mine[0].priority, Priority::High);
        assert_eq!(alice.stats().unwrap().in_progress, 1);
        assert_eq!(desk.tickets().list(None).unwrap().len(), 2);
    }

    #[test]
    fn edit_form_is_validated_and_replaces_fields() {
        let desk = desk();
        let alice = desk.sign_up(&alice_signup()).unwrap();
        let bug = alice.create_ticket(TicketForm::new("Bug", "Crashes")).unwrap();

        assert!(matches!(
            alice.update_ticket(bug.id, TicketForm::new("", "still crashes")),
            Err(AppError::InvalidForm(_))
        ));

        let edited = alice
            .update_ticket(
                bug.id,
                TicketForm::new("Crash", "On load")
                    .with_status(TicketStatus::Closed)
                    .with_priority(Priority::Low),
            )
            .unwrap();

        assert_eq!(edited.title, "Crash");
        assert_eq!(edited.description, "On load");
        assert_eq!(edited.status, TicketStatus::Closed);
        assert_eq!(edited.priority, Priority::Low);
    }

    #[test]
    fn delete_and_sign_out() {
        let desk = desk();
        let alice = desk.sign_up(&alice_signup()).unwrap();
        let bug = alice.create_ticket(TicketForm::new("Bug", "Crashes")).unwrap();

        assert!(alice.delete_ticket(bug.id).unwrap());
        assert!(!alice.delete_ticket(bug.id).unwrap());
        assert!(alice.ticket(bug.id).unwrap().is_none());

        alice.sign_out().unwrap();
        assert!(desk.resume().unwrap().is_none());
    }
}
