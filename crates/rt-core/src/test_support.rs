//! Shared fixtures for the unit tests of this crate.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{NewTicket, Priority, TicketStatus, User};
use crate::traits::{Clock, MockAuthProvider};

/// An auth provider whose "hash" is a readable prefix and whose tokens count up.
pub fn fake_auth() -> MockAuthProvider {
    let mut auth = MockAuthProvider::new();
    auth.expect_hash_password()
        .returning(|password| Ok(format!("hashed:{password}")));
    auth.expect_verify_password()
        .returning(|password, hash| hash == format!("hashed:{password}"));

    let mut minted = 0;
    auth.expect_mint_token().returning(move || {
        minted += 1;
        Ok(format!("token-{minted}"))
    });
    auth
}

pub fn user(email: &str) -> User {
    User {
        id: Uuid::now_v7(),
        email: email.to_string(),
        password_hash: "hashed:secret".to_string(),
        name: email.to_string(),
    }
}

pub fn new_ticket(title: &str) -> NewTicket {
    NewTicket {
        title: title.to_string(),
        description: format!("{title} description"),
        status: TicketStatus::Open,
        priority: Priority::Medium,
    }
}

/// A clock stuck at a single instant.
pub struct FrozenClock(DateTime<Utc>);

impl Default for FrozenClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
