//! # User Directory
//!
//! Registered users keyed by unique email. The whole user collection is
//! read and rewritten on every registration.

use std::sync::Arc;

use log::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::User;
use crate::storage::{self, USERS_KEY};
use crate::traits::{AuthProvider, KeyValueStore};

pub struct UserDirectory {
    store: Arc<dyn KeyValueStore>,
    auth: Arc<dyn AuthProvider>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn KeyValueStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { store, auth }
    }

    /// Every registered user, in registration order.
    pub fn all(&self) -> Result<Vec<User>> {
        storage::load_all(&*self.store, USERS_KEY)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.all()?.into_iter().find(|user| user.email == email))
    }

    /// Creates a user with a freshly hashed password.
    ///
    /// Fails with [`AppError::DuplicateEmail`] if `email` is taken.
    pub fn register(&self, email: &str, password: &str, name: &str) -> Result<User> {
        let mut users = self.all()?;

        if users.iter().any(|user| user.email == email) {
            warn!("rejecting registration of existing email {email}");
            return Err(AppError::DuplicateEmail(email.to_string()));
        }

        let user = User {
            id: Uuid::now_v7(),
            email: email.to_string(),
            password_hash: self.auth.hash_password(password)?,
            name: name.to_string(),
        };

        users.push(user.clone());
        storage::save(&*self.store, USERS_KEY, &users)?;

        info!("registered {} ({}), {} users", user.email, user.id, users.len());
        Ok(user)
    }

    /// Returns the user with `email` if `password` verifies against its hash.
    pub fn find_by_credentials(&self, email: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.find_by_email(email)? else {
            debug!("no user with email {email}");
            return Ok(None);
        };

        if self.auth.verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            debug!("wrong password for {email}");
            Ok(None)
        }
    }
}
