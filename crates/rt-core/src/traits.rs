//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.
//! All ports are synchronous: the substrate is local and never suspends.

use chrono::{DateTime, Utc};

use crate::error::Result;

/// The key-value string substrate every collection is persisted in.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Credential and token contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait AuthProvider: Send + Sync {
    /// Produces a salted one-way hash suitable for persisting.
    fn hash_password(&self, password: &str) -> Result<String>;

    /// Checks `password` against a hash produced by `hash_password`.
    fn verify_password(&self, password: &str, hash: &str) -> bool;

    /// Mints a fresh opaque session token.
    fn mint_token(&self) -> Result<String>;
}

/// Source of "now" for ticket timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
