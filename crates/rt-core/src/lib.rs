//! rusty-tickets/crates/rt-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Rusty-Tickets:
//! users, the session slot, tickets, and the form rules guarding them.

pub mod desk;
pub mod directory;
pub mod error;
pub mod memory;
pub mod models;
pub mod session;
pub mod storage;
pub mod tickets;
pub mod traits;
pub mod validation;

#[cfg(test)]
mod test_support;

// Re-exporting for easier access in other crates
pub use desk::{AuthedDesk, TicketDesk};
pub use directory::UserDirectory;
pub use error::*;
pub use memory::MemoryStore;
pub use models::*;
pub use session::SessionHolder;
pub use tickets::TicketRepository;
pub use traits::*;
pub use validation::{FieldErrors, LoginForm, SignupForm, TicketForm};
