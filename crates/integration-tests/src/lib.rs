//! Fixtures shared by the scenario suites under `tests/`.

use std::sync::Arc;

use rt_auth_simple::SimpleAuthProvider;
use rt_core::{KeyValueStore, MemoryStore, TicketDesk};

/// Argon2 with the smallest legal cost, so suites stay fast.
pub fn cheap_auth() -> Arc<SimpleAuthProvider> {
    Arc::new(SimpleAuthProvider::with_params(8, 1, 1).expect("minimum argon2 params are valid"))
}

/// A desk over a fresh in-memory store, plus a handle on that store.
pub fn memory_desk() -> (Arc<MemoryStore>, TicketDesk) {
    let store = Arc::new(MemoryStore::new());
    let desk = TicketDesk::new(store.clone(), cheap_auth());
    (store, desk)
}

/// A desk over an arbitrary store.
pub fn desk_over(store: Arc<dyn KeyValueStore>) -> TicketDesk {
    TicketDesk::new(store, cheap_auth())
}
