//! # Rusty-Tickets Binary
//!
//! The entry point that assembles the store and auth plugins, seeds the
//! demo account on first run, and logs what is stored.

mod seed;

use std::sync::Arc;

use anyhow::Context;
use configs::{Settings, StorageBackend, StorageSettings};
use log::{info, warn};
use rt_auth_simple::SimpleAuthProvider;
use rt_core::{KeyValueStore, MemoryStore, TicketDesk};

// Feature-gated imports
#[cfg(feature = "storage-local")]
use rt_storage_local::LocalKeyValueStore;

fn main() -> anyhow::Result<()> {
    let env_file = configs::load_env_file();
    let settings = Settings::load().context("loading configuration")?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(settings.log_level.as_str()));
    env_file.log();

    // 1. Initialize Storage Implementation
    let store = open_store(&settings.storage)?;

    // 2. Initialize Auth Implementation
    let auth = Arc::new(SimpleAuthProvider::new());

    let desk = TicketDesk::new(store, auth);

    match seed::run(&desk, &settings.seed).context("seeding demo data")? {
        seed::Seeded::Demo { user, tickets } => {
            info!("seeded demo account {} with {tickets} tickets", user.email)
        }
        seed::Seeded::AlreadyPopulated => info!("existing users found, not seeding"),
        seed::Seeded::Disabled => info!("seeding disabled"),
    }

    summarize(&desk).context("reading stored data")?;
    Ok(())
}

fn open_store(storage: &StorageSettings) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    match storage.backend {
        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let store = LocalKeyValueStore::open(&storage.data_dir)
                .with_context(|| format!("opening store at {:?}", storage.data_dir))?;
            info!("storing data under {:?}", store.root());
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => anyhow::bail!(
            "built without the storage-local feature; set RT__STORAGE__BACKEND=memory"
        ),
        StorageBackend::Memory => {
            warn!("using the in-memory store, nothing will be kept");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

fn summarize(desk: &TicketDesk) -> rt_core::Result<()> {
    let users = desk.users().all()?;
    let tickets = desk.tickets().list(None)?;
    info!("{} users, {} tickets", users.len(), tickets.len());

    for user in &users {
        let stats = desk.tickets().stats(Some(user.id))?;
        info!(
            "{} <{}>: {} tickets ({} open, {} in progress, {} closed)",
            user.name, user.email, stats.total, stats.open, stats.in_progress, stats.closed
        );
    }

    match desk.resume()? {
        Some(authed) => info!("signed in as {}", authed.user().email),
        None => info!("no active session"),
    }
    Ok(())
}
