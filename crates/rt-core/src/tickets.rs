//! # Ticket Repository
//!
//! Tickets are kept as one JSON array in insertion order. Every operation
//! reads the whole array, works on it in memory, and writes it back; there
//! is no index and no cache. Inputs are not validated here, see
//! [`crate::validation`].

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{NewTicket, Ticket, TicketPatch, TicketStats};
use crate::storage::{self, TICKETS_KEY};
use crate::traits::{Clock, KeyValueStore, SystemClock};

pub struct TicketRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl TicketRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn load(&self) -> Result<Vec<Ticket>> {
        storage::load_all(&*self.store, TICKETS_KEY)
    }

    fn save(&self, tickets: &[Ticket]) -> Result<()> {
        storage::save(&*self.store, TICKETS_KEY, tickets)
    }

    /// All tickets, or only those owned by `owner`, in insertion order.
    pub fn list(&self, owner: Option<Uuid>) -> Result<Vec<Ticket>> {
        let mut tickets = self.load()?;

        if let Some(owner) = owner {
            tickets.retain(|ticket| ticket.user_id == owner);
        }

        debug!("listing {} tickets (owner {:?})", tickets.len(), owner);
        Ok(tickets)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Ticket>> {
        Ok(self.load()?.into_iter().find(|ticket| ticket.id == id))
    }

    pub fn create(&self, new: NewTicket, owner: Uuid) -> Result<Ticket> {
        let mut tickets = self.load()?;
        let now = self.clock.now();

        let NewTicket {
            title,
            description,
            status,
            priority,
        } = new;

        let ticket = Ticket {
            id: Uuid::now_v7(),
            title,
            description,
            status,
            priority,
            created_at: now,
            updated_at: now,
            user_id: owner,
        };

        tickets.push(ticket.clone());
        self.save(&tickets)?;

        info!("{owner} created ticket {} ({}, {})", ticket.id, ticket.status, ticket.priority);
        Ok(ticket)
    }

    /// Merges `patch` into ticket `id` and refreshes its `updated_at`.
    ///
    /// Fails with [`AppError::NotFound`] for an unknown id.
    pub fn update(&self, id: Uuid, patch: TicketPatch) -> Result<Ticket> {
        let mut tickets = self.load()?;

        let ticket = tickets
            .iter_mut()
            .find(|ticket| ticket.id == id)
            .ok_or_else(|| AppError::NotFound("ticket".into(), id.to_string()))?;

        patch.apply(ticket);
        ticket.updated_at = self.stamp_after(ticket.updated_at);
        let updated = ticket.clone();

        self.save(&tickets)?;

        info!("updated ticket {id} ({}, {})", updated.status, updated.priority);
        Ok(updated)
    }

    /// Removes ticket `id`. Returns whether anything was removed; an unknown
    /// id is not an error.
    pub fn delete(&self, id: Uuid) -> Result<bool> {
        let mut tickets = self.load()?;
        let before = tickets.len();

        tickets.retain(|ticket| ticket.id != id);
        if tickets.len() == before {
            debug!("delete of unknown ticket {id}, nothing to do");
            return Ok(false);
        }

        self.save(&tickets)?;
        info!("deleted ticket {id}");
        Ok(true)
    }

    pub fn stats(&self, owner: Option<Uuid>) -> Result<TicketStats> {
        Ok(TicketStats::tally(&self.list(owner)?))
    }

    /// Now, unless the clock has not moved past `previous`.
    fn stamp_after(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = self.clock.now();
        if now > previous {
            now
        } else {
            previous + Duration::microseconds(1)
        }
    }
}
