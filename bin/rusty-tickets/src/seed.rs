//! First-run demo data: one account and a few tickets, created only while
//! no users exist.

use configs::SeedSettings;
use log::info;
use rt_core::{NewTicket, Priority, Result, TicketDesk, TicketStatus, User};
use secrecy::ExposeSecret;

const DEMO_TICKETS: [(&str, &str, TicketStatus, Priority); 3] = [
    (
        "Login page crashes on Safari",
        "Submitting the login form on Safari 17 shows a blank page instead of the dashboard.",
        TicketStatus::Open,
        Priority::High,
    ),
    (
        "Add dark mode",
        "Users have asked for a dark theme across the dashboard and ticket list.",
        TicketStatus::InProgress,
        Priority::Medium,
    ),
    (
        "Typo in footer",
        "The footer reads \"Suport\" instead of \"Support\".",
        TicketStatus::Closed,
        Priority::Low,
    ),
];

#[derive(Debug, PartialEq, Eq)]
pub enum Seeded {
    Disabled,
    AlreadyPopulated,
    Demo { user: User, tickets: usize },
}

pub fn run(desk: &TicketDesk, settings: &SeedSettings) -> Result<Seeded> {
    if !settings.enabled {
        return Ok(Seeded::Disabled);
    }

    if !desk.users().all()?.is_empty() {
        return Ok(Seeded::AlreadyPopulated);
    }

    let user = desk.users().register(
        &settings.email,
        settings.password.expose_secret(),
        &settings.name,
    )?;

    let mut tickets = 0;
    if settings.demo_tickets {
        for (title, description, status, priority) in DEMO_TICKETS {
            let new = NewTicket {
                title: title.to_string(),
                description: description.to_string(),
                status,
                priority,
            };
            desk.tickets().create(new, user.id)?;
            tickets += 1;
        }
    }

    info!("demo account {} ready", user.email);
    Ok(Seeded::Demo { user, tickets })
}
