//! # Form Validation
//!
//! Field-level rules a caller applies before handing input to the core.
//! The repositories themselves do not re-check any of this.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{NewTicket, Priority, TicketPatch, TicketStatus};

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Messages keyed by the form field they belong to. Serialises as a
/// `{"field": "message"}` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidForm(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// The create/edit ticket form. Status and priority start at open/medium.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketForm {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: Priority,
}

impl TicketForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

impl From<TicketForm> for NewTicket {
    fn from(form: TicketForm) -> Self {
        let TicketForm {
            title,
            description,
            status,
            priority,
        } = form;

        Self {
            title,
            description,
            status,
            priority,
        }
    }
}

/// An edit form replaces all four editable fields.
impl From<TicketForm> for TicketPatch {
    fn from(form: TicketForm) -> Self {
        let TicketForm {
            title,
            description,
            status,
            priority,
        } = form;

        Self {
            title: Some(title),
            description: Some(description),
            status: Some(status),
            priority: Some(priority),
        }
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !EMAIL.is_match(email) {
        errors.add("email", "Please enter a valid email");
    }
}

pub fn validate_signup(form: &SignupForm) -> Result<()> {
    let mut errors = FieldErrors::default();

    if form.name.trim().is_empty() {
        errors.add("name", "Name is required");
    }

    check_email(&mut errors, &form.email);

    if form.password.is_empty() {
        errors.add("password", "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 6 characters");
    }

    if form.confirm_password.is_empty() {
        errors.add("confirmPassword", "Please confirm your password");
    } else if form.password != form.confirm_password {
        errors.add("confirmPassword", "Passwords do not match");
    }

    errors.into_result()
}

pub fn validate_login(form: &LoginForm) -> Result<()> {
    let mut errors = FieldErrors::default();

    check_email(&mut errors, &form.email);

    if form.password.is_empty() {
        errors.add("password", "Password is required");
    }

    errors.into_result()
}

pub fn validate_ticket(form: &TicketForm) -> Result<()> {
    let mut errors = FieldErrors::default();

    if form.title.trim().is_empty() {
        errors.add("title", "Title is required");
    }
    if form.description.trim().is_empty() {
        errors.add("description", "Description is required");
    }

    errors.into_result()
}
