//! Contact form fields and validation.
//!
//! There is no submission endpoint: a valid submission is only reported
//! locally (see [`crate::output::format_contact_submission`]). The generated
//! contact page runs the same checks in the browser before showing its
//! confirmation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Wedding,
    Corporate,
    PrivateParty,
    Virtual,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Wedding,
        EventType::Corporate,
        EventType::PrivateParty,
        EventType::Virtual,
        EventType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EventType::Wedding => "Wedding",
            EventType::Corporate => "Corporate Event",
            EventType::PrivateParty => "Private Party",
            EventType::Virtual => "Virtual Event",
            EventType::Other => "Other",
        }
    }

    /// Form value (`<option value=…>`).
    pub fn value(self) -> &'static str {
        match self {
            EventType::Wedding => "wedding",
            EventType::Corporate => "corporate",
            EventType::PrivateParty => "private-party",
            EventType::Virtual => "virtual",
            EventType::Other => "other",
        }
    }

    /// Accepts either the form value or the label, case-insensitively.
    pub fn parse(input: &str) -> Option<EventType> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.value().eq_ignore_ascii_case(input) || t.label().eq_ignore_ascii_case(input))
    }
}

/// Budget ranges offered in the form's select.
pub const BUDGET_RANGES: [&str; 4] = ["Under $10,000", "$10,000 - $25,000", "$25,000 - $50,000", "$50,000+"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    EventType,
    Date,
    GuestCount,
    Budget,
    Message,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::EventType,
        Field::Date,
        Field::GuestCount,
        Field::Budget,
        Field::Message,
    ];

    /// Form control name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::EventType => "event_type",
            Field::Date => "date",
            Field::GuestCount => "guest_count",
            Field::Budget => "budget",
            Field::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::EventType => "Event Type",
            Field::Date => "Event Date",
            Field::GuestCount => "Guest Count",
            Field::Budget => "Budget",
            Field::Message => "Message",
        }
    }

    pub fn required(self) -> bool {
        matches!(self, Field::Name | Field::Email | Field::Message)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContactError {
    #[error("{} is required", .0.label())]
    Missing(Field),
    #[error("email address {0:?} is not valid")]
    InvalidEmail(String),
    #[error("guest count must be a positive whole number, got {0:?}")]
    InvalidGuestCount(String),
    #[error("unknown event type {0:?}")]
    UnknownEventType(String),
}

/// Raw form input, as typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    pub date: String,
    pub guest_count: String,
    pub budget: String,
    pub message: String,
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: Option<EventType>,
    pub date: Option<String>,
    pub guest_count: Option<u32>,
    pub budget: Option<String>,
    pub message: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// `local@domain` with both parts non-empty.
pub fn is_valid_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

impl ContactForm {
    /// Check every field, collecting all problems rather than stopping at the first.
    pub fn validate(&self) -> Result<ContactSubmission, Vec<ContactError>> {
        let mut errors = Vec::new();

        for (field, value) in [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Message, &self.message),
        ] {
            if value.trim().is_empty() {
                errors.push(ContactError::Missing(field));
            }
        }

        if !self.email.trim().is_empty() && !is_valid_email(&self.email) {
            errors.push(ContactError::InvalidEmail(self.email.trim().to_string()));
        }

        let guest_count = match optional(&self.guest_count) {
            None => None,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    errors.push(ContactError::InvalidGuestCount(raw));
                    None
                }
            },
        };

        let event_type = match optional(&self.event_type) {
            None => None,
            Some(raw) => {
                let parsed = EventType::parse(&raw);
                if parsed.is_none() {
                    errors.push(ContactError::UnknownEventType(raw));
                }
                parsed
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ContactSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            event_type,
            date: optional(&self.date),
            guest_count,
            budget: optional(&self.budget),
            message: self.message.trim().to_string(),
        })
    }
}
