//! Report delivery collaborators.
//!
//! The engine hands finished reports to a [`ReportDelivery`]; transport lives
//! outside the reporting core.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::error::{ApeError, Result};

/// Transport for finished reports (email in the dashboard)
pub trait ReportDelivery: Send + Sync {
    fn send(&self, subject: &str, body: &str, destination: &str) -> Result<()>;
}

impl<T: ReportDelivery + ?Sized> ReportDelivery for Arc<T> {
    fn send(&self, subject: &str, body: &str, destination: &str) -> Result<()> {
        (**self).send(subject, body, destination)
    }
}

/// Result of a delivery request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum DeliveryOutcome {
    Sent { destination: String },
    /// Nothing was attempted, e.g. no destination configured
    Skipped(String),
    Failed(String),
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryOutcome::Sent { .. })
    }
}

/// Mock mailer: writes the message to the log and reports success
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDelivery;

impl ReportDelivery for LogDelivery {
    fn send(&self, subject: &str, body: &str, destination: &str) -> Result<()> {
        log::info!(
            "Report '{}' sent to {} ({} bytes)",
            subject,
            destination,
            body.len()
        );
        log::debug!("{}", body);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxMessage {
    pub subject: String,
    pub body: String,
    pub destination: String,
}

/// Keeps every sent message in memory
#[derive(Debug, Default)]
pub struct OutboxDelivery {
    messages: Mutex<Vec<OutboxMessage>>,
}

impl OutboxDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<OutboxMessage> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl ReportDelivery for OutboxDelivery {
    fn send(&self, subject: &str, body: &str, destination: &str) -> Result<()> {
        self.messages.lock().push(OutboxMessage {
            subject: subject.to_string(),
            body: body.to_string(),
            destination: destination.to_string(),
        });
        Ok(())
    }
}

/// Loose address check: one '@' with text on both sides and a dot in the domain
pub fn validate_destination(destination: &str) -> Result<()> {
    let trimmed = destination.trim();
    let valid = match trimmed.split_once('@') {
        Some((user, domain)) => {
            !user.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ApeError::delivery(format!(
            "'{}' is not a valid email address",
            destination
        )))
    }
}
