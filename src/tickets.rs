//! Held tickets: suspended sales parked for later resume.
//!
//! A ticket is an immutable snapshot of the cart plus its patient and
//! prescription context, labeled and timestamped at hold time. The queue
//! keeps the newest ticket first, which is also what the `r` shortcut
//! resumes.

use crate::cart::{Cart, PatientInfo, PrescriptionInfo};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label used when neither a ticket name nor a patient name was entered.
pub const WALK_IN_NAME: &str = "Walk-in";

/// A parked sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub name: String,
    pub cart: Cart,
    pub patient: PatientInfo,
    pub prescription: PrescriptionInfo,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// Snapshot a sale into a ticket with a fresh id.
    pub fn new(
        name: String,
        cart: Cart,
        patient: PatientInfo,
        prescription: PrescriptionInfo,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            cart,
            patient,
            prescription,
            created_at,
        }
    }
}

/// Pick the ticket label: explicit name, else patient name, else walk-in.
pub fn resolve_ticket_name(explicit: &str, patient_name: &str) -> String {
    if !explicit.is_empty() {
        explicit.to_string()
    } else if !patient_name.is_empty() {
        patient_name.to_string()
    } else {
        WALK_IN_NAME.to_string()
    }
}

/// Newest-first list of held tickets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketQueue {
    tickets: Vec<Ticket>,
}

impl TicketQueue {
    /// Park a ticket at the head of the queue.
    pub fn hold(&mut self, ticket: Ticket) {
        self.tickets.insert(0, ticket);
    }

    /// Remove and return the ticket with the given id.
    pub fn take(&mut self, id: &str) -> Option<Ticket> {
        let idx = self.tickets.iter().position(|t| t.id == id)?;
        Some(self.tickets.remove(idx))
    }

    /// The most recently held ticket.
    pub fn head(&self) -> Option<&Ticket> {
        self.tickets.first()
    }

    pub fn get(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
