//! The register engine: one active sale, its held tickets, and the
//! keystroke front door.
//!
//! `Register` owns the serializable [`RegisterState`] and applies every
//! operation to it synchronously in host event order. Totals are never
//! stored; ask for them and they are derived from the cart on the spot.
//!
//! Key design goals:
//! - **Reducer-shaped**: hosts can drive the engine through typed methods
//!   or through serializable [`Action`] values, and snapshot/restore the
//!   whole state as JSON
//! - **No-op over error**: operations on empty or missing state do
//!   nothing and say so in the debug log, they never fail the caller
//! - **Injected time**: ticket timestamps and scan-gap decisions come
//!   from the [`Clock`] handed in at construction

use crate::cart::{Cart, PatientInfo, PrescriptionInfo};
use crate::catalog::Catalog;
use crate::checkout::{self, CashTotals, RxTotals};
use crate::clock::{Clock, SystemClock};
use crate::scanner::{InputRouter, KeyEvent, RoutedKey, Shortcut};
use crate::settings::RegisterSettings;
use crate::tickets::{resolve_ticket_name, Ticket, TicketQueue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The whole mutable state of a register, as one serializable value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterState {
    pub cart: Cart,
    pub patient: PatientInfo,
    pub prescription: PrescriptionInfo,
    /// Pending label for the next hold, from the ticket-name input.
    pub ticket_name: String,
    pub tickets: TicketQueue,
}

/// A state transition, as data. Every variant maps onto one register
/// method, so hosts can queue, log, or replay operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    AddToCart { product_id: String },
    IncrementLine { product_id: String },
    DecrementLine { product_id: String },
    SetQuantity { product_id: String, quantity: u32 },
    RemoveLine { product_id: String },
    ClearCart,
    SetPatient { patient: PatientInfo },
    SetPrescription { prescription: PrescriptionInfo },
    SetTicketName { name: String },
    Hold,
    Resume { ticket_id: String },
}

/// What a keystroke did, and what the host should do about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum KeyOutcome {
    /// Unrecognized key, modified key, or a shortcut that had nothing
    /// to act on.
    Ignored,
    /// The character joined the scan buffer and nothing else happened.
    Buffered,
    /// A completed scan matched this product and added it to the cart.
    ScanAdded { product_id: String },
    /// A completed scan matched no product; state is untouched.
    ScanUnmatched { code: String },
    /// A shortcut changed the cart.
    CartChanged,
    /// The sale was parked under this ticket.
    Held { ticket_id: String },
    /// This ticket was restored into the cart.
    Resumed { ticket_id: String },
    /// The host should move focus to the product search field.
    FocusSearch,
    /// The host should start its payment flow.
    PayRequested,
}

/// A pharmacy register: catalog, settings, live state, and input router.
#[derive(Debug)]
pub struct Register {
    catalog: Catalog,
    settings: RegisterSettings,
    state: RegisterState,
    router: InputRouter,
    clock: Arc<dyn Clock>,
}

// ---------------------------------------------------------------------------
// Construction and access
// ---------------------------------------------------------------------------

impl Register {
    /// Build a register over a catalog with an injected clock.
    ///
    /// Settings are taken as given; run [`RegisterSettings::validate`]
    /// first when they come from outside.
    pub fn new(catalog: Catalog, settings: RegisterSettings, clock: Arc<dyn Clock>) -> Self {
        let router = InputRouter::from_settings(&settings);
        Self {
            catalog,
            settings,
            state: RegisterState::default(),
            router,
            clock,
        }
    }

    pub fn with_system_clock(catalog: Catalog, settings: RegisterSettings) -> Self {
        Self::new(catalog, settings, Arc::new(SystemClock))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &RegisterSettings {
        &self.settings
    }

    pub fn cart(&self) -> &Cart {
        &self.state.cart
    }

    pub fn patient(&self) -> &PatientInfo {
        &self.state.patient
    }

    pub fn prescription(&self) -> &PrescriptionInfo {
        &self.state.prescription
    }

    pub fn ticket_name(&self) -> &str {
        &self.state.ticket_name
    }

    pub fn tickets(&self) -> &TicketQueue {
        &self.state.tickets
    }

    /// Characters currently sitting in the scan buffer.
    pub fn scan_buffer(&self) -> &str {
        self.router.buffer()
    }

    pub fn state(&self) -> &RegisterState {
        &self.state
    }

    /// Clone the full state for the host to persist.
    pub fn snapshot(&self) -> RegisterState {
        self.state.clone()
    }

    /// Replace the full state from a host snapshot.
    pub fn restore(&mut self, state: RegisterState) {
        info!(
            lines = state.cart.len(),
            tickets = state.tickets.len(),
            "register state restored"
        );
        self.state = state;
    }
}

// ---------------------------------------------------------------------------
// Cart and ticket operations
// ---------------------------------------------------------------------------

impl Register {
    /// Add one unit of a catalog product to the cart. Unknown ids are
    /// ignored. Stock never blocks the add; exceeding it is only logged.
    pub fn add_to_cart(&mut self, product_id: &str) -> bool {
        let product = match self.catalog.get(product_id) {
            Some(p) => p.clone(),
            None => {
                debug!(product_id = %product_id, "add ignored, unknown product");
                return false;
            }
        };

        self.state.cart.add(&product);

        let quantity = self
            .state
            .cart
            .line(&product.id)
            .map(|l| l.quantity)
            .unwrap_or(0);
        if quantity > product.stock_quantity {
            warn!(
                product_id = %product.id,
                quantity,
                stock = product.stock_quantity,
                "cart quantity exceeds stock on hand"
            );
        }
        debug!(product_id = %product.id, quantity, "product added to cart");
        true
    }

    pub fn increment_line(&mut self, product_id: &str) -> bool {
        let changed = self.state.cart.increment(product_id);
        if changed {
            debug!(product_id = %product_id, "line incremented");
        }
        changed
    }

    pub fn decrement_line(&mut self, product_id: &str) -> bool {
        let changed = self.state.cart.decrement(product_id);
        if changed {
            debug!(product_id = %product_id, "line decremented");
        }
        changed
    }

    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> bool {
        let changed = self.state.cart.set_quantity(product_id, quantity);
        if changed {
            debug!(product_id = %product_id, quantity, "line quantity set");
        }
        changed
    }

    pub fn remove_line(&mut self, product_id: &str) -> bool {
        let changed = self.state.cart.remove(product_id);
        if changed {
            debug!(product_id = %product_id, "line removed");
        }
        changed
    }

    /// Empty the cart and reset patient and prescription context.
    pub fn clear_cart(&mut self) {
        self.state.cart.clear();
        self.state.patient = PatientInfo::default();
        self.state.prescription = PrescriptionInfo::default();
        debug!("cart cleared");
    }

    pub fn set_patient(&mut self, patient: PatientInfo) {
        self.state.patient = patient;
    }

    pub fn set_prescription(&mut self, prescription: PrescriptionInfo) {
        self.state.prescription = prescription;
    }

    pub fn set_ticket_name(&mut self, name: String) {
        self.state.ticket_name = name;
    }

    /// Park the current sale as a ticket and reset to an idle register.
    ///
    /// Returns the new ticket id, or `None` when the cart is empty. The
    /// label falls back from the pending ticket name to the patient name
    /// to "Walk-in".
    pub fn hold_ticket(&mut self) -> Option<String> {
        if self.state.cart.is_empty() {
            debug!("hold ignored, cart is empty");
            return None;
        }

        let name = resolve_ticket_name(&self.state.ticket_name, &self.state.patient.name);
        let ticket = Ticket::new(
            name,
            std::mem::take(&mut self.state.cart),
            std::mem::take(&mut self.state.patient),
            std::mem::take(&mut self.state.prescription),
            self.clock.now(),
        );
        let ticket_id = ticket.id.clone();

        info!(
            ticket_id = %ticket_id,
            name = %ticket.name,
            lines = ticket.cart.len(),
            "ticket held"
        );
        self.state.tickets.hold(ticket);
        self.state.ticket_name.clear();
        Some(ticket_id)
    }

    /// Restore a held ticket into the cart, replacing the current sale
    /// wholesale. Returns false when the id is not queued.
    pub fn resume_ticket(&mut self, ticket_id: &str) -> bool {
        match self.state.tickets.take(ticket_id) {
            Some(ticket) => {
                info!(
                    ticket_id = %ticket.id,
                    name = %ticket.name,
                    lines = ticket.cart.len(),
                    "ticket resumed"
                );
                self.state.cart = ticket.cart;
                self.state.patient = ticket.patient;
                self.state.prescription = ticket.prescription;
                true
            }
            None => {
                debug!(ticket_id = %ticket_id, "resume ignored, ticket not found");
                false
            }
        }
    }

    /// Rx-counter totals for the current cart at the configured rates.
    pub fn rx_totals(&self) -> RxTotals {
        checkout::rx_totals(
            &self.state.cart,
            self.settings.discount_rate,
            self.settings.tax_rate,
        )
    }

    /// Cash-counter totals for the current cart at an operator percent.
    pub fn cash_totals(&self, discount_percent: Decimal) -> CashTotals {
        checkout::cash_totals(
            &self.state.cart,
            discount_percent,
            self.settings.discount_max,
        )
    }
}

// ---------------------------------------------------------------------------
// Input handling and the action reducer
// ---------------------------------------------------------------------------

impl Register {
    /// Feed one host keystroke through the router and apply whatever it
    /// classified. Reads the injected clock for scan-gap timing.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let now = self.clock.now();
        match self.router.route(event, now) {
            RoutedKey::Scan(code) => {
                let matched = self.catalog.find_by_code(&code).map(|p| p.id.clone());
                match matched {
                    Some(product_id) => {
                        self.add_to_cart(&product_id);
                        info!(code = %code, product_id = %product_id, "scan matched");
                        KeyOutcome::ScanAdded { product_id }
                    }
                    None => {
                        debug!(code = %code, "scan matched no product");
                        KeyOutcome::ScanUnmatched { code }
                    }
                }
            }
            RoutedKey::Shortcut(shortcut) => self.apply_shortcut(shortcut),
            RoutedKey::Buffered => KeyOutcome::Buffered,
            RoutedKey::Ignored => KeyOutcome::Ignored,
        }
    }

    /// Apply a reducer action. Returns whether any state changed.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::AddToCart { product_id } => self.add_to_cart(&product_id),
            Action::IncrementLine { product_id } => self.increment_line(&product_id),
            Action::DecrementLine { product_id } => self.decrement_line(&product_id),
            Action::SetQuantity {
                product_id,
                quantity,
            } => self.set_quantity(&product_id, quantity),
            Action::RemoveLine { product_id } => self.remove_line(&product_id),
            Action::ClearCart => {
                let blank = self.state.cart.is_empty()
                    && self.state.patient == PatientInfo::default()
                    && self.state.prescription == PrescriptionInfo::default();
                self.clear_cart();
                !blank
            }
            Action::SetPatient { patient } => {
                let changed = self.state.patient != patient;
                self.state.patient = patient;
                changed
            }
            Action::SetPrescription { prescription } => {
                let changed = self.state.prescription != prescription;
                self.state.prescription = prescription;
                changed
            }
            Action::SetTicketName { name } => {
                let changed = self.state.ticket_name != name;
                self.state.ticket_name = name;
                changed
            }
            Action::Hold => self.hold_ticket().is_some(),
            Action::Resume { ticket_id } => self.resume_ticket(&ticket_id),
        }
    }

    fn apply_shortcut(&mut self, shortcut: Shortcut) -> KeyOutcome {
        match shortcut {
            Shortcut::FocusSearch => KeyOutcome::FocusSearch,
            Shortcut::IncrementLast => {
                let last = self.state.cart.last_line().map(|l| l.product_id.clone());
                match last {
                    Some(product_id) => {
                        self.increment_line(&product_id);
                        KeyOutcome::CartChanged
                    }
                    None => KeyOutcome::Ignored,
                }
            }
            Shortcut::DecrementLast => {
                let last = self.state.cart.last_line().map(|l| l.product_id.clone());
                match last {
                    Some(product_id) => {
                        self.decrement_line(&product_id);
                        KeyOutcome::CartChanged
                    }
                    None => KeyOutcome::Ignored,
                }
            }
            Shortcut::Hold => match self.hold_ticket() {
                Some(ticket_id) => KeyOutcome::Held { ticket_id },
                None => KeyOutcome::Ignored,
            },
            Shortcut::Resume => {
                let head = self.state.tickets.head().map(|t| t.id.clone());
                match head {
                    Some(ticket_id) => {
                        self.resume_ticket(&ticket_id);
                        KeyOutcome::Resumed { ticket_id }
                    }
                    None => KeyOutcome::Ignored,
                }
            }
            Shortcut::ClearCart => {
                if self.state.cart.is_empty() {
                    KeyOutcome::Ignored
                } else {
                    self.clear_cart();
                    KeyOutcome::CartChanged
                }
            }
            Shortcut::Pay => {
                if self.state.cart.is_empty() {
                    KeyOutcome::Ignored
                } else {
                    info!(lines = self.state.cart.len(), "pay requested");
                    KeyOutcome::PayRequested
                }
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
