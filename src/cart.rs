//! Cart state: ordered line items plus patient and prescription context.
//!
//! One line per product id; re-adding a product increments its quantity
//! instead of duplicating the line. Quantities never drop below 1 except
//! through explicit removal. Name and unit price are denormalized onto the
//! line at add time, so later catalog edits never reprice an open sale.

use crate::catalog::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single sale line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Free-text patient details attached to the active sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: String,
    pub age: String,
    pub phone: String,
    pub allergies: String,
}

/// Free-text prescription details attached to the active sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionInfo {
    pub rx_number: String,
    pub prescriber: String,
    pub directions: String,
    pub repeats: String,
}

/// The ordered line items of the active sale.
///
/// Serializes as a bare array of lines, matching the shape hosts held
/// before the engine existed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

impl Cart {
    /// Add one unit of `product`: increments the existing line or appends
    /// a new quantity-1 line at the end.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity: 1,
        });
    }

    /// Increment a line's quantity. Returns false when the line is absent.
    pub fn increment(&mut self, product_id: &str) -> bool {
        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity += 1;
                true
            }
            None => false,
        }
    }

    /// Decrement a line's quantity, flooring at 1. Returns false when the
    /// line is absent. Removal is always an explicit separate action.
    pub fn decrement(&mut self, product_id: &str) -> bool {
        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_sub(1).max(1);
                true
            }
            None => false,
        }
    }

    /// Set a line's quantity directly, flooring at 1.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> bool {
        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = quantity.max(1);
                true
            }
            None => false,
        }
    }

    /// Remove a line outright. Returns false when the line is absent.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// The most recently added line, target of the `+`/`-` shortcuts.
    pub fn last_line(&self) -> Option<&CartLine> {
        self.lines.last()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Exact sum of line totals.
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
