//! Checkout calculators: pure derivations from the cart.
//!
//! Two deliberately separate modes:
//! - **Rx checkout**: fixed configured discount and tax rates. Discount
//!   comes off first; tax applies to the discounted base.
//! - **Cash register**: operator-entered discount percent, no tax line,
//!   plus tender/change arithmetic.
//!
//! All values stay exact decimals. Totals are never stored; callers
//! recompute them from the cart whenever it changes.

use crate::cart::Cart;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rx checkout
// ---------------------------------------------------------------------------

/// Derived totals for the prescription counter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RxTotals {
    pub subtotal: Decimal,
    /// Rate echoed for display, e.g. 0.20 renders as "20%".
    pub discount_rate: Decimal,
    pub discount: Decimal,
    pub taxable: Decimal,
    pub tax_rate: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Compute Rx-counter totals. Discount applies to the full subtotal, tax
/// to what remains after the discount.
pub fn rx_totals(cart: &Cart, discount_rate: Decimal, tax_rate: Decimal) -> RxTotals {
    let subtotal = cart.subtotal();
    let discount = subtotal * discount_rate;
    let taxable = subtotal - discount;
    let tax = taxable * tax_rate;
    let total = taxable + tax;

    RxTotals {
        subtotal,
        discount_rate,
        discount,
        taxable,
        tax_rate,
        tax,
        total,
    }
}

// ---------------------------------------------------------------------------
// Cash register
// ---------------------------------------------------------------------------

/// Derived totals for the cash counter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashTotals {
    pub subtotal: Decimal,
    /// The percent actually applied, after clamping.
    pub discount_percent: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Compute cash-counter totals. The operator percent is clamped to
/// `[0, discount_max]` before applying.
pub fn cash_totals(cart: &Cart, discount_percent: Decimal, discount_max: Decimal) -> CashTotals {
    let subtotal = cart.subtotal();
    let max = discount_max.max(Decimal::ZERO);
    let percent = discount_percent.clamp(Decimal::ZERO, max);
    let discount = subtotal * percent / Decimal::ONE_HUNDRED;
    let total = subtotal - discount;

    CashTotals {
        subtotal,
        discount_percent: percent,
        discount,
        total,
    }
}

/// Change owed on a cash tender. Under-payment yields zero change, it is
/// the operator's job to collect the rest.
pub fn change_due(total: Decimal, received: Decimal) -> Decimal {
    (received - total).max(Decimal::ZERO)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Product};

    fn cart_of(unit_price: Decimal, quantity: u32) -> Cart {
        let product = Product {
            id: "p1".to_string(),
            name: "Test Item".to_string(),
            strength: "1 mg".to_string(),
            form: "Tablet".to_string(),
            category: Category::Otc,
            requires_prescription: false,
            unit_price,
            stock_quantity: 100,
            sku: "TST-001".to_string(),
        };
        let mut cart = Cart::default();
        for _ in 0..quantity {
            cart.add(&product);
        }
        cart
    }

    #[test]
    fn rx_totals_discount_then_tax_on_discounted_base() {
        // 4 x 25.00 = 100.00 at 20% discount, 15% tax
        let cart = cart_of(Decimal::new(2500, 2), 4);
        let totals = rx_totals(&cart, Decimal::new(20, 2), Decimal::new(15, 2));

        assert_eq!(totals.subtotal, Decimal::new(10000, 2));
        assert_eq!(totals.discount, Decimal::new(2000, 2));
        assert_eq!(totals.taxable, Decimal::new(8000, 2));
        assert_eq!(totals.tax, Decimal::new(1200, 2));
        assert_eq!(totals.total, Decimal::new(9200, 2));
    }

    #[test]
    fn rx_totals_on_empty_cart_are_all_zero() {
        let totals = rx_totals(
            &Cart::default(),
            Decimal::new(20, 2),
            Decimal::new(15, 2),
        );
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.discount, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn rx_totals_with_zero_rates_pass_subtotal_through() {
        let cart = cart_of(Decimal::new(675, 2), 2);
        let totals = rx_totals(&cart, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.total, totals.subtotal);
        assert_eq!(totals.total, Decimal::new(1350, 2));
    }

    #[test]
    fn cash_totals_apply_operator_percent() {
        // 2 x 25.00 = 50.00 at 10%
        let cart = cart_of(Decimal::new(2500, 2), 2);
        let totals = cash_totals(&cart, Decimal::from(10), Decimal::ONE_HUNDRED);

        assert_eq!(totals.subtotal, Decimal::new(5000, 2));
        assert_eq!(totals.discount_percent, Decimal::from(10));
        assert_eq!(totals.discount, Decimal::new(500, 2));
        assert_eq!(totals.total, Decimal::new(4500, 2));
    }

    #[test]
    fn cash_percent_clamps_to_configured_bounds() {
        let cart = cart_of(Decimal::new(2500, 2), 2);

        let over = cash_totals(&cart, Decimal::from(150), Decimal::ONE_HUNDRED);
        assert_eq!(over.discount_percent, Decimal::ONE_HUNDRED);
        assert_eq!(over.total, Decimal::ZERO);

        let negative = cash_totals(&cart, Decimal::from(-5), Decimal::ONE_HUNDRED);
        assert_eq!(negative.discount_percent, Decimal::ZERO);
        assert_eq!(negative.total, negative.subtotal);

        let capped = cash_totals(&cart, Decimal::from(50), Decimal::from(20));
        assert_eq!(capped.discount_percent, Decimal::from(20));
        assert_eq!(capped.discount, Decimal::new(1000, 2));
    }

    #[test]
    fn cash_handles_degenerate_discount_max() {
        let cart = cart_of(Decimal::new(2500, 2), 2);
        let totals = cash_totals(&cart, Decimal::from(10), Decimal::from(-40));
        assert_eq!(totals.discount_percent, Decimal::ZERO);
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn change_due_pays_out_overage_and_clamps_shortfall() {
        let total = Decimal::new(4500, 2);
        assert_eq!(change_due(total, Decimal::new(5000, 2)), Decimal::new(500, 2));
        assert_eq!(change_due(total, Decimal::new(4500, 2)), Decimal::ZERO);
        assert_eq!(change_due(total, Decimal::new(4000, 2)), Decimal::ZERO);
    }
}
