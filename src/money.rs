//! Money display helpers.
//!
//! All arithmetic in the crate stays on exact [`Decimal`] values; rounding
//! happens only here, at the display edge. Midpoints round away from zero,
//! matching how the register's totals were formatted for customers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fraction digits shown on receipts and displays.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Round an exact amount to display precision.
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with exactly two fraction digits, no symbol.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_display(amount))
}

/// Format an amount prefixed with a currency symbol, e.g. `$12.50`.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    format!("{symbol}{}", format_amount(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_midpoint_away_from_zero() {
        assert_eq!(round_display(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_display(Decimal::new(125, 3)), Decimal::new(13, 2));
    }

    #[test]
    fn format_pads_to_two_fraction_digits() {
        assert_eq!(format_amount(Decimal::new(5, 0)), "5.00");
        assert_eq!(format_amount(Decimal::new(399, 2)), "3.99");
        assert_eq!(format_amount(Decimal::new(92, 0)), "92.00");
    }

    #[test]
    fn format_currency_prefixes_symbol() {
        assert_eq!(format_currency(Decimal::new(1250, 2), "$"), "$12.50");
        assert_eq!(format_currency(Decimal::ZERO, "$"), "$0.00");
    }
}
