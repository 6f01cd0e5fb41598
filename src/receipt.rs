//! Plain-text receipt rendering at a fixed character width.
//!
//! Two-column rows with right-aligned amounts, sized for 32-column
//! thermal paper. Labels come from the message catalog in the configured
//! language. Truncation counts characters, not bytes, so Khmer labels
//! never split mid-codepoint.

use crate::cart::Cart;
use crate::checkout::{CashTotals, RxTotals};
use crate::i18n::Msg;
use crate::money::format_currency;
use crate::settings::RegisterSettings;
use rust_decimal::Decimal;

/// Characters per receipt line (58mm thermal paper).
pub const RECEIPT_WIDTH: usize = 32;

// ---------------------------------------------------------------------------
// Layout helpers
// ---------------------------------------------------------------------------

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Center `text` within `width`; longer text is returned unchanged.
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

/// Two-column row: label left, amount right, at least one space between.
/// Labels that would collide with the amount get truncated.
fn two_column(left: &str, right: &str, width: usize) -> String {
    let right_len = right.chars().count();
    if right_len >= width {
        return right.to_string();
    }

    let left = truncate_chars(left, width - right_len - 1);
    let gap = width - left.chars().count() - right_len;
    format!("{left}{}{right}", " ".repeat(gap))
}

fn divider() -> String {
    "-".repeat(RECEIPT_WIDTH)
}

/// Render a rate fraction as a whole-ish percent: 0.20 becomes "20".
fn rate_percent(rate: Decimal) -> String {
    (rate * Decimal::ONE_HUNDRED).normalize().to_string()
}

fn item_rows(cart: &Cart, symbol: &str, out: &mut Vec<String>) {
    for line in cart.lines() {
        out.push(two_column(
            &format!("{}x {}", line.quantity, line.name),
            &format_currency(line.line_total(), symbol),
            RECEIPT_WIDTH,
        ));
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render the prescription-counter receipt.
pub fn rx_receipt(settings: &RegisterSettings, cart: &Cart, totals: &RxTotals) -> String {
    let lang = settings.language;
    let symbol = settings.currency_symbol.as_str();
    let mut out = Vec::new();

    out.push(center(&settings.store_name, RECEIPT_WIDTH));
    out.push(divider());
    item_rows(cart, symbol, &mut out);
    out.push(divider());
    out.push(two_column(
        Msg::Subtotal.text(lang),
        &format_currency(totals.subtotal, symbol),
        RECEIPT_WIDTH,
    ));
    out.push(two_column(
        &format!(
            "{} ({}%)",
            Msg::Discount.text(lang),
            rate_percent(totals.discount_rate)
        ),
        &format_currency(totals.discount, symbol),
        RECEIPT_WIDTH,
    ));
    out.push(two_column(
        &format!("{} ({}%)", Msg::Tax.text(lang), rate_percent(totals.tax_rate)),
        &format_currency(totals.tax, symbol),
        RECEIPT_WIDTH,
    ));
    out.push(two_column(
        Msg::Total.text(lang),
        &format_currency(totals.total, symbol),
        RECEIPT_WIDTH,
    ));

    let mut text = out.join("\n");
    text.push('\n');
    text
}

/// Render the cash-counter receipt, including tender and change rows.
pub fn cash_receipt(
    settings: &RegisterSettings,
    cart: &Cart,
    totals: &CashTotals,
    received: Decimal,
    change: Decimal,
) -> String {
    let lang = settings.language;
    let symbol = settings.currency_symbol.as_str();
    let mut out = Vec::new();

    out.push(center(&settings.store_name, RECEIPT_WIDTH));
    out.push(divider());
    item_rows(cart, symbol, &mut out);
    out.push(divider());
    out.push(two_column(
        Msg::Subtotal.text(lang),
        &format_currency(totals.subtotal, symbol),
        RECEIPT_WIDTH,
    ));
    out.push(two_column(
        &format!(
            "{} ({}%)",
            Msg::Discount.text(lang),
            totals.discount_percent.normalize()
        ),
        &format_currency(totals.discount, symbol),
        RECEIPT_WIDTH,
    ));
    out.push(two_column(
        Msg::Total.text(lang),
        &format_currency(totals.total, symbol),
        RECEIPT_WIDTH,
    ));
    out.push(two_column(
        Msg::Received.text(lang),
        &format_currency(received, symbol),
        RECEIPT_WIDTH,
    ));
    out.push(two_column(
        Msg::ChangeDue.text(lang),
        &format_currency(change, symbol),
        RECEIPT_WIDTH,
    ));

    let mut text = out.join("\n");
    text.push('\n');
    text
}

// ===========================================================================
// Tests
// ===========================================================================
