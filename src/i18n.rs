//! Register-facing message catalog (English / Khmer).
//!
//! A closed set of message keys with static string tables, English as the
//! fallback locale, and `{param}` interpolation. The key set covers the
//! POS surface only: checkout labels, totals rows, and the handful of
//! validation strings the register surfaces.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Km,
}

impl Lang {
    /// Parse a language tag (`"en"` / `"km"`).
    pub fn from_tag(tag: &str) -> Option<Lang> {
        match tag {
            "en" => Some(Lang::En),
            "km" => Some(Lang::Km),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Km => "km",
        }
    }
}

// ---------------------------------------------------------------------------
// Message keys
// ---------------------------------------------------------------------------

/// Every message the register surface can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Msg {
    Save,
    Cancel,
    Loading,
    Search,
    LowStock,
    ProductName,
    Sku,
    Price,
    UnitPrice,
    Quantity,
    Subtotal,
    Discount,
    Tax,
    Total,
    Pos,
    ScanOrSearch,
    Cart,
    Checkout,
    ClearCart,
    PayCash,
    DiscountPercent,
    Received,
    ChangeDue,
    ErrorOccurred,
    PleaseTryAgain,
    Required,
    MinLength,
    MaxLength,
}

impl Msg {
    /// Look up the message text, falling back to English when the
    /// requested language has no entry.
    pub fn text(self, lang: Lang) -> &'static str {
        match lang {
            Lang::En => self.en(),
            Lang::Km => self.km().unwrap_or_else(|| self.en()),
        }
    }

    /// Look up and interpolate `{param}` placeholders. Placeholders with
    /// no matching parameter are left in place.
    pub fn format(self, lang: Lang, params: &[(&str, &str)]) -> String {
        interpolate(self.text(lang), params)
    }

    fn en(self) -> &'static str {
        match self {
            Msg::Save => "Save",
            Msg::Cancel => "Cancel",
            Msg::Loading => "Loading...",
            Msg::Search => "Search",
            Msg::LowStock => "Low Stock",
            Msg::ProductName => "Product Name",
            Msg::Sku => "SKU",
            Msg::Price => "Price",
            Msg::UnitPrice => "Unit Price",
            Msg::Quantity => "Quantity",
            Msg::Subtotal => "Subtotal",
            Msg::Discount => "Discount",
            Msg::Tax => "Tax",
            Msg::Total => "Total",
            Msg::Pos => "POS",
            Msg::ScanOrSearch => "Scan barcode or search products...",
            Msg::Cart => "Cart",
            Msg::Checkout => "Checkout",
            Msg::ClearCart => "Clear Cart",
            Msg::PayCash => "Pay Cash",
            Msg::DiscountPercent => "Discount (%)",
            Msg::Received => "Received",
            Msg::ChangeDue => "Change due",
            Msg::ErrorOccurred => "An error occurred",
            Msg::PleaseTryAgain => "Please try again",
            Msg::Required => "This field is required",
            Msg::MinLength => "Minimum length is {min} characters",
            Msg::MaxLength => "Maximum length is {max} characters",
        }
    }

    fn km(self) -> Option<&'static str> {
        let text = match self {
            Msg::Save => "រក្សាទុក",
            Msg::Cancel => "បោះបង់",
            Msg::Loading => "កំពុងផ្ទុក...",
            Msg::Search => "ស្វែងរក",
            Msg::LowStock => "ស្តុកទាប",
            Msg::ProductName => "ឈ្មោះផលិតផល",
            Msg::Sku => "SKU",
            Msg::Price => "តម្លៃ",
            Msg::UnitPrice => "តម្លៃឯកតា",
            Msg::Quantity => "បរិមាណ",
            Msg::Subtotal => "សរុបរង",
            // The source catalog never localized the tax row.
            Msg::Tax => return None,
            Msg::Discount => "បញ្ចុះតម្លៃ",
            Msg::Total => "សរុប",
            Msg::Pos => "POS",
            Msg::ScanOrSearch => "ស្កេនបាកូដ ឬស្វែងរកផលិតផល...",
            Msg::Cart => "រទេះទំនិញ",
            Msg::Checkout => "គិតលុយ",
            Msg::ClearCart => "សម្អាតរទេះ",
            Msg::PayCash => "បង់សាច់ប្រាក់",
            Msg::DiscountPercent => "បញ្ចុះតម្លៃ (%)",
            Msg::Received => "ប្រាក់ដែលទទួល",
            Msg::ChangeDue => "ប្រាក់អាប់",
            Msg::ErrorOccurred => "មានបញ្ហាកើតឡើង",
            Msg::PleaseTryAgain => "សូមព្យាយាមម្តងទៀត",
            Msg::Required => "វាលនេះចាំបាច់",
            Msg::MinLength => "ប្រវែងអប្បបរមា {min} តួអក្សរ",
            Msg::MaxLength => "ប្រវែងអតិបរមា {max} តួអក្សរ",
        };
        Some(text)
    }
}

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// Replace `{name}` placeholders with the matching parameter value.
/// Unknown placeholders and stray braces pass through unchanged.
fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        match after.find('}') {
            Some(end)
                if !after[..end].is_empty()
                    && after[..end]
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                let name = &after[..end];
                match params.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_is_the_default_language() {
        assert_eq!(Lang::default(), Lang::En);
        assert_eq!(Msg::PayCash.text(Lang::default()), "Pay Cash");
    }

    #[test]
    fn khmer_lookup_returns_khmer_strings() {
        assert_eq!(Msg::Subtotal.text(Lang::Km), "សរុបរង");
        assert_eq!(Msg::ChangeDue.text(Lang::Km), "ប្រាក់អាប់");
    }

    #[test]
    fn missing_khmer_entry_falls_back_to_english() {
        assert_eq!(Msg::Tax.text(Lang::Km), "Tax");
    }

    #[test]
    fn language_tags_round_trip() {
        assert_eq!(Lang::from_tag("km"), Some(Lang::Km));
        assert_eq!(Lang::from_tag("en"), Some(Lang::En));
        assert_eq!(Lang::from_tag("fr"), None);
        assert_eq!(Lang::Km.tag(), "km");
    }

    #[test]
    fn interpolation_substitutes_named_params() {
        let text = Msg::MinLength.format(Lang::En, &[("min", "4")]);
        assert_eq!(text, "Minimum length is 4 characters");

        let km = Msg::MaxLength.format(Lang::Km, &[("max", "20")]);
        assert_eq!(km, "ប្រវែងអតិបរមា 20 តួអក្សរ");
    }

    #[test]
    fn interpolation_leaves_unknown_params_in_place() {
        let text = Msg::MinLength.format(Lang::En, &[("other", "9")]);
        assert_eq!(text, "Minimum length is {min} characters");
    }

    #[test]
    fn interpolation_passes_stray_braces_through() {
        assert_eq!(interpolate("a { b } c", &[]), "a { b } c");
        assert_eq!(interpolate("open { only", &[]), "open { only");
        assert_eq!(interpolate("{x}{x}", &[("x", "1")]), "11");
    }

    #[test]
    fn every_message_has_english_text() {
        // English is the fallback locale, so its table must be total.
        let all = [
            Msg::Save,
            Msg::Cancel,
            Msg::Loading,
            Msg::Search,
            Msg::LowStock,
            Msg::ProductName,
            Msg::Sku,
            Msg::Price,
            Msg::UnitPrice,
            Msg::Quantity,
            Msg::Subtotal,
            Msg::Discount,
            Msg::Tax,
            Msg::Total,
            Msg::Pos,
            Msg::ScanOrSearch,
            Msg::Cart,
            Msg::Checkout,
            Msg::ClearCart,
            Msg::PayCash,
            Msg::DiscountPercent,
            Msg::Received,
            Msg::ChangeDue,
            Msg::ErrorOccurred,
            Msg::PleaseTryAgain,
            Msg::Required,
            Msg::MinLength,
            Msg::MaxLength,
        ];
        for msg in all {
            assert!(!msg.text(Lang::En).is_empty());
        }
    }
}
