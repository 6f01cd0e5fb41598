//! Scripted register walkthrough.
//!
//! Drives the engine end to end with a manual clock: browsing, a wedge
//! scan, shortcuts, hold/resume, and both checkout modes. Receipts go to
//! stdout; everything else is structured logs.

use anyhow::Result;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rx_register::{
    cash_totals, change_due, demo_products, receipt, Catalog, Category, KeyEvent, ManualClock,
    PatientInfo, PrescriptionInfo, Register, RegisterSettings,
};

/// Milliseconds between simulated scanner keystrokes.
const SCANNER_KEY_GAP_MS: i64 = 12;

/// Pause between simulated operator actions, long enough to expire any
/// stray characters in the scan buffer.
const OPERATOR_PAUSE_MS: i64 = 300;

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rx_register=debug"));
    let console_layer = fmt::layer().with_target(true);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

/// Feed a code the way a wedge scanner types: fast characters into the
/// focused search box, terminated by Enter.
fn scan_code(register: &mut Register, clock: &ManualClock, code: &str) {
    for c in code.chars() {
        register.handle_key(&KeyEvent {
            in_text_field: true,
            ..KeyEvent::char(c)
        });
        clock.advance(Duration::milliseconds(SCANNER_KEY_GAP_MS));
    }
    let outcome = register.handle_key(&KeyEvent {
        in_text_field: true,
        ..KeyEvent::enter()
    });
    info!(code = %code, ?outcome, "scan fed to register");
}

/// Press a single shortcut key at operator speed.
fn press(register: &mut Register, clock: &ManualClock, key: char) {
    clock.advance(Duration::milliseconds(OPERATOR_PAUSE_MS));
    let outcome = register.handle_key(&KeyEvent::char(key));
    info!(key = %key, ?outcome, "shortcut pressed");
    clock.advance(Duration::milliseconds(OPERATOR_PAUSE_MS));
}

fn main() -> Result<()> {
    init_logging();
    info!("Starting Rx Register v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Catalog::new(demo_products())?;
    let settings = RegisterSettings::from_json(r#"{"storeName":"Greenleaf Pharmacy"}"#)?;
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let mut register = Register::new(catalog, settings, clock.clone());

    // Shelf overview, the way the product grid shows it.
    for category in Category::ALL {
        let shelf = register.catalog().browse(category, "");
        info!(category = %category, products = shelf.len(), "shelf loaded");
        for product in shelf {
            if let Some(badge) = product.stock_level().badge() {
                info!(
                    product = %product.name,
                    stock = product.stock_quantity,
                    badge,
                    "stock running down"
                );
            }
        }
    }

    // An Rx sale: two clicked products, one scanned, one bumped with `+`.
    register.add_to_cart("m1");
    register.add_to_cart("m8");
    scan_code(&mut register, &clock, "PCM-500-TAB");
    press(&mut register, &clock, '+');

    register.set_patient(PatientInfo {
        name: "Sokha Chan".to_string(),
        age: "52".to_string(),
        phone: "012 555 014".to_string(),
        allergies: "Penicillin".to_string(),
    });
    register.set_prescription(PrescriptionInfo {
        rx_number: "RX-2031".to_string(),
        prescriber: "Dr. Vanna".to_string(),
        directions: "1 capsule three times daily".to_string(),
        repeats: "2".to_string(),
    });

    // Park it for the patient, serve a walk-in, then bring it back.
    press(&mut register, &clock, 'h');
    for ticket in register.tickets().tickets() {
        info!(
            ticket_id = %ticket.id,
            name = %ticket.name,
            lines = ticket.cart.len(),
            held_at = %ticket.created_at,
            "ticket waiting"
        );
    }

    register.add_to_cart("m3");
    register.set_quantity("m3", 2);
    let walk_in = register.rx_totals();
    println!("{}", receipt::rx_receipt(register.settings(), register.cart(), &walk_in));
    press(&mut register, &clock, 'c');

    press(&mut register, &clock, 'r');
    let totals = register.rx_totals();
    info!(
        subtotal = %totals.subtotal,
        discount = %totals.discount,
        tax = %totals.tax,
        total = %totals.total,
        "prescription sale totals"
    );
    println!("{}", receipt::rx_receipt(register.settings(), register.cart(), &totals));
    register.clear_cart();

    // A cash-counter sale: searched items, operator discount, tender.
    let hits = register.catalog().quick_search("syrup");
    for product in &hits {
        info!(product = %product.name, sku = %product.sku, "search hit");
    }
    register.add_to_cart("m2");
    register.add_to_cart("m2");
    register.add_to_cart("m2");
    register.add_to_cart("m7");

    let cash = cash_totals(
        register.cart(),
        Decimal::from(10),
        register.settings().discount_max,
    );
    let received = Decimal::new(2000, 2);
    let change = change_due(cash.total, received);
    info!(total = %cash.total, received = %received, change = %change, "cash tender");
    println!(
        "{}",
        receipt::cash_receipt(register.settings(), register.cart(), &cash, received, change)
    );

    info!(
        tickets_waiting = register.tickets().len(),
        "walkthrough complete"
    );
    Ok(())
}
