//! Rx Register - headless pharmacy point-of-sale engine.
//!
//! The cart, ticket, checkout, and scan-input core of a pharmacy counter,
//! kept free of UI and I/O so any shell (desktop webview, terminal, test
//! harness) can embed it. All state is serializable, every operation is
//! synchronous in host event order, and time is injected, so hosts can
//! drive the engine deterministically.
//!
//! The flow mirrors the counter itself: products come from the
//! [`catalog`], selections land in the [`cart`], parked sales wait in
//! [`tickets`], totals derive in [`checkout`], and keystrokes are
//! classified by the [`scanner`] router. [`register::Register`] ties
//! those together behind one facade.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod i18n;
pub mod money;
pub mod receipt;
pub mod register;
pub mod scanner;
pub mod settings;
pub mod tickets;

pub use cart::{Cart, CartLine, PatientInfo, PrescriptionInfo};
pub use catalog::{demo_products, Catalog, CatalogError, Category, Product, StockLevel};
pub use checkout::{cash_totals, change_due, rx_totals, CashTotals, RxTotals};
pub use clock::{Clock, ManualClock, SystemClock};
pub use i18n::{Lang, Msg};
pub use register::{Action, KeyOutcome, Register, RegisterState};
pub use scanner::{InputRouter, Key, KeyEvent, RoutedKey, Shortcut};
pub use settings::{RegisterSettings, SettingsError};
pub use tickets::{Ticket, TicketQueue};
