//! Keyboard-wedge barcode scanner detection and shortcut routing.
//!
//! Wedge scanners type like a keyboard: a burst of characters well under
//! human speed, terminated by Enter. The router keeps a rolling buffer of
//! printable keystrokes and classifies each incoming event as part of a
//! scan, a shortcut, or plain typing.
//!
//! Key design goals:
//! - **Pull-based timing**: no timers; staleness is checked against the
//!   caller-supplied clock on each event, so tests drive time explicitly
//! - **Focus-aware**: shortcuts stay quiet while a text field has focus,
//!   but scan completion fires regardless, since scanners type into
//!   whatever is focused
//! - **Faithful capture**: a character that triggers a shortcut is still
//!   absorbed into the scan buffer

use crate::settings::RegisterSettings;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Key events
// ---------------------------------------------------------------------------

/// The key part of a host keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Key {
    Char(char),
    Enter,
    Other,
}

impl Key {
    /// Map a DOM-style key name: single characters become [`Key::Char`],
    /// `"Enter"` becomes [`Key::Enter`], anything else is [`Key::Other`].
    pub fn from_name(name: &str) -> Key {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c);
        }
        if name.eq_ignore_ascii_case("enter") {
            return Key::Enter;
        }
        Key::Other
    }
}

/// A keystroke as reported by the embedding host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    /// Whether an input or textarea had focus when the key arrived.
    pub in_text_field: bool,
}

impl Default for KeyEvent {
    fn default() -> Self {
        Self {
            key: Key::Other,
            ctrl: false,
            alt: false,
            meta: false,
            in_text_field: false,
        }
    }
}

impl KeyEvent {
    pub fn char(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ..Default::default()
        }
    }

    pub fn enter() -> Self {
        Self {
            key: Key::Enter,
            ..Default::default()
        }
    }

    /// Build an event from a DOM-style key name, no modifiers.
    pub fn named(name: &str) -> Self {
        Self {
            key: Key::from_name(name),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Shortcuts
// ---------------------------------------------------------------------------

/// Single-key counter shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shortcut {
    FocusSearch,
    IncrementLast,
    DecrementLast,
    Hold,
    Resume,
    ClearCart,
    Pay,
}

impl Shortcut {
    /// The shortcut bound to a character, case-insensitive.
    pub fn from_char(c: char) -> Option<Shortcut> {
        match c.to_ascii_lowercase() {
            'f' => Some(Shortcut::FocusSearch),
            '+' => Some(Shortcut::IncrementLast),
            '-' => Some(Shortcut::DecrementLast),
            'h' => Some(Shortcut::Hold),
            'r' => Some(Shortcut::Resume),
            'c' => Some(Shortcut::ClearCart),
            'p' => Some(Shortcut::Pay),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Classification of one keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutedKey {
    /// Enter completed a buffered code of at least the minimum length.
    Scan(String),
    /// An unmodified character hit a shortcut binding outside a text field.
    Shortcut(Shortcut),
    /// The character went into the scan buffer and nothing else.
    Buffered,
    /// Modified keys, named keys, and Enter on a short buffer.
    Ignored,
}

/// Rolling-buffer keystroke classifier.
///
/// Characters accumulate in the buffer; a gap of at least the idle window
/// between them throws the buffer away as human typing. Enter turns a
/// long-enough buffer into a [`RoutedKey::Scan`].
#[derive(Debug)]
pub struct InputRouter {
    buffer: String,
    last_key_at: Option<DateTime<Utc>>,
    idle_window: Duration,
    min_scan_length: usize,
}

impl InputRouter {
    pub fn new(idle_window_ms: i64, min_scan_length: usize) -> Self {
        Self {
            buffer: String::new(),
            last_key_at: None,
            idle_window: Duration::milliseconds(idle_window_ms),
            min_scan_length,
        }
    }

    pub fn from_settings(settings: &RegisterSettings) -> Self {
        Self::new(settings.scan_idle_ms, settings.scan_min_length)
    }

    /// Classify one keystroke at time `now`.
    ///
    /// Characters with ctrl or meta held never touch the buffer. A
    /// character both buffers and fires its shortcut when one is bound;
    /// the register applies the shortcut while the buffer keeps filling.
    pub fn route(&mut self, event: &KeyEvent, now: DateTime<Utc>) -> RoutedKey {
        self.expire_if_idle(now);

        match event.key {
            Key::Char(c) if !event.ctrl && !event.meta => {
                self.buffer.push(c);
                self.last_key_at = Some(now);

                if !event.in_text_field && !event.alt {
                    if let Some(shortcut) = Shortcut::from_char(c) {
                        return RoutedKey::Shortcut(shortcut);
                    }
                }
                RoutedKey::Buffered
            }
            Key::Enter if self.buffer.chars().count() >= self.min_scan_length => {
                let code = std::mem::take(&mut self.buffer);
                self.last_key_at = None;
                RoutedKey::Scan(code)
            }
            _ => RoutedKey::Ignored,
        }
    }

    /// The pending scan buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    fn expire_if_idle(&mut self, now: DateTime<Utc>) {
        if let Some(last) = self.last_key_at {
            if now.signed_duration_since(last) >= self.idle_window {
                self.buffer.clear();
                self.last_key_at = None;
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
