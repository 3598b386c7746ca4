// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Buzzer key bindings.
//!
//! Maps physical keys to contestant slots and the host's pass action.
//! Escape is reserved for cancelling the session and cannot be bound.

use crossterm::event::KeyCode;

use crate::config::KeySettings;
use crate::round::SLOT_COUNT;

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Buzz (or signal ready) for the given slot.
    Buzz(usize),
    /// Pass the current song.
    Pass,
}

/// The resolved key bindings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    /// One buzzer key per slot.
    pub buzzers: [KeyCode; SLOT_COUNT],
    /// The host's pass key.
    pub pass: KeyCode,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            buzzers: [KeyCode::Char('z'), KeyCode::Char(' '), KeyCode::Char('/')],
            pass: KeyCode::Char('p'),
        }
    }
}

impl KeyMap {
    /// Build a key map from settings, validating the bindings.
    pub fn from_settings(settings: &KeySettings) -> Result<Self, String> {
        if settings.buzzers.len() != SLOT_COUNT {
            return Err(format!(
                "expected {} buzzer keys, got {}",
                SLOT_COUNT,
                settings.buzzers.len()
            ));
        }
        let mut buzzers = [KeyCode::Null; SLOT_COUNT];
        for (slot, name) in settings.buzzers.iter().enumerate() {
            buzzers[slot] = parse_key(name)?;
        }
        let pass = parse_key(&settings.pass)?;

        let mut all = buzzers.to_vec();
        all.push(pass);
        for (i, key) in all.iter().enumerate() {
            if all[i + 1..].contains(key) {
                return Err(format!("key {} is bound twice", format_key(*key)));
            }
        }

        Ok(Self { buzzers, pass })
    }

    /// Resolve a key press to its action.
    pub fn action(&self, code: KeyCode) -> Option<KeyAction> {
        if code == self.pass {
            return Some(KeyAction::Pass);
        }
        self.buzzers
            .iter()
            .position(|&key| key == code)
            .map(KeyAction::Buzz)
    }
}

/// Parse a key name from settings into a key code.
///
/// Single characters name themselves (lowercased); a few special keys
/// have word names.
pub fn parse_key(name: &str) -> Result<KeyCode, String> {
    let name = name.trim();
    match name.to_lowercase().as_str() {
        "space" => return Ok(KeyCode::Char(' ')),
        "enter" => return Ok(KeyCode::Enter),
        "tab" => return Ok(KeyCode::Tab),
        "esc" | "escape" => return Err("escape is reserved for cancelling".to_string()),
        _ => {}
    }
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(KeyCode::Char(c.to_ascii_lowercase())),
        _ => Err(format!("unknown key name {:?}", name)),
    }
}

/// Format a key code for display.
pub fn format_key(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        _ => "?".to_string(),
    }
}
