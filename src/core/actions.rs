//! Shared action vocabulary for the carousel stack.
//!
//! Translates raw `KeyEvent`s and textual keybinds into semantic
//! `CarouselAction`s so keyboard and mouse input end up on the same path.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// All possible carousel actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselAction {
    // Navigation inside the focused carousel
    Next,
    Previous,

    // Focus between carousels
    SwitchFocus,
    FocusPrevious,

    Reload,
    Quit,

    // No action (key not bound)
    None,
}

/// Convert KeyEvent to string representation for matching against keybinds
pub fn key_event_to_string(key: KeyEvent) -> String {
    let mut parts = Vec::new();

    // Add modifiers
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }

    // Add key code
    let key_str = match key.code {
        KeyCode::Char(c) => {
            // For letter keys with Shift, use uppercase
            if key.modifiers.contains(KeyModifiers::SHIFT) && c.is_ascii_lowercase() {
                c.to_ascii_uppercase().to_string()
            } else {
                c.to_string()
            }
        }
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => {
            // Some terminals send BackTab without the Shift modifier
            if !parts.contains(&"Shift") {
                parts.push("Shift");
            }
            "Tab".to_string()
        }
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => return String::new(), // Unrecognized key
    };

    parts.push(&key_str);
    parts.join("+")
}

/// Canonical form of a keybind string (modifier aliases and order)
pub fn normalize_keybind(s: &str) -> String {
    let mut modifiers = Vec::new();
    let mut key = "";

    for part in s.split('+') {
        match part.trim() {
            "Ctrl" | "Control" => modifiers.push("Ctrl"),
            "Shift" => modifiers.push("Shift"),
            "Alt" => modifiers.push("Alt"),
            k => key = k,
        }
    }

    // Sort modifiers for consistent comparison
    modifiers.sort();
    modifiers.dedup();
    modifiers.push(key);
    modifiers.join("+")
}
