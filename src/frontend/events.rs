//! Input events in carousel terms.
//!
//! The TUI maps crossterm's stream onto this enum. Mouse traffic is reduced to
//! the gestures a carousel reacts to; motion, drags and releases are dropped
//! before they reach the core.

use crossterm::event::{KeyEvent, MouseButton, MouseEventKind};

/// Mouse gesture at a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Left button pressed: focus, and press `<` / `>` if one is under it
    Press,
    /// Wheel towards the next clue
    WheelForward,
    /// Wheel towards the previous clue
    WheelBack,
}

impl Gesture {
    pub fn from_mouse(kind: MouseEventKind) -> Option<Self> {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Gesture::Press),
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => Some(Gesture::WheelForward),
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => Some(Gesture::WheelBack),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    /// Key press (repeats and releases are filtered out by the frontend)
    Key(KeyEvent),
    Pointer { gesture: Gesture, x: u16, y: u16 },
    Resize { width: u16, height: u16 },
    Quit,
}
