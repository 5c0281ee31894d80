//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, and cleanup.

pub mod events;
pub mod tui;

use crate::core::AppCore;
use anyhow::Result;
pub use events::{FrontendEvent, Gesture};
pub use tui::TuiFrontend;

/// Frontend trait - separates rendering concerns from carousel logic
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events (keyboard, mouse, resize) converted to the
    /// frontend-agnostic `FrontendEvent` enum, or an empty list.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state
    ///
    /// Called whenever the core flags `needs_render` or an animation is in
    /// flight.
    fn render(&mut self, core: &AppCore) -> Result<()>;

    /// Restore the terminal and release resources
    fn cleanup(&mut self) -> Result<()>;
}
