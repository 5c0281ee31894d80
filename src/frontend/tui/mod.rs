//! TUI Frontend (ratatui-based)
//!
//! This module implements the Frontend trait using ratatui for terminal rendering.
//! It wraps crossterm for event handling and terminal management.

pub mod animation;
pub mod app;
pub mod clue;
pub mod clue_carousel;

pub use app::TuiFrontend;
pub use clue_carousel::{CarouselStyle, ClueCarousel};
