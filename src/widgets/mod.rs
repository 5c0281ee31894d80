//! Widget state structs (rendering-agnostic)
//!
//! This module contains state-only structures for the widget types.
//! These structs hold data and provide methods for state manipulation,
//! but contain no rendering logic. The TUI frontend renders these states
//! with ratatui.

pub mod carousel;
pub mod traits;

pub use carousel::{CarouselState, SettledIndex, SlideDescriptor, SLIDE_WIDTH_PERCENT};
pub use traits::Cyclable;
