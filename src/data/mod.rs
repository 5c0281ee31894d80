//! Data layer - Pure state without UI coupling
//!
//! This module contains the clue data every carousel reads from.
//! NO imports from frontend/ or any rendering code.

pub mod clue;

pub use clue::*;
