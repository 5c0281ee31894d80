//! Core application logic layer
//!
//! This module owns the clue source, the carousel states and input handling.
//! No rendering code here; input arrives as frontend-agnostic `FrontendEvent`s.
//! Core updates widget state, frontends read and render.

pub mod actions;
pub mod app_core;
pub mod input_result;

pub use actions::CarouselAction;
pub use app_core::{AppCore, PuzzleSource};
pub use input_result::InputResult;
