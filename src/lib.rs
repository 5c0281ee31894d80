//! clue-carousel - one-clue-at-a-time crossword clue carousel for the terminal
//!
//! The carousel state machine lives in `widgets` and depends only on `data`.
//! `frontend::tui` renders it with ratatui; `core` wires input to it.

pub mod config;
pub mod core;
pub mod data;
pub mod frontend;
pub mod puzzle;
pub mod theme;
pub mod watcher;
pub mod widgets;
