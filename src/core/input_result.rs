//! What the main loop should do after `AppCore` handles an input.

/// Result of handling one frontend event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep running; the event may or may not have changed state
    Continue,

    /// Re-read the puzzle source
    Reload,

    /// Leave the main loop
    Quit,
}

impl InputResult {
    pub fn is_quit(&self) -> bool {
        matches!(self, InputResult::Quit)
    }
}
