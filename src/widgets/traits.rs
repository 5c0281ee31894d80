//! Behavior traits shared by widget states
//!
//! Frontends drive widgets through these so key and mouse handling does not
//! need to know the concrete widget type.

/// Trait for widgets whose selection cycles through a ring of items
pub trait Cyclable {
    /// Cycle to next value (wraps to the first)
    fn cycle_forward(&mut self);

    /// Cycle to previous value (wraps to the last)
    fn cycle_backward(&mut self);
}
