//! Time-based easing for the carousel strip offset.
//!
//! Tracks a start value, a target offset (percent of a slide) and a start
//! instant. The value reaches the target once `duration` has elapsed; callers
//! pass `now` in so tests never sleep.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SlideAnimation {
    from: f64,
    to: i64,
    started: Option<Instant>,
    duration: Duration,
}

impl SlideAnimation {
    pub fn new(duration: Duration) -> Self {
        Self {
            from: 0.0,
            to: 0,
            started: None,
            duration,
        }
    }

    /// Offset the strip is heading to
    pub fn target(&self) -> i64 {
        self.to
    }

    /// Start moving towards `to` from wherever the strip is right now
    pub fn retarget(&mut self, to: i64, now: Instant) {
        self.from = self.value(now);
        self.to = to;
        self.started = if self.duration.is_zero() { None } else { Some(now) };
    }

    /// Snap to `to` without animating
    pub fn jump_to(&mut self, to: i64) {
        self.from = to as f64;
        self.to = to;
        self.started = None;
    }

    /// Offset at `now`, in percent of a slide
    pub fn value(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return self.to as f64;
        };
        let t = progress(now.saturating_duration_since(started), self.duration);
        self.from + (self.to as f64 - self.from) * ease_out(t)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|started| now.saturating_duration_since(started) < self.duration)
    }
}

fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

// Cubic ease-out
fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
