//! Core application state - frontend-agnostic
//!
//! `AppCore` owns the shared clue source and one `CarouselState` per
//! configured carousel. It turns frontend events into carousel transitions
//! and keeps a queue of settled indices for the frontend to animate.

use crate::config::Config;
use crate::core::actions::CarouselAction;
use crate::core::input_result::InputResult;
use crate::data::SharedClues;
use crate::frontend::FrontendEvent;
use crate::puzzle::Puzzle;
use crate::widgets::{CarouselState, Cyclable, SettledIndex};
use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

/// Where clues come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleSource {
    File(PathBuf),
    Sample(String),
}

impl PuzzleSource {
    pub fn load(&self) -> Result<Puzzle> {
        match self {
            PuzzleSource::File(path) => Puzzle::load_from_file(path),
            PuzzleSource::Sample(name) => Puzzle::sample(name),
        }
    }

    /// File to watch for changes, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            PuzzleSource::File(path) => Some(path),
            PuzzleSource::Sample(_) => None,
        }
    }
}

/// Step any cyclable widget one item forward or back
fn cycle(widget: &mut dyn Cyclable, forward: bool) {
    if forward {
        widget.cycle_forward();
    } else {
        widget.cycle_backward();
    }
}

/// (carousel position, settled index) pairs waiting for the frontend
type SettledQueue = Rc<RefCell<VecDeque<(usize, SettledIndex)>>>;

/// Core application state
pub struct AppCore {
    pub config: Config,
    pub source: PuzzleSource,
    clues: Option<SharedClues>,
    carousels: Vec<CarouselState>,
    focused: usize,
    settled: SettledQueue,

    /// Application running flag
    pub running: bool,

    /// Whether the frontend needs to redraw
    pub needs_render: bool,
}

impl AppCore {
    /// Build the carousel stack. Clues stay absent until `reload` succeeds.
    pub fn new(config: Config, source: PuzzleSource) -> Self {
        let settled: SettledQueue = Rc::new(RefCell::new(VecDeque::new()));

        let carousels = config
            .carousels
            .iter()
            .enumerate()
            .map(|(position, def)| {
                let mut carousel = CarouselState::new(def.direction, None).with_label(def.label.clone());
                let queue = Rc::clone(&settled);
                carousel.on_settled(move |s| queue.borrow_mut().push_back((position, *s)));
                carousel
            })
            .collect();

        Self {
            config,
            source,
            clues: None,
            carousels,
            focused: 0,
            settled,
            running: true,
            needs_render: true,
        }
    }

    pub fn carousels(&self) -> &[CarouselState] {
        &self.carousels
    }

    pub fn clues(&self) -> Option<&SharedClues> {
        self.clues.as_ref()
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn set_focus(&mut self, position: usize) {
        if position < self.carousels.len() && position != self.focused {
            self.focused = position;
            self.needs_render = true;
        }
    }

    /// Re-read the puzzle source and hand the new snapshot to every carousel
    pub fn reload(&mut self) -> Result<()> {
        let clues = self
            .source
            .load()
            .and_then(|puzzle| puzzle.to_clues())
            .with_context(|| format!("Failed to load puzzle from {:?}", self.source))?;
        tracing::info!(
            source = ?self.source,
            clues = clues.total(),
            "Loaded puzzle"
        );
        self.replace_clues(clues.into_shared());
        Ok(())
    }

    /// Swap the shared source (initial load, reload key or file watcher)
    pub fn replace_clues(&mut self, clues: SharedClues) {
        for carousel in &mut self.carousels {
            carousel.set_clues(Some(SharedClues::clone(&clues)));
        }
        self.clues = Some(clues);
        self.needs_render = true;
    }

    /// Settled indices since the last call, oldest first
    pub fn take_settled(&mut self) -> Vec<(usize, SettledIndex)> {
        self.settled.borrow_mut().drain(..).collect()
    }

    /// Apply an action to the carousel at `position` (mouse clicks) or to the
    /// focused one when `position` is `None` (keys)
    pub fn apply_action(&mut self, position: Option<usize>, action: CarouselAction) -> InputResult {
        let target = position.unwrap_or(self.focused);
        match action {
            CarouselAction::Next | CarouselAction::Previous => {
                if let Some(carousel) = self.carousels.get_mut(target) {
                    cycle(carousel, action == CarouselAction::Next);
                    self.needs_render = true;
                }
            }
            CarouselAction::SwitchFocus => {
                if !self.carousels.is_empty() {
                    self.set_focus((self.focused + 1) % self.carousels.len());
                }
            }
            CarouselAction::FocusPrevious => {
                let len = self.carousels.len();
                if len > 0 {
                    self.set_focus((self.focused + len - 1) % len);
                }
            }
            CarouselAction::Reload => return InputResult::Reload,
            CarouselAction::Quit => {
                self.running = false;
                return InputResult::Quit;
            }
            CarouselAction::None => {}
        }
        InputResult::Continue
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        let action = self.config.keybinds.resolve_action(key);
        if action != CarouselAction::None {
            tracing::debug!(?action, focused = self.focused, "Key action");
        }
        self.apply_action(None, action)
    }

    /// Handle events that need no frontend geometry (keys, resize, quit)
    pub fn handle_event(&mut self, event: &FrontendEvent) -> InputResult {
        match event {
            FrontendEvent::Key(key) => self.handle_key(*key),
            FrontendEvent::Resize { width, height } => {
                tracing::debug!(width, height, "Terminal resized");
                self.needs_render = true;
                InputResult::Continue
            }
            FrontendEvent::Quit => self.apply_action(None, CarouselAction::Quit),
            FrontendEvent::Pointer { .. } => InputResult::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClueRecord, Clues, Direction};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn core_with(across: u32, down: Option<u32>) -> AppCore {
        let mut core = AppCore::new(Config::default(), PuzzleSource::Sample("sample".to_string()));
        let mut clues = Clues::new().with_sequence(
            Direction::Across,
            (1..=across).map(|n| ClueRecord::new(n, "a")).collect(),
        );
        if let Some(down) = down {
            clues.insert(Direction::Down, (1..=down).map(|n| ClueRecord::new(n, "d")).collect());
        }
        core.replace_clues(clues.into_shared());
        core
    }

    fn key(code: KeyCode) -> FrontendEvent {
        FrontendEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_keys_drive_focused_carousel() {
        let mut core = core_with(3, Some(2));

        core.handle_event(&key(KeyCode::Right));
        core.handle_event(&key(KeyCode::Right));
        assert_eq!(core.carousels()[0].current_index(), 2);
        assert_eq!(core.carousels()[1].current_index(), 0);

        core.handle_event(&key(KeyCode::Tab));
        assert_eq!(core.focused(), 1);
        core.handle_event(&key(KeyCode::Left));
        assert_eq!(core.carousels()[1].current_index(), 1);

        core.handle_event(&key(KeyCode::Tab));
        assert_eq!(core.focused(), 0);
        core.handle_event(&key(KeyCode::Up));
        assert_eq!(core.focused(), 1);
    }

    #[test]
    fn test_settled_queue_records_positions() {
        let mut core = core_with(3, Some(3));
        core.take_settled();

        core.apply_action(Some(1), CarouselAction::Next);
        core.apply_action(Some(0), CarouselAction::Previous);

        let settled = core.take_settled();
        assert_eq!(settled.len(), 2);
        assert_eq!(settled[0].0, 1);
        assert_eq!(settled[0].1.direction, Direction::Down);
        assert_eq!(settled[0].1.offset_percent, -100);
        assert_eq!(settled[1].0, 0);
        assert_eq!(settled[1].1.index, 2);
        assert!(core.take_settled().is_empty());
    }

    #[test]
    fn test_actions_wrap_at_both_ends() {
        let mut core = core_with(3, None);
        core.take_settled();

        core.apply_action(None, CarouselAction::Previous);
        assert_eq!(core.carousels()[0].current_index(), 2);
        core.apply_action(None, CarouselAction::Next);
        assert_eq!(core.carousels()[0].current_index(), 0);

        let indices: Vec<usize> = core.take_settled().iter().map(|(_, s)| s.index).collect();
        assert_eq!(indices, vec![2, 0]);
    }

    #[test]
    fn test_absent_direction_ignores_navigation() {
        let mut core = core_with(2, None);
        core.apply_action(Some(1), CarouselAction::Next);
        core.apply_action(Some(1), CarouselAction::Previous);

        assert_eq!(core.carousels()[1].current_index(), 0);
        assert_eq!(core.carousels()[1].header(), "DOWN");
        assert!(core.take_settled().is_empty());
    }

    #[test]
    fn test_before_load_everything_is_inert() {
        let mut core = AppCore::new(Config::default(), PuzzleSource::Sample("sample".to_string()));
        assert!(core.clues().is_none());
        assert_eq!(core.apply_action(None, CarouselAction::Next), InputResult::Continue);
        assert!(core.carousels().iter().all(|c| c.current_index() == 0 && c.is_empty()));
    }

    #[test]
    fn test_reload_from_sample_and_shrinking_source() {
        let mut core = core_with(5, Some(5));
        for _ in 0..4 {
            core.apply_action(Some(0), CarouselAction::Next);
        }
        core.take_settled();

        // The embedded sample has three across clues, so index 4 is out of range
        core.reload().unwrap();
        assert_eq!(core.carousels()[0].len(), 3);
        assert_eq!(core.carousels()[0].current_index(), 0);
        assert_eq!(core.take_settled().len(), 1);
    }

    #[test]
    fn test_bad_source_keeps_previous_clues() {
        let mut core = core_with(2, None);
        core.source = PuzzleSource::Sample("missing".to_string());
        assert!(core.reload().is_err());
        assert_eq!(core.carousels()[0].len(), 2);
    }

    #[test]
    fn test_quit_and_reload_results() {
        let mut core = core_with(1, None);
        assert_eq!(core.handle_event(&key(KeyCode::Char('r'))), InputResult::Reload);
        assert!(core.running);
        assert!(core.handle_event(&FrontendEvent::Quit).is_quit());
        assert!(!core.running);
    }
}
