use super::clue_carousel::{CarouselStyle, ClueCarousel};
use crate::config::Config;
use crate::core::{AppCore, CarouselAction};
use crate::frontend::{Frontend, FrontendEvent, Gesture};
use crate::theme::CarouselTheme;
use crate::widgets::SettledIndex;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// TUI Frontend using ratatui
///
/// Renders the carousel stack with ratatui and handles events via crossterm.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    animation: Duration,
    theme: CarouselTheme,
    style: CarouselStyle,
    slide_rows: u16,
    carousels: Vec<ClueCarousel>,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables mouse capture, and enters alternate screen.
    pub fn new(config: &Config) -> Result<Self> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(config.ui.poll_ms),
            animation: Duration::from_millis(config.ui.animation_ms),
            theme: CarouselTheme::from_config(&config.colors),
            style: CarouselStyle::from_config(&config.ui),
            slide_rows: config.ui.slide_rows.max(1),
            carousels: Vec::new(),
        })
    }

    /// Start slide animations for indices that settled since the last frame
    pub fn apply_settled(&mut self, settled: &[(usize, SettledIndex)], now: Instant) {
        for (position, index) in settled {
            self.ensure_carousels(position + 1);
            self.carousels[*position].settle(index, now);
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.carousels.iter().any(|c| c.is_animating(now))
    }

    /// Carousel under (x, y) and the button hit there, if any
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(usize, Option<CarouselAction>)> {
        self.carousels
            .iter()
            .position(|c| c.contains(x, y))
            .map(|position| (position, self.carousels[position].hit_test(x, y)))
    }

    fn ensure_carousels(&mut self, count: usize) {
        while self.carousels.len() < count {
            self.carousels.push(ClueCarousel::new(self.animation));
        }
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Only process key press events (ignore repeats and releases)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::Key(key_event))
            }
            Event::Mouse(mouse_event) => Gesture::from_mouse(mouse_event.kind).map(|gesture| {
                FrontendEvent::Pointer {
                    gesture,
                    x: mouse_event.column,
                    y: mouse_event.row,
                }
            }),
            Event::Resize(width, height) => Some(FrontendEvent::Resize { width, height }),
            _ => None,
        }
    }
}

/// Most raw events taken in one frame; the rest wait for the next one
const MAX_EVENTS_PER_FRAME: usize = 64;

/// Wait up to `timeout` for the first event, then take only what is already
/// queued. Returns within one frame even under a steady stream of mouse motion.
fn drain_events<P, R>(timeout: Duration, mut poll: P, mut read: R) -> io::Result<Vec<FrontendEvent>>
where
    P: FnMut(Duration) -> io::Result<bool>,
    R: FnMut() -> io::Result<Event>,
{
    let mut events = Vec::new();
    let mut wait = timeout;
    for _ in 0..MAX_EVENTS_PER_FRAME {
        if !poll(wait)? {
            break;
        }
        wait = Duration::ZERO;
        if let Some(frontend_event) = read().ok().and_then(TuiFrontend::convert_event) {
            events.push(frontend_event);
        }
    }
    Ok(events)
}

/// Footer text: position in the focused carousel plus the main keys
fn status_line(core: &AppCore) -> Line<'static> {
    let position = core
        .carousels()
        .get(core.focused())
        .map(|c| {
            if c.is_empty() {
                format!("{} -/0", c.header())
            } else {
                format!("{} {}/{}", c.header(), c.current_index() + 1, c.len())
            }
        })
        .unwrap_or_default();

    Line::from(vec![
        Span::styled(position, Style::default().fg(Color::Yellow)),
        Span::styled(
            "  ←/→ clue  Tab focus  r reload  q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        Ok(drain_events(self.poll_timeout, event::poll, event::read)?)
    }

    fn render(&mut self, core: &AppCore) -> Result<()> {
        let states = core.carousels();
        self.ensure_carousels(states.len());

        let row_height = self.slide_rows + if self.style.show_border { 2 } else { 1 };
        let mut constraints: Vec<Constraint> = states.iter().map(|_| Constraint::Length(row_height)).collect();
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));

        let now = Instant::now();
        let focused = core.focused();
        let carousels = &mut self.carousels;
        let theme = &self.theme;
        let style = &self.style;

        self.terminal.draw(|f| {
            let areas = Layout::vertical(constraints).split(f.area());

            for (position, (state, widget)) in states.iter().zip(carousels.iter_mut()).enumerate() {
                widget.render(
                    state,
                    areas[position],
                    f.buffer_mut(),
                    theme,
                    style,
                    position == focused,
                    now,
                );
            }

            f.render_widget(Paragraph::new(status_line(core)), areas[areas.len() - 1]);
        })?;

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        // Restore terminal
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PuzzleSource;
    use crate::data::{ClueRecord, Clues, Direction};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    fn moved() -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 3,
            row: 2,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_drain_returns_under_constant_mouse_motion() {
        let mut waits = Vec::new();
        let mut reads = 0;
        let events = drain_events(
            Duration::from_millis(16),
            |wait| {
                waits.push(wait);
                Ok(true)
            },
            || {
                reads += 1;
                Ok(moved())
            },
        )
        .unwrap();

        // Motion is read and dropped; the batch stops at the per-frame cap
        assert!(events.is_empty());
        assert_eq!(reads, MAX_EVENTS_PER_FRAME);
        assert_eq!(waits[0], Duration::from_millis(16));
        assert!(waits[1..].iter().all(|w| w.is_zero()));
    }

    #[test]
    fn test_drain_keeps_presses_and_stops_when_idle() {
        let mut queue = vec![
            Event::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)),
            moved(),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 1,
                row: 1,
                modifiers: KeyModifiers::NONE,
            }),
        ];
        queue.reverse();
        let pending = std::cell::RefCell::new(queue);

        let events = drain_events(
            Duration::from_millis(16),
            |_| Ok(!pending.borrow().is_empty()),
            || Ok(pending.borrow_mut().pop().unwrap()),
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                FrontendEvent::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)),
                FrontendEvent::Pointer {
                    gesture: Gesture::Press,
                    x: 1,
                    y: 1
                },
            ]
        );
    }

    #[test]
    fn test_status_line_reports_focused_position() {
        let mut core = AppCore::new(Config::default(), PuzzleSource::Sample("sample".to_string()));
        let text = |core: &AppCore| -> String {
            status_line(core).spans.iter().map(|s| s.content.to_string()).collect()
        };
        assert!(text(&core).starts_with("ACROSS -/0"));

        let clues = Clues::new()
            .with_sequence(Direction::Across, vec![ClueRecord::new(1, "a"), ClueRecord::new(2, "b")])
            .into_shared();
        core.replace_clues(clues);
        core.apply_action(None, CarouselAction::Next);
        assert!(text(&core).starts_with("ACROSS 2/2"));
    }
}
