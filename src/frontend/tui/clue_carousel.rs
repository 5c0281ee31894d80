//! Carousel chrome around the clue strip.
//!
//! Draws the header, the `<` / `>` buttons and a horizontal strip holding one
//! slide per clue. The strip is shifted by the animated offset so exactly one
//! slide fills the viewport once the animation settles. Button rectangles are
//! remembered from the last render for mouse hit testing.

use super::animation::SlideAnimation;
use super::clue::ClueView;
use crate::config::UiConfig;
use crate::core::CarouselAction;
use crate::theme::{parse_border_type, CarouselTheme};
use crate::widgets::{CarouselState, SettledIndex, SLIDE_WIDTH_PERCENT};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Widget},
};
use std::time::{Duration, Instant};

/// Layout options shared by every carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselStyle {
    pub show_border: bool,
    pub border_type: BorderType,
    pub slide_gap: u16,
}

impl CarouselStyle {
    pub fn from_config(ui: &UiConfig) -> Self {
        Self {
            show_border: ui.show_border,
            border_type: parse_border_type(&ui.border_style),
            slide_gap: ui.slide_gap,
        }
    }
}

impl Default for CarouselStyle {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}

/// Per-carousel render state
#[derive(Debug, Clone)]
pub struct ClueCarousel {
    animation: SlideAnimation,
    area: Rect,
    prev_button: Option<Rect>,
    next_button: Option<Rect>,
}

impl ClueCarousel {
    pub fn new(animation: Duration) -> Self {
        Self {
            animation: SlideAnimation::new(animation),
            area: Rect::default(),
            prev_button: None,
            next_button: None,
        }
    }

    /// Start sliding towards a newly committed index
    pub fn settle(&mut self, settled: &SettledIndex, now: Instant) {
        self.animation.retarget(settled.offset_percent, now);
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.animation.is_animating(now)
    }

    /// Offset the strip is heading to
    pub fn target_offset(&self) -> i64 {
        self.animation.target()
    }

    /// Whether (x, y) falls inside the area drawn last frame
    pub fn contains(&self, x: u16, y: u16) -> bool {
        rect_contains(self.area, x, y)
    }

    /// Map a click to the button under it
    pub fn hit_test(&self, x: u16, y: u16) -> Option<CarouselAction> {
        if self.prev_button.is_some_and(|r| rect_contains(r, x, y)) {
            Some(CarouselAction::Previous)
        } else if self.next_button.is_some_and(|r| rect_contains(r, x, y)) {
            Some(CarouselAction::Next)
        } else {
            None
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        state: &CarouselState,
        area: Rect,
        buf: &mut Buffer,
        theme: &CarouselTheme,
        style: &CarouselStyle,
        focused: bool,
        now: Instant,
    ) {
        self.area = area;
        self.prev_button = None;
        self.next_button = None;

        if area.width < 5 || area.height == 0 {
            return;
        }

        // Index changes that never went through the settle queue snap into place
        if self.animation.target() != state.offset_percent() {
            self.animation.jump_to(state.offset_percent());
        }

        let mut header_style = Style::default().fg(theme.header).add_modifier(Modifier::BOLD);
        let inner = if style.show_border {
            let border_color = if focused { theme.focused_border } else { theme.border };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(style.border_type)
                .border_style(Style::default().fg(border_color))
                .title(Span::styled(state.header(), header_style));
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            if focused {
                header_style = header_style.add_modifier(Modifier::REVERSED);
            }
            buf.set_stringn(area.x, area.y, state.header(), area.width as usize, header_style);
            Rect {
                y: area.y + 1,
                height: area.height - 1,
                ..area
            }
        };

        if inner.width < 3 || inner.height == 0 {
            return;
        }

        let button_style = Style::default().fg(theme.button).add_modifier(Modifier::BOLD);
        let prev = Rect::new(inner.x, inner.y, 1, 1);
        let next = Rect::new(inner.x + inner.width - 1, inner.y, 1, 1);
        buf.set_string(prev.x, prev.y, "<", button_style);
        buf.set_string(next.x, next.y, ">", button_style);
        self.prev_button = Some(prev);
        self.next_button = Some(next);

        // One blank column between each button and the strip
        let viewport = Rect::new(inner.x + 2, inner.y, inner.width.saturating_sub(4), inner.height);
        if viewport.width == 0 {
            return;
        }

        let offset = self.animation.value(now);
        render_strip(state, viewport, buf, theme, style.slide_gap, offset);
    }
}

/// Column shift for an offset given in percent of a slide
fn strip_shift(offset_percent: f64, stride: i64) -> i64 {
    (offset_percent / SLIDE_WIDTH_PERCENT as f64 * stride as f64).round() as i64
}

fn render_strip(
    state: &CarouselState,
    viewport: Rect,
    buf: &mut Buffer,
    theme: &CarouselTheme,
    gap: u16,
    offset_percent: f64,
) {
    let width = i64::from(viewport.width);
    let stride = width + i64::from(gap);
    let shift = strip_shift(offset_percent, stride);

    for slide in state.slides() {
        let left = slide.position as i64 * stride + shift;
        if left + width <= 0 || left >= width {
            continue;
        }

        // Draw off-screen, then copy the visible columns
        let scratch_area = Rect::new(0, 0, viewport.width, viewport.height);
        let mut scratch = Buffer::empty(scratch_area);
        ClueView::new(slide, theme).render(scratch_area, &mut scratch);

        for sx in 0..viewport.width {
            let vx = left + i64::from(sx);
            if !(0..width).contains(&vx) {
                continue;
            }
            for sy in 0..viewport.height {
                buf[(viewport.x + vx as u16, viewport.y + sy)] = scratch[(sx, sy)].clone();
            }
        }
    }
}

fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}
