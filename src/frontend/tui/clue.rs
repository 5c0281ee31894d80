//! Renders a single clue: number, text and solve badge.

use crate::theme::CarouselTheme;
use crate::widgets::SlideDescriptor;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

pub const CORRECT_BADGE: &str = "✓";
pub const INCORRECT_BADGE: &str = "✗";

/// Presentational view of one slide
pub struct ClueView<'a> {
    slide: SlideDescriptor<'a>,
    theme: &'a CarouselTheme,
}

impl<'a> ClueView<'a> {
    pub fn new(slide: SlideDescriptor<'a>, theme: &'a CarouselTheme) -> Self {
        Self { slide, theme }
    }

    /// Badge for the solve state, if any
    fn badge(&self) -> Option<Span<'static>> {
        match (self.slide.complete, self.slide.correct) {
            (_, true) => Some(Span::styled(
                format!("{} ", CORRECT_BADGE),
                Style::default().fg(self.theme.correct),
            )),
            (true, false) => Some(Span::styled(
                format!("{} ", INCORRECT_BADGE),
                Style::default().fg(self.theme.incorrect),
            )),
            (false, false) => None,
        }
    }

    fn line(&self) -> Line<'a> {
        let mut spans = Vec::with_capacity(4);
        if let Some(badge) = self.badge() {
            spans.push(badge);
        }
        spans.push(Span::styled(
            format!("{}.", self.slide.number),
            Style::default()
                .fg(self.theme.number)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));

        // Finished entries are dimmed so open clues stand out
        let mut text_style = Style::default().fg(self.theme.text);
        if self.slide.complete {
            text_style = text_style.add_modifier(Modifier::DIM);
        }
        spans.push(Span::styled(self.slide.text, text_style));
        Line::from(spans)
    }
}

impl Widget for ClueView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        Paragraph::new(self.line())
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Direction;

    fn slide(complete: bool, correct: bool) -> SlideDescriptor<'static> {
        SlideDescriptor {
            position: 0,
            direction: Direction::Across,
            number: 12,
            complete,
            correct,
            text: "Frozen water",
        }
    }

    fn first_row(buf: &Buffer) -> String {
        let area = buf.area();
        (area.x..area.x + area.width)
            .map(|x| buf[(x, area.y)].symbol().to_string())
            .collect()
    }

    fn render(slide: SlideDescriptor<'static>) -> Buffer {
        let theme = CarouselTheme::default();
        let area = Rect::new(0, 0, 30, 2);
        let mut buf = Buffer::empty(area);
        ClueView::new(slide, &theme).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_open_clue_has_no_badge() {
        let row = first_row(&render(slide(false, false)));
        assert!(row.starts_with("12. Frozen water"));
    }

    #[test]
    fn test_badges() {
        assert!(first_row(&render(slide(true, true))).starts_with("✓ 12."));
        assert!(first_row(&render(slide(true, false))).starts_with("✗ 12."));
    }
}
