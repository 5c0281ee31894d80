//! Carousel colors resolved from the `[colors]` config table.

use crate::config::ColorConfig;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Colors used when drawing a carousel
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselTheme {
    pub header: Color,
    pub border: Color,
    pub focused_border: Color,
    pub button: Color,
    pub text: Color,
    pub number: Color,
    pub correct: Color,
    pub incorrect: Color,
}

impl CarouselTheme {
    pub fn from_config(colors: &ColorConfig) -> Self {
        Self {
            header: parse_color(&colors.header),
            border: parse_color(&colors.border),
            focused_border: parse_color(&colors.focused_border),
            button: parse_color(&colors.button),
            text: parse_color(&colors.text),
            number: parse_color(&colors.number),
            correct: parse_color(&colors.correct),
            incorrect: parse_color(&colors.incorrect),
        }
    }
}

impl Default for CarouselTheme {
    fn default() -> Self {
        Self::from_config(&ColorConfig::default())
    }
}

/// Parse a hex color string to ratatui Color (white when malformed)
pub fn parse_color(hex: &str) -> Color {
    parse_rgb(hex.trim_start_matches('#')).unwrap_or(Color::White)
}

fn parse_rgb(hex: &str) -> Option<Color> {
    // from_str_radix alone would accept a leading '+'
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn parse_border_type(style: &str) -> BorderType {
    match style {
        "double" => BorderType::Double,
        "rounded" => BorderType::Rounded,
        "thick" => BorderType::Thick,
        _ => BorderType::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ff8000"), Color::Rgb(255, 128, 0));
        assert_eq!(parse_color("00ff00"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("#fff"), Color::White);
    }

    #[test]
    fn test_parse_color_bad_channel_is_white() {
        assert_eq!(parse_color("#zz0000"), Color::White);
        assert_eq!(parse_color("#00ff0g"), Color::White);
        assert_eq!(parse_color("#+10000"), Color::White);
    }

    #[test]
    fn test_border_type() {
        assert_eq!(parse_border_type("double"), BorderType::Double);
        assert_eq!(parse_border_type("whatever"), BorderType::Plain);
    }
}
