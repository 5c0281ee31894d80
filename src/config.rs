//! Configuration loader plus strongly typed settings structures.
//!
//! Deserializes `config.toml` (UI timings, colors, keybinds and the list of
//! carousels to show) and falls back to the defaults embedded at compile time
//! when no file exists.

use crate::core::actions::{key_event_to_string, normalize_keybind, CarouselAction};
use crate::data::Direction;
use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Embed default configuration file at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Environment variable overriding the base directory
pub const DIR_ENV_VAR: &str = "CLUE_CAROUSEL_DIR";

/// Top-level configuration object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub colors: ColorConfig,
    #[serde(default)]
    pub keybinds: Keybinds,
    #[serde(default = "default_carousels")]
    pub carousels: Vec<CarouselConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Slide transition length; 0 disables the animation
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    /// Event poll timeout (~60 FPS at 16)
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
    #[serde(default = "default_true")]
    pub show_border: bool,
    #[serde(default = "default_border_style")]
    pub border_style: String,
    /// Blank columns between neighbouring slides
    #[serde(default = "default_slide_gap")]
    pub slide_gap: u16,
    /// Text rows per slide
    #[serde(default = "default_slide_rows")]
    pub slide_rows: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorConfig {
    #[serde(default = "default_header_color")]
    pub header: String,
    #[serde(default = "default_border_color")]
    pub border: String,
    #[serde(default = "default_focused_border_color")]
    pub focused_border: String,
    #[serde(default = "default_button_color")]
    pub button: String,
    #[serde(default = "default_text_color")]
    pub text: String,
    #[serde(default = "default_number_color")]
    pub number: String,
    #[serde(default = "default_correct_color")]
    pub correct: String,
    #[serde(default = "default_incorrect_color")]
    pub incorrect: String,
}

/// Key strings use the `Ctrl+x` / `Shift+Tab` / `Right` format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keybinds {
    #[serde(default = "default_next_keys")]
    pub next: Vec<String>,
    #[serde(default = "default_previous_keys")]
    pub previous: Vec<String>,
    #[serde(default = "default_switch_focus_keys")]
    pub switch_focus: Vec<String>,
    #[serde(default = "default_focus_previous_keys")]
    pub focus_previous: Vec<String>,
    #[serde(default = "default_reload_keys")]
    pub reload: Vec<String>,
    #[serde(default = "default_quit_keys")]
    pub quit: Vec<String>,
}

/// One carousel in the stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

fn default_animation_ms() -> u64 {
    300
}

fn default_poll_ms() -> u64 {
    16
}

fn default_true() -> bool {
    true
}

fn default_border_style() -> String {
    "rounded".to_string()
}

fn default_slide_gap() -> u16 {
    1
}

fn default_slide_rows() -> u16 {
    2
}

fn default_header_color() -> String {
    "#ffff00".to_string()
}

fn default_border_color() -> String {
    "#808080".to_string()
}

fn default_focused_border_color() -> String {
    "#00ffff".to_string()
}

fn default_button_color() -> String {
    "#ffffff".to_string()
}

fn default_text_color() -> String {
    "#d0d0d0".to_string()
}

fn default_number_color() -> String {
    "#ffaf00".to_string()
}

fn default_correct_color() -> String {
    "#00ff00".to_string()
}

fn default_incorrect_color() -> String {
    "#ff0000".to_string()
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

fn default_next_keys() -> Vec<String> {
    keys(&["Right", "l", "n"])
}

fn default_previous_keys() -> Vec<String> {
    keys(&["Left", "h", "p"])
}

fn default_switch_focus_keys() -> Vec<String> {
    keys(&["Tab", "Down", "j"])
}

fn default_focus_previous_keys() -> Vec<String> {
    keys(&["Shift+Tab", "Up", "k"])
}

fn default_reload_keys() -> Vec<String> {
    keys(&["r", "Ctrl+r"])
}

fn default_quit_keys() -> Vec<String> {
    keys(&["q", "Esc", "Ctrl+c"])
}

fn default_carousels() -> Vec<CarouselConfig> {
    Direction::ALL
        .iter()
        .map(|&direction| CarouselConfig {
            direction,
            label: None,
        })
        .collect()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            animation_ms: default_animation_ms(),
            poll_ms: default_poll_ms(),
            show_border: true,
            border_style: default_border_style(),
            slide_gap: default_slide_gap(),
            slide_rows: default_slide_rows(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            header: default_header_color(),
            border: default_border_color(),
            focused_border: default_focused_border_color(),
            button: default_button_color(),
            text: default_text_color(),
            number: default_number_color(),
            correct: default_correct_color(),
            incorrect: default_incorrect_color(),
        }
    }
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            next: default_next_keys(),
            previous: default_previous_keys(),
            switch_focus: default_switch_focus_keys(),
            focus_previous: default_focus_previous_keys(),
            reload: default_reload_keys(),
            quit: default_quit_keys(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        // Parse from embedded default config.toml
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse embedded config.toml: {}", e);
            Self {
                ui: UiConfig::default(),
                colors: ColorConfig::default(),
                keybinds: Keybinds::default(),
                carousels: default_carousels(),
            }
        })
    }
}

impl Keybinds {
    /// Resolve a key press to a carousel action
    pub fn resolve_action(&self, key: KeyEvent) -> CarouselAction {
        let key_str = key_event_to_string(key);
        if key_str.is_empty() {
            return CarouselAction::None;
        }
        let key_str = normalize_keybind(&key_str);
        let bound = |binds: &[String]| binds.iter().any(|b| normalize_keybind(b) == key_str);

        // Quit first so it can never be shadowed by a navigation bind
        if bound(&self.quit) {
            CarouselAction::Quit
        } else if bound(&self.next) {
            CarouselAction::Next
        } else if bound(&self.previous) {
            CarouselAction::Previous
        } else if bound(&self.focus_previous) {
            CarouselAction::FocusPrevious
        } else if bound(&self.switch_focus) {
            CarouselAction::SwitchFocus
        } else if bound(&self.reload) {
            CarouselAction::Reload
        } else {
            CarouselAction::None
        }
    }
}

impl Config {
    /// Load from `path`, or from `<base>/config.toml` when no path is given.
    /// A missing default file yields the embedded defaults; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path()?, false),
        };

        if !explicit && !config_path.exists() {
            tracing::info!("No config at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {:?}", config_path))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", config_path))?;
        tracing::info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        if config.carousels.is_empty() {
            config.carousels = default_carousels();
        }
        Ok(config)
    }

    /// Get the base clue-carousel directory (~/.clue-carousel/)
    /// Can be overridden with CLUE_CAROUSEL_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DIR_ENV_VAR) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".clue-carousel"))
    }

    /// Get path to config.toml
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }
}
