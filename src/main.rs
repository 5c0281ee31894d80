//! clue-carousel - browse crossword clues one at a time in the terminal

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use clue_carousel::config::{self, Config};
use clue_carousel::core::{AppCore, CarouselAction, InputResult, PuzzleSource};
use clue_carousel::data::Direction;
use clue_carousel::frontend::{Frontend, FrontendEvent, Gesture, TuiFrontend};
use clue_carousel::puzzle::{Puzzle, DEFAULT_SAMPLE};
use clue_carousel::watcher::{PuzzleWatcher, WatchMessage, DEFAULT_INTERVAL};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(ClapParser)]
#[command(name = "clue-carousel")]
#[command(about = "Crossword clue carousel for the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Puzzle JSON file to show
    #[arg(short, long, value_name = "FILE", conflicts_with = "sample")]
    puzzle: Option<PathBuf>,

    /// Embedded sample puzzle to show (default: "sample")
    #[arg(long, value_name = "NAME")]
    sample: Option<String>,

    /// Reload the puzzle file whenever it changes on disk
    #[arg(short, long, requires = "puzzle")]
    watch: bool,

    /// Custom data directory (default: ~/.clue-carousel)
    /// Can also be set via CLUE_CAROUSEL_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every clue per direction without starting the TUI
    List,

    /// Parse a puzzle file and report what it contains
    Validate {
        /// Puzzle file to validate
        #[arg(value_name = "FILE")]
        puzzle: PathBuf,
    },

    /// List the embedded sample puzzles
    Samples,
}

impl Cli {
    fn source(&self) -> PuzzleSource {
        match (&self.puzzle, &self.sample) {
            (Some(path), _) => PuzzleSource::File(path.clone()),
            (None, Some(name)) => PuzzleSource::Sample(name.clone()),
            (None, None) => PuzzleSource::Sample(DEFAULT_SAMPLE.to_string()),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging to file (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    // TUI apps can't log to stdout, so we write to a file
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("clue-carousel.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set custom data directory if specified (via CLI or environment variable)
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DIR_ENV_VAR, data_dir);
        tracing::info!("Using custom data directory: {:?}", data_dir);
    } else if let Ok(env_dir) = std::env::var(config::DIR_ENV_VAR) {
        tracing::info!("Using data directory from {}: {}", config::DIR_ENV_VAR, env_dir);
    }

    // Handle subcommands
    match &cli.command {
        Some(Commands::List) => return list_clues(&cli.source()),
        Some(Commands::Validate { puzzle }) => {
            validate_puzzle(puzzle);
            return Ok(());
        }
        Some(Commands::Samples) => {
            for name in Puzzle::sample_names() {
                println!("{}", name);
            }
            return Ok(());
        }
        None => {}
    }

    let config = Config::load(cli.config.as_deref())?;
    run_tui(config, cli.source(), cli.watch)
}

fn list_clues(source: &PuzzleSource) -> Result<()> {
    let clues = source.load()?.to_clues()?;
    for direction in Direction::ALL {
        println!("{}", direction.as_str().to_uppercase());
        match clues.get(direction) {
            None => println!("  (none)"),
            Some([]) => println!("  (empty)"),
            Some(sequence) => {
                for clue in sequence {
                    let badge = match (clue.complete, clue.correct) {
                        (_, true) => " ✓",
                        (true, false) => " ✗",
                        (false, false) => "",
                    };
                    println!("  {:>3}. {}{}", clue.number, clue.clue, badge);
                }
            }
        }
    }
    Ok(())
}

fn validate_puzzle(path: &Path) {
    println!("Validating puzzle file: {:?}", path);
    match Puzzle::load_from_file(path).and_then(|p| p.to_clues()) {
        Ok(clues) => {
            println!("✓ Puzzle loaded successfully");
            for direction in Direction::ALL {
                match clues.get(direction) {
                    Some(sequence) => println!("  {} clues {}", sequence.len(), direction),
                    None => println!("⚠ Warning: no {} clues", direction),
                }
            }
        }
        Err(e) => {
            eprintln!("✗ Failed to load puzzle: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Run TUI frontend
fn run_tui(config: Config, source: PuzzleSource, watch: bool) -> Result<()> {
    // Use tokio runtime for the file watcher task
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_run_tui(config, source, watch))
}

/// Async TUI main loop
async fn async_run_tui(config: Config, source: PuzzleSource, watch: bool) -> Result<()> {
    use tokio::sync::mpsc;

    let mut app_core = AppCore::new(config, source);
    // Load before touching the terminal so errors print normally
    app_core.reload()?;

    let (watch_tx, mut watch_rx) = mpsc::unbounded_channel::<WatchMessage>();
    let watch_handle = match app_core.source.path() {
        Some(path) if watch => {
            tracing::info!("Watching {:?} for changes", path);
            let watcher = PuzzleWatcher::start(path.clone()).await;
            Some(tokio::spawn(watcher.run(DEFAULT_INTERVAL, watch_tx)))
        }
        Some(_) => None,
        None if watch => bail!("--watch needs a puzzle file"),
        None => None,
    };

    let mut frontend = TuiFrontend::new(&app_core.config).context("Failed to start terminal UI")?;
    let mut was_animating = false;

    // Main event loop
    while app_core.running {
        // Poll for frontend events (keyboard, mouse, resize)
        let events = frontend.poll_events()?;

        for event in events {
            if let FrontendEvent::Pointer { gesture, x, y } = event {
                handle_pointer(&mut app_core, &frontend, gesture, x, y);
                continue;
            }

            match app_core.handle_event(&event) {
                InputResult::Reload => {
                    if let Err(e) = app_core.reload() {
                        tracing::warn!("Reload failed, keeping previous clues: {:#}", e);
                    }
                }
                InputResult::Quit => break,
                InputResult::Continue => {}
            }
        }

        // Poll for watcher updates (non-blocking)
        while let Ok(message) = watch_rx.try_recv() {
            match message {
                WatchMessage::Loaded(clues) => app_core.replace_clues(clues),
                WatchMessage::Failed(e) => {
                    tracing::warn!("Puzzle file changed but failed to load: {}", e);
                }
            }
        }

        let now = Instant::now();
        let settled = app_core.take_settled();
        if !settled.is_empty() {
            frontend.apply_settled(&settled, now);
            app_core.needs_render = true;
        }

        // Keep drawing while a slide is moving, plus one frame to land on the target
        let animating = frontend.is_animating(now);
        if app_core.needs_render || animating || was_animating {
            frontend.render(&app_core)?;
            app_core.needs_render = false;
        }
        was_animating = animating;
    }

    // Cleanup
    frontend.cleanup()?;

    if let Some(handle) = watch_handle {
        handle.abort();
        let _ = handle.await;
    }

    Ok(())
}

/// Clicks on `<` / `>` navigate that carousel and focus it; the wheel cycles it
fn handle_pointer(app_core: &mut AppCore, frontend: &TuiFrontend, gesture: Gesture, x: u16, y: u16) {
    let Some((position, button)) = frontend.hit_test(x, y) else {
        return;
    };

    match gesture {
        Gesture::Press => {
            app_core.set_focus(position);
            if let Some(action) = button {
                tracing::debug!(?action, position, "Button clicked");
                app_core.apply_action(Some(position), action);
            }
        }
        Gesture::WheelForward => {
            app_core.apply_action(Some(position), CarouselAction::Next);
        }
        Gesture::WheelBack => {
            app_core.apply_action(Some(position), CarouselAction::Previous);
        }
    }
}
