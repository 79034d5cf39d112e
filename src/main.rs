//! Terminal runner (default binary).
//!
//! Fixed-interval loop: collect key events until the next tick is due, sample
//! the held keys, advance the session by one tick, draw.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::prelude::*;

use blockfall::core::{Session, SessionConfig, Snapshot};
use blockfall::input::KeyState;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{INITIAL_SPEED, TICK_MS};

/// Key presses are ignored this long after the game ends
const GAME_OVER_GRACE: Duration = Duration::from_millis(750);

#[derive(Debug, Parser)]
#[command(version, about = "Falling-block puzzle game for the terminal")]
struct Cli {
    #[arg(long, help = "Seed for the piece generator (default: from the clock)")]
    seed: Option<u32>,

    #[arg(long, default_value_t = INITIAL_SPEED, help = "Ticks per gravity step at the start")]
    speed: u32,

    #[arg(long, default_value_t = TICK_MS, help = "Milliseconds per tick")]
    tick_ms: u32,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)"
    )]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    anyhow::ensure!(cli.tick_ms > 0, "--tick-ms must be at least 1");
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let config = SessionConfig::default()
        .with_seed(seed)
        .with_initial_speed(cli.speed)
        .with_line_clear_delay_ticks(blockfall::types::LINE_CLEAR_DELAY_MS / cli.tick_ms);
    let session = Session::with_config(config).context("invalid session configuration")?;
    info!(seed, speed = cli.speed, tick_ms = cli.tick_ms, "session started");

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let result = run(&mut term, session, Duration::from_millis(cli.tick_ms as u64));

    // Always try to restore terminal state.
    if enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = term.exit();

    if let Ok(score) = &result {
        println!("Final score: {score}");
    }
    result.map(|_| ())
}

/// Install a file logger; logging to the terminal would corrupt the screen.
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(level)
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Play until quit; returns the final score
fn run(term: &mut TerminalRenderer, mut session: Session, tick: Duration) -> Result<u32> {
    let view = GameView::default();
    let mut keys = KeyState::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshot = Snapshot::default();
    session.snapshot_into(&mut snapshot);

    let mut next_tick = Instant::now() + tick;
    let mut game_over_at: Option<Instant> = None;

    loop {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next tick is due.
        loop {
            let now = Instant::now();
            if now >= next_tick || !event::poll(next_tick - now)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    keys.handle_key_event(key, Instant::now());
                    let leave = game_over_at.is_some_and(|t| t.elapsed() >= GAME_OVER_GRACE);
                    if leave && key.kind == KeyEventKind::Press {
                        return Ok(session.score());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if keys.quit_requested() {
            info!(score = session.score(), "quit");
            return Ok(session.score());
        }

        let now = Instant::now();
        let report = session.tick(&keys.signals(now));
        if report.game_over {
            game_over_at = Some(now);
        }
        session.snapshot_into(&mut snapshot);

        next_tick += tick;
        if next_tick < now {
            // Fell behind (suspended terminal, slow draw); do not burst.
            next_tick = now + tick;
        }
    }
}
