mod display;
mod keyboard;

use std::io::{stdout, BufWriter, Write};
use std::process::ExitCode;
use std::sync::{mpsc, Mutex};
use std::thread;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use triangle_adventure::assets::{data_dir, SpriteSheet};
use triangle_adventure::compute::World;
use triangle_adventure::config::Rules;
use triangle_adventure::constants::{TICK_RATE, TITLE};
use triangle_adventure::render::Renderer;
use triangle_adventure::timing::{Clock, FrameLimiter, SystemClock};

use display::{enter_game_screen, TerminalDisplay, MIN_COLS, MIN_ROWS};
use keyboard::{Command, KeyTracker};

/// Exit code when the frontend cannot start (missing art, unusable terminal).
const EXIT_INIT_FAILURE: u8 = 2;
/// Exit code when terminal I/O fails mid-game.
const EXIT_RUNTIME_FAILURE: u8 = 1;

const LOG_FILE: &str = "triangle_adventure.log";

// ── Logging ───────────────────────────────────────────────────────────────────

/// Install a file-backed subscriber when `RUST_LOG` is set.  Logs never go to
/// the terminal, which is busy drawing frames.
fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let path = std::env::temp_dir().join(LOG_FILE);
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit key arrives.
fn game_loop<W: Write>(
    display: &mut TerminalDisplay<W>,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let clock = SystemClock::new();
    let mut limiter = FrameLimiter::new(TICK_RATE);
    let mut rng = thread_rng();
    let mut world = World::new(Rules::default(), clock.now_ms());
    let mut keys = KeyTracker::new();

    loop {
        keys.next_frame();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => {
                    if keys.handle(key) == Some(Command::Quit) {
                        return Ok(());
                    }
                }
                Event::Resize(cols, rows) => display.resize(cols, rows),
                _ => {}
            }
        }

        let scene = world.tick(&keys.snapshot(), clock.now_ms(), &mut rng);
        display.draw_scene(&scene)?;

        limiter.wait();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    init_logging();
    info!("starting {}", TITLE);

    let dir = data_dir();
    let sprites = match SpriteSheet::load(&dir) {
        Ok(sprites) => sprites,
        Err(err) => {
            error!("{err:#}");
            eprintln!("{err:#}");
            return ExitCode::from(EXIT_INIT_FAILURE);
        }
    };

    let (cols, rows) = match terminal::size() {
        Ok(size) => size,
        Err(err) => {
            eprintln!("cannot query terminal size: {err}");
            return ExitCode::from(EXIT_INIT_FAILURE);
        }
    };
    if cols < MIN_COLS || rows < MIN_ROWS {
        eprintln!("terminal is {cols}x{rows}; need at least {MIN_COLS}x{MIN_ROWS}");
        return ExitCode::from(EXIT_INIT_FAILURE);
    }

    if let Err(err) = terminal::enable_raw_mode() {
        eprintln!("cannot enter raw mode: {err}");
        return ExitCode::from(EXIT_INIT_FAILURE);
    }

    let mut out = BufWriter::new(stdout());
    let _ = out.execute(terminal::SetTitle(TITLE));
    if let Err(err) = enter_game_screen(&mut out) {
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        error!("cannot set up the game screen: {err}");
        eprintln!("cannot set up the game screen: {err}");
        return ExitCode::from(EXIT_INIT_FAILURE);
    }

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut display = TerminalDisplay::new(out, sprites, cols, rows);
    let result = game_loop(&mut display, &rx);

    // Always restore the terminal
    let mut out = stdout();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(crossterm::style::ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result {
        Ok(()) => {
            info!("clean shutdown");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("terminal failure: {err}");
            eprintln!("terminal failure: {err}");
            ExitCode::from(EXIT_RUNTIME_FAILURE)
        }
    }
}
