mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, Event, PopKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use drop_catcher::audio::{BellAudio, Music};
use drop_catcher::clock::{Clock, FrameTime, MonotonicClock};
use drop_catcher::config::GameConfig;
use drop_catcher::modes::{Control, ModeController};
use drop_catcher::terminal::{InputTracker, TerminalSession};

use display::TerminalCanvas;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "drop_catcher", version, about = "Catch the falling raindrops in your bucket")]
struct Args {
    #[arg(
        long,
        value_name = "PATH",
        help_heading = "GENERAL",
        help = "Load game settings from a TOML file"
    )]
    config: Option<PathBuf>,

    #[arg(
        long,
        help_heading = "GENERAL",
        help = "Seed the raindrop spawner for a reproducible session"
    )]
    seed: Option<u64>,

    #[arg(long, help_heading = "GENERAL", help = "Disable the terminal bell on catches")]
    mute: bool,

    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(1..=240),
        help_heading = "PERFORMANCE",
        help = "Target FPS (min 1 max 240)"
    )]
    fps: u32,

    #[arg(
        long,
        value_name = "PATH",
        help_heading = "DIAGNOSTICS",
        help = "Write logs to this file (filter with RUST_LOG)"
    )]
    log_file: Option<PathBuf>,

    #[arg(
        long,
        help_heading = "DIAGNOSTICS",
        help = "Print the effective settings as TOML and exit"
    )]
    print_config: bool,
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode while playing, so logs only go to a file.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Frame loop ────────────────────────────────────────────────────────────────

fn hint_line(controller: &ModeController, music: Option<Music>) -> String {
    let controls = if controller.offers_restart() {
        "GAME OVER   ENTER / R : Restart   Q : Quit"
    } else if controller.is_playing() {
        "← → / A D / mouse : Move   Q : Quit"
    } else {
        "Click / ENTER : Start   Q : Quit"
    };
    match music {
        Some(Music::Rain) => format!("{controls}   ♪ rain"),
        None => controls.to_string(),
    }
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    args: &Args,
    config: GameConfig,
) -> Result<()> {
    let clock = MonotonicClock::new();
    let frame_period = Duration::from_secs_f64(1.0 / f64::from(args.fps));

    let (cols, rows) = terminal::size().context("failed to read terminal size")?;
    let mut canvas = TerminalCanvas::new(config.playfield(), cols, rows);
    let mut controller = match args.seed {
        Some(seed) => ModeController::with_seed(config, seed),
        None => ModeController::new(config),
    };

    let mut audio = BellAudio::new(args.mute);
    let mut input = InputTracker::default();
    let mut last = clock.now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(c, r) = ev {
                canvas.resize(c, r);
                continue;
            }
            input.handle(ev, frame_start);
        }
        let snapshot = input.snapshot(frame_start, canvas.cols(), canvas.field_rows());

        let now = clock.now();
        let time = FrameTime::new(now, now.saturating_sub(last).as_secs_f32());
        last = now;

        canvas.clear();
        if controller.on_frame(&snapshot, time, &mut audio, &mut canvas) == Control::Exit {
            break;
        }

        canvas.present(out, &hint_line(&controller, audio.music()), audio.take_bells())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_period {
            thread::sleep(frame_period - elapsed);
        }
    }

    info!(best_score = controller.best_score(), "session finished");
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Last-resort restore for the panic hook, which runs before the session
/// guard is dropped.
fn restore_terminal() {
    let mut out = stdout();
    let _ = out.execute(PopKeyboardEnhancementFlags);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => GameConfig::default(),
    };

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    init_logging(args.log_file.as_deref())?;
    info!(fps = args.fps, seed = ?args.seed, "starting");

    std::panic::set_hook(Box::new(|info| {
        restore_terminal();
        eprintln!("{}", info);
    }));

    // Dropping the session restores the terminal, including when a setup
    // step fails part way.
    let mut session =
        TerminalSession::enter(BufWriter::new(stdout())).context("failed to set up the terminal")?;
    info!(keyboard_enhanced = session.keyboard_enhanced(), "terminal ready");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(session.out(), &rx, &args, config);
    drop(session);
    result
}
