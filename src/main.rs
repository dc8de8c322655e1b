//! Terminal runner (default binary).
//!
//! Wires the pieces together: environment config, file logging, the tokio
//! runtime that hosts the session timers, a blocking input thread feeding the
//! session channel, and the framebuffer renderer.

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use log::{error, info, warn};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::UnboundedSender;

use tetris_session::core::{GameState, SimpleRng};
use tetris_session::engine::{EngineConfig, Event, Session};
use tetris_session::input::{map_key_event, should_quit, InputHandler};
use tetris_session::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

const INPUT_POLL: Duration = Duration::from_millis(25);

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    init_logging(config.log_path.as_deref())?;
    info!("starting with seed {} and timing {:?}", config.seed, config.timing);

    let runtime = Runtime::new().context("failed to create tokio runtime")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    // No early return from here until the terminal is restored.
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && push_keyboard_flags(&mut std::io::stdout());

    let result = runtime.block_on(run(&mut term, &config));

    // Always try to restore terminal state.
    if enhanced {
        let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = term.exit();

    if let Err(e) = &result {
        error!("session failed: {e:?}");
    }
    result
}

/// Ask the terminal for release events. Returns whether the flags were pushed;
/// without them the input handler synthesizes releases.
fn push_keyboard_flags<W: Write>(out: &mut W) -> bool {
    let flags = KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
    match execute!(out, PushKeyboardEnhancementFlags(flags)) {
        Ok(()) => true,
        Err(e) => {
            warn!("keyboard enhancement unavailable: {e}");
            false
        }
    }
}

fn init_logging(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {path}"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

async fn run(term: &mut TerminalRenderer, config: &EngineConfig) -> Result<()> {
    let game = GameState::new(SimpleRng::new(config.seed));
    let mut session = Session::new(game, config.timing);

    let stop = Arc::new(AtomicBool::new(false));
    let input = {
        let tx = session.sender();
        let stop = Arc::clone(&stop);
        thread::Builder::new()
            .name("input".into())
            .spawn(move || {
                let result = read_input(&tx, &stop);
                if result.is_err() {
                    // Unblock the session so the terminal gets restored.
                    let _ = tx.send(Event::Quit);
                }
                result
            })
            .context("failed to spawn input thread")?
    };

    let view = GameView::default();
    let mut frame = FrameBuffer::new(0, 0);
    let result = session
        .run(|snapshot| {
            let (w, h) = terminal::size().unwrap_or((80, 24));
            view.render_into(snapshot, Viewport::new(w, h), &mut frame);
            term.draw_swap(&mut frame)
        })
        .await;

    stop.store(true, Ordering::Relaxed);
    match input.join() {
        Ok(Err(e)) => warn!("input thread failed: {e:?}"),
        Err(_) => warn!("input thread panicked"),
        Ok(Ok(())) => {}
    }
    result
}

/// Blocking key reader. Ends on quit keys, when the session is gone, or when
/// `stop` is raised.
fn read_input(tx: &UnboundedSender<Event>, stop: &AtomicBool) -> Result<()> {
    let mut handler = InputHandler::new();

    while !stop.load(Ordering::Relaxed) {
        if event::poll(INPUT_POLL)? {
            if let event::Event::Key(key) = event::read()? {
                if should_quit(key) {
                    let _ = tx.send(Event::Quit);
                    return Ok(());
                }
                let command = map_key_event(key).and_then(|c| handler.handle(c, Instant::now()));
                if let Some(command) = command {
                    if tx.send(Event::Command(command)).is_err() {
                        return Ok(());
                    }
                }
            }
        }

        for command in handler.expire(Instant::now()) {
            if tx.send(Event::Command(command)).is_err() {
                return Ok(());
            }
        }
    }
    Ok(())
}
