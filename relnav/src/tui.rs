//! Terminal lifecycle management for relnav.
//!
//! The TUI renders to stdout through a `BufWriter` so escape sequences are
//! batched into fewer write(2) syscalls, reducing flicker at the 30 FPS
//! render interval. Raw mode and the alternate screen must be restored at
//! every exit path — normal quit, fetch failure, SIGTERM, and panic.

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;
use signal_hook::flag::register;
use std::io::{stdout, BufWriter, Stdout};
use std::panic;
use std::sync::{atomic::AtomicBool, Arc};

/// The terminal type used by relnav — CrosstermBackend over buffered stdout.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stdout>>>;

/// Initialise the terminal for TUI rendering.
///
/// Enables raw mode, enters the alternate screen, and enables mouse capture
/// so scroll gestures reach the viewport. Call [`restore_tui`] at every
/// exit path.
///
/// # Errors
///
/// Returns `Err` if `enable_raw_mode`, `execute!`, or `Terminal::new` fails.
pub fn init_tui() -> std::io::Result<Tui> {
    let mut out = BufWriter::new(stdout());
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(out))
}

/// Restore the terminal to its pre-TUI state.
///
/// Idempotent; must be called at every exit path — including the panic
/// hook — because ratatui does not auto-restore the terminal on `Drop`.
///
/// # Errors
///
/// Returns `Err` if `disable_raw_mode` or `execute!` fails. The panic hook
/// uses `let _ = restore_tui();` and ignores the error (best-effort only).
pub fn restore_tui() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before the panic prints.
///
/// Must be called **before** [`init_tui`]. Chains onto any previously
/// installed hook so the default panic printer still runs after the terminal
/// is restored. Without it, a panic leaves the shell in raw mode with the
/// alternate screen active and the message invisible.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Already panicking; cleanup is best-effort.
        let _ = restore_tui();
        original_hook(panic_info);
    }));
}

/// Register a SIGTERM handler that sets an `AtomicBool` flag.
///
/// The returned flag transitions from `false` to `true` when the process
/// receives SIGTERM; the event loop polls it on a 50 ms heartbeat.
///
/// # Panics
///
/// Panics if the OS refuses to register the signal handler — treated as a
/// fatal initialisation error rather than a recoverable condition.
pub fn register_sigterm() -> Arc<AtomicBool> {
    let term = Arc::new(AtomicBool::new(false));
    register(SIGTERM, Arc::clone(&term)).expect("Failed to register SIGTERM handler");
    term
}
