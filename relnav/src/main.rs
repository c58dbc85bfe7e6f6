//! relnav — interactive terminal browser for a repository's tagged releases.
//!
//! Entry point for the `relnav` binary. Wires together the terminal
//! lifecycle (`tui`), unified event bus (`event`), session state (`app`),
//! rendering (`ui`), theme system (`theme`), the GitHub fetch (`github`),
//! and the pure navigation core (`relnav-core`).
//!
//! # Startup sequence (order matters)
//!
//! 1. CLI, config, starting version, and credentials — all resolved and
//!    validated before any terminal state is touched, so startup failures
//!    print a plain message and exit 1 with no partial UI.
//! 2. `install_panic_hook()` — installed first so it is the innermost hook;
//!    restores the terminal before the panic message prints.
//! 3. `register_sigterm()` — returns `Arc<AtomicBool>` polled in the loop.
//! 4. `init_tui()` — enters the alternate screen and enables raw mode.
//! 5. Event channel + `spawn_event_task()` + the one-shot fetch task. The
//!    fetch posts `FetchSucceeded`/`FetchFailed` back onto the same channel
//!    and is never awaited synchronously or cancelled.
//!
//! # Safety
//!
//! `restore_tui()` is called after the event loop exits (quit key, SIGTERM,
//! fetch failure, or `None` channel close). The `?` operator is only used
//! before `init_tui()` or inside the Render arm; the panic hook covers
//! unexpected panics. A session-fatal error is printed only after the
//! terminal is restored, then the process exits 1.

mod app;
mod event;
mod github;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;

use clap::Parser;
use serde::Deserialize;

use ui::keybindings::{self, KeyAction};

/// Browse a repository's tagged releases from the terminal.
#[derive(Debug, Parser)]
#[command(name = "relnav", version)]
struct Cli {
    /// Repository as `owner/repo`, or bare `repo` to use the configured
    /// default organization.
    repository: Option<String>,

    /// Starting version; focus lands on the first release after it.
    /// The default walks in from before the beginning of time, focusing
    /// the oldest release.
    #[arg(default_value = "0.0.0")]
    version: String,
}

/// Optional per-user configuration.
#[derive(Debug, Default, Deserialize)]
struct Config {
    /// Owner used when the repository argument has no `/`.
    default_org: Option<String>,
    /// Color theme name, resolved by `Theme::from_name`.
    theme: Option<String>,
}

/// Returns the path to the relnav config file.
///
/// Prefers `$XDG_CONFIG_HOME/relnav/config.toml`; falls back to
/// `~/.config/relnav/config.toml` when the env var is absent.
fn config_path() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(std::path::PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| std::path::PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| std::path::PathBuf::from(".config"));
    base.join("relnav").join("config.toml")
}

/// Loads the config file, treating a missing or unparsable file as empty.
///
/// Never panics — config errors are soft failures printed to stderr. The
/// hard requirement (default org present when needed) is checked later at
/// the point of use.
fn load_config() -> Config {
    let path = config_path();
    let raw = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("relnav: config parse error in {:?}: {}", path, e);
            Config::default()
        }
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  relnav <owner/repo | repo> [version]");
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    // Step 0: everything fallible at startup resolves before the terminal
    // is touched; failures are plain messages with exit code 1.
    let Some(repository) = cli.repository else {
        print_usage();
        std::process::exit(1);
    };

    let config = load_config();

    let (owner, repo) = match repository.split_once('/') {
        Some((owner, repo)) => (owner.to_owned(), repo.to_owned()),
        None => match config.default_org.clone() {
            Some(org) => (org, repository),
            None => {
                println!("No organization specified, and no default organization configured.");
                print_usage();
                std::process::exit(1);
            }
        },
    };

    let start_version = match relnav_core::parse_version(&cli.version) {
        Ok(version) => version,
        Err(e) => {
            eprintln!("relnav: error parsing starting version: {e}");
            std::process::exit(1);
        }
    };

    let token = match github::resolve_token() {
        Ok(token) => token,
        Err(e) => {
            eprintln!("relnav: {e:#}");
            std::process::exit(1);
        }
    };
    let client = match github::build_client(&token) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("relnav: {e:#}");
            std::process::exit(1);
        }
    };

    let theme = theme::Theme::from_name(config.theme.as_deref().unwrap_or("dark"));
    let mut state = app::AppState::new(owner, repo, start_version);

    // Step 1: panic hook installed first — innermost hook restores terminal.
    tui::install_panic_hook();

    // Step 2: SIGTERM flag — polled in the 50ms heartbeat arm below.
    let term_flag = tui::register_sigterm();

    // Step 3: enter alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 4: event channel, input task, and the one-shot release fetch.
    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    let fetch_tx = handler.tx.clone();
    let fetch_owner = state.owner.clone();
    let fetch_repo = state.repo.clone();
    tokio::spawn(async move {
        match github::list_releases(&client, &fetch_owner, &fetch_repo).await {
            Ok(releases) => {
                let _ = fetch_tx.send(event::AppEvent::FetchSucceeded(releases));
            }
            Err(e) => {
                let _ = fetch_tx.send(event::AppEvent::FetchFailed(format!("{e:#}")));
            }
        }
    });

    // Event loop — exits only via `break`, never via `?` (except the Render
    // arm), so `restore_tui()` is always reached after the loop.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: guarantees SIGTERM is checked at least every 50ms,
            // even when no crossterm/tick/render events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        // Exactly one draw() call per Render event.
                        terminal.draw(|frame| ui::render(frame, &mut state, &theme))?;
                    }
                    Some(event::AppEvent::Tick) => {
                        if !state.loaded {
                            state.tick();
                        }
                    }
                    Some(event::AppEvent::Key(key)) => {
                        match keybindings::handle_key(key, &mut state, &theme) {
                            KeyAction::Quit => break 'event_loop,
                            KeyAction::Continue => {}
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        match keybindings::handle_mouse(mouse, &mut state) {
                            KeyAction::Quit => break 'event_loop,
                            KeyAction::Continue => {}
                        }
                    }
                    Some(event::AppEvent::Resize(_, _)) => {
                        // The next Render re-layouts from frame.area() and
                        // re-clamps the scroll offset; focus never changes
                        // on resize.
                    }
                    Some(event::AppEvent::FetchSucceeded(releases)) => {
                        if let Err(e) = state.apply_fetch(releases, &theme) {
                            // Malformed tag or empty release list — fatal,
                            // same exit path as a transport failure.
                            state.fatal = Some(e.to_string());
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::FetchFailed(message)) => {
                        state.fatal = Some(message);
                        break 'event_loop;
                    }
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                // Check SIGTERM after every event too, not just on the
                // heartbeat, so quit latency is at most one event cycle.
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    // Restore the terminal at the single exit point of the loop, then
    // report any session-fatal error where the user can actually read it.
    tui::restore_tui()?;
    if let Some(message) = state.fatal.take() {
        eprintln!("relnav: {message}");
        std::process::exit(1);
    }
    Ok(())
}
