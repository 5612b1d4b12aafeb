//! XCFrame bridge — stdin/stdout harness entry point.
//!
//! This binary runs the cross-frame message bridge against plain text
//! channels, so the whole protocol can be exercised without a browser:
//!
//! - **stdin** plays the host container: each non-empty line is delivered to
//!   the bridge as one cross-frame message body.
//! - **stdout** plays the parent frame: every host-bound envelope the bridge
//!   emits is printed as one JSON line.
//! - Lines starting with `@` are harness directives that simulate the hosted
//!   game's lifecycle (see [`Directive`]), and lines starting with `#` are
//!   comments.
//!
//! # Usage
//!
//! ```text
//! xcframe-bridge [OPTIONS]
//!
//! Options:
//!   --game-id <ID>            Game identifier [default: demo-game]
//!   --preload-progress <P>    Progress fraction reported mid-preload [default: 0.15]
//!   --preload-text <TEXT>     Localized text for the progress tick
//!   --launch-timeout <SECS>   Launch endpoint deadline in seconds [default: 10]
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable               | Default             | Description                |
//! |------------------------|---------------------|----------------------------|
//! | `XCF_GAME_ID`          | `demo-game`         | Game identifier            |
//! | `XCF_PRELOAD_PROGRESS` | `0.15`              | Mid-preload progress       |
//! | `XCF_PRELOAD_TEXT`     | `loading assets...` | Progress tick text         |
//! | `XCF_LAUNCH_TIMEOUT`   | `10`                | Launch deadline (secs)     |
//!
//! # Example session
//!
//! ```text
//! $ RUST_LOG=debug xcframe-bridge
//! {"msgId":"rg2xcGameLoaderReady"}
//! {"msgId":"xc2rgLaunchGame","keysAndValues":{"soundEnabled":true}}
//! {"msgId":"rg2xcPreloadStart"}
//! {"msgId":"rg2xcPreloaderProgress","percentage":0.15,"localizedText":"loading assets..."}
//! {"msgId":"rg2xcPreloaderEnd"}
//! {"msgId":"rg2xcLaunchGameDone"}
//! @bet
//! {"msgId":"rg2xcGameStatusUpdated","status":"handStart"}
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use xcframe_core::{GameLocalEvent, PauseCondition};
use xcframe_bridge::application::{
    decimal_to_minor_units, lock_bridge, register_bridge, Bridge, GameController, GameEventSink,
    HostPort, LifecycleEvent, LifecycleHub,
};
use xcframe_bridge::domain::BridgeConfig;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Cross-frame game bridge, driven from stdin.
///
/// The `#[derive(Parser)]` macro from `clap` generates the argument parser
/// automatically from the struct fields and their `#[arg(...)]` attributes.
#[derive(Debug, Parser)]
#[command(
    name = "xcframe-bridge",
    about = "Cross-frame host/game message bridge with a stdin/stdout harness",
    version
)]
struct Cli {
    /// Identifier of the hosted game instance.
    #[arg(long, default_value = "demo-game", env = "XCF_GAME_ID")]
    game_id: String,

    /// Progress fraction (0.0 to 1.0) reported in the single mid-preload tick.
    #[arg(long, default_value_t = 0.15, env = "XCF_PRELOAD_PROGRESS")]
    preload_progress: f64,

    /// Localized text attached to the mid-preload progress tick.
    #[arg(long, default_value = "loading assets...", env = "XCF_PRELOAD_TEXT")]
    preload_text: String,

    /// Launch endpoint deadline in seconds.
    #[arg(long, default_value_t = 10, env = "XCF_LAUNCH_TIMEOUT")]
    launch_timeout: u64,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`BridgeConfig`].
    fn into_bridge_config(self) -> BridgeConfig {
        BridgeConfig {
            game_id: self.game_id,
            preload_progress: self.preload_progress,
            preload_text: self.preload_text,
            launch_timeout: Duration::from_secs(self.launch_timeout),
        }
    }
}

// ── Harness channel implementations ───────────────────────────────────────────

/// Host port that prints each envelope as one line on stdout.
///
/// stdout carries ONLY envelopes; all logging goes to stderr, so the output
/// stream stays machine-readable.
struct StdoutHostPort;

impl HostPort for StdoutHostPort {
    fn post(&self, envelope: &str) {
        println!("{envelope}");
    }
}

/// Game sink that logs local events; the harness has no real game to notify.
struct TracingGameSink;

impl GameEventSink for TracingGameSink {
    fn notify(&self, event: GameLocalEvent) {
        info!(%event, "game notified");
    }
}

/// Controller capability for the harness "game": logs each operation and
/// formats money as decimal major units.
struct HarnessController;

impl GameController for HarnessController {
    fn pause_game(&self, condition: Option<PauseCondition>) {
        info!(?condition, "game paused");
    }

    fn resume_game(&self) {
        info!("game resumed");
    }

    fn stop_autospins(&self) {
        info!("autoplay stopped");
    }

    fn format_money_to_number(&self, amount: &str) -> Option<u64> {
        decimal_to_minor_units(amount)
    }
}

// ── Directives ────────────────────────────────────────────────────────────────

/// A lifecycle directive typed on stdin, simulating the hosted game.
#[derive(Debug, PartialEq, Eq)]
enum Directive {
    /// `@loaded <game-id>`: the game finished loading under this id.
    Loaded(String),
    /// `@wager <amount>`: the player changed the bet.
    Wager(String),
    /// `@bet`: the player placed a bet.
    Bet,
    /// `@win <amount>`: the game finished showing a win.
    Win(String),
    /// `@mute` / `@unmute`: the player toggled sound inside the game.
    Mute,
    Unmute,
    /// `@error <id> [details...]`: the game hit a reportable failure.
    Error(String, Option<String>),
}

/// Parses a `@directive` line.  Returns `None` (with a warning for the
/// operator) when the directive is unknown or missing its argument.
fn parse_directive(line: &str) -> Option<Directive> {
    let rest = line.strip_prefix('@')?;
    let mut words = rest.split_whitespace();
    let name = words.next()?;
    match name {
        "loaded" => Some(Directive::Loaded(words.next()?.to_string())),
        "wager" => Some(Directive::Wager(words.next()?.to_string())),
        "bet" => Some(Directive::Bet),
        "win" => Some(Directive::Win(words.next()?.to_string())),
        "mute" => Some(Directive::Mute),
        "unmute" => Some(Directive::Unmute),
        "error" => {
            let id = words.next()?.to_string();
            let details: Vec<&str> = words.collect();
            let details = if details.is_empty() {
                None
            } else {
                Some(details.join(" "))
            };
            Some(Directive::Error(id, details))
        }
        _ => None,
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. `tracing_subscriber` is initialised on stderr; the log level is
///    controlled by `RUST_LOG` (e.g. `RUST_LOG=debug`).
/// 2. CLI arguments are parsed with `clap` into a [`Cli`] struct.
/// 3. The bridge is composed over the stdout port, wrapped in `Arc<Mutex>`,
///    and registered on a [`LifecycleHub`].
/// 4. The harness game "loads": start-loading and game-loaded are
///    dispatched, so the very first line of output is loader-ready.
/// 5. stdin is read line by line until EOF; each line becomes a host
///    message or a `@directive`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.into_bridge_config();
    info!(game_id = %config.game_id, "xcframe bridge starting");

    // ── Composition ───────────────────────────────────────────────────────────
    let bridge = Arc::new(Mutex::new(Bridge::new(
        config.clone(),
        Arc::new(StdoutHostPort),
        Arc::new(TracingGameSink),
    )));
    let mut hub = LifecycleHub::new();
    register_bridge(&mut hub, Arc::clone(&bridge));

    // The harness game loads immediately: capability first, then loaded.
    // Loader-ready goes out here, before any host input is read.
    hub.dispatch(&LifecycleEvent::StartLoading {
        controller: Arc::new(HarnessController),
    });
    hub.dispatch(&LifecycleEvent::GameLoaded {
        game_id: config.game_id.clone(),
    });

    // ── Input loop ────────────────────────────────────────────────────────────
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('@') {
            match parse_directive(line) {
                Some(Directive::Loaded(game_id)) => {
                    hub.dispatch(&LifecycleEvent::GameLoaded { game_id });
                }
                Some(Directive::Wager(bet)) => {
                    hub.dispatch(&LifecycleEvent::AdjustWagerAmount { bet });
                }
                Some(Directive::Bet) => hub.dispatch(&LifecycleEvent::BetPlaced),
                Some(Directive::Win(amount)) => {
                    hub.dispatch(&LifecycleEvent::WinShown { amount });
                }
                Some(Directive::Mute) => hub.dispatch(&LifecycleEvent::Muted),
                Some(Directive::Unmute) => hub.dispatch(&LifecycleEvent::Unmuted),
                Some(Directive::Error(id, details)) => {
                    lock_bridge(&bridge).report_error(&id, details.as_deref());
                }
                None => warn!(%line, "unrecognized directive"),
            }
            continue;
        }

        // Anything else plays a raw cross-frame delivery.  The channel hands
        // the bridge the body as JSON text, exactly as a host would post it.
        let body = Value::String(line.to_string());
        lock_bridge(&bridge).handle_host_message(Some(&body));

        if !lock_bridge(&bridge).session().listening {
            debug!("session closed; leaving input loop");
            break;
        }
    }

    info!("xcframe bridge exiting");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
