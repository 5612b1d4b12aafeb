//! Game-lifecycle events and the listener registry.
//!
//! The hosted game announces its lifecycle (loading started, loaded, wager
//! adjusted, bet placed, win shown, mute/unmute) through a [`LifecycleHub`].
//! The bridge is itself one registered listener — that is how game-internal
//! events turn into host-bound emissions.
//!
//! The hub is an explicit object passed by reference to both the bridge and
//! the hosted game at composition time, so there is no global mutable state
//! for unrelated code sharing the frame to append to.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::application::controller::GameController;

// ── Lifecycle events ──────────────────────────────────────────────────────────

/// A game-lifecycle event dispatched through the [`LifecycleHub`].
///
/// Cases are mutually exclusive: each event has exactly one meaning and one
/// handler path.
pub enum LifecycleEvent {
    /// The game has started loading and supplies its controller capability.
    StartLoading {
        /// The capability object the bridge will invoke from now on.  A
        /// reload may supply a fresh instance; the latest one wins.
        controller: Arc<dyn GameController>,
    },

    /// The game has finished loading and shows up under `game_id`.
    GameLoaded {
        /// The loaded game's identifier.
        game_id: String,
    },

    /// The player changed the bet amount; `bet` is the game's native money
    /// representation (the controller capability converts it).
    AdjustWagerAmount {
        /// Native bet representation, e.g. `"1.50"`.
        bet: String,
    },

    /// The player placed a bet (a hand starts).
    BetPlaced,

    /// The game finished presenting a win to the player.
    WinShown {
        /// Native won-amount representation, converted like a wager.
        amount: String,
    },

    /// The player muted game sound from inside the game.
    Muted,

    /// The player unmuted game sound from inside the game.
    Unmuted,
}

// Manual Debug: `Arc<dyn GameController>` has no Debug, and logging the
// capability would be meaningless anyway.
impl fmt::Debug for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartLoading { .. } => f.write_str("StartLoading"),
            Self::GameLoaded { game_id } => {
                f.debug_struct("GameLoaded").field("game_id", game_id).finish()
            }
            Self::AdjustWagerAmount { bet } => {
                f.debug_struct("AdjustWagerAmount").field("bet", bet).finish()
            }
            Self::BetPlaced => f.write_str("BetPlaced"),
            Self::WinShown { amount } => {
                f.debug_struct("WinShown").field("amount", amount).finish()
            }
            Self::Muted => f.write_str("Muted"),
            Self::Unmuted => f.write_str("Unmuted"),
        }
    }
}

// ── Listener registry ─────────────────────────────────────────────────────────

/// A registered lifecycle listener.
pub type LifecycleListener = Box<dyn FnMut(&LifecycleEvent) + Send>;

/// Ordered registry of game-lifecycle listeners.
///
/// # Contract
///
/// - The list is append-only for the hub's lifetime; there is no
///   deregistration path.
/// - `register` does NOT deduplicate: registering the same logical listener
///   twice produces two invocations per event.  Avoiding duplicates is the
///   caller's responsibility.
/// - `dispatch` invokes listeners synchronously, in registration order, and
///   swallows nothing: a panicking listener aborts the remaining dispatch.
///   Known risk — listeners are trusted in-process code, not foreign input.
#[derive(Default)]
pub struct LifecycleHub {
    listeners: Vec<LifecycleListener>,
}

impl LifecycleHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener to the registry.
    pub fn register(&mut self, listener: LifecycleListener) {
        self.listeners.push(listener);
    }

    /// Invokes every registered listener with `event`, in registration order.
    pub fn dispatch(&mut self, event: &LifecycleEvent) {
        debug!(?event, listeners = self.listeners.len(), "dispatching lifecycle event");
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
