//! Typed message sets for the cross-frame casino protocol.
//!
//! The host container and the game client exchange small JSON objects over
//! the browser's postMessage channel.  Every message carries a `msgId` field
//! naming the event; all other fields are event-specific and sit flat in the
//! same object.  For example:
//!
//! ```json
//! {"msgId":"xc2rgSizeChanged","width":800,"height":600}
//! ```
//!
//! Serde's `#[serde(tag = "msgId")]` attribute maps that shape onto the enum
//! variants below automatically.
//!
//! # Why separate host→game and game→host message types?
//!
//! The two directions carry different information:
//!
//! - The host *sends* session control (launch, balance, properties, size,
//!   pause/resume/close).
//! - The game *sends* lifecycle progress (loader ready, preload sequence,
//!   wager/won/status updates, pause/resume acknowledgements).
//!
//! Using two distinct enums makes it a compile-time error to accidentally
//! post a host-only message back to the host, and vice versa.
//!
//! # Naming convention
//!
//! Wire identifiers follow the host API's `xc2rg*` / `rg2xc*` convention
//! ("XC Client to Remote Game" and back).  The Rust variant names drop the
//! prefix; the `#[serde(rename)]` attributes carry the exact wire strings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Opaque key/value payloads ─────────────────────────────────────────────────

/// A string-keyed payload map, `keysAndValues` on the wire.
///
/// The launch and properties events carry an open-ended bag of fields (user
/// id, auth token, site/host/platform ids, currency, language, country,
/// play-for-fun flag, sound flag, game config id, display flags).  The bridge
/// treats the bag as opaque except for the handful of keys it reads, so the
/// values stay as raw [`serde_json::Value`]s rather than a rigid struct.
///
/// A `BTreeMap` (not `HashMap`) keeps serialization order deterministic,
/// which makes logged and test envelopes stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyValues(pub BTreeMap<String, serde_json::Value>);

/// Launch parameters captured verbatim from the launch envelope.
///
/// Same representation as any other `keysAndValues` bag; the distinct name
/// records the session-long role the captured map plays.
pub type LaunchParameters = KeyValues;

impl KeyValues {
    /// Returns an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a raw value by key.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Looks up a boolean field, returning `None` when the key is absent or
    /// holds a non-boolean value.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(serde_json::Value::as_bool)
    }

    /// Looks up a string field, returning `None` when the key is absent or
    /// holds a non-string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(serde_json::Value::as_str)
    }

    /// The `soundEnabled` flag, the one field of the launch bag the bridge
    /// interprets (it seeds the session's sound state).
    pub fn sound_enabled(&self) -> Option<bool> {
        self.get_bool("soundEnabled")
    }

    /// Inserts a value under `key`, replacing any existing entry.
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }

    /// `true` when the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries in the map.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// ── Host → Game messages ──────────────────────────────────────────────────────

/// The condition under which the host asks the game to pause.
///
/// The game should reach the named safe point before physically pausing, so
/// a player never sees a hand or an animation frozen mid-flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseCondition {
    /// Finish the current hand, then pause.
    #[serde(rename = "waitUntilHandEnd")]
    WaitUntilHandEnd,
    /// Finish the current animation, then pause.
    #[serde(rename = "waitUntilAnimationEnd")]
    WaitUntilAnimationEnd,
}

/// All messages the host container can send to the game client.
///
/// The set is closed: envelopes with any other `msgId` are dropped by the
/// decoder (see [`crate::protocol::envelope`]), which is the bridge's
/// forward-compatibility policy for unknown future host events.
///
/// # Serde representation
///
/// ```json
/// {"msgId":"xc2rgLaunchGame","keysAndValues":{"currency":"USD","soundEnabled":true}}
/// {"msgId":"xc2rgBalanceUpdated2","balance":500}
/// {"msgId":"xc2rgPauseGame","condition":"waitUntilHandEnd"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msgId")]
pub enum HostToGameMsg {
    /// Requests launching the game with the supplied parameters.
    ///
    /// The game answers with the preload sequence followed by
    /// [`GameToHostMsg::LaunchGameDone`].
    #[serde(rename = "xc2rgLaunchGame")]
    LaunchGame {
        /// Session/auth/config data, captured verbatim by the bridge.
        #[serde(rename = "keysAndValues", default)]
        keys_and_values: LaunchParameters,
    },

    /// Notifies the game of the player's latest balance.
    ///
    /// Triggered by cashier deposits/withdrawals as well as game wins and
    /// losses.  The amount is in minor currency units (cents).
    #[serde(rename = "xc2rgBalanceUpdated2")]
    BalanceUpdated {
        /// New balance in minor currency units.
        #[serde(default)]
        balance: u64,
    },

    /// Notifies the game that host-side properties changed.
    ///
    /// Currently used for mute/unmute: the bag carries a `soundEnabled`
    /// boolean the game must apply.
    #[serde(rename = "xc2rgPropertiesUpdated")]
    PropertiesUpdated {
        /// Updated properties; only `soundEnabled` is interpreted today.
        #[serde(rename = "keysAndValues", default)]
        keys_and_values: KeyValues,
    },

    /// Notifies the game that its iframe was resized.
    #[serde(rename = "xc2rgSizeChanged")]
    SizeChanged {
        /// New width in pixels.
        #[serde(default)]
        width: u32,
        /// New height in pixels.
        #[serde(default)]
        height: u32,
    },

    /// Requests the game to open its pay table.
    #[serde(rename = "xc2rgShowPaytable")]
    ShowPaytable,

    /// Response to [`GameToHostMsg::ErrorOccurred`]: the host has handled the
    /// error, and disabled/grayed-out game play should be re-enabled.
    #[serde(rename = "xc2rgErrorHandled")]
    ErrorHandled {
        /// The error identifier being acknowledged.
        #[serde(default)]
        error: Option<String>,
    },

    /// Requests the game to pause and stop autoplay if one is running.
    #[serde(rename = "xc2rgPauseGame")]
    PauseGame {
        /// The safe point to reach before physically pausing.
        #[serde(default)]
        condition: Option<PauseCondition>,
    },

    /// Requests the game to resume after a pause.
    #[serde(rename = "xc2rgResumeGame")]
    ResumeGame,

    /// Requests the game to close: free resources, disconnect, and answer
    /// with [`GameToHostMsg::GameReadyForUnload`] when done.
    #[serde(rename = "xc2rgCloseGame")]
    CloseGame,
}

// ── Game → Host messages ──────────────────────────────────────────────────────

/// Status values carried by [`GameToHostMsg::GameStatusUpdated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    /// A hand (spin) has started.
    HandStart,
    /// The current hand has ended.
    HandEnd,
    /// An autoplay run has started.
    AutoPlayStart,
    /// The autoplay run has ended.
    AutoPlayEnd,
}

/// All messages the game client can send to the host container.
///
/// # Handshake ordering
///
/// [`GameLoaderReady`](Self::GameLoaderReady) must be posted before the host
/// will send anything else — it tells the host the game has established its
/// message listeners.  [`LaunchGameDone`](Self::LaunchGameDone) must follow
/// the preload sequence (`PreloaderStart` → `PreloaderProgress` →
/// `PreloaderEnd`); it is the response to the host's launch request.
///
/// # Serde representation
///
/// ```json
/// {"msgId":"rg2xcPreloaderProgress","percentage":0.15,"localizedText":"loading assets..."}
/// {"msgId":"rg2xcGameStatusUpdated","status":"handStart"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msgId")]
pub enum GameToHostMsg {
    /// The game is ready to receive host messages.
    ///
    /// Sent exactly once per distinct game identifier; a reload with the same
    /// identifier must not re-fire it.
    #[serde(rename = "rg2xcGameLoaderReady")]
    GameLoaderReady,

    /// Game loading has started.
    #[serde(rename = "rg2xcPreloadStart")]
    PreloaderStart,

    /// Game loading progress update.
    #[serde(rename = "rg2xcPreloaderProgress")]
    PreloaderProgress {
        /// Progress in the range 0.0–1.0.
        percentage: f64,
        /// Localized progress text for the host's loading screen.
        #[serde(rename = "localizedText")]
        localized_text: String,
    },

    /// Game loading has finished.
    #[serde(rename = "rg2xcPreloaderEnd")]
    PreloaderEnd,

    /// The game is fully launched and playable; response to the host's
    /// launch request.
    #[serde(rename = "rg2xcLaunchGameDone")]
    LaunchGameDone,

    /// The game result has been shown to the player.
    #[serde(rename = "rg2xcGameResultShown")]
    GameResultShown,

    /// An error occurred on the game side.
    ///
    /// The host answers with [`HostToGameMsg::ErrorHandled`] once it has
    /// dealt with the error.
    #[serde(rename = "rg2xcErrorOccurred")]
    ErrorOccurred {
        /// Case-sensitive error identifier; must be non-empty.
        error: String,
        /// Optional details/reasons for investigation purposes.
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// The wager for the current hand changed.
    #[serde(rename = "rg2xcGameWagerUpdated")]
    GameWagerUpdated {
        /// Wager amount in minor currency units.
        value: u64,
    },

    /// The won amount for the current hand changed.
    #[serde(rename = "rg2xcGameWonUpdated")]
    GameWonUpdated {
        /// Won amount in minor currency units.
        value: u64,
    },

    /// The game status changed (hand/autoplay boundaries).
    #[serde(rename = "rg2xcGameStatusUpdated")]
    GameStatusUpdated {
        /// The new status.
        status: GameStatus,
    },

    /// Game-side properties changed; currently the sound flag.
    #[serde(rename = "rg2xcPropertiesUpdated")]
    PropertiesUpdated {
        /// `true` when game sound is now enabled.
        #[serde(rename = "soundEnabled")]
        sound_enabled: bool,
    },

    /// The game is paused.
    #[serde(rename = "rg2xcGamePaused")]
    GamePaused,

    /// The game has resumed.
    #[serde(rename = "rg2xcGameResumed")]
    GameResumed,

    /// The game finished tearing down and may be unloaded; response to the
    /// host's close request.
    #[serde(rename = "rg2xcGameReadyForUnload")]
    GameReadyForUnload {
        /// Optional farewell text for the host to display; may be empty.
        #[serde(rename = "localizedMessage")]
        localized_message: String,
    },
}

// ── Local game events ─────────────────────────────────────────────────────────

/// Same-document notifications posted to the hosted game instance.
///
/// These travel over a separate lightweight channel (a same-origin custom
/// event in a browser embedding), NOT over the host postMessage channel.
/// They tell the running game to apply a property the host just changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameLocalEvent {
    /// The game should mute its sound output.
    Mute,
    /// The game should unmute its sound output.
    Unmute,
}

impl GameLocalEvent {
    /// The event name used on the local channel.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mute => "mute_game",
            Self::Unmute => "unmute_game",
        }
    }
}

impl fmt::Display for GameLocalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
