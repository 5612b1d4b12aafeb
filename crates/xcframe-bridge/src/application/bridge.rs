//! The bridge: inbound dispatch, lifecycle reaction, and session mutation.
//!
//! [`Bridge`] is the one component allowed to mutate [`SessionState`].  It
//! plays two roles:
//!
//! 1. **Inbound dispatcher** — [`Bridge::handle_host_message`] decodes a raw
//!    cross-frame body and routes it by `msgId` to a handler.  Handlers may
//!    mutate session state, invoke the game's controller capability, and
//!    emit host-bound envelopes.
//! 2. **Lifecycle listener** — [`Bridge::on_lifecycle_event`] is invoked by
//!    the [`LifecycleHub`](crate::application::LifecycleHub) like any other
//!    registered listener; [`register_bridge`] performs that registration.
//!
//! # Handshake ordering
//!
//! The host sends nothing until the game posts loader-ready, and loader-ready
//! is only posted from the game-loaded lifecycle event — so "ready" always
//! precedes "loaded" processing on the host side.  Launch-done is emitted
//! strictly after the preload sequence within the launch handler.
//!
//! # Failure policy
//!
//! Handlers are defensive: missing optional fields default, a missing
//! controller capability skips the action, and nothing in this module
//! panics on host input.  Malformed and unknown envelopes never reach this
//! module — the codec already dropped them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::{debug, info, trace, warn};

use xcframe_core::{
    decode_envelope, GameLocalEvent, GameStatus, GameToHostMsg, HostToGameMsg, KeyValues,
};

use crate::application::controller::GameController;
use crate::application::emitter::{GameEventSink, HostPort, OutboundEmitter};
use crate::application::lifecycle::{LifecycleEvent, LifecycleHub};
use crate::domain::{BridgeConfig, SessionState};

// ── Bridge ────────────────────────────────────────────────────────────────────

/// The cross-frame message bridge.
///
/// Construct one per embedded game instance, wrap it in `Arc<Mutex<_>>`, and
/// register it on the lifecycle hub with [`register_bridge`].  All methods
/// run to completion synchronously; callers provide the serialization (the
/// mutex) and the single event queue.
pub struct Bridge {
    config: BridgeConfig,
    session: SessionState,
    /// Latest game-supplied capability; `None` until start-loading fires.
    controller: Option<Arc<dyn GameController>>,
    emitter: OutboundEmitter,
}

impl Bridge {
    /// Creates a bridge over the given outbound channels, with session state
    /// seeded from `config`.
    pub fn new(
        config: BridgeConfig,
        port: Arc<dyn HostPort>,
        game_sink: Arc<dyn GameEventSink>,
    ) -> Self {
        let session = SessionState::new(config.game_id.clone());
        Self {
            config,
            session,
            controller: None,
            emitter: OutboundEmitter::new(port, game_sink),
        }
    }

    /// Read access to the session record.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    // ── Inbound dispatch ──────────────────────────────────────────────────────

    /// Handles one raw delivery from the cross-frame channel.
    ///
    /// `body` is the delivery's data field, `None` when the delivery had no
    /// body.  Every drop case (no body, malformed text, unknown `msgId`,
    /// message arriving before the game started loading) is a silent no-op.
    pub fn handle_host_message(&mut self, body: Option<&Value>) {
        if !self.session.listening {
            trace!("host message before start-loading; dropping");
            return;
        }
        let Some(msg) = decode_envelope(body) else {
            return;
        };
        self.dispatch_inbound(msg);
    }

    fn dispatch_inbound(&mut self, msg: HostToGameMsg) {
        match msg {
            HostToGameMsg::LaunchGame { keys_and_values } => {
                self.handle_launch(keys_and_values);
            }

            HostToGameMsg::BalanceUpdated { balance } => {
                debug!(balance, "host pushed balance update");
                self.session.balance = balance;
                // No outbound echo; the host already knows the balance.
            }

            HostToGameMsg::PropertiesUpdated { keys_and_values } => {
                self.handle_properties(&keys_and_values);
            }

            HostToGameMsg::SizeChanged { width, height } => {
                debug!(width, height, "host resized the game frame");
                self.session.viewport.width = width;
                self.session.viewport.height = height;
            }

            HostToGameMsg::ShowPaytable => {
                // Informational; UI hook point for opening the pay table.
                info!("host requested the pay table");
            }

            HostToGameMsg::ErrorHandled { error } => {
                info!(error = error.as_deref(), "host handled a reported error");
            }

            HostToGameMsg::PauseGame { condition } => {
                info!(?condition, "host requested pause");
                if let Some(controller) = &self.controller {
                    // The host contract pairs pause with stopping autoplay.
                    // The condition is conveyed so the game can reach the
                    // named safe point before physically pausing.
                    controller.stop_autospins();
                    controller.pause_game(condition);
                    self.emitter.emit(&GameToHostMsg::GamePaused);
                } else {
                    debug!("no controller registered; pause skipped");
                }
            }

            HostToGameMsg::ResumeGame => {
                info!("host requested resume");
                if let Some(controller) = &self.controller {
                    controller.resume_game();
                    self.emitter.emit(&GameToHostMsg::GameResumed);
                } else {
                    debug!("no controller registered; resume skipped");
                }
            }

            HostToGameMsg::CloseGame => {
                self.handle_close();
            }
        }
    }

    /// Captures launch parameters and runs the launch handshake: preload
    /// sequence first, then launch-done.
    fn handle_launch(&mut self, keys_and_values: KeyValues) {
        info!(parameters = keys_and_values.len(), "host requested game launch");
        if let Some(sound) = keys_and_values.sound_enabled() {
            self.session.sound_enabled = sound;
        }
        self.session.launch_params = keys_and_values;

        self.emitter.emit(&GameToHostMsg::PreloaderStart);
        self.emitter.emit(&GameToHostMsg::PreloaderProgress {
            percentage: self.config.preload_progress,
            localized_text: self.config.preload_text.clone(),
        });
        self.emitter.emit(&GameToHostMsg::PreloaderEnd);
        self.emitter.emit(&GameToHostMsg::LaunchGameDone);
    }

    /// Applies a host-side property change.  Only `soundEnabled` is
    /// interpreted today; a bag without it is a no-op.
    fn handle_properties(&mut self, keys_and_values: &KeyValues) {
        let Some(sound) = keys_and_values.sound_enabled() else {
            debug!("properties update without soundEnabled; ignoring");
            return;
        };
        debug!(sound, "host toggled sound");
        self.session.sound_enabled = sound;
        let event = if sound {
            GameLocalEvent::Unmute
        } else {
            GameLocalEvent::Mute
        };
        self.emitter.emit_local(event);
    }

    /// Tears the session down and confirms the game may be unloaded.
    fn handle_close(&mut self) {
        info!("host requested close; tearing down");
        if let Some(controller) = &self.controller {
            controller.stop_autospins();
            controller.pause_game(None);
        }
        // Stop accepting host messages; the session is over.
        self.session.listening = false;
        self.emitter.emit(&GameToHostMsg::GameReadyForUnload {
            localized_message: String::new(),
        });
    }

    // ── Lifecycle reaction ────────────────────────────────────────────────────

    /// Reacts to one game-lifecycle event.
    ///
    /// Normally invoked through the hub (see [`register_bridge`]); public so
    /// embedders with their own event plumbing can drive the bridge directly.
    pub fn on_lifecycle_event(&mut self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::StartLoading { controller } => {
                // Accept the latest supplied capability; a reload replaces it.
                self.controller = Some(Arc::clone(controller));
                if self.session.listening {
                    debug!("already listening; controller capability replaced");
                } else {
                    self.session.listening = true;
                    debug!("game loading started; now accepting host messages");
                }
            }

            LifecycleEvent::GameLoaded { game_id } => {
                let first_load = !self.session.started;
                let id_changed = self.session.game_id != *game_id;
                self.session.game_id.clone_from(game_id);
                // Exactly one loader-ready per distinct game id: a reload
                // with the same id must not re-fire readiness.
                if first_load || id_changed {
                    self.session.started = true;
                    self.emitter.emit(&GameToHostMsg::GameLoaderReady);
                } else {
                    debug!(%game_id, "reload with unchanged id; readiness not re-fired");
                }
            }

            LifecycleEvent::AdjustWagerAmount { bet } => {
                if let Some(value) = self.format_money(bet) {
                    self.emitter.emit(&GameToHostMsg::GameWagerUpdated { value });
                }
            }

            LifecycleEvent::BetPlaced => {
                self.emitter.emit(&GameToHostMsg::GameStatusUpdated {
                    status: GameStatus::HandStart,
                });
            }

            LifecycleEvent::WinShown { amount } => {
                if let Some(value) = self.format_money(amount) {
                    self.emitter.emit(&GameToHostMsg::GameWonUpdated { value });
                    self.emitter.emit(&GameToHostMsg::GameResultShown);
                }
            }

            LifecycleEvent::Muted => {
                self.emitter.emit(&GameToHostMsg::PropertiesUpdated {
                    sound_enabled: false,
                });
            }

            LifecycleEvent::Unmuted => {
                self.emitter.emit(&GameToHostMsg::PropertiesUpdated {
                    sound_enabled: true,
                });
            }
        }
    }

    /// Converts a native money representation through the controller
    /// capability, skipping (with a log) when no controller is registered or
    /// the formatter declines the input.
    fn format_money(&self, amount: &str) -> Option<u64> {
        let Some(controller) = &self.controller else {
            debug!(amount, "no controller registered; money conversion skipped");
            return None;
        };
        let value = controller.format_money_to_number(amount);
        if value.is_none() {
            debug!(amount, "controller declined money conversion");
        }
        value
    }

    // ── Error reporting ───────────────────────────────────────────────────────

    /// Reports a genuine game-side failure to the host.
    ///
    /// Emits `rg2xcErrorOccurred`; the host eventually answers with
    /// `xc2rgErrorHandled`.  `error` is the case-sensitive identifier the
    /// host contract defines and must be non-empty; an empty identifier is
    /// logged and dropped rather than sent.
    pub fn report_error(&mut self, error: &str, details: Option<&str>) {
        if error.is_empty() {
            warn!("refusing to report an error with an empty identifier");
            return;
        }
        warn!(error, details, "reporting error to host");
        self.emitter.emit(&GameToHostMsg::ErrorOccurred {
            error: error.to_string(),
            details: details.map(str::to_string),
        });
    }
}

// ── Shared-handle helpers ─────────────────────────────────────────────────────

/// Locks a shared bridge handle, recovering from a poisoned mutex.
///
/// Poisoning can only happen if another lifecycle listener panicked while
/// holding the lock; every bridge mutation is a plain field write, so the
/// state behind a poisoned lock is still coherent and the guard is safe to
/// recover.
pub fn lock_bridge(bridge: &Mutex<Bridge>) -> MutexGuard<'_, Bridge> {
    bridge.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registers `bridge` as a listener on `hub`.
///
/// Register once per bridge: the hub does not deduplicate, and a doubly
/// registered bridge would emit every host-bound message twice.
pub fn register_bridge(hub: &mut LifecycleHub, bridge: Arc<Mutex<Bridge>>) {
    hub.register(Box::new(move |event| {
        lock_bridge(&bridge).on_lifecycle_event(event);
    }));
}

// ── Tests ─────────────────────────────────────────────────────────────────────
