//! Application layer for xcframe-bridge.
//!
//! The application layer is the bridge's brain: it knows *what* to do with
//! each event and delegates *how* bytes leave the process to the
//! infrastructure layer behind the [`HostPort`] and [`GameEventSink`] traits.
//!
//! # Responsibilities
//!
//! - Dispatching decoded inbound host messages to their handlers
//!   ([`Bridge::handle_host_message`])
//! - Reacting to game-lifecycle events as a registered [`LifecycleHub`]
//!   listener ([`Bridge::on_lifecycle_event`])
//! - Emitting outbound envelopes in call order ([`OutboundEmitter`])
//! - Holding the latest game-supplied [`GameController`] capability

pub mod bridge;
pub mod controller;
pub mod emitter;
pub mod lifecycle;

// Re-export the primary types so callers can write `application::Bridge`.
pub use bridge::{lock_bridge, register_bridge, Bridge};
pub use controller::{decimal_to_minor_units, GameController};
pub use emitter::{GameEventSink, HostPort, OutboundEmitter};
pub use lifecycle::{LifecycleEvent, LifecycleHub, LifecycleListener};
