//! Outbound emission: the host-bound channel and the local game channel.
//!
//! Two distinct channels leave the bridge:
//!
//! 1. **Host-bound** ([`HostPort`]): encoded envelopes posted to the parent
//!    frame.  Fire-and-forget — no acknowledgment is awaited, calls return
//!    immediately, and delivery is not guaranteed.  This is deliberately a
//!    one-way send primitive, distinct from the request/response pattern the
//!    launch collaborator uses.
//! 2. **Game-local** ([`GameEventSink`]): same-process notifications to the
//!    hosted game instance (mute/unmute), never posted across the frame
//!    boundary.
//!
//! [`OutboundEmitter`] owns the encode step and preserves call order: the
//! bridge is single-threaded, so envelopes reach the port in exactly the
//! order `emit` was called.

use std::sync::Arc;

use tracing::{debug, error, trace};

use xcframe_core::{encode_envelope, GameLocalEvent, GameToHostMsg};

// ── Outward-facing traits ─────────────────────────────────────────────────────

/// One-way send primitive for host-bound envelopes.
///
/// Implementations post the already-encoded JSON envelope to the parent
/// frame.  When no parent exists (top-level or test context) the loopback
/// implementation posts to itself and logs the envelope for diagnostics —
/// the log is never a substitute for the post.
pub trait HostPort: Send + Sync {
    /// Posts one encoded envelope.  Must not block and must not fail
    /// observably; the channel has no delivery guarantee to surface.
    fn post(&self, envelope: &str);
}

/// Sink for same-process game notifications.
pub trait GameEventSink: Send + Sync {
    /// Delivers one local event to the hosted game instance.
    fn notify(&self, event: GameLocalEvent);
}

// ── Emitter ───────────────────────────────────────────────────────────────────

/// Serializes outbound messages and hands them to the two channels.
pub struct OutboundEmitter {
    port: Arc<dyn HostPort>,
    game_sink: Arc<dyn GameEventSink>,
}

impl OutboundEmitter {
    /// Creates an emitter over the given channels.
    pub fn new(port: Arc<dyn HostPort>, game_sink: Arc<dyn GameEventSink>) -> Self {
        Self { port, game_sink }
    }

    /// Encodes `msg` in the canonical flat envelope shape and posts it to
    /// the host.  Returns immediately; a failed encode is logged and the
    /// post is dropped (fire-and-forget has nowhere to report to).
    pub fn emit(&self, msg: &GameToHostMsg) {
        match encode_envelope(msg) {
            Ok(envelope) => {
                trace!(%envelope, "posting envelope to host");
                self.port.post(&envelope);
            }
            Err(err) => {
                error!(%err, "dropping unencodable outbound message");
            }
        }
    }

    /// Dispatches a same-process notification to the hosted game.
    pub fn emit_local(&self, event: GameLocalEvent) {
        debug!(%event, "notifying hosted game");
        self.game_sink.notify(event);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{LoopbackGameSink, LoopbackHostPort};

    #[test]
    fn test_emit_posts_one_canonical_envelope() {
        // Arrange
        let port = Arc::new(LoopbackHostPort::new());
        let sink = Arc::new(LoopbackGameSink::new());
        let emitter = OutboundEmitter::new(Arc::clone(&port) as _, sink);

        // Act
        emitter.emit(&GameToHostMsg::GameLoaderReady);

        // Assert
        assert_eq!(port.posted(), vec![r#"{"msgId":"rg2xcGameLoaderReady"}"#]);
    }

    #[test]
    fn test_emit_preserves_call_order() {
        let port = Arc::new(LoopbackHostPort::new());
        let sink = Arc::new(LoopbackGameSink::new());
        let emitter = OutboundEmitter::new(Arc::clone(&port) as _, sink);

        emitter.emit(&GameToHostMsg::PreloaderStart);
        emitter.emit(&GameToHostMsg::PreloaderEnd);
        emitter.emit(&GameToHostMsg::LaunchGameDone);

        let ids: Vec<String> = port
            .decoded()
            .iter()
            .map(|m| format!("{m:?}"))
            .collect();
        assert_eq!(ids, vec!["PreloaderStart", "PreloaderEnd", "LaunchGameDone"]);
    }

    #[test]
    fn test_emit_local_goes_to_the_game_sink_not_the_host() {
        let port = Arc::new(LoopbackHostPort::new());
        let sink = Arc::new(LoopbackGameSink::new());
        let emitter = OutboundEmitter::new(Arc::clone(&port) as _, Arc::clone(&sink) as _);

        emitter.emit_local(GameLocalEvent::Mute);
        emitter.emit_local(GameLocalEvent::Unmute);

        // The two channels are distinct: nothing crossed to the host port.
        assert!(port.posted().is_empty());
        assert_eq!(
            sink.notified(),
            vec![GameLocalEvent::Mute, GameLocalEvent::Unmute]
        );
    }
}
