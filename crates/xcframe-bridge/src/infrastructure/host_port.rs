//! Loopback implementations of the outbound channels.
//!
//! When the bridge runs without a parent frame (top-level embedding, demos,
//! tests) there is nowhere to post envelopes.  The loopback port keeps them
//! in memory and logs each one, so the traffic stays observable either way.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use xcframe_core::{GameLocalEvent, GameToHostMsg};

use crate::application::{GameEventSink, HostPort};

// ── Host port ─────────────────────────────────────────────────────────────────

/// A [`HostPort`] that records every posted envelope in memory.
#[derive(Default)]
pub struct LoopbackHostPort {
    posted: Mutex<Vec<String>>,
}

impl LoopbackHostPort {
    /// Creates an empty loopback port.
    pub fn new() -> Self {
        Self::default()
    }

    /// All envelopes posted so far, in post order.
    pub fn posted(&self) -> Vec<String> {
        self.posted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Posted envelopes decoded back into messages.  Envelopes that fail to
    /// parse (none, in practice) are skipped.
    pub fn decoded(&self) -> Vec<GameToHostMsg> {
        self.posted()
            .iter()
            .filter_map(|envelope| serde_json::from_str(envelope).ok())
            .collect()
    }

    /// Discards everything recorded so far.
    pub fn clear(&self) {
        self.posted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl HostPort for LoopbackHostPort {
    fn post(&self, envelope: &str) {
        debug!(%envelope, "loopback post");
        self.posted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(envelope.to_string());
    }
}

// ── Game sink ─────────────────────────────────────────────────────────────────

/// A [`GameEventSink`] that records every delivered local event.
#[derive(Default)]
pub struct LoopbackGameSink {
    events: Mutex<Vec<GameLocalEvent>>,
}

impl LoopbackGameSink {
    /// Creates an empty loopback sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All local events delivered so far, in delivery order.
    pub fn notified(&self) -> Vec<GameLocalEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl GameEventSink for LoopbackGameSink {
    fn notify(&self, event: GameLocalEvent) {
        debug!(%event, "loopback notify");
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_records_posts_in_order() {
        let port = LoopbackHostPort::new();

        port.post(r#"{"msgId":"rg2xcPreloadStart"}"#);
        port.post(r#"{"msgId":"rg2xcPreloaderEnd"}"#);

        assert_eq!(
            port.posted(),
            vec![
                r#"{"msgId":"rg2xcPreloadStart"}"#,
                r#"{"msgId":"rg2xcPreloaderEnd"}"#,
            ]
        );
        assert_eq!(
            port.decoded(),
            vec![GameToHostMsg::PreloaderStart, GameToHostMsg::PreloaderEnd]
        );
    }

    #[test]
    fn test_clear_empties_the_record() {
        let port = LoopbackHostPort::new();
        port.post(r#"{"msgId":"rg2xcGameLoaderReady"}"#);

        port.clear();

        assert!(port.posted().is_empty());
    }

    #[test]
    fn test_sink_records_local_events_in_order() {
        let sink = LoopbackGameSink::new();

        sink.notify(GameLocalEvent::Unmute);
        sink.notify(GameLocalEvent::Mute);

        assert_eq!(
            sink.notified(),
            vec![GameLocalEvent::Unmute, GameLocalEvent::Mute]
        );
    }
}
