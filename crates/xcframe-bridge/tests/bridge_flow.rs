//! End-to-end bridge flows over the public API.
//!
//! These tests compose the bridge exactly the way an embedding does: a
//! `Bridge` behind `Arc<Mutex>`, registered on a `LifecycleHub`, wired to the
//! loopback channels.  Host traffic arrives as raw JSON bodies; assertions
//! read the envelopes the loopback port recorded.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use xcframe_bridge::application::{lock_bridge, register_bridge, Bridge, LifecycleEvent, LifecycleHub};
use xcframe_bridge::domain::BridgeConfig;
use xcframe_bridge::infrastructure::{
    ControllerCall, LoopbackGameSink, LoopbackHostPort, RecordingController,
};
use xcframe_core::{GameLocalEvent, GameToHostMsg, PauseCondition};

/// A fully composed embedding: hub, shared bridge, loopback channels, and a
/// recording controller, with the game already loading (but not yet loaded).
struct Embedding {
    hub: LifecycleHub,
    bridge: Arc<Mutex<Bridge>>,
    port: Arc<LoopbackHostPort>,
    sink: Arc<LoopbackGameSink>,
    controller: Arc<RecordingController>,
}

impl Embedding {
    fn new() -> Self {
        Self::with_controller(Arc::new(RecordingController::new()))
    }

    fn with_controller(controller: Arc<RecordingController>) -> Self {
        let port = Arc::new(LoopbackHostPort::new());
        let sink = Arc::new(LoopbackGameSink::new());
        let bridge = Arc::new(Mutex::new(Bridge::new(
            BridgeConfig::default(),
            Arc::clone(&port) as _,
            Arc::clone(&sink) as _,
        )));
        let mut hub = LifecycleHub::new();
        register_bridge(&mut hub, Arc::clone(&bridge));
        hub.dispatch(&LifecycleEvent::StartLoading {
            controller: Arc::clone(&controller) as _,
        });
        Self {
            hub,
            bridge,
            port,
            sink,
            controller,
        }
    }

    /// Delivers one raw body from the host side.
    fn deliver(&self, body: Value) {
        lock_bridge(&self.bridge).handle_host_message(Some(&body));
    }

    /// `msgId` strings of everything posted so far, in post order.
    fn posted_ids(&self) -> Vec<String> {
        self.port
            .posted()
            .iter()
            .filter_map(|envelope| {
                let v: Value = serde_json::from_str(envelope).ok()?;
                Some(v["msgId"].as_str()?.to_string())
            })
            .collect()
    }
}

// ── Handshake and launch ──────────────────────────────────────────────────────

#[test]
fn test_full_launch_handshake_in_contract_order() {
    // Arrange
    let mut embedding = Embedding::new();

    // Act: the game loads, then the host launches
    embedding.hub.dispatch(&LifecycleEvent::GameLoaded {
        game_id: "slots-7".to_string(),
    });
    embedding.deliver(json!({
        "msgId": "xc2rgLaunchGame",
        "keysAndValues": {"currency": "USD", "soundEnabled": true}
    }));

    // Assert: readiness strictly precedes the preload sequence, and
    // launch-done is last
    assert_eq!(
        embedding.posted_ids(),
        vec![
            "rg2xcGameLoaderReady",
            "rg2xcPreloadStart",
            "rg2xcPreloaderProgress",
            "rg2xcPreloaderEnd",
            "rg2xcLaunchGameDone",
        ]
    );
}

#[test]
fn test_launch_delivered_as_json_text_is_accepted() {
    // Hosts on this channel may post the envelope double-encoded.
    let mut embedding = Embedding::new();
    embedding.hub.dispatch(&LifecycleEvent::GameLoaded {
        game_id: "slots-7".to_string(),
    });

    let text = r#"{"msgId":"xc2rgLaunchGame","keysAndValues":{"soundEnabled":false}}"#;
    embedding.deliver(Value::String(text.to_string()));

    assert_eq!(
        embedding.posted_ids().last().map(String::as_str),
        Some("rg2xcLaunchGameDone")
    );
    assert!(!lock_bridge(&embedding.bridge).session().sound_enabled);
}

#[test]
fn test_ready_is_idempotent_per_game_id_but_refires_for_a_new_id() {
    let mut embedding = Embedding::new();

    embedding.hub.dispatch(&LifecycleEvent::GameLoaded {
        game_id: "slots-7".to_string(),
    });
    embedding.hub.dispatch(&LifecycleEvent::GameLoaded {
        game_id: "slots-7".to_string(),
    });
    embedding.hub.dispatch(&LifecycleEvent::GameLoaded {
        game_id: "slots-8".to_string(),
    });

    assert_eq!(
        embedding.posted_ids(),
        vec!["rg2xcGameLoaderReady", "rg2xcGameLoaderReady"]
    );
}

// ── Host pushes ───────────────────────────────────────────────────────────────

#[test]
fn test_balance_and_viewport_updates_mutate_session_silently() {
    let embedding = Embedding::new();

    embedding.deliver(json!({"msgId": "xc2rgBalanceUpdated2", "balance": 500}));
    embedding.deliver(json!({"msgId": "xc2rgSizeChanged", "width": 800, "height": 600}));

    let bridge = lock_bridge(&embedding.bridge);
    assert_eq!(bridge.session().balance, 500);
    assert_eq!(bridge.session().viewport.width, 800);
    assert_eq!(bridge.session().viewport.height, 600);
    drop(bridge);
    assert!(embedding.port.posted().is_empty());
}

#[test]
fn test_sound_toggle_reaches_the_game_locally_not_the_host() {
    let embedding = Embedding::new();

    embedding.deliver(json!({
        "msgId": "xc2rgPropertiesUpdated",
        "keysAndValues": {"soundEnabled": true}
    }));
    embedding.deliver(json!({
        "msgId": "xc2rgPropertiesUpdated",
        "keysAndValues": {"soundEnabled": false}
    }));

    assert_eq!(
        embedding.sink.notified(),
        vec![GameLocalEvent::Unmute, GameLocalEvent::Mute]
    );
    assert!(embedding.port.posted().is_empty());
    assert!(!lock_bridge(&embedding.bridge).session().sound_enabled);
}

// ── Pause, resume, close ──────────────────────────────────────────────────────

#[test]
fn test_pause_and_resume_round_trip() {
    let embedding = Embedding::new();

    embedding.deliver(json!({"msgId": "xc2rgPauseGame", "condition": "waitUntilAnimationEnd"}));
    embedding.deliver(json!({"msgId": "xc2rgResumeGame"}));

    // The controller receives the safe-point condition the host named.
    assert_eq!(
        embedding.controller.calls(),
        vec![
            ControllerCall::StopAutospins,
            ControllerCall::PauseGame(Some(PauseCondition::WaitUntilAnimationEnd)),
            ControllerCall::ResumeGame,
        ]
    );
    assert_eq!(
        embedding.posted_ids(),
        vec!["rg2xcGamePaused", "rg2xcGameResumed"]
    );
}

#[test]
fn test_pause_without_a_controller_is_skipped_silently() {
    // A bridge that never saw start-loading has no controller and is not
    // listening; nothing happens.
    let port = Arc::new(LoopbackHostPort::new());
    let sink = Arc::new(LoopbackGameSink::new());
    let bridge = Arc::new(Mutex::new(Bridge::new(
        BridgeConfig::default(),
        Arc::clone(&port) as _,
        sink as _,
    )));

    lock_bridge(&bridge).handle_host_message(Some(&json!({"msgId": "xc2rgPauseGame"})));

    assert!(port.posted().is_empty());
}

#[test]
fn test_close_ends_the_session_for_good() {
    let embedding = Embedding::new();

    embedding.deliver(json!({"msgId": "xc2rgCloseGame"}));
    // Anything after close must be ignored.
    embedding.deliver(json!({"msgId": "xc2rgLaunchGame"}));
    embedding.deliver(json!({"msgId": "xc2rgResumeGame"}));

    assert_eq!(embedding.posted_ids(), vec!["rg2xcGameReadyForUnload"]);
    assert!(!lock_bridge(&embedding.bridge).session().listening);
}

// ── Game-side lifecycle ───────────────────────────────────────────────────────

#[test]
fn test_wager_bet_win_sequence_reports_to_the_host() {
    let mut embedding = Embedding::new();

    embedding.hub.dispatch(&LifecycleEvent::AdjustWagerAmount {
        bet: "1.50".to_string(),
    });
    embedding.hub.dispatch(&LifecycleEvent::BetPlaced);
    embedding.hub.dispatch(&LifecycleEvent::WinShown {
        amount: "25.00".to_string(),
    });

    assert_eq!(
        embedding.port.decoded(),
        vec![
            GameToHostMsg::GameWagerUpdated { value: 150 },
            GameToHostMsg::GameStatusUpdated {
                status: xcframe_core::GameStatus::HandStart
            },
            GameToHostMsg::GameWonUpdated { value: 2500 },
            GameToHostMsg::GameResultShown,
        ]
    );
}

#[test]
fn test_declined_money_conversion_suppresses_the_emission() {
    let mut embedding =
        Embedding::with_controller(Arc::new(RecordingController::declining_format()));

    embedding.hub.dispatch(&LifecycleEvent::AdjustWagerAmount {
        bet: "1.50".to_string(),
    });
    embedding.hub.dispatch(&LifecycleEvent::WinShown {
        amount: "25.00".to_string(),
    });

    // The conversions were attempted but nothing reached the host.
    assert_eq!(embedding.controller.calls().len(), 2);
    assert!(embedding.port.posted().is_empty());
}

#[test]
fn test_game_side_mute_toggles_report_properties_updates() {
    let mut embedding = Embedding::new();

    embedding.hub.dispatch(&LifecycleEvent::Muted);
    embedding.hub.dispatch(&LifecycleEvent::Unmuted);

    assert_eq!(
        embedding.port.decoded(),
        vec![
            GameToHostMsg::PropertiesUpdated {
                sound_enabled: false
            },
            GameToHostMsg::PropertiesUpdated {
                sound_enabled: true
            },
        ]
    );
}

// ── Channel noise ─────────────────────────────────────────────────────────────

#[test]
fn test_noise_on_the_channel_never_produces_output() {
    let embedding = Embedding::new();

    // Unknown msgId, malformed text, wrong shape, no body at all.
    embedding.deliver(json!({"msgId": "xc2rgNotAThing"}));
    embedding.deliver(Value::String("{not json".to_string()));
    embedding.deliver(json!([1, 2, 3]));
    embedding.deliver(json!(42));
    lock_bridge(&embedding.bridge).handle_host_message(None);

    assert!(embedding.port.posted().is_empty());
    assert!(embedding.sink.notified().is_empty());
    assert!(embedding.controller.calls().is_empty());
}

#[test]
fn test_messages_before_the_game_starts_loading_are_dropped() {
    // No StartLoading dispatched here at all.
    let port = Arc::new(LoopbackHostPort::new());
    let sink = Arc::new(LoopbackGameSink::new());
    let bridge = Arc::new(Mutex::new(Bridge::new(
        BridgeConfig::default(),
        Arc::clone(&port) as _,
        sink as _,
    )));

    lock_bridge(&bridge).handle_host_message(Some(&json!({
        "msgId": "xc2rgLaunchGame",
        "keysAndValues": {"currency": "USD"}
    })));

    assert!(port.posted().is_empty());
    assert!(lock_bridge(&bridge).session().launch_params.is_empty());
}

// ── Error reporting ───────────────────────────────────────────────────────────

#[test]
fn test_reported_errors_round_trip_through_the_host() {
    let embedding = Embedding::new();

    lock_bridge(&embedding.bridge).report_error("SERVER_ERROR", Some("connection reset"));
    // The host acknowledges; nothing further is emitted.
    embedding.deliver(json!({"msgId": "xc2rgErrorHandled", "error": "SERVER_ERROR"}));

    assert_eq!(
        embedding.port.decoded(),
        vec![GameToHostMsg::ErrorOccurred {
            error: "SERVER_ERROR".to_string(),
            details: Some("connection reset".to_string()),
        }]
    );
}
