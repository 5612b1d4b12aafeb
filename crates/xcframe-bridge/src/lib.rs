//! xcframe-bridge library crate.
//!
//! This crate implements the cross-frame message bridge that sits between a
//! casino host container (the "XC Client") and an embedded game client.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Host container (JSON over the cross-frame channel)
//!         ↕
//! [xcframe-bridge]
//!   ├── domain/           Pure types: SessionState, BridgeConfig
//!   ├── application/      The bridge itself: inbound dispatch, outbound
//!   │                     emission, lifecycle hub, controller capability
//!   └── infrastructure/
//!         ├── host_port/  Loopback send/sink implementations (tests, no-parent contexts)
//!         └── launch/     Launch-URL resolution collaborator (request/response + timeout)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no external dependencies (no I/O, no async, no frameworks).
//! - `application` depends on `domain` and `xcframe-core` only; its outward
//!   edges are the [`application::HostPort`] and [`application::GameEventSink`]
//!   traits and the [`application::GameController`] capability.
//! - `infrastructure` depends on all other layers plus `tokio`.
//!
//! # Event flow
//!
//! ```text
//! host → Bridge::handle_host_message → mutate SessionState /
//!        invoke GameController → OutboundEmitter → host
//!
//! game lifecycle → LifecycleHub::dispatch → Bridge (a registered listener)
//!                → OutboundEmitter → host
//! ```
//!
//! The bridge core is deliberately synchronous: handlers run to completion on
//! the calling thread, so inbound events are processed strictly in arrival
//! order and no locking is needed inside a handler.  Only the launch
//! collaborator and the harness binary are async.

/// Domain layer: pure business-logic types (no I/O).
pub mod domain;

/// Application layer: inbound dispatch, outbound emission, lifecycle wiring.
pub mod application;

/// Infrastructure layer: loopback ports and the launch-resolution collaborator.
pub mod infrastructure;
