//! Infrastructure layer for xcframe-bridge.
//!
//! Concrete implementations of the application layer's outward-facing
//! traits, plus the launch-endpoint collaborator.  Nothing in here contains
//! bridge logic; everything is replaceable behind a trait.
//!
//! # Modules
//!
//! - [`host_port`]: loopback host port and game sink for embedding without a
//!   parent frame (and for tests)
//! - [`launch`]: resolving the real game URL from a launch endpoint
//! - [`mock`]: a recording [`GameController`](crate::application::GameController)
//!   for tests and demos

pub mod host_port;
pub mod launch;
pub mod mock;

pub use host_port::{LoopbackGameSink, LoopbackHostPort};
pub use launch::{resolve_or_report, resolve_with_timeout, LaunchError, LaunchUrlResolver};
pub use mock::{ControllerCall, RecordingController};
