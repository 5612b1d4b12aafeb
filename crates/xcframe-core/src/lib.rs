//! # xcframe-core
//!
//! Shared library for XCFrame containing the cross-frame message types and
//! the lenient envelope codec.
//!
//! This crate is used by the bridge and by any host-side tooling that needs
//! to speak the same wire language.  It has zero dependencies on async
//! runtimes, I/O, or UI frameworks.
//!
//! # Architecture overview (for beginners)
//!
//! XCFrame is a cross-frame message bridge: a casino host container (the
//! "XC Client") embeds a game client in an iframe and the two sides exchange
//! small JSON messages over the browser's untyped postMessage channel.  The
//! bridge translates those messages into typed game actions and back.
//!
//! This crate (`xcframe-core`) is the shared foundation.  It defines:
//!
//! - **`protocol::messages`** – The closed, enumerated message sets for both
//!   directions (`xc2rg*` inbound, `rg2xc*` outbound), plus the opaque
//!   `keysAndValues` launch-parameter map and the local game event names.
//!
//! - **`protocol::envelope`** – How message bodies travel over the channel.
//!   Inbound bodies may arrive as live JSON objects, as JSON-encoded text, or
//!   inside a legacy `{"payload":{...}}` wrapper; all three are accepted.
//!   Outbound envelopes are always encoded in the canonical flat shape.

// Declare the top-level module.  Rust will look for it in a subdirectory
// with the same name (src/protocol/mod.rs).
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `xcframe_core::HostToGameMsg` instead of the longer module path.
pub use protocol::envelope::{decode_envelope, encode_envelope, try_decode_envelope, EnvelopeError};
pub use protocol::messages::{
    GameLocalEvent, GameStatus, GameToHostMsg, HostToGameMsg, KeyValues, LaunchParameters,
    PauseCondition,
};
