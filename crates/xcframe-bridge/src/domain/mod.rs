//! Domain layer for xcframe-bridge.
//!
//! The domain layer contains pure business-logic types that have no
//! dependencies on I/O, async runtimes, or external frameworks.  This makes
//! them easy to test in isolation and portable to any runtime.
//!
//! # What belongs in the domain layer?
//!
//! - The mutable session record the bridge maintains for the iframe's lifetime
//! - Configuration structures
//!
//! # What does NOT belong here?
//!
//! - Any `tokio` types or channel handles
//! - Envelope encoding/decoding (that lives in `xcframe-core`)
//! - Anything that could block or fail due to external state

pub mod config;
pub mod session;

// Re-export the most commonly needed types at the domain module boundary
// so callers can write `domain::BridgeConfig` instead of the longer path.
pub use config::BridgeConfig;
pub use session::{SessionState, Viewport};
