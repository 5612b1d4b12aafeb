//! Protocol module containing the cross-frame message types and the envelope codec.

pub mod envelope;
pub mod messages;

pub use envelope::{decode_envelope, encode_envelope, try_decode_envelope, EnvelopeError};
pub use messages::*;
