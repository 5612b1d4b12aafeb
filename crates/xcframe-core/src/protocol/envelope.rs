//! Lenient envelope codec for the cross-frame channel.
//!
//! postMessage is an untyped, shared channel: the host page posts its own
//! unrelated messages on it, bodies sometimes arrive as JSON-encoded *text*
//! instead of live objects (the double-encoded form), and one legacy host
//! variant wraps the whole message in an outer `{"payload":{...}}` object.
//!
//! The decoding policy is therefore deliberately forgiving:
//!
//! - A missing body is a no-op, not an error.
//! - Malformed text is a no-op (the channel is shared; foreign messages are
//!   normal, not reportable).
//! - An unknown `msgId` is a no-op (unknown future host events must never
//!   crash the bridge).
//!
//! Encoding, by contrast, is strict and canonical: outbound envelopes are
//! always the flat `{"msgId": ..., ...fields}` shape.  The `{"payload":{...}}`
//! wrapper is accepted on decode only, as a legacy compatibility case.
//!
//! [`decode_envelope`] implements the lenient drop-on-failure policy the
//! dispatcher wants; [`try_decode_envelope`] exposes the underlying typed
//! error for diagnostics and tests.

use serde_json::Value;
use thiserror::Error;
use tracing::trace;

use crate::protocol::messages::{GameToHostMsg, HostToGameMsg};

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors the envelope codec can produce.
///
/// On the decode side these exist for diagnostics only — the dispatcher never
/// reports them anywhere, it just drops the envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The body was textual but not valid JSON.
    #[error("envelope text is not valid JSON: {0}")]
    MalformedText(#[source] serde_json::Error),

    /// The body parsed as JSON but is not a known host message (missing or
    /// unknown `msgId`, wrong field types, non-object body).
    #[error("envelope is not a recognized host message: {0}")]
    Unrecognized(#[source] serde_json::Error),

    /// An outbound message failed to serialize.
    #[error("failed to encode outbound envelope: {0}")]
    Encode(#[source] serde_json::Error),
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Decodes an inbound message body, silently dropping anything that is not a
/// well-formed host message.
///
/// `body` is the raw `event.data` of the delivery: `None` when the delivery
/// had no body at all.  Returns `None` for every drop case listed in the
/// module docs; the drop reason is logged at `trace` level only.
pub fn decode_envelope(body: Option<&Value>) -> Option<HostToGameMsg> {
    let value = body?;
    match try_decode_envelope(value) {
        Ok(msg) => Some(msg),
        Err(err) => {
            trace!(%err, "dropping host envelope");
            None
        }
    }
}

/// Decodes an inbound message body, reporting the exact failure.
///
/// Accepts all three delivery forms:
///
/// 1. a live JSON object `{"msgId": ..., ...}`,
/// 2. a JSON string containing the encoded form of (1) — the double-encoded
///    text form some hosts produce,
/// 3. either of the above wrapped in a legacy `{"payload":{...}}` envelope.
///
/// # Errors
///
/// [`EnvelopeError::MalformedText`] when a textual body is not valid JSON;
/// [`EnvelopeError::Unrecognized`] when the parsed body is not one of the
/// enumerated host messages.
pub fn try_decode_envelope(body: &Value) -> Result<HostToGameMsg, EnvelopeError> {
    // Unwrap the double-encoded text form first: a string body must itself
    // parse as JSON before we can look at its fields.
    let mut value: Value = match body {
        Value::String(text) => serde_json::from_str(text).map_err(EnvelopeError::MalformedText)?,
        other => other.clone(),
    };

    // Legacy wrapper: `{"payload": {"msgId": ...}}`.  Only unwrap when the
    // outer object does not itself carry a msgId, so a hypothetical future
    // message with a `payload` field is not mangled.
    if value.get("msgId").is_none() {
        if let Some(inner) = value.get("payload").filter(|p| p.is_object()) {
            value = inner.clone();
        }
    }

    serde_json::from_value(value).map_err(EnvelopeError::Unrecognized)
}

// ── Encoding ──────────────────────────────────────────────────────────────────

/// Encodes an outbound message in the canonical flat envelope shape.
///
/// # Errors
///
/// Returns [`EnvelopeError::Encode`] if serialization fails.  With the
/// current message set this cannot happen in practice, but the emitter treats
/// a failed encode as a dropped post rather than a panic, in keeping with the
/// channel's fire-and-forget nature.
pub fn encode_envelope(msg: &GameToHostMsg) -> Result<String, EnvelopeError> {
    serde_json::to_string(msg).map_err(EnvelopeError::Encode)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_live_object_form() {
        // Arrange: the body arrives as an already-parsed object
        let body = json!({"msgId": "xc2rgBalanceUpdated2", "balance": 500});

        // Act
        let msg = decode_envelope(Some(&body));

        // Assert
        assert_eq!(msg, Some(HostToGameMsg::BalanceUpdated { balance: 500 }));
    }

    #[test]
    fn test_decode_double_encoded_text_form() {
        // Arrange: the same message, but JSON-encoded into a string body
        let body = Value::String(r#"{"msgId":"xc2rgBalanceUpdated2","balance":500}"#.to_string());

        // Act
        let msg = decode_envelope(Some(&body));

        // Assert: both forms must be accepted
        assert_eq!(msg, Some(HostToGameMsg::BalanceUpdated { balance: 500 }));
    }

    #[test]
    fn test_decode_legacy_payload_wrapper() {
        let body = json!({"payload": {"msgId": "xc2rgResumeGame"}});
        assert_eq!(
            decode_envelope(Some(&body)),
            Some(HostToGameMsg::ResumeGame)
        );
    }

    #[test]
    fn test_decode_legacy_payload_wrapper_inside_text_form() {
        let body = Value::String(r#"{"payload":{"msgId":"xc2rgResumeGame"}}"#.to_string());
        assert_eq!(
            decode_envelope(Some(&body)),
            Some(HostToGameMsg::ResumeGame)
        );
    }

    #[test]
    fn test_missing_body_is_a_noop() {
        assert_eq!(decode_envelope(None), None);
    }

    #[test]
    fn test_malformed_text_is_a_noop() {
        let body = Value::String("{not json at all".to_string());
        assert_eq!(decode_envelope(Some(&body)), None);
    }

    #[test]
    fn test_unknown_msg_id_is_a_noop() {
        let body = json!({"msgId": "xc2rgSomethingFromTheFuture", "foo": 1});
        assert_eq!(decode_envelope(Some(&body)), None);
    }

    #[test]
    fn test_foreign_message_without_msg_id_is_a_noop() {
        // The channel is shared; the host page posts unrelated messages on it.
        let body = json!({"source": "react-devtools-bridge", "hello": true});
        assert_eq!(decode_envelope(Some(&body)), None);
    }

    #[test]
    fn test_non_object_body_is_a_noop() {
        assert_eq!(decode_envelope(Some(&json!(42))), None);
        assert_eq!(decode_envelope(Some(&json!(null))), None);
        assert_eq!(decode_envelope(Some(&json!([1, 2, 3]))), None);
    }

    #[test]
    fn test_try_decode_reports_malformed_text() {
        let body = Value::String("{{{".to_string());
        let err = try_decode_envelope(&body).unwrap_err();
        assert!(matches!(err, EnvelopeError::MalformedText(_)));
    }

    #[test]
    fn test_try_decode_reports_unrecognized_message() {
        let body = json!({"msgId": "xc2rgNotAThing"});
        let err = try_decode_envelope(&body).unwrap_err();
        assert!(matches!(err, EnvelopeError::Unrecognized(_)));
    }

    #[test]
    fn test_encode_produces_canonical_flat_shape() {
        // Outbound envelopes are never wrapped in {"payload": ...}.
        let text = encode_envelope(&GameToHostMsg::GameWagerUpdated { value: 150 }).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({"msgId": "rg2xcGameWagerUpdated", "value": 150})
        );
        assert!(value.get("payload").is_none());
    }

    #[test]
    fn test_encoded_outbound_envelope_is_not_double_encoded() {
        // The canonical wire form is one JSON document, not a JSON string
        // containing JSON.
        let text = encode_envelope(&GameToHostMsg::PreloaderEnd).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert!(value.is_object());
    }
}
