//! The mutable session record the bridge maintains.
//!
//! [`SessionState`] is small and lives for the iframe's lifetime: it is
//! initialized at bridge construction, mutated field-by-field by specific
//! inbound handlers, and never explicitly destroyed.  Only the bridge's
//! handlers write to it; everything else reads.

use xcframe_core::LaunchParameters;

/// The game iframe's viewport dimensions, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Minimal per-session state.
///
/// # Field lifecycles
///
/// - `game_id` is seeded from configuration and reassigned whenever the game
///   reloads under a different identifier.
/// - `started` latches to `true` on the first readiness emission and never
///   resets within a session.
/// - `listening` becomes `true` at the game's start-loading lifecycle event;
///   inbound host messages are dropped until then.  It drops back to `false`
///   only when the host closes the game.
/// - `balance`, `sound_enabled`, and `viewport` track the latest values the
///   host pushed; `launch_params` is the bag captured verbatim at launch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Identifier of the currently loaded game.
    pub game_id: String,
    /// Whether the loader-ready handshake has fired at least once.
    pub started: bool,
    /// Whether the bridge is accepting inbound host messages.
    pub listening: bool,
    /// Player balance in minor currency units.
    pub balance: u64,
    /// Whether game sound is enabled.
    pub sound_enabled: bool,
    /// Current iframe dimensions.
    pub viewport: Viewport,
    /// Launch parameters captured from the launch envelope.
    pub launch_params: LaunchParameters,
}

impl SessionState {
    /// Creates the initial session record for `game_id` with all other fields
    /// at their defaults (`started=false`, zero balance, sound off, zero
    /// viewport).
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            ..Self::default()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_with_contract_defaults() {
        // Arrange / Act
        let session = SessionState::new("slots-7");

        // Assert: the defaults named by the session contract
        assert_eq!(session.game_id, "slots-7");
        assert!(!session.started);
        assert!(!session.listening);
        assert_eq!(session.balance, 0);
        assert!(!session.sound_enabled);
        assert_eq!(session.viewport, Viewport::default());
        assert!(session.launch_params.is_empty());
    }

    #[test]
    fn test_viewport_defaults_to_zero() {
        let viewport = Viewport::default();
        assert_eq!(viewport.width, 0);
        assert_eq!(viewport.height, 0);
    }
}
