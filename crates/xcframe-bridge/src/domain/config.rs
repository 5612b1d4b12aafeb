//! Bridge configuration types.
//!
//! [`BridgeConfig`] is the single source of truth for all runtime settings.
//! It can be constructed from CLI arguments (the harness binary does this) or
//! from defaults (useful for embedding and tests).
//!
//! # Design rationale
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! variable reads inside the domain) makes the bridge easy to embed.  The
//! game identifier is injected explicitly at construction time rather than
//! read from an ambient page global.

use std::time::Duration;

/// All runtime configuration for the bridge.
///
/// Build this struct once at startup and hand it to
/// [`crate::application::Bridge::new`].
///
/// # Example
///
/// ```rust
/// use xcframe_bridge::domain::BridgeConfig;
///
/// let cfg = BridgeConfig::default();
/// assert_eq!(cfg.preload_progress, 0.15);
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// The game's static identifier, supplied by the hosting page.
    ///
    /// Seeds the session's `game_id`; the game-loaded lifecycle event may
    /// later reassign it (a reload under a different identifier).
    pub game_id: String,

    /// The single progress tick reported during the preload sequence
    /// (0.0–1.0).
    ///
    /// The bridge has no real asset loader to observe, so the launch handler
    /// reports one fixed tick between preloader-start and preloader-end.
    pub preload_progress: f64,

    /// Localized text accompanying the progress tick.
    pub preload_text: String,

    /// Maximum time to wait for the launch-URL resolution collaborator
    /// before treating the launch fetch as failed and reporting an error to
    /// the host.
    pub launch_timeout: Duration,
}

impl Default for BridgeConfig {
    /// Returns a `BridgeConfig` suitable for local development without any
    /// external configuration.
    ///
    /// | Field            | Default               |
    /// |------------------|-----------------------|
    /// | game_id          | `demo-game`           |
    /// | preload_progress | `0.15`                |
    /// | preload_text     | `loading assets...`   |
    /// | launch_timeout   | 10 seconds            |
    fn default() -> Self {
        Self {
            game_id: "demo-game".to_string(),
            preload_progress: 0.15,
            preload_text: "loading assets...".to_string(),
            launch_timeout: Duration::from_secs(10),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_game_id() {
        // Arrange / Act
        let cfg = BridgeConfig::default();
        // Assert
        assert_eq!(cfg.game_id, "demo-game");
    }

    #[test]
    fn test_default_preload_tick_matches_the_host_contract() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.preload_progress, 0.15);
        assert_eq!(cfg.preload_text, "loading assets...");
    }

    #[test]
    fn test_default_launch_timeout_is_10s() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.launch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_config_can_be_cloned() {
        // Cloneability is required so the harness can keep a copy after
        // handing the config to the bridge.
        let cfg = BridgeConfig::default();
        let cloned = cfg.clone();
        assert_eq!(cfg.game_id, cloned.game_id);
        assert_eq!(cfg.preload_progress, cloned.preload_progress);
    }
}
