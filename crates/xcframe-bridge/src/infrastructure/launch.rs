//! Launch-endpoint collaborator.
//!
//! Some host integrations deliver the real game URL indirectly: the launch
//! parameters carry an endpoint reference, and the embedding must ask that
//! endpoint for the URL before the game can load.  This is the bridge's one
//! request/response interaction (everything else is fire-and-forget), so it
//! lives behind its own trait with an explicit timeout and an explicit
//! failure path into [`Bridge::report_error`](crate::application::Bridge::report_error).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use xcframe_core::LaunchParameters;

use crate::application::{lock_bridge, Bridge};

/// Error identifier reported to the host when URL resolution fails.
pub const LAUNCH_RESOLUTION_FAILED: &str = "LAUNCH_RESOLUTION_FAILED";

// ── Errors ────────────────────────────────────────────────────────────────────

/// Why a launch URL could not be resolved.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The endpoint answered with a failure or unusable response.
    #[error("launch endpoint failed: {0}")]
    Endpoint(String),

    /// The endpoint did not answer within the configured timeout.
    #[error("launch endpoint did not answer within {0:?}")]
    TimedOut(Duration),

    /// The endpoint answered but the response carried no URL.
    #[error("launch endpoint response carried no game URL")]
    MissingUrl,
}

// ── Resolver ──────────────────────────────────────────────────────────────────

/// Resolves the real game URL from the launch parameters.
///
/// Used generically, never as a trait object; the embedding picks one
/// concrete resolver at composition time.
#[allow(async_fn_in_trait)]
pub trait LaunchUrlResolver {
    /// Asks the launch endpoint for the game URL.
    async fn resolve(&self, params: &LaunchParameters) -> Result<String, LaunchError>;
}

/// Resolves with a deadline: an endpoint that hangs becomes
/// [`LaunchError::TimedOut`] instead of stalling the launch forever.
pub async fn resolve_with_timeout<R: LaunchUrlResolver>(
    resolver: &R,
    params: &LaunchParameters,
    timeout: Duration,
) -> Result<String, LaunchError> {
    match tokio::time::timeout(timeout, resolver.resolve(params)).await {
        Ok(result) => result,
        Err(_) => Err(LaunchError::TimedOut(timeout)),
    }
}

/// Resolves the launch URL, reporting failure to the host through `bridge`.
///
/// On success the URL is returned for the embedding to load.  On failure the
/// bridge emits an error with identifier [`LAUNCH_RESOLUTION_FAILED`] and
/// `None` is returned; there is no fallback URL, the host decides what the
/// player sees next.
pub async fn resolve_or_report<R: LaunchUrlResolver>(
    resolver: &R,
    params: &LaunchParameters,
    timeout: Duration,
    bridge: &Arc<Mutex<Bridge>>,
) -> Option<String> {
    match resolve_with_timeout(resolver, params, timeout).await {
        Ok(url) => {
            info!(%url, "launch URL resolved");
            Some(url)
        }
        Err(err) => {
            warn!(%err, "launch URL resolution failed");
            lock_bridge(bridge).report_error(LAUNCH_RESOLUTION_FAILED, Some(&err.to_string()));
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
