//! The game-supplied controller capability.
//!
//! The hosted game exposes a small set of operations the bridge may invoke
//! on it: pause, resume, stop autoplay, and money formatting.  The game
//! supplies the capability at its start-loading lifecycle event; the
//! capability is an explicit trait so the bridge depends only on the
//! abstraction, never on a concrete game.
//!
//! # Ownership
//!
//! The game supplies the capability and may re-supply it on reload; the
//! bridge holds a reference to the LATEST supplied instance and does not own
//! its lifecycle.  All methods take `&self` — if the game needs internal
//! mutability it manages it itself (the bridge invokes from a single thread,
//! one handler at a time).

use xcframe_core::PauseCondition;

/// Operations the hosted game exposes to the bridge.
pub trait GameController: Send + Sync {
    /// Pauses game play.
    ///
    /// `condition` names the safe point the game must reach before
    /// physically pausing (end of hand, end of animation); `None` means
    /// pause at the next opportunity.
    fn pause_game(&self, condition: Option<PauseCondition>);

    /// Resumes game play after a pause.
    fn resume_game(&self);

    /// Stops a running autoplay sequence, if any.
    fn stop_autospins(&self);

    /// Converts the game's native money representation (e.g. `"1.50"`) into
    /// an integer amount of minor currency units.
    ///
    /// Returns `None` when the input is not a representable amount; the
    /// bridge then skips the dependent emission rather than sending garbage
    /// to the host.
    fn format_money_to_number(&self, amount: &str) -> Option<u64>;
}

/// Reference conversion from a decimal major-unit string to minor units.
///
/// In-repo controller implementations (the harness controller, the recording
/// test controller) format money this way: the native representation is a
/// non-negative decimal number of major units, so `"1.50"` becomes `150`
/// cents and `"2"` becomes `200`.  Rejects negative, non-finite, and
/// non-numeric input.
pub fn decimal_to_minor_units(amount: &str) -> Option<u64> {
    let value: f64 = amount.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let minor = (value * 100.0).round();
    // Beyond this, f64 can no longer represent every cent exactly.
    if minor > u64::MAX as f64 {
        return None;
    }
    Some(minor as u64)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_amounts_convert_to_cents() {
        assert_eq!(decimal_to_minor_units("1.50"), Some(150));
        assert_eq!(decimal_to_minor_units("0.01"), Some(1));
        assert_eq!(decimal_to_minor_units("2"), Some(200));
        assert_eq!(decimal_to_minor_units("0"), Some(0));
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        assert_eq!(decimal_to_minor_units("  3.25 "), Some(325));
    }

    #[test]
    fn test_fractional_cents_round_to_the_nearest_cent() {
        assert_eq!(decimal_to_minor_units("0.015"), Some(2));
        assert_eq!(decimal_to_minor_units("0.014"), Some(1));
    }

    #[test]
    fn test_invalid_amounts_are_declined() {
        assert_eq!(decimal_to_minor_units("-1.00"), None);
        assert_eq!(decimal_to_minor_units("NaN"), None);
        assert_eq!(decimal_to_minor_units("inf"), None);
        assert_eq!(decimal_to_minor_units("ten"), None);
        assert_eq!(decimal_to_minor_units(""), None);
    }
}
