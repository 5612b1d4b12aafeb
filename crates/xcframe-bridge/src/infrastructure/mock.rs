//! A recording controller for tests and demos.
//!
//! Implements the game-supplied capability by recording every invocation,
//! so tests can assert exactly which operations the bridge performed and in
//! which order.

use std::sync::{Mutex, PoisonError};

use xcframe_core::PauseCondition;

use crate::application::{decimal_to_minor_units, GameController};

/// One recorded capability invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerCall {
    /// Pause was requested, with the safe-point condition the bridge conveyed.
    PauseGame(Option<PauseCondition>),
    ResumeGame,
    StopAutospins,
    /// Money conversion was requested for this native amount.
    FormatMoney(String),
}

/// A [`GameController`] that records its calls.
///
/// Money formatting delegates to [`decimal_to_minor_units`] unless the
/// controller was built with [`RecordingController::declining_format`], in
/// which case every conversion is declined.
#[derive(Default)]
pub struct RecordingController {
    calls: Mutex<Vec<ControllerCall>>,
    decline_format: bool,
}

impl RecordingController {
    /// Creates a controller whose formatter accepts decimal amounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller whose formatter declines every amount.
    pub fn declining_format() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            decline_format: true,
        }
    }

    /// All recorded calls, in invocation order.
    pub fn calls(&self) -> Vec<ControllerCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: ControllerCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl GameController for RecordingController {
    fn pause_game(&self, condition: Option<PauseCondition>) {
        self.record(ControllerCall::PauseGame(condition));
    }

    fn resume_game(&self) {
        self.record(ControllerCall::ResumeGame);
    }

    fn stop_autospins(&self) {
        self.record(ControllerCall::StopAutospins);
    }

    fn format_money_to_number(&self, amount: &str) -> Option<u64> {
        self.record(ControllerCall::FormatMoney(amount.to_string()));
        if self.decline_format {
            None
        } else {
            decimal_to_minor_units(amount)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
