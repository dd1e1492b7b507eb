// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Confirm-by-long-press progress.

/// Value at or above which a forward run counts as complete.
const COMPLETE_AT: f64 = 0.99999;
/// Value at or below which a backward run counts as canceled.
const CANCEL_AT: f64 = 0.00001;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Terminal outcome reported by [`ConfirmationProgress::advance`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// The forward run reached the end.
    Completed,
    /// The backward run returned to the start without a completion.
    Canceled,
}

/// What changed during one [`ConfirmationProgress::advance`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ConfirmationStep {
    /// New value, when it changed.
    pub value: Option<f64>,
    /// Outcome reached during this step, if any.
    pub outcome: Option<ConfirmationOutcome>,
}

/// Progress that fills while a long press is held and drains after release.
///
/// - [`press`](Self::press) starts a forward run; the value grows by `dt / duration`.
/// - Reaching `0.99999` snaps to `1.0`, stops, and reports [`ConfirmationOutcome::Completed`] once
///   per press.
/// - [`release`](Self::release) starts a backward run unless the press already completed.
/// - Reaching `0.00001` on the way back snaps to `0.0`, stops, and reports
///   [`ConfirmationOutcome::Canceled`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConfirmationProgress {
    duration: f64,
    value: f64,
    direction: Option<Direction>,
    completed: bool,
}

impl ConfirmationProgress {
    /// Progress that takes `duration` seconds to fill from empty.
    pub const fn new(duration: f64) -> Self {
        Self {
            duration,
            value: 0.0,
            direction: None,
            completed: false,
        }
    }

    /// Current value in `[0, 1]`.
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Seconds needed to fill from empty.
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether a forward or backward run is active.
    pub const fn is_running(&self) -> bool {
        self.direction.is_some()
    }

    /// Whether the current press completed.
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Begin (or resume) filling. A new press can complete again.
    pub fn press(&mut self) {
        if self.completed {
            self.value = 0.0;
        }
        self.completed = false;
        self.direction = Some(Direction::Forward);
    }

    /// Begin draining. Ignored once the press completed.
    pub fn release(&mut self) {
        if !self.completed {
            self.direction = Some(Direction::Backward);
        }
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> ConfirmationStep {
        let Some(direction) = self.direction else {
            return ConfirmationStep::default();
        };
        let delta = if self.duration > 0.0 {
            dt.max(0.0) / self.duration
        } else {
            1.0
        };
        let previous = self.value;
        let mut step = ConfirmationStep::default();
        match direction {
            Direction::Forward => {
                self.value = (self.value + delta).min(1.0);
                if self.value >= COMPLETE_AT {
                    self.value = 1.0;
                    self.direction = None;
                    self.completed = true;
                    step.outcome = Some(ConfirmationOutcome::Completed);
                }
            }
            Direction::Backward => {
                self.value = (self.value - delta).max(0.0);
                if self.value <= CANCEL_AT {
                    self.value = 0.0;
                    self.direction = None;
                    step.outcome = Some(ConfirmationOutcome::Canceled);
                }
            }
        }
        if self.value != previous {
            step.value = Some(self.value);
        }
        step
    }
}
