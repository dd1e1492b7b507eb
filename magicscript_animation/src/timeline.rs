// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear timelines.

/// Result of advancing an [`AnimationState`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tick {
    /// The animation is not running; nothing changed.
    Idle,
    /// The animation advanced and keeps running.
    Running {
        /// Current progress in `[0, 1]`.
        progress: f64,
    },
    /// The animation reached its end during this tick and stopped.
    Finished {
        /// Final progress in `[0, 1]`.
        progress: f64,
    },
}

/// A linear timeline advanced by the host's frame tick.
///
/// Progress runs from 0 to 1 over `duration` seconds. With autoreverse the timeline then runs
/// back to 0 over another `duration`. A repeating timeline wraps instead of finishing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationState {
    duration: f64,
    elapsed: f64,
    autoreverse: bool,
    repeating: bool,
    running: bool,
}

impl AnimationState {
    /// A stopped, non-repeating timeline lasting `duration` seconds.
    ///
    /// Non-positive durations finish on the first tick.
    pub const fn new(duration: f64) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            autoreverse: false,
            repeating: false,
            running: false,
        }
    }

    /// Run back to the start after reaching the end.
    pub const fn autoreversing(mut self) -> Self {
        self.autoreverse = true;
        self
    }

    /// Wrap around instead of finishing.
    pub const fn repeating(mut self) -> Self {
        self.repeating = true;
        self
    }

    /// Length of one pass in seconds.
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether the timeline is currently advancing.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Restart from the beginning.
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Stop where it is. Progress keeps its last value.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Current progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return if self.running { 0.0 } else { self.end_progress() };
        }
        let t = self.elapsed / self.duration;
        if self.autoreverse && t > 1.0 {
            (2.0 - t).max(0.0)
        } else {
            t.min(1.0)
        }
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        let total = self.total_duration();
        self.elapsed += dt.max(0.0);
        if self.elapsed < total {
            return Tick::Running {
                progress: self.progress(),
            };
        }
        if self.repeating && total > 0.0 {
            while self.elapsed >= total {
                self.elapsed -= total;
            }
            return Tick::Running {
                progress: self.progress(),
            };
        }
        self.elapsed = total;
        self.running = false;
        Tick::Finished {
            progress: self.end_progress(),
        }
    }

    fn total_duration(&self) -> f64 {
        if self.autoreverse {
            self.duration * 2.0
        } else {
            self.duration
        }
    }

    fn end_progress(&self) -> f64 {
        if self.autoreverse { 0.0 } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let mut a = AnimationState::new(1.0);
        assert_eq!(a.advance(0.5), Tick::Idle);
        assert_eq!(a.progress(), 0.0);
    }

    #[test]
    fn one_shot_finishes_once() {
        let mut a = AnimationState::new(1.0);
        a.start();
        assert_eq!(a.advance(0.25), Tick::Running { progress: 0.25 });
        assert_eq!(a.advance(1.0), Tick::Finished { progress: 1.0 });
        assert_eq!(a.advance(1.0), Tick::Idle);
        assert_eq!(a.progress(), 1.0);
    }

    #[test]
    fn autoreverse_returns_to_start() {
        let mut a = AnimationState::new(0.5).autoreversing();
        a.start();
        assert_eq!(a.advance(0.25), Tick::Running { progress: 0.5 });
        assert_eq!(a.advance(0.5), Tick::Running { progress: 0.5 });
        assert_eq!(a.advance(0.5), Tick::Finished { progress: 0.0 });
    }

    #[test]
    fn repeating_wraps() {
        let mut a = AnimationState::new(1.0).repeating();
        a.start();
        assert_eq!(a.advance(2.25), Tick::Running { progress: 0.25 });
        assert!(a.is_running());
        a.stop();
        assert_eq!(a.advance(1.0), Tick::Idle);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut a = AnimationState::new(0.0);
        a.start();
        assert_eq!(a.advance(0.0), Tick::Finished { progress: 1.0 });
    }

    #[test]
    fn negative_dt_does_not_rewind() {
        let mut a = AnimationState::new(1.0);
        a.start();
        let _ = a.advance(0.5);
        assert_eq!(a.advance(-0.25), Tick::Running { progress: 0.5 });
    }
}
