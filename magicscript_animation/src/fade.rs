// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delayed opacity fades.

/// Opacity that eases toward a target, optionally after a delay.
///
/// Scroll bars in automatic mode call [`show`](Self::show) on every scroll and
/// [`hide_after`](Self::hide_after) to disappear once scrolling stops.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisibilityFade {
    opacity: f64,
    target: f64,
    fade_duration: f64,
    delay: Option<f64>,
}

impl VisibilityFade {
    /// A fully visible fade that takes `fade_duration` seconds to go between states.
    pub const fn new(fade_duration: f64) -> Self {
        Self {
            opacity: 1.0,
            target: 1.0,
            fade_duration,
            delay: None,
        }
    }

    /// Current opacity in `[0, 1]`.
    pub const fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Whether anything is still visible.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Whether a fade or a pending delay is in progress.
    pub fn is_animating(&self) -> bool {
        self.delay.is_some() || self.opacity != self.target
    }

    /// Become visible, cancelling any pending hide.
    pub fn show(&mut self, animated: bool) {
        self.delay = None;
        self.target = 1.0;
        if !animated {
            self.opacity = 1.0;
        }
    }

    /// Become hidden immediately or with a fade.
    pub fn hide(&mut self, animated: bool) {
        self.delay = None;
        self.target = 0.0;
        if !animated {
            self.opacity = 0.0;
        }
    }

    /// Start fading out once `delay` seconds have passed.
    pub fn hide_after(&mut self, delay: f64) {
        self.delay = Some(delay.max(0.0));
    }

    /// Advance by `dt` seconds. Returns the new opacity when it changed.
    pub fn advance(&mut self, dt: f64) -> Option<f64> {
        let mut dt = dt.max(0.0);
        if let Some(remaining) = self.delay {
            if dt < remaining {
                self.delay = Some(remaining - dt);
                return None;
            }
            dt -= remaining;
            self.delay = None;
            self.target = 0.0;
        }
        if self.opacity == self.target {
            return None;
        }
        let step = if self.fade_duration > 0.0 {
            dt / self.fade_duration
        } else {
            1.0
        };
        self.opacity = if self.target > self.opacity {
            (self.opacity + step).min(self.target)
        } else {
            (self.opacity - step).max(self.target)
        };
        Some(self.opacity)
    }
}
