// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::TAU;

use kurbo::Size;
use magicscript_animation::{AnimationState, Tick};
use magicscript_math::clamp;
use magicscript_props::Props;
use magicscript_scene::{
    Component, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase, NodeConfig,
};

use crate::util::replace;

/// A loading indicator (`UiSpinner`).
///
/// A determinate spinner draws an arc for `value`. An indeterminate one spins a full turn
/// clockwise every configured period.
#[derive(Debug)]
pub struct Spinner {
    base: NodeBase,
    height: f64,
    size: Size,
    value: f64,
    determinate: bool,
    spin: AnimationState,
    angle: f64,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    /// Diameter while neither `size` nor `height` is set.
    pub const DEFAULT_SIZE: f64 = 0.07;

    /// An indeterminate spinner using the default period.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// An indeterminate spinner turning once per `config.spinner_period`.
    pub fn with_config(config: &NodeConfig) -> Self {
        let mut spin = AnimationState::new(config.spinner_period).repeating();
        spin.start();
        let mut node = Self {
            base: NodeBase::default(),
            height: 0.0,
            size: Size::ZERO,
            value: 0.0,
            determinate: false,
            spin,
            angle: 0.0,
        };
        node.setup_node();
        node
    }

    /// A spinner built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Requested height; used when no explicit size is set.
    pub fn set_height(&mut self, height: f64) {
        if replace(&mut self.height, height.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// Request an explicit size. Both dimensions must be positive to take effect.
    pub fn set_size(&mut self, size: Size) {
        if replace(&mut self.size, size) {
            self.set_needs_layout();
        }
    }

    /// Filled fraction, in `[0, 1]`.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Change the filled fraction.
    pub fn set_value(&mut self, value: f64) {
        if replace(&mut self.value, clamp(value, 0.0, 1.0)) {
            self.set_needs_layout();
        }
    }

    /// Whether the spinner shows `value` instead of spinning.
    pub fn is_determinate(&self) -> bool {
        self.determinate
    }

    /// Switch between showing a value and spinning. Spinning restarts from the top.
    pub fn set_determinate(&mut self, determinate: bool) {
        if !replace(&mut self.determinate, determinate) {
            return;
        }
        if determinate {
            self.spin.stop();
        } else {
            self.spin.start();
        }
        self.angle = 0.0;
        self.set_needs_layout();
    }

    /// Current rotation about the Z axis, in radians. Negative turns clockwise.
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl Measurable for Spinner {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        if self.size.width > 0.0 && self.size.height > 0.0 {
            self.size
        } else if self.height > 0.0 {
            Size::new(self.height, self.height)
        } else {
            Size::new(Self::DEFAULT_SIZE, Self::DEFAULT_SIZE)
        }
    }
}

impl Layoutable for Spinner {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
}

impl HitTestable for Spinner {}

impl Component for Spinner {
    fn kind(&self) -> &'static str {
        "UiSpinner"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(height) = props.number("height") {
            self.set_height(height);
        }
        if let Some(size) = props.size("size") {
            self.set_size(size);
        }
        if let Some(value) = props.number("value") {
            self.set_value(value);
        }
        if let Some(determinate) = props.bool("determinate") {
            self.set_determinate(determinate);
        }
    }

    fn tick(&mut self, dt: f64) {
        if let Tick::Running { progress } | Tick::Finished { progress } = self.spin.advance(dt) {
            self.angle = -TAU * progress;
        }
    }
}
