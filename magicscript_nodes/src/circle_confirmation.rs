// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use magicscript_animation::{ConfirmationOutcome, ConfirmationProgress};
use magicscript_math::Alignment;
use magicscript_props::Props;
use magicscript_scene::{
    Component, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase, NodeConfig, NodeEvent,
};

use crate::util::{positive_or, replace};

/// A ring that fills while it is long pressed (`UiCircleConfirmation`).
///
/// Holding the press for the configured duration completes the confirmation. Releasing early
/// drains the ring, and an empty ring reports a cancellation.
#[derive(Debug)]
pub struct CircleConfirmation {
    base: NodeBase,
    height: f64,
    progress: ConfirmationProgress,
}

impl Default for CircleConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

impl CircleConfirmation {
    /// Diameter while `height` is 0.
    pub const DEFAULT_SIZE: f64 = 0.07;

    /// An empty ring with the default duration.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// An empty ring filling over `config.confirmation_duration` seconds.
    pub fn with_config(config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::locked(Alignment::CenterCenter),
            height: 0.0,
            progress: ConfirmationProgress::new(config.confirmation_duration),
        };
        node.setup_node();
        node
    }

    /// A ring built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Request a diameter; 0 uses the default.
    pub fn set_height(&mut self, height: f64) {
        if replace(&mut self.height, height.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// Filled fraction, in `[0, 1]`.
    pub fn value(&self) -> f64 {
        self.progress.value()
    }

    /// Whether the current press completed.
    pub fn is_completed(&self) -> bool {
        self.progress.is_completed()
    }
}

impl Measurable for CircleConfirmation {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        let diameter = positive_or(self.height, Self::DEFAULT_SIZE);
        Size::new(diameter, diameter)
    }
}

impl Layoutable for CircleConfirmation {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
}

impl HitTestable for CircleConfirmation {}

impl Component for CircleConfirmation {
    fn kind(&self) -> &'static str {
        "UiCircleConfirmation"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(height) = props.number("height") {
            self.set_height(height);
        }
    }

    fn tick(&mut self, dt: f64) {
        let step = self.progress.advance(dt);
        if let Some(value) = step.value {
            self.set_needs_layout();
            self.base.emit(NodeEvent::ConfirmationUpdated(value));
        }
        match step.outcome {
            Some(ConfirmationOutcome::Completed) => self.base.emit(NodeEvent::ConfirmationCompleted),
            Some(ConfirmationOutcome::Canceled) => self.base.emit(NodeEvent::ConfirmationCanceled),
            None => {}
        }
    }

    fn can_be_long_pressed(&self) -> bool {
        true
    }

    fn long_press_started(&mut self) {
        self.progress.press();
    }

    fn long_press_ended(&mut self) {
        self.progress.release();
    }
}
