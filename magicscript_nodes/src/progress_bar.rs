// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, RoundedRect, Size};
use magicscript_math::{Alignment, EPSILON, clamp};
use magicscript_props::{Color, Props};
use magicscript_scene::{
    Component, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase, NodeConfig,
};

use crate::util::{positive_or, replace};

/// A read-only progress bar (`UiProgressBar`).
///
/// Unlike [`Slider`](crate::Slider), the fill is part of the layout, so every value change
/// requests a layout pass.
#[derive(Debug)]
pub struct ProgressBar {
    base: NodeBase,
    width: f64,
    height: f64,
    min: f64,
    max: f64,
    value: f64,
    begin_color: Color,
    end_color: Color,
    track: RoundedRect,
    fill: RoundedRect,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBar {
    /// Width while `width` is 0.
    pub const DEFAULT_WIDTH: f64 = 0.5;
    /// Height while `height` is 0.
    pub const DEFAULT_HEIGHT: f64 = 0.004;

    /// An empty bar over `[0, 1]`.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// An empty bar. Progress bars take nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::locked(Alignment::CenterCenter),
            width: 0.0,
            height: 0.0,
            min: 0.0,
            max: 1.0,
            value: 0.0,
            begin_color: Color::WHITE,
            end_color: Color::WHITE,
            track: RoundedRect::from_rect(Rect::ZERO, 0.0),
            fill: RoundedRect::from_rect(Rect::ZERO, 0.0),
        };
        node.setup_node();
        node
    }

    /// A bar built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Request a width; 0 uses the default.
    pub fn set_width(&mut self, width: f64) {
        if replace(&mut self.width, width.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// Request a height; 0 uses the default.
    pub fn set_height(&mut self, height: f64) {
        if replace(&mut self.height, height.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// Lower end of the range.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Move the lower end. Ignored unless it stays below `max`.
    pub fn set_min(&mut self, min: f64) {
        if min < self.max && replace(&mut self.min, min) {
            self.value = clamp(self.value, self.min, self.max);
            self.set_needs_layout();
        }
    }

    /// Upper end of the range.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Move the upper end. Ignored unless it stays above `min`.
    pub fn set_max(&mut self, max: f64) {
        if self.min < max && replace(&mut self.max, max) {
            self.value = clamp(self.value, self.min, self.max);
            self.set_needs_layout();
        }
    }

    /// Current value in `[min, max]`.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Change the value, clamped to the range.
    pub fn set_value(&mut self, value: f64) {
        if replace(&mut self.value, clamp(value, self.min, self.max)) {
            self.set_needs_layout();
        }
    }

    /// Position of the value within the range, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let delta = self.max - self.min;
        if delta > EPSILON {
            (self.value - self.min) / delta
        } else {
            0.0
        }
    }

    /// Gradient end points of the fill.
    pub fn colors(&self) -> (Color, Color) {
        (self.begin_color, self.end_color)
    }

    /// The background bar from the last layout pass.
    pub fn track(&self) -> RoundedRect {
        self.track
    }

    /// The fill from the last layout pass. Never narrower than the bar is tall.
    pub fn fill(&self) -> RoundedRect {
        self.fill
    }
}

impl Measurable for ProgressBar {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        Size::new(
            positive_or(self.width, Self::DEFAULT_WIDTH),
            positive_or(self.height, Self::DEFAULT_HEIGHT),
        )
    }
}

impl Layoutable for ProgressBar {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_layout(&mut self, _cx: &LayoutCx<'_>) {
        let size = self.get_size(false);
        let radius = 0.5 * size.height;
        self.track = RoundedRect::from_rect(Rect::from_center_size(Point::ORIGIN, size), radius);
        let x0 = -0.5 * size.width;
        let width = (size.width * self.progress()).max(size.height);
        self.fill = RoundedRect::new(x0, -radius, x0 + width, radius, radius);
    }
}

impl HitTestable for ProgressBar {}

impl Component for ProgressBar {
    fn kind(&self) -> &'static str {
        "UiProgressBar"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(width) = props.number("width") {
            self.set_width(width);
        }
        if let Some(height) = props.number("height") {
            self.set_height(height);
        }
        if let Some(min) = props.number("min") {
            self.set_min(min);
        }
        if let Some(max) = props.number("max") {
            self.set_max(max);
        }
        if let Some(value) = props.number("value") {
            self.set_value(value);
        }
        if let Some(colors) = props.object("progressColor") {
            let mut changed = false;
            if let Some(begin) = colors.color("beginColor") {
                changed |= replace(&mut self.begin_color, begin);
            }
            if let Some(end) = colors.color("endColor") {
                changed |= replace(&mut self.end_color, end);
            }
            if changed {
                self.set_needs_layout();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Slider;
    use crate::util::testing::{props, settle};
    use serde_json::json;

    #[test]
    fn defaults() {
        let mut bar = ProgressBar::new();
        settle(&mut bar);
        assert_eq!(bar.get_size(false), Size::new(0.5, 0.004));
        assert_eq!((bar.min(), bar.max(), bar.value()), (0.0, 1.0, 0.0));
        assert_eq!(bar.fill().width(), 0.004, "empty fill keeps a round cap");
    }

    #[test]
    fn value_changes_relayout_unlike_slider() {
        let mut bar = ProgressBar::new();
        let mut slider = Slider::new();
        settle(&mut bar);
        settle(&mut slider);

        let update = props(json!({ "value": 1.75 }));
        bar.update(&update);
        slider.update(&update);
        assert_eq!(bar.value(), 1.0);
        assert_eq!(slider.value(), 1.0);
        assert!(bar.is_layout_needed());
        assert!(!slider.is_layout_needed());

        settle(&mut bar);
        assert_eq!(bar.fill().width(), 0.5);
        bar.update(&update);
        assert!(!bar.is_layout_needed(), "same clamped value is not a change");
    }

    #[test]
    fn partial_gradient_update() {
        let mut bar = ProgressBar::new();
        settle(&mut bar);
        bar.update(&props(json!({ "progressColor": { "endColor": [0, 0, 1, 1] } })));
        assert_eq!(bar.colors(), (Color::WHITE, Color::rgba(0.0, 0.0, 1.0, 1.0)));
        assert!(bar.is_layout_needed());
    }

    #[test]
    fn fill_follows_the_range() {
        // `min` is applied before `max`, so a range above the default needs two updates.
        let mut bar = ProgressBar::with_props(&props(json!({ "width": 1.0, "max": 20.0 })));
        bar.update(&props(json!({ "min": 10.0, "value": 15.0 })));
        settle(&mut bar);
        let fill = bar.fill();
        assert_eq!((fill.rect().x0, fill.rect().x1), (-0.5, 0.0));
    }
}
