// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::DVec3;
use kurbo::{Point, Rect, RoundedRect, Size};
use magicscript_math::{Alignment, EPSILON, Ray, clamp};
use magicscript_props::{Color, Props};
use magicscript_scene::{
    Component, Draggable, Focusable, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase,
    NodeConfig, NodeEvent,
};

use crate::button::Outline;
use crate::label::{LabelNode, TextAlignment};
use crate::util::{positive_or, replace};

/// A horizontal value slider (`UiSlider`).
///
/// The bar has a fixed size; the value only moves the foreground fill, so changing it never
/// requests layout. The fill is computed on demand by [`Slider::fill`].
#[derive(Debug)]
pub struct Slider {
    base: NodeBase,
    width: f64,
    height: f64,
    min: f64,
    max: f64,
    value: f64,
    min_label: LabelNode,
    max_label: LabelNode,
    foreground_color: Color,
    min_label_center: Option<Point>,
    max_label_center: Option<Point>,
}

impl Default for Slider {
    fn default() -> Self {
        Self::new()
    }
}

impl Slider {
    /// Width while `width` is 0.
    pub const DEFAULT_WIDTH: f64 = 0.5;
    /// Height while `height` is 0.
    pub const DEFAULT_HEIGHT: f64 = 0.018;
    /// How much the focus outline extends past the bar, in total per axis.
    pub const FOCUS_MARGIN: f64 = 0.075;

    /// A slider over `[0, 1]`.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// A slider. Sliders take nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let mut min_label = LabelNode::new();
        min_label.set_text_alignment(TextAlignment::Right);
        let mut node = Self {
            base: NodeBase::locked(Alignment::CenterCenter),
            width: 0.0,
            height: 0.0,
            min: 0.0,
            max: 1.0,
            value: 0.0,
            min_label,
            max_label: LabelNode::new(),
            foreground_color: Color::WHITE,
            min_label_center: None,
            max_label_center: None,
        };
        node.setup_node();
        node
    }

    /// A slider built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Requested width; 0 uses the default.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Request a width.
    pub fn set_width(&mut self, width: f64) {
        if replace(&mut self.width, width.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// Requested height; 0 uses the default.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Request a height.
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

    /// Change the value, clamped to the range. Only the fill moves, so layout is untouched.
    pub fn set_value(&mut self, value: f64) -> bool {
        replace(&mut self.value, clamp(value, self.min, self.max))
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

    /// Fill color.
    pub fn foreground_color(&self) -> Color {
        self.foreground_color
    }

    /// Label shown left of the bar.
    pub fn min_label(&self) -> &LabelNode {
        &self.min_label
    }

    /// Label shown right of the bar.
    pub fn max_label(&self) -> &LabelNode {
        &self.max_label
    }

    /// Centers of the min and max labels from the last layout pass.
    pub fn label_centers(&self) -> (Option<Point>, Option<Point>) {
        (self.min_label_center, self.max_label_center)
    }

    /// The bar, centered on the node.
    pub fn track(&self) -> RoundedRect {
        let size = self.get_size(false);
        RoundedRect::from_rect(
            Rect::from_center_size(Point::ORIGIN, size),
            0.5 * size.height,
        )
    }

    /// The foreground fill for the current value, growing from the left end.
    pub fn fill(&self) -> RoundedRect {
        let size = self.get_size(false);
        let x0 = -0.5 * size.width;
        RoundedRect::new(
            x0,
            -0.5 * size.height,
            x0 + size.width * self.progress(),
            0.5 * size.height,
            0.5 * size.height,
        )
    }

    /// Outline drawn while the slider has focus.
    pub fn focus_outline(&self) -> Option<Outline> {
        if !self.has_focus() {
            return None;
        }
        let size = self.get_size(false);
        let min = size.width.min(size.height);
        let thickness = 0.1 * min;
        (thickness > 0.0).then(|| Outline {
            shape: RoundedRect::from_rect(
                Rect::from_center_size(
                    Point::ORIGIN,
                    (size.width + Self::FOCUS_MARGIN, size.height + Self::FOCUS_MARGIN),
                ),
                0.85 * min,
            ),
            thickness,
        })
    }
}

impl Measurable for Slider {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        Size::new(
            positive_or(self.width, Self::DEFAULT_WIDTH),
            positive_or(self.height, Self::DEFAULT_HEIGHT),
        )
    }
}

impl Layoutable for Slider {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_layout(&mut self, _cx: &LayoutCx<'_>) {
        let half = 0.5 * self.get_size(false).width;
        let place = |label: &LabelNode, side: f64| {
            let size = label.size();
            (!size.is_zero_area()).then(|| {
                let gap = 0.5 * size.height;
                Point::new(side * (half + gap + 0.5 * size.width), 0.0)
            })
        };
        self.min_label_center = place(&self.min_label, -1.0);
        self.max_label_center = place(&self.max_label, 1.0);
    }
}

impl HitTestable for Slider {}

impl Focusable for Slider {
    fn can_have_focus(&self) -> bool {
        self.base.is_enabled()
    }
}

impl Draggable for Slider {
    fn drag_axis(&self) -> Ray {
        let width = self.get_size(false).width;
        Ray::new(DVec3::new(-0.5 * width, 0.0, 0.0), DVec3::X, width)
    }

    fn drag_range(&self) -> f64 {
        self.get_size(false).width
    }

    fn drag_value(&self) -> f64 {
        self.progress()
    }

    fn set_drag_value(&mut self, value: f64) {
        let value = self.min + clamp(value, 0.0, 1.0) * (self.max - self.min);
        if self.set_value(value) {
            self.base.emit(NodeEvent::SliderChanged(self.value));
        }
    }
}

impl Component for Slider {
    fn kind(&self) -> &'static str {
        "UiSlider"
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
        if let Some(text) = props.string("minLabel")
            && self.min_label.set_text(text)
        {
            self.set_needs_layout();
        }
        if let Some(text) = props.string("maxLabel")
            && self.max_label.set_text(text)
        {
            self.set_needs_layout();
        }
        if let Some(color) = props
            .color("foregroundColor")
            .or_else(|| props.color("progressColor"))
        {
            self.foreground_color = color;
        }
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        Some(self)
    }

    fn as_focusable_mut(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }

    fn as_draggable(&self) -> Option<&dyn Draggable> {
        Some(self)
    }

    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{props, settle};
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let mut slider = Slider::new();
        assert_eq!((slider.min(), slider.max(), slider.value()), (0.0, 1.0, 0.0));
        settle(&mut slider);
        assert_eq!(slider.get_size(false), Size::new(0.5, 0.018));
        assert_eq!(slider.base().alignment(), Alignment::CenterCenter);
    }

    #[test]
    fn value_clamps_without_layout() {
        let mut slider = Slider::new();
        settle(&mut slider);
        slider.update(&props(json!({ "value": 1.75 })));
        assert_eq!(slider.value(), 1.0);
        assert!(!slider.is_layout_needed(), "value changes only move the fill");
        assert_eq!(slider.fill().rect(), Rect::new(-0.25, -0.009, 0.25, 0.009));
    }

    #[test]
    fn min_and_max_keep_their_order() {
        let mut slider = Slider::new();
        slider.update(&props(json!({ "min": 2.0 })));
        assert_eq!(slider.min(), 0.0, "min must stay below max");
        slider.update(&props(json!({ "max": -1.0 })));
        assert_eq!(slider.max(), 1.0, "max must stay above min");
        slider.update(&props(json!({ "max": 10.0 })));
        slider.update(&props(json!({ "min": 2.0, "value": 5.0 })));
        assert_eq!((slider.min(), slider.max(), slider.value()), (2.0, 10.0, 5.0));
        assert!((slider.progress() - 0.375).abs() < 1e-12);
    }

    #[test]
    fn labels_sit_outside_the_bar() {
        let mut slider = Slider::with_props(&props(json!({ "minLabel": "0", "maxLabel": "100" })));
        settle(&mut slider);
        let (min, max) = slider.label_centers();
        assert!(min.unwrap().x < -0.25);
        assert!(max.unwrap().x > 0.25);
        assert!(!slider.get_bounds(false, false).contains(min.unwrap()));
    }

    #[test]
    fn focus_shows_outline() {
        let mut slider = Slider::new();
        settle(&mut slider);
        assert!(slider.focus_outline().is_none());
        slider.enter_focus();
        let outline = slider.focus_outline().unwrap();
        assert!((outline.shape.width() - 0.575).abs() < 1e-12);
        assert!((outline.thickness - 0.0018).abs() < 1e-12);
        slider.leave_focus();
        assert!(slider.focus_outline().is_none());
    }

    #[test]
    fn drag_maps_to_the_range() {
        let mut slider = Slider::with_props(&props(json!({ "min": -1.0, "max": 1.0 })));
        settle(&mut slider);
        assert_eq!(slider.value(), 0.0);
        assert_eq!(slider.drag_value(), 0.5);
        slider.set_drag_value(1.0);
        assert_eq!(slider.value(), 1.0);
        slider.set_drag_value(1.0);
        assert_eq!(
            slider.base_mut().take_events(),
            vec![NodeEvent::SliderChanged(1.0)],
            "unchanged values are not reported"
        );
    }

    proptest! {
        #[test]
        fn value_never_leaves_the_range(value in -10.0..10.0_f64) {
            let mut slider = Slider::new();
            settle(&mut slider);
            slider.set_value(value);
            prop_assert!((0.0..=1.0).contains(&slider.value()));
            prop_assert!(!slider.is_layout_needed());
        }
    }
}
