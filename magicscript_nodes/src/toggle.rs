// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};
use magicscript_math::Alignment;
use magicscript_props::{Props, token_enum};
use magicscript_scene::{
    Component, FocusResponse, Focusable, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase,
    NodeConfig, NodeEvent,
};

use crate::label::{LabelNode, TextAlignment};
use crate::util::replace;

token_enum! {
    /// Look of a toggle.
    pub enum ToggleType: "toggle type" {
        /// A sliding switch, with the label on its left.
        Default => "default",
        /// A check box, with the label on its right.
        Checkbox => "checkbox",
        /// A radio button, with the label on its right.
        Radio => "radio",
    }
}

impl ToggleType {
    /// Size of the control at its default height.
    pub fn default_size(self) -> Size {
        match self {
            Self::Default => Size::new(0.07337, 0.03359),
            Self::Checkbox | Self::Radio => Size::new(0.03359, 0.03359),
        }
    }
}

/// An on/off switch with an optional label (`UiToggle`).
///
/// The node origin is the center of the control; the label sits beside it, so the bounds are
/// not centered on the origin.
#[derive(Debug)]
pub struct Toggle {
    base: NodeBase,
    label: LabelNode,
    height: f64,
    on: bool,
    toggle_type: ToggleType,
    label_center: Point,
}

impl Default for Toggle {
    fn default() -> Self {
        Self::new()
    }
}

impl Toggle {
    /// An unlabeled switch that is off.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// An unlabeled switch. Toggles take nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let mut label = LabelNode::new();
        label.set_text_alignment(TextAlignment::Left);
        let mut node = Self {
            base: NodeBase::locked(Alignment::CenterCenter),
            label,
            height: 0.0,
            on: false,
            toggle_type: ToggleType::Default,
            label_center: Point::ORIGIN,
        };
        node.setup_node();
        node
    }

    /// A toggle built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Whether the toggle is on.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Switch on or off. Only the control's image changes.
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    /// Look of the control.
    pub fn toggle_type(&self) -> ToggleType {
        self.toggle_type
    }

    /// Change the look of the control.
    pub fn set_toggle_type(&mut self, toggle_type: ToggleType) {
        if replace(&mut self.toggle_type, toggle_type) {
            self.set_needs_layout();
        }
    }

    /// Requested control height; 0 uses the default.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Request a control height.
    pub fn set_height(&mut self, height: f64) {
        if replace(&mut self.height, height.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// The label beside the control.
    pub fn label(&self) -> &LabelNode {
        &self.label
    }

    /// Size of the control itself, keeping its aspect ratio at any height.
    pub fn toggle_size(&self) -> Size {
        let default = self.toggle_type.default_size();
        if self.height > 0.0 {
            Size::new(default.width / default.height * self.height, self.height)
        } else {
            default
        }
    }

    /// Center of the label from the last layout pass.
    pub fn label_center(&self) -> Point {
        self.label_center
    }

    /// Flip the toggle and report it.
    pub fn toggle(&mut self) {
        self.on = !self.on;
        self.base.emit(NodeEvent::ToggleChanged(self.on));
    }
}

impl Measurable for Toggle {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        let label = self.label.size();
        let toggle = self.toggle_size();
        let gap = if label.width > 0.0 && label.height > 0.0 {
            0.5 * toggle.width
        } else {
            0.0
        };
        Size::new(
            toggle.width + label.width + gap,
            toggle.height.max(label.height),
        )
    }
}

impl Layoutable for Toggle {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_layout(&mut self, _cx: &LayoutCx<'_>) {
        let size = self.get_size(false);
        let distance = size.width - 0.5 * (self.label.size().width + self.toggle_size().width);
        let x = match self.toggle_type {
            ToggleType::Default => -distance,
            ToggleType::Checkbox | ToggleType::Radio => distance,
        };
        self.label_center = Point::new(x, 0.0);
    }

    /// Bounds start at the far edge of the label for switches, and at the control's left edge
    /// for check boxes and radio buttons.
    fn get_bounds(&self, parent_space: bool, scaled: bool) -> Rect {
        let size = self.get_size(scaled);
        let toggle = self.toggle_size();
        let x = match self.toggle_type {
            ToggleType::Default => -size.width + 0.5 * toggle.width,
            ToggleType::Checkbox | ToggleType::Radio => -0.5 * toggle.width,
        };
        let mut origin = Point::new(x, -0.5 * size.height);
        if parent_space {
            let position = self.base.local_position();
            origin += Vec2::new(position.x, position.y);
        }
        Rect::from_origin_size(origin, size)
    }
}

impl HitTestable for Toggle {}

impl Focusable for Toggle {
    fn can_have_focus(&self) -> bool {
        self.base.is_enabled()
    }

    /// Focus acts as a click: the toggle gains focus, flips, and leaves again.
    fn enter_focus(&mut self) -> FocusResponse {
        if self.base.focus_mut().enter() {
            self.base.emit(NodeEvent::FocusGained);
        }
        self.on = !self.on;
        self.leave_focus();
        self.base.emit(NodeEvent::ToggleChanged(self.on));
        FocusResponse::Released
    }
}

impl Component for Toggle {
    fn kind(&self) -> &'static str {
        "UiToggle"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(text) = props.string("text")
            && self.label.set_text(text)
        {
            self.set_needs_layout();
        }
        if let Some(color) = props.color("textColor") {
            self.label.set_text_color(color);
        }
        if let Some(size) = props.number("textSize")
            && self.label.set_text_size(size)
        {
            self.set_needs_layout();
        }
        if let Some(height) = props.number("height") {
            self.set_height(height);
        }
        if let Some(on) = props.bool("on") {
            self.set_on(on);
        }
        if let Some(toggle_type) = props.token("type") {
            self.set_toggle_type(toggle_type);
        }
    }

    fn activate(&mut self) {
        self.toggle();
        self.base.emit(NodeEvent::Activated);
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        Some(self)
    }

    fn as_focusable_mut(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{props, settle};
    use serde_json::json;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn defaults() {
        let mut toggle = Toggle::new();
        settle(&mut toggle);
        assert!(!toggle.is_on());
        assert_eq!(toggle.toggle_type(), ToggleType::Default);
        assert_eq!(toggle.get_size(false), Size::new(0.07337, 0.03359));
        assert_eq!(toggle.base().alignment(), Alignment::CenterCenter);
    }

    #[test]
    fn height_keeps_aspect_ratio() {
        let toggle = Toggle::with_props(&props(json!({ "height": 0.06718 })));
        assert!(close(toggle.toggle_size().width, 0.14674));
        let check = Toggle::with_props(&props(json!({ "height": 0.05, "type": "checkbox" })));
        assert_eq!(check.toggle_size(), Size::new(0.05, 0.05));
    }

    #[test]
    fn label_adds_a_gap() {
        let mut toggle = Toggle::with_props(&props(json!({ "text": "Wi-Fi" })));
        settle(&mut toggle);
        let label = toggle.label().size();
        let size = toggle.get_size(false);
        assert!(close(size.width, 0.07337 * 1.5 + label.width));
        assert!(toggle.label_center().x < 0.0, "switch labels sit on the left");

        let bounds = toggle.get_bounds(false, false);
        assert!(close(bounds.x1, 0.5 * 0.07337), "bounds end at the control");
    }

    #[test]
    fn checkbox_label_sits_right() {
        let mut toggle = Toggle::with_props(&props(json!({ "text": "Remember", "type": "radio" })));
        settle(&mut toggle);
        assert!(toggle.label_center().x > 0.0);
        let bounds = toggle.get_bounds(false, false);
        assert!(close(bounds.x0, -0.5 * 0.03359));
    }

    #[test]
    fn appearance_keys_do_not_relayout() {
        let mut toggle = Toggle::with_props(&props(json!({ "text": "A" })));
        settle(&mut toggle);
        toggle.update(&props(json!({ "on": true, "textColor": [1, 1, 1] })));
        assert!(toggle.is_on());
        assert!(!toggle.is_layout_needed());
        toggle.update(&props(json!({ "type": "checkbox" })));
        assert!(toggle.is_layout_needed());
    }

    #[test]
    fn focus_flips_and_releases() {
        let mut toggle = Toggle::new();
        assert_eq!(toggle.enter_focus(), FocusResponse::Released);
        assert!(toggle.is_on());
        assert!(!toggle.has_focus());
        assert_eq!(
            toggle.base_mut().take_events(),
            vec![
                NodeEvent::FocusGained,
                NodeEvent::FocusLost,
                NodeEvent::ToggleChanged(true),
            ]
        );
    }
}
