// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Push buttons.
//!
//! A button measures its label (and icon, depending on its [`ButtonType`]), draws an outline
//! whose corner radius follows `roundness`, and answers taps with a short press animation:
//! the content moves back along -Z and returns. The outline is hidden while the press runs.

use glam::DVec3;
use kurbo::{Point, Rect, RoundedRect, Size};
use magicscript_animation::{AnimationState, Tick};
use magicscript_math::{Alignment, clamp};
use magicscript_props::{Color, Props, token_enum};
use magicscript_scene::{
    Component, FocusResponse, Focusable, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase,
    NodeConfig, NodeEvent, NodeId,
};

use crate::label::{LabelNode, TextAlignment};
use crate::util::{positive_or, replace};

token_enum! {
    /// Arrangement of label and icon.
    pub enum ButtonType: "button type" {
        /// Label inside an outline sized from the label height.
        Simple => "simple",
        /// Label inside an outline with padding proportional to the label height.
        Text => "text",
        /// Icon only, no outline.
        Icon => "icon",
        /// Icon with the label beside it, no outline.
        IconWithLabel => "icon-with-label",
        /// Icon left of the label inside an outline.
        TextWithIcon => "text-with-icon",
    }
}

token_enum! {
    /// Side of the icon the label sits on for [`ButtonType::IconWithLabel`].
    pub enum LabelSide: "label side" {
        /// Below the icon.
        Bottom => "bottom",
        /// Above the icon.
        Top => "top",
        /// Left of the icon.
        Left => "left",
        /// Right of the icon.
        Right => "right",
    }
}

impl ButtonType {
    /// Whether the type draws an outline.
    pub fn has_outline(self) -> bool {
        matches!(self, Self::Simple | Self::Text | Self::TextWithIcon)
    }

    fn shows_icon(self) -> bool {
        matches!(self, Self::Icon | Self::IconWithLabel | Self::TextWithIcon)
    }

    fn shows_label(self) -> bool {
        !matches!(self, Self::Icon)
    }
}

/// Rounded outline stroked around a button, or around a focused slider or text edit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Outline {
    /// Outline shape, centered on the node.
    pub shape: RoundedRect,
    /// Stroke thickness.
    pub thickness: f64,
}

/// A push button (`UiButton`).
#[derive(Debug)]
pub struct Button {
    base: NodeBase,
    label: LabelNode,
    text_size: f64,
    width: f64,
    height: f64,
    roundness: f64,
    icon: Option<String>,
    icon_size: Size,
    icon_color: Color,
    button_type: ButtonType,
    label_side: LabelSide,
    press: AnimationState,
    tap_depth: f64,
    press_offset: f64,
    outline: Option<Outline>,
    label_center: Option<Point>,
    icon_frame: Option<Rect>,
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl Button {
    /// Label text size while neither `textSize` nor `height` is set.
    pub const DEFAULT_TEXT_SIZE: f64 = 0.0167;
    /// Outline size relative to the label height for [`ButtonType::Simple`].
    pub const HEIGHT_FACTOR: f64 = 2.3;
    /// Horizontal padding relative to the label height for padded types.
    pub const PADDING_HORIZONTAL: f64 = 1.55;
    /// Vertical padding relative to the label height for padded types.
    pub const PADDING_VERTICAL: f64 = 1.15;
    /// Icon size until `iconSize` is set.
    pub const DEFAULT_ICON_SIZE: Size = Size::new(0.04, 0.04);

    /// A button with default settings.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// A button whose press animation follows `config`.
    pub fn with_config(config: &NodeConfig) -> Self {
        let mut label = LabelNode::new();
        label.set_default_text_size(Self::DEFAULT_TEXT_SIZE);
        label.set_text_alignment(TextAlignment::Center);
        let mut node = Self {
            base: NodeBase::locked(Alignment::CenterCenter),
            label,
            text_size: 0.0,
            width: 0.0,
            height: 0.0,
            roundness: 1.0,
            icon: None,
            icon_size: Self::DEFAULT_ICON_SIZE,
            icon_color: Color::WHITE,
            button_type: ButtonType::Simple,
            label_side: LabelSide::Bottom,
            press: AnimationState::new(config.tap_duration).autoreversing(),
            tap_depth: config.tap_depth,
            press_offset: 0.0,
            outline: None,
            label_center: None,
            icon_frame: None,
        };
        node.setup_node();
        node
    }

    /// A button built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    // --- properties ---

    /// The label.
    pub fn label(&self) -> &LabelNode {
        &self.label
    }

    /// Replace the label text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.label.set_text(text) {
            self.set_needs_layout();
        }
    }

    /// Requested text size; 0 derives it from the height.
    pub fn text_size(&self) -> f64 {
        self.text_size
    }

    /// Request a text size.
    pub fn set_text_size(&mut self, size: f64) {
        if replace(&mut self.text_size, size.max(0.0)) {
            self.sync_label_size();
            self.set_needs_layout();
        }
    }

    /// Requested width; 0 measures from content.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Request a width.
    pub fn set_width(&mut self, width: f64) {
        if replace(&mut self.width, width.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// Requested height; 0 measures from content.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Request a height. Without an explicit text size the label scales with it.
    pub fn set_height(&mut self, height: f64) {
        if replace(&mut self.height, height.max(0.0)) {
            self.sync_label_size();
            self.set_needs_layout();
        }
    }

    /// Corner roundness in `[0, 1]`.
    pub fn roundness(&self) -> f64 {
        self.roundness
    }

    /// Change the roundness, clamped to `[0, 1]`.
    pub fn set_roundness(&mut self, roundness: f64) {
        if replace(&mut self.roundness, clamp(roundness, 0.0, 1.0)) {
            self.set_needs_layout();
        }
    }

    /// Icon name.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Change the icon.
    pub fn set_icon(&mut self, icon: Option<String>) {
        if replace(&mut self.icon, icon) {
            self.set_needs_layout();
        }
    }

    /// Icon size.
    pub fn icon_size(&self) -> Size {
        self.icon_size
    }

    /// Change the icon size.
    pub fn set_icon_size(&mut self, size: Size) {
        let size = Size::new(size.width.max(0.0), size.height.max(0.0));
        if replace(&mut self.icon_size, size) {
            self.set_needs_layout();
        }
    }

    /// Icon tint. Appearance only.
    pub fn icon_color(&self) -> Color {
        self.icon_color
    }

    /// Arrangement of label and icon.
    pub fn button_type(&self) -> ButtonType {
        self.button_type
    }

    /// Change the arrangement.
    pub fn set_button_type(&mut self, button_type: ButtonType) {
        if replace(&mut self.button_type, button_type) {
            self.set_needs_layout();
        }
    }

    /// Label side for [`ButtonType::IconWithLabel`].
    pub fn label_side(&self) -> LabelSide {
        self.label_side
    }

    /// Change the label side.
    pub fn set_label_side(&mut self, side: LabelSide) {
        if replace(&mut self.label_side, side) {
            self.set_needs_layout();
        }
    }

    // --- layout results ---

    /// Outline from the last layout pass, while visible.
    ///
    /// Types without an outline, degenerate sizes and a running press yield `None`.
    pub fn outline(&self) -> Option<Outline> {
        if self.press.is_running() {
            None
        } else {
            self.outline
        }
    }

    /// Center of the label, if the type shows one.
    pub fn label_center(&self) -> Option<Point> {
        self.label_center
    }

    /// Icon placement, if the type shows one and an icon is set.
    pub fn icon_frame(&self) -> Option<Rect> {
        self.icon_frame
    }

    /// Current press displacement along Z (zero or negative).
    pub fn press_offset(&self) -> f64 {
        self.press_offset
    }

    // --- taps ---

    /// Queue [`NodeEvent::Tapped`] and start the press animation.
    ///
    /// A tap during a running press is still reported but does not restart the animation.
    pub fn simulate_tap(&mut self) {
        self.base.emit(NodeEvent::Tapped);
        if !self.press.is_running() {
            self.press.start();
        }
    }

    fn sync_label_size(&mut self) {
        let size = if self.text_size == 0.0 && self.height > 0.0 {
            0.333 * self.height
        } else {
            self.text_size
        };
        self.label.set_text_size(size);
    }

    fn icon_box(&self) -> Size {
        if self.button_type.shows_icon() && self.icon.is_some() {
            self.icon_size
        } else {
            Size::ZERO
        }
    }

    fn label_box(&self) -> Size {
        if self.button_type.shows_label() {
            self.label.size()
        } else {
            Size::ZERO
        }
    }

    /// Space between icon and label when both are present.
    fn gap(&self, label: Size, icon: Size) -> f64 {
        if label.is_zero_area() || icon.is_zero_area() {
            0.0
        } else {
            0.5 * label.height
        }
    }

    fn content_size(&self) -> Size {
        let label = self.label_box();
        let icon = self.icon_box();
        let gap = self.gap(label, icon);
        let padded = |content: Size| {
            Size::new(
                content.width + 2.0 * Self::PADDING_HORIZONTAL * label.height,
                content.height + 2.0 * Self::PADDING_VERTICAL * label.height,
            )
        };
        match self.button_type {
            ButtonType::Simple => Size::new(
                label.width + Self::HEIGHT_FACTOR * label.height,
                Self::HEIGHT_FACTOR * label.height,
            ),
            ButtonType::Text => padded(label),
            ButtonType::Icon => icon,
            ButtonType::IconWithLabel => match self.label_side {
                LabelSide::Top | LabelSide::Bottom => Size::new(
                    label.width.max(icon.width),
                    label.height + gap + icon.height,
                ),
                LabelSide::Left | LabelSide::Right => Size::new(
                    label.width + gap + icon.width,
                    label.height.max(icon.height),
                ),
            },
            ButtonType::TextWithIcon => padded(Size::new(
                icon.width + gap + label.width,
                label.height.max(icon.height),
            )),
        }
    }

    /// Centers of label and icon, relative to the button center.
    fn arrange(&self) -> (Point, Point) {
        let label = self.label_box();
        let icon = self.icon_box();
        let gap = self.gap(label, icon);
        let origin = Point::ORIGIN;
        match (self.button_type, self.label_side) {
            (ButtonType::IconWithLabel, LabelSide::Bottom) => (
                Point::new(0.0, -0.5 * (icon.height + gap)),
                Point::new(0.0, 0.5 * (label.height + gap)),
            ),
            (ButtonType::IconWithLabel, LabelSide::Top) => (
                Point::new(0.0, 0.5 * (icon.height + gap)),
                Point::new(0.0, -0.5 * (label.height + gap)),
            ),
            (ButtonType::IconWithLabel, LabelSide::Left) => (
                Point::new(-0.5 * (icon.width + gap), 0.0),
                Point::new(0.5 * (label.width + gap), 0.0),
            ),
            (ButtonType::IconWithLabel, LabelSide::Right) | (ButtonType::TextWithIcon, _) => (
                Point::new(0.5 * (icon.width + gap), 0.0),
                Point::new(-0.5 * (label.width + gap), 0.0),
            ),
            _ => (origin, origin),
        }
    }
}

impl Measurable for Button {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        let content = self.content_size();
        Size::new(
            positive_or(self.width, content.width),
            positive_or(self.height, content.height),
        )
    }
}

impl Layoutable for Button {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_layout(&mut self, _cx: &LayoutCx<'_>) {
        let size = self.get_size(false);
        let (label_center, icon_center) = self.arrange();
        self.label_center = self.button_type.shows_label().then_some(label_center);
        self.icon_frame = (self.button_type.shows_icon() && self.icon.is_some())
            .then(|| Rect::from_center_size(icon_center, self.icon_size));

        let min = size.width.min(size.height);
        let thickness = 0.05 * min;
        self.outline = (self.button_type.has_outline() && thickness > 0.0).then(|| Outline {
            shape: RoundedRect::from_rect(
                Rect::from_center_size(Point::ORIGIN, size),
                0.5 * min * self.roundness,
            ),
            thickness,
        });
    }
}

impl HitTestable for Button {}

impl Focusable for Button {
    fn can_have_focus(&self) -> bool {
        self.base.is_enabled()
    }

    /// Focus acts as a tap: the button gains focus, taps, and leaves again.
    fn enter_focus(&mut self) -> FocusResponse {
        if self.base.focus_mut().enter() {
            self.base.emit(NodeEvent::FocusGained);
        }
        self.simulate_tap();
        self.leave_focus();
        FocusResponse::Released
    }
}

impl Component for Button {
    fn kind(&self) -> &'static str {
        "UiButton"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(text) = props.string("text") {
            self.set_text(text);
        }
        if let Some(color) = props.color("textColor") {
            self.label.set_text_color(color);
        }
        if let Some(color) = props.color("iconColor") {
            self.icon_color = color;
        }
        if let Some(size) = props.number("textSize") {
            self.set_text_size(size);
        }
        if let Some(size) = props.size("iconSize") {
            self.set_icon_size(size);
        } else if let Some(side) = props.number("iconSize") {
            self.set_icon_size(Size::new(side, side));
        }
        if let Some(icon) = props.string("icon").or_else(|| props.string("iconType")) {
            self.set_icon(Some(icon.to_owned()));
        }
        if let Some(width) = props.number("width") {
            self.set_width(width);
        }
        if let Some(height) = props.number("height") {
            self.set_height(height);
        }
        if let Some(roundness) = props.number("roundness") {
            self.set_roundness(roundness);
        }
        if let Some(button_type) = props.token::<ButtonType>("type") {
            self.set_button_type(button_type);
        }
        if let Some(side) = props.token::<LabelSide>("labelSide") {
            self.set_label_side(side);
        }
    }

    fn tick(&mut self, dt: f64) {
        match self.press.advance(dt) {
            Tick::Idle => {}
            Tick::Running { progress } | Tick::Finished { progress } => {
                self.press_offset = -self.tap_depth * progress;
            }
        }
    }

    fn child_offset(&self, _child: NodeId) -> DVec3 {
        self.base.content_offset() + DVec3::new(0.0, 0.0, self.press_offset)
    }

    fn activate(&mut self) {
        self.simulate_tap();
        self.base.emit(NodeEvent::Activated);
    }

    fn destroy(&mut self) {
        self.press.stop();
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
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let button = Button::new();
        assert_eq!(button.base().alignment(), Alignment::CenterCenter);
        assert_eq!(button.roundness(), 1.0);
        assert_eq!(button.width(), 0.0);
        assert_eq!(button.height(), 0.0);
        assert_eq!(button.icon_size(), Button::DEFAULT_ICON_SIZE);
        assert_eq!(button.button_type(), ButtonType::Simple);
        assert_eq!(button.label().default_text_size(), Button::DEFAULT_TEXT_SIZE);
    }

    #[test]
    #[should_panic(expected = "node must not be set up twice")]
    fn setup_twice_panics() {
        let mut button = Button::new();
        button.setup_node();
    }

    #[test]
    fn alignment_is_locked() {
        let mut button = Button::new();
        settle(&mut button);
        button.update(&props(json!({ "alignment": "bottom-right" })));
        assert_eq!(button.base().alignment(), Alignment::CenterCenter);
        assert!(!button.is_layout_needed());
    }

    #[test]
    fn roundness_clamps_and_dirties_once() {
        let mut button = Button::new();
        button.set_roundness(0.5);
        settle(&mut button);

        button.update(&props(json!({ "roundness": 2.75 })));
        assert_eq!(button.roundness(), 1.0);
        assert!(button.is_layout_needed());
        settle(&mut button);
        button.update(&props(json!({ "roundness": 2.75 })));
        assert_eq!(button.roundness(), 1.0);
        assert!(!button.is_layout_needed(), "same clamped value");

        button.update(&props(json!({ "roundness": -2.75 })));
        assert_eq!(button.roundness(), 0.0);
        assert!(button.is_layout_needed());
        settle(&mut button);
        button.update(&props(json!({ "roundness": -2.75 })));
        assert_eq!(button.roundness(), 0.0);
        assert!(!button.is_layout_needed());
    }

    #[test]
    fn simple_size_follows_the_label() {
        let mut button = Button::with_props(&props(json!({ "text": "OK" })));
        settle(&mut button);
        let label = button.label().size();
        let size = button.get_size(false);
        assert!((size.height - 2.3 * label.height).abs() < 1e-12);
        assert!((size.width - (label.width + 2.3 * label.height)).abs() < 1e-12);
    }

    #[test]
    fn explicit_dimensions_win_and_drive_text_size() {
        let mut button = Button::with_props(&props(json!({
            "text": "OK", "width": 0.3, "height": 0.09
        })));
        settle(&mut button);
        assert_eq!(button.get_size(false), Size::new(0.3, 0.09));
        assert!((button.label().text_size() - 0.333 * 0.09).abs() < 1e-12);

        button.update(&props(json!({ "textSize": 0.02 })));
        assert_eq!(button.label().text_size(), 0.02, "explicit text size wins");
    }

    #[test]
    fn outline_follows_roundness_and_size() {
        let mut button = Button::with_props(&props(json!({
            "width": 0.4, "height": 0.1, "roundness": 0.5
        })));
        settle(&mut button);
        let outline = button.outline().unwrap();
        assert!((outline.thickness - 0.005).abs() < 1e-12);
        let radii = outline.shape.radii();
        assert!((radii.top_left - 0.025).abs() < 1e-12);
        assert_eq!(outline.shape.rect(), Rect::new(-0.2, -0.05, 0.2, 0.05));
    }

    #[test]
    fn icon_types() {
        let mut button = Button::with_props(&props(json!({
            "type": "icon", "icon": "close", "iconSize": [0.05, 0.03], "text": "ignored"
        })));
        settle(&mut button);
        assert_eq!(button.get_size(false), Size::new(0.05, 0.03));
        assert!(button.outline().is_none());
        assert!(button.label_center().is_none());
        assert_eq!(button.icon_frame(), Some(Rect::new(-0.025, -0.015, 0.025, 0.015)));

        button.update(&props(json!({ "type": "icon-with-label", "labelSide": "bottom" })));
        settle(&mut button);
        let label = button.label().size();
        let size = button.get_size(false);
        assert!((size.height - (0.03 + 1.5 * label.height)).abs() < 1e-12);
        assert!(button.label_center().unwrap().y < 0.0, "label below");
        assert!(button.icon_frame().unwrap().center().y > 0.0, "icon above");
    }

    #[test]
    fn text_with_icon_puts_icon_on_the_left() {
        let mut button = Button::with_props(&props(json!({
            "type": "text-with-icon", "icon": "add", "text": "Add"
        })));
        settle(&mut button);
        assert!(button.icon_frame().unwrap().center().x < 0.0);
        assert!(button.label_center().unwrap().x > 0.0);
        assert!(button.outline().is_some());
    }

    #[test]
    fn tap_presses_and_hides_outline() {
        let mut button = Button::with_props(&props(json!({ "text": "Go" })));
        settle(&mut button);
        assert!(button.outline().is_some());

        button.activate();
        assert_eq!(
            button.base_mut().take_events(),
            vec![NodeEvent::Tapped, NodeEvent::Activated]
        );
        button.tick(0.1);
        assert!((button.press_offset() + 0.05).abs() < 1e-9, "fully pressed");
        assert!(button.outline().is_none());
        button.tick(0.1);
        assert_eq!(button.press_offset(), 0.0);
        assert!(button.outline().is_some());
    }

    #[test]
    fn focus_is_a_tap() {
        let mut button = Button::new();
        assert!(button.can_have_focus());
        assert_eq!(button.enter_focus(), FocusResponse::Released);
        assert!(!button.has_focus());
        assert_eq!(
            button.base_mut().take_events(),
            vec![NodeEvent::FocusGained, NodeEvent::Tapped, NodeEvent::FocusLost]
        );
    }

    proptest! {
        #[test]
        fn roundness_is_clamped_and_dirty_iff_changed(first in -5.0..5.0_f64, second in -5.0..5.0_f64) {
            let mut button = Button::new();
            button.set_roundness(first);
            settle(&mut button);
            let before = button.roundness();
            button.set_roundness(second);
            prop_assert!((0.0..=1.0).contains(&button.roundness()));
            prop_assert_eq!(button.is_layout_needed(), button.roundness() != before);
        }
    }
}
