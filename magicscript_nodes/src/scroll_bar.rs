// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};
use magicscript_animation::VisibilityFade;
use magicscript_math::{Alignment, clamp};
use magicscript_props::{Props, token_enum};
use magicscript_scene::{
    ChildCommand, ChildRole, Component, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase,
    NodeConfig,
};

use crate::util::{positive_or, replace};

token_enum! {
    /// Axis a scroll bar runs along, or a linear layout stacks along.
    pub enum Orientation: "orientation" {
        /// Track runs top to bottom.
        Vertical => "vertical",
        /// Track runs left to right.
        Horizontal => "horizontal",
    }
}

/// A scroll position indicator (`UiScrollBar`).
///
/// Placed under a [`ScrollView`](crate::ScrollView), which drives the thumb and the fade
/// through [`ChildCommand`]s.
#[derive(Debug)]
pub struct ScrollBar {
    base: NodeBase,
    length: f64,
    thickness: f64,
    thumb_size: f64,
    thumb_position: f64,
    orientation: Orientation,
    fade: VisibilityFade,
    thumb: Rect,
}

impl Default for ScrollBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollBar {
    /// Track length while `length` is 0.
    pub const DEFAULT_LENGTH: f64 = 0.5;
    /// Track thickness while `thickness` is 0.
    pub const DEFAULT_THICKNESS: f64 = 0.02;
    /// Initial thumb size, as a fraction of the track.
    pub const DEFAULT_THUMB_SIZE: f64 = 0.1;
    /// Smallest thumb that is drawn, as a fraction of the track.
    pub const MIN_RENDERED_THUMB: f64 = 0.1;

    /// A vertical bar with default settings.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// A vertical bar fading with the configured duration.
    pub fn with_config(config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::locked(Alignment::CenterCenter),
            length: 0.0,
            thickness: 0.0,
            thumb_size: Self::DEFAULT_THUMB_SIZE,
            thumb_position: 0.0,
            orientation: Orientation::Vertical,
            fade: VisibilityFade::new(config.scroll_bar_fade_duration),
            thumb: Rect::ZERO,
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

    /// Requested track length; 0 uses the default.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Request a track length.
    pub fn set_length(&mut self, length: f64) {
        if replace(&mut self.length, length.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// Requested track thickness; 0 uses the default.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Request a track thickness.
    pub fn set_thickness(&mut self, thickness: f64) {
        if replace(&mut self.thickness, thickness.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// Thumb size as a fraction of the track, in `[0, 1]`.
    pub fn thumb_size(&self) -> f64 {
        self.thumb_size
    }

    /// Resize the thumb.
    pub fn set_thumb_size(&mut self, size: f64) {
        if replace(&mut self.thumb_size, clamp(size, 0.0, 1.0)) {
            self.set_needs_layout();
        }
    }

    /// Thumb position along the track, in `[0, 1]`.
    pub fn thumb_position(&self) -> f64 {
        self.thumb_position
    }

    /// Move the thumb.
    pub fn set_thumb_position(&mut self, position: f64) {
        if replace(&mut self.thumb_position, clamp(position, 0.0, 1.0)) {
            self.set_needs_layout();
        }
    }

    /// Track axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change the track axis.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if replace(&mut self.orientation, orientation) {
            self.set_needs_layout();
        }
    }

    /// Current opacity of the whole bar.
    pub fn opacity(&self) -> f64 {
        self.fade.opacity()
    }

    /// The thumb from the last layout pass, centered on the node.
    pub fn thumb(&self) -> Rect {
        self.thumb
    }

    fn show(&mut self, animated: bool, hide_after: Option<f64>) {
        self.fade.show(animated);
        if let Some(delay) = hide_after {
            self.fade.hide_after(delay);
        }
        self.base.set_visible(true);
    }

    fn hide(&mut self, animated: bool) {
        self.fade.hide(animated);
        if !self.fade.is_visible() {
            self.base.set_visible(false);
        }
    }
}

impl Measurable for ScrollBar {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        let length = positive_or(self.length, Self::DEFAULT_LENGTH);
        let thickness = positive_or(self.thickness, Self::DEFAULT_THICKNESS);
        match self.orientation {
            Orientation::Vertical => Size::new(thickness, length),
            Orientation::Horizontal => Size::new(length, thickness),
        }
    }
}

impl Layoutable for ScrollBar {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_layout(&mut self, _cx: &LayoutCx<'_>) {
        let size = self.get_size(false);
        let thumb = self.thumb_size.max(Self::MIN_RENDERED_THUMB);
        // Position 0 is the start of the content: top for vertical bars, left otherwise.
        self.thumb = match self.orientation {
            Orientation::Vertical => {
                let len = thumb * size.height;
                let y = 0.5 * (size.height - len) - self.thumb_position * (size.height - len);
                Rect::from_center_size(Point::new(0.0, y), (size.width, len))
            }
            Orientation::Horizontal => {
                let len = thumb * size.width;
                let x = -0.5 * (size.width - len) + self.thumb_position * (size.width - len);
                Rect::from_center_size(Point::new(x, 0.0), (len, size.height))
            }
        };
    }
}

impl HitTestable for ScrollBar {}

impl Component for ScrollBar {
    fn kind(&self) -> &'static str {
        "UiScrollBar"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(length) = props.number("length").or_else(|| props.number("width")) {
            self.set_length(length);
        }
        if let Some(thickness) = props
            .number("thickness")
            .or_else(|| props.number("height"))
        {
            self.set_thickness(thickness);
        }
        if let Some(size) = props.number("thumbSize") {
            self.set_thumb_size(size);
        }
        if let Some(position) = props.number("thumbPosition") {
            self.set_thumb_position(position);
        }
        if let Some(orientation) = props.token("orientation") {
            self.set_orientation(orientation);
        }
    }

    fn tick(&mut self, dt: f64) {
        if self.fade.advance(dt).is_some() {
            let visible = self.fade.is_visible();
            self.base.set_visible(visible);
        }
    }

    fn child_role(&self) -> ChildRole {
        ChildRole::ScrollBar
    }

    fn apply_command(&mut self, command: &ChildCommand) {
        match *command {
            ChildCommand::ThumbPosition(position) => self.set_thumb_position(position),
            ChildCommand::ThumbSize(size) => self.set_thumb_size(size),
            ChildCommand::Show {
                animated,
                hide_after,
            } => self.show(animated, hide_after),
            ChildCommand::Hide { animated } => self.hide(animated),
            ChildCommand::SetVisible(true) => self.show(false, None),
            ChildCommand::SetVisible(false) => self.hide(false),
        }
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
        let mut bar = ScrollBar::new();
        settle(&mut bar);
        assert_eq!(bar.thumb_size(), 0.1);
        assert_eq!(bar.thumb_position(), 0.0);
        assert_eq!(bar.orientation(), Orientation::Vertical);
        assert_eq!(bar.get_size(false), Size::new(0.02, 0.5));
        assert_eq!(bar.child_role(), ChildRole::ScrollBar);
    }

    #[test]
    fn alignment_is_locked() {
        let mut bar = ScrollBar::new();
        settle(&mut bar);
        bar.update(&props(json!({ "alignment": "bottom-right" })));
        assert_eq!(bar.base().alignment(), Alignment::CenterCenter);
        assert!(!bar.is_layout_needed());
    }

    #[test]
    fn horizontal_swaps_axes() {
        let mut bar = ScrollBar::with_props(&props(json!({
            "orientation": "horizontal",
            "length": 1.0,
            "thumbSize": 0.25,
            "thumbPosition": 1.0,
        })));
        settle(&mut bar);
        assert_eq!(bar.get_size(false), Size::new(1.0, 0.02));
        assert_eq!(bar.thumb(), Rect::new(0.25, -0.01, 0.5, 0.01));
    }

    #[test]
    fn vertical_thumb_starts_at_the_top() {
        let mut bar = ScrollBar::with_props(&props(json!({ "length": 1.0, "thumbSize": 0.5 })));
        settle(&mut bar);
        assert_eq!(bar.thumb(), Rect::new(-0.01, 0.0, 0.01, 0.5));
    }

    #[test]
    fn tiny_thumb_is_still_drawn() {
        let mut bar = ScrollBar::with_props(&props(json!({ "thumbSize": 0.0 })));
        settle(&mut bar);
        assert_eq!(bar.thumb_size(), 0.0);
        assert!((bar.thumb().height() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn commands_drive_thumb_and_fade() {
        let mut bar = ScrollBar::new();
        settle(&mut bar);
        bar.apply_command(&ChildCommand::ThumbPosition(0.5));
        assert!(bar.is_layout_needed());
        assert_eq!(bar.thumb_position(), 0.5);

        bar.apply_command(&ChildCommand::Hide { animated: false });
        assert!(!bar.base().is_visible());

        bar.apply_command(&ChildCommand::Show {
            animated: false,
            hide_after: Some(1.0),
        });
        assert!(bar.base().is_visible());
        bar.tick(0.5);
        assert!(bar.base().is_visible());
        bar.tick(0.6);
        bar.tick(1.0);
        assert_eq!(bar.opacity(), 0.0);
        assert!(!bar.base().is_visible(), "faded out bars stop hit testing");
    }

    proptest! {
        #[test]
        fn thumb_values_are_clamped(size in -2.0..2.0_f64, position in -2.0..2.0_f64) {
            let mut bar = ScrollBar::new();
            settle(&mut bar);
            bar.set_thumb_size(size);
            bar.set_thumb_position(position);
            prop_assert!((0.0..=1.0).contains(&bar.thumb_size()));
            prop_assert!((0.0..=1.0).contains(&bar.thumb_position()));
            let before = (bar.thumb_size(), bar.thumb_position());
            settle(&mut bar);
            bar.set_thumb_size(size);
            bar.set_thumb_position(position);
            prop_assert_eq!(before, (bar.thumb_size(), bar.thumb_position()));
            prop_assert!(!bar.is_layout_needed());
        }
    }
}
