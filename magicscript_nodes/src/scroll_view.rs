// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::DVec3;
use kurbo::{Point, Rect, Size};
use magicscript_math::{Alignment, EPSILON, Plane, Ray, ScrollBounds, clamp};
use magicscript_props::{Props, token_enum};
use magicscript_scene::{
    ChildCommand, ChildInfo, ChildRole, Component, Draggable, HitTestMode, HitTestable, LayoutCx,
    Layoutable, Measurable, NodeBase, NodeConfig, NodeEvent, NodeId,
};

use crate::util::replace;

token_enum! {
    /// Axis content scrolls along.
    pub enum ScrollDirection: "scroll direction" {
        /// Left and right.
        Horizontal => "horizontal",
        /// Up and down.
        Vertical => "vertical",
    }
}

token_enum! {
    /// When a scroll view shows its scroll bar.
    pub enum ScrollBarVisibility: "scroll bar visibility" {
        /// Shown while scrolling, hidden again after a delay.
        Auto => "auto",
        /// Always shown.
        Always => "always",
        /// Never shown.
        Off => "off",
    }
}

/// A clipped, scrollable viewport (`UiScrollView`).
///
/// Takes one content child and at most one [`ScrollBar`](crate::ScrollBar) child; further
/// children of either role are refused. The viewport is the XY face of the scroll bounds, and
/// the content subtree is clipped to the full bounds box.
///
/// The content's top-left corner is pinned to the viewport's top-left corner, then shifted by
/// the scroll value times whatever part of the content does not fit.
#[derive(Debug)]
pub struct ScrollView {
    base: NodeBase,
    direction: ScrollDirection,
    scroll_value: f64,
    scroll_speed: f64,
    bounds: Option<ScrollBounds>,
    planes: [Plane; 6],
    visibility: ScrollBarVisibility,
    scrolling_enabled: bool,
    hide_delay: f64,
    content: Option<NodeId>,
    scroll_bar: Option<NodeId>,
    proxy: DVec3,
    content_size: Size,
}

impl Default for ScrollView {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollView {
    /// Scroll speed in scene units per second until one is set.
    pub const DEFAULT_SCROLL_SPEED: f64 = 0.1;

    /// A horizontal scroll view without bounds.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// A scroll view hiding its automatic scroll bar after the configured delay.
    pub fn with_config(config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::locked(Alignment::CenterCenter),
            direction: ScrollDirection::Horizontal,
            scroll_value: 0.0,
            scroll_speed: Self::DEFAULT_SCROLL_SPEED,
            bounds: None,
            planes: ScrollBounds::default().clipping_planes(),
            visibility: ScrollBarVisibility::Auto,
            scrolling_enabled: true,
            hide_delay: config.scroll_bar_hide_delay,
            content: None,
            scroll_bar: None,
            proxy: DVec3::ZERO,
            content_size: Size::ZERO,
        };
        node.setup_node();
        node
    }

    /// A scroll view built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Scroll axis.
    pub fn scroll_direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Change the scroll axis.
    pub fn set_scroll_direction(&mut self, direction: ScrollDirection) {
        if replace(&mut self.direction, direction) {
            self.set_needs_layout();
        }
    }

    /// Scroll position in `[0, 1]`.
    pub fn scroll_value(&self) -> f64 {
        self.scroll_value
    }

    /// Scroll to `value`, clamped to `[0, 1]`. Returns whether the position moved.
    pub fn set_scroll_value(&mut self, value: f64) -> bool {
        if !replace(&mut self.scroll_value, clamp(value, 0.0, 1.0)) {
            return false;
        }
        self.set_needs_layout();
        if self.visibility == ScrollBarVisibility::Auto {
            self.show_scroll_bar();
        }
        true
    }

    /// Scroll speed in scene units per second, for hosts that scroll with a trackpad.
    pub fn scroll_speed(&self) -> f64 {
        self.scroll_speed
    }

    /// Change the scroll speed.
    pub fn set_scroll_speed(&mut self, speed: f64) {
        self.scroll_speed = speed;
    }

    /// The viewport box, if set.
    pub fn scroll_bounds(&self) -> Option<ScrollBounds> {
        self.bounds
    }

    /// Replace the viewport box. The clip planes follow.
    pub fn set_scroll_bounds(&mut self, bounds: ScrollBounds) {
        if replace(&mut self.bounds, Some(bounds)) {
            self.planes = bounds.clipping_planes();
            self.set_needs_layout();
        }
    }

    /// Scroll bar policy.
    pub fn scroll_bar_visibility(&self) -> ScrollBarVisibility {
        self.visibility
    }

    /// Change the scroll bar policy and apply it to the current bar.
    pub fn set_scroll_bar_visibility(&mut self, visibility: ScrollBarVisibility) {
        if replace(&mut self.visibility, visibility) {
            self.sync_scroll_bar();
        }
    }

    /// Whether drags scroll the content.
    pub fn is_scrolling_enabled(&self) -> bool {
        self.scrolling_enabled
    }

    /// Allow or forbid scrolling by drag.
    pub fn set_scrolling_enabled(&mut self, enabled: bool) {
        self.scrolling_enabled = enabled;
    }

    /// The scrolled child.
    pub fn content(&self) -> Option<NodeId> {
        self.content
    }

    /// The scroll bar child.
    pub fn scroll_bar(&self) -> Option<NodeId> {
        self.scroll_bar
    }

    /// Translation applied to the content from the last layout pass.
    pub fn content_translation(&self) -> DVec3 {
        self.proxy
    }

    /// Scaled size of the content from the last layout pass.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    fn show_scroll_bar(&mut self) {
        if let Some(bar) = self.scroll_bar {
            let hide_after = Some(self.hide_delay);
            self.base.command(
                bar,
                ChildCommand::Show {
                    animated: true,
                    hide_after,
                },
            );
        }
    }

    fn sync_scroll_bar(&mut self) {
        let Some(bar) = self.scroll_bar else {
            return;
        };
        match self.visibility {
            ScrollBarVisibility::Always => self.base.command(bar, ChildCommand::SetVisible(true)),
            ScrollBarVisibility::Auto => self.show_scroll_bar(),
            ScrollBarVisibility::Off => self.base.command(bar, ChildCommand::SetVisible(false)),
        }
    }

    fn viewport_extent(&self, size: Size) -> f64 {
        match self.direction {
            ScrollDirection::Horizontal => size.width,
            ScrollDirection::Vertical => size.height,
        }
    }
}

impl Measurable for ScrollView {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        self.bounds.map_or(Size::ZERO, |b| {
            let extent = b.extent();
            Size::new(extent.x.max(0.0), extent.y.max(0.0))
        })
    }
}

impl Layoutable for ScrollView {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_layout(&mut self, cx: &LayoutCx<'_>) {
        let viewport = self.get_bounds(false, true);
        self.proxy = DVec3::ZERO;
        self.content_size = Size::ZERO;
        if let Some(content) = self.content.and_then(|id| cx.child(id)) {
            self.content_size = content.size;
            let placed = content.bounds;
            self.proxy = DVec3::new(viewport.x0 - placed.x0, viewport.y1 - placed.y1, 0.0);
        }

        let overflow = (self.viewport_extent(self.content_size)
            - self.viewport_extent(viewport.size()))
        .max(0.0);
        match self.direction {
            ScrollDirection::Horizontal => self.proxy.x -= self.scroll_value * overflow,
            ScrollDirection::Vertical => self.proxy.y += self.scroll_value * overflow,
        }

        if let Some(bar) = self.scroll_bar {
            self.base
                .command(bar, ChildCommand::ThumbPosition(self.scroll_value));
        }
    }

    /// The bounds box is given in local space, so it is not moved by the alignment.
    fn get_bounds(&self, parent_space: bool, scaled: bool) -> Rect {
        let Some(bounds) = self.bounds else {
            return Rect::ZERO;
        };
        let mut origin = bounds.min;
        if parent_space {
            origin += self.base.local_position();
        }
        Rect::from_origin_size((origin.x, origin.y), self.get_size(scaled))
    }
}

impl HitTestable for ScrollView {
    fn hit_test_mode(&self) -> HitTestMode {
        HitTestMode::SelfThenChildren
    }

    fn hit_test_order(&self, children: &[NodeId]) -> Vec<NodeId> {
        [self.content, self.scroll_bar]
            .into_iter()
            .flatten()
            .filter(|id| children.contains(id))
            .collect()
    }

    fn self_hit_test(&self, local_ray: &Ray) -> Option<DVec3> {
        self.bounds?;
        if self.base.skips_raycast() || !self.base.is_visible() {
            return None;
        }
        let point = Plane::new(DVec3::ZERO, DVec3::Z).intersect_ray(local_ray)?;
        let viewport = self.get_bounds(false, false).inflate(EPSILON, EPSILON);
        viewport
            .contains(Point::new(point.x, point.y))
            .then_some(point)
    }
}

impl Draggable for ScrollView {
    /// A segment through the viewport center spanning the scroll axis. Horizontal drags run
    /// from right to left so content follows the pointer.
    fn drag_axis(&self) -> Ray {
        let Some(bounds) = self.bounds else {
            return Ray::new(DVec3::ZERO, DVec3::ZERO, 0.0);
        };
        let center = bounds.center();
        let direction = match self.direction {
            ScrollDirection::Horizontal => DVec3::new(center.x - bounds.max.x, 0.0, 0.0),
            ScrollDirection::Vertical => DVec3::new(0.0, bounds.max.y - center.y, 0.0),
        };
        Ray::new(
            center - direction,
            direction.normalize_or_zero(),
            2.0 * direction.length(),
        )
    }

    fn drag_range(&self) -> f64 {
        if self.content.is_none() {
            return 0.0;
        }
        self.viewport_extent(self.content_size) - self.viewport_extent(self.get_size(false))
    }

    fn drag_value(&self) -> f64 {
        self.scroll_value
    }

    fn set_drag_value(&mut self, value: f64) {
        if self.set_scroll_value(value) {
            self.base.emit(NodeEvent::ScrollChanged(self.scroll_value));
        }
    }
}

impl Component for ScrollView {
    fn kind(&self) -> &'static str {
        "UiScrollView"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(direction) = props.token("scrollDirection") {
            self.set_scroll_direction(direction);
        }
        if let Some(speed) = props.number("scrollSpeed") {
            self.set_scroll_speed(speed);
        }
        if let Some(value) = props.number("scrollValue") {
            self.set_scroll_value(value);
        }
        if let Some(patch) = props.object("scrollBounds") {
            let mut bounds = self.bounds.unwrap_or_default();
            if let Some(min) = patch.vec3("min") {
                bounds.min = min;
            }
            if let Some(max) = patch.vec3("max") {
                bounds.max = max;
            }
            self.set_scroll_bounds(bounds);
        }
        if let Some(visibility) = props.token("scrollBarVisibility") {
            self.set_scroll_bar_visibility(visibility);
        }
        if let Some(enabled) = props.bool("scrollingEnabled") {
            self.set_scrolling_enabled(enabled);
        }
    }

    fn accept_child(&mut self, child: ChildInfo) -> bool {
        let slot = match child.role {
            ChildRole::Content => &mut self.content,
            ChildRole::ScrollBar => &mut self.scroll_bar,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(child.id);
        self.set_needs_layout();
        if child.role == ChildRole::ScrollBar {
            self.sync_scroll_bar();
        }
        true
    }

    fn child_removed(&mut self, child: NodeId) {
        if self.content == Some(child) {
            self.content = None;
        } else if self.scroll_bar == Some(child) {
            self.scroll_bar = None;
        } else {
            return;
        }
        self.set_needs_layout();
    }

    fn child_offset(&self, child: NodeId) -> DVec3 {
        let offset = self.base.content_offset();
        if self.content == Some(child) {
            offset + self.proxy
        } else {
            offset
        }
    }

    fn clip_planes(&self) -> Option<(NodeId, &[Plane])> {
        self.bounds?;
        Some((self.content?, &self.planes[..]))
    }

    fn as_draggable(&self) -> Option<&dyn Draggable> {
        self.scrolling_enabled.then_some(self as &dyn Draggable)
    }

    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        if self.scrolling_enabled {
            Some(self)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{props, settle};
    use crate::{ScrollBar, Text};
    use magicscript_scene::Scene;
    use serde_json::json;

    fn viewport() -> Props {
        props(json!({
            "scrollBounds": { "min": [-0.5, -0.25, -0.1], "max": [0.5, 0.25, 0.1] },
        }))
    }

    /// Text sized exactly by its bounds, anchored at its bottom-left corner.
    fn block(width: f64, height: f64) -> Text {
        Text::with_props(&props(json!({
            "text": "x",
            "boundsSize": { "boundsSize": [width, height] },
        })))
    }

    fn pointer(x: f64, y: f64) -> Ray {
        Ray::new(DVec3::new(x, y, 1.0), DVec3::NEG_Z, 10.0)
    }

    fn scene_with_content() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::new();
        let view = scene.insert(None, ScrollView::with_props(&viewport()));
        let content = scene.insert(Some(view), block(2.0, 0.5));
        scene.layout();
        (scene, view, content)
    }

    #[test]
    fn defaults() {
        let mut view = ScrollView::new();
        settle(&mut view);
        assert_eq!(view.scroll_direction(), ScrollDirection::Horizontal);
        assert_eq!(view.scroll_bar_visibility(), ScrollBarVisibility::Auto);
        assert_eq!(view.scroll_speed(), 0.1);
        assert_eq!(view.get_size(false), Size::ZERO);
        assert_eq!(view.get_bounds(false, false), Rect::ZERO);
        assert!(view.self_hit_test(&pointer(0.0, 0.0)).is_none());
    }

    #[test]
    fn bounds_give_size_and_origin() {
        let mut view = ScrollView::with_props(&viewport());
        settle(&mut view);
        assert_eq!(view.get_size(false), Size::new(1.0, 0.5));
        assert_eq!(view.get_bounds(false, false), Rect::new(-0.5, -0.25, 0.5, 0.25));

        view.update(&props(json!({ "scrollBounds": { "max": [1.5, 0.25, 0.1] } })));
        assert!(view.is_layout_needed(), "partial bounds still count");
        settle(&mut view);
        assert_eq!(view.get_size(false), Size::new(2.0, 0.5));
    }

    #[test]
    fn scroll_value_clamps_and_dirties() {
        let mut view = ScrollView::with_props(&viewport());
        settle(&mut view);
        view.update(&props(json!({ "scrollValue": 1.5 })));
        assert_eq!(view.scroll_value(), 1.0);
        assert!(view.is_layout_needed());
        settle(&mut view);
        view.update(&props(json!({ "scrollValue": 7 })));
        assert!(!view.is_layout_needed(), "clamps to the same value");
    }

    #[test]
    fn content_is_pinned_then_shifted() {
        let (mut scene, view, content) = scene_with_content();
        let sv = scene.node::<ScrollView>(view).unwrap();
        assert_eq!(sv.content(), Some(content));
        assert_eq!(sv.content_translation(), DVec3::new(-0.5, -0.25, 0.0));

        scene.update(view, &props(json!({ "scrollValue": 1.0 }))).unwrap();
        scene.layout();
        let sv = scene.node::<ScrollView>(view).unwrap();
        assert_eq!(sv.content_translation(), DVec3::new(-1.5, -0.25, 0.0));
        let world = scene.world_transform(content).unwrap();
        assert_eq!(world.transform_point3(DVec3::ZERO), DVec3::new(-1.5, -0.25, 0.0));
    }

    #[test]
    fn vertical_scroll_moves_content_up() {
        let mut scene = Scene::new();
        let view = scene.insert(None, ScrollView::with_props(&viewport()));
        scene
            .update(view, &props(json!({ "scrollDirection": "vertical" })))
            .unwrap();
        let _content = scene.insert(Some(view), block(1.0, 1.5));
        scene.update(view, &props(json!({ "scrollValue": 0.5 }))).unwrap();
        scene.layout();
        let sv = scene.node::<ScrollView>(view).unwrap();
        assert_eq!(sv.content_translation(), DVec3::new(-0.5, -1.25 + 0.5, 0.0));
    }

    #[test]
    fn second_content_is_refused_until_the_first_leaves() {
        let (mut scene, view, content) = scene_with_content();
        let extra = scene.insert(None, block(1.0, 1.0));
        assert!(!scene.add_child(view, extra).unwrap());
        assert_eq!(scene.node::<ScrollView>(view).unwrap().content(), Some(content));
        assert_eq!(scene.parent_of(extra), None);

        assert!(scene.remove_child(view, content).unwrap());
        assert_eq!(scene.node::<ScrollView>(view).unwrap().content(), None);
        assert!(scene.add_child(view, extra).unwrap());
        assert_eq!(scene.node::<ScrollView>(view).unwrap().content(), Some(extra));
    }

    #[test]
    fn content_subtree_is_clipped() {
        let (scene, view, content) = scene_with_content();
        let planes = scene.clip_planes_of(content);
        assert_eq!(planes.len(), 6);
        assert!(planes.iter().all(|p| p.keeps(DVec3::new(0.25, 0.0, 0.0))));
        assert!(!planes.iter().all(|p| p.keeps(DVec3::new(1.0, 0.0, 0.0))));
        assert!(scene.clip_planes_of(view).is_empty());
    }

    #[test]
    fn hits_go_through_the_viewport() {
        let (scene, view, content) = scene_with_content();
        assert_eq!(scene.hit_test(view, &pointer(0.25, 0.0)), Some(content));
        // The content extends to x = 1.5 but is clipped at the viewport edge.
        assert_eq!(scene.hit_test(view, &pointer(1.0, 0.0)), None);
    }

    #[test]
    fn drag_scrolls_and_reports() {
        let (mut scene, view, _content) = scene_with_content();
        assert_eq!(scene.dragging_hit_test(view, &pointer(0.25, 0.0)), Some(view));
        let session = scene.begin_drag(view, &pointer(0.0, 0.0)).unwrap();
        let value = scene.drag(&session, &pointer(-0.5, 0.0)).unwrap();
        assert!((value - 0.5).abs() < 1e-9, "dragging left scrolls right");
        let events = scene.drain_events();
        assert!(events.iter().any(|(id, e)| *id == view
            && matches!(e, NodeEvent::ScrollChanged(v) if (v - 0.5).abs() < 1e-9)));
    }

    #[test]
    fn disabled_scrolling_is_not_draggable() {
        let (mut scene, view, _content) = scene_with_content();
        scene
            .update(view, &props(json!({ "scrollingEnabled": false })))
            .unwrap();
        assert_eq!(scene.dragging_hit_test(view, &pointer(0.25, 0.0)), None);
    }

    #[test]
    fn scroll_bar_follows_the_value() {
        let (mut scene, view, _content) = scene_with_content();
        let bar = scene.insert(Some(view), ScrollBar::new());
        let extra_bar = scene.insert(None, ScrollBar::new());
        assert!(!scene.add_child(view, extra_bar).unwrap());

        scene.update(view, &props(json!({ "scrollValue": 0.25 }))).unwrap();
        scene.layout();
        let thumb = scene.node::<ScrollBar>(bar).unwrap().thumb_position();
        assert_eq!(thumb, 0.25);
    }

    #[test]
    fn automatic_scroll_bar_hides_after_the_delay() {
        let (mut scene, view, _content) = scene_with_content();
        let bar = scene.insert(Some(view), ScrollBar::new());
        scene.layout();
        assert!(scene.get(bar).unwrap().base().is_visible());
        scene.tick(2.0);
        scene.tick(1.0);
        assert!(!scene.get(bar).unwrap().base().is_visible());

        scene.update(view, &props(json!({ "scrollValue": 0.5 }))).unwrap();
        assert!(scene.get(bar).unwrap().base().is_visible());
    }

    #[test]
    fn visibility_off_hides_the_bar() {
        let (mut scene, view, _content) = scene_with_content();
        let bar = scene.insert(Some(view), ScrollBar::new());
        scene
            .update(view, &props(json!({ "scrollBarVisibility": "off" })))
            .unwrap();
        assert!(!scene.get(bar).unwrap().base().is_visible());
        scene
            .update(view, &props(json!({ "scrollBarVisibility": "always" })))
            .unwrap();
        assert!(scene.get(bar).unwrap().base().is_visible());
    }
}
