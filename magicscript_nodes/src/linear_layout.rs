// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::DVec3;
use kurbo::{Insets, Size};
use magicscript_math::Alignment;
use magicscript_props::Props;
use magicscript_scene::{
    Component, HitTestMode, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase, NodeConfig,
    NodeId,
};

use crate::grid_layout::Cells;
use crate::scroll_bar::Orientation;

/// A container stacking its children in one column or one row (`UiLinearLayout`).
#[derive(Debug)]
pub struct LinearLayout {
    base: NodeBase,
    orientation: Orientation,
    cells: Cells,
}

impl Default for LinearLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearLayout {
    /// An empty vertical stack.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// An empty vertical stack. Linear layouts take nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::default(),
            orientation: Orientation::Vertical,
            cells: Cells::new(1, 0),
        };
        node.setup_node();
        node
    }

    /// A stack built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Direction children are stacked in.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Stack children top to bottom or left to right.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        let (columns, rows) = match orientation {
            Orientation::Vertical => (1, 0),
            Orientation::Horizontal => (0, 1),
        };
        if self.cells.set_counts(columns, rows) {
            self.set_needs_layout();
        }
    }

    /// Where children sit inside their cells.
    pub fn default_item_alignment(&self) -> Alignment {
        self.cells.alignment()
    }

    /// Space added around every child.
    pub fn default_item_padding(&self) -> Insets {
        self.cells.padding()
    }

    /// Whether hidden children give up their place.
    pub fn skips_invisible_items(&self) -> bool {
        self.cells.skips_invisible()
    }

    /// Number of children placed by the last layout pass.
    pub fn items_count(&self) -> usize {
        self.cells.items_count()
    }
}

impl Measurable for LinearLayout {
    fn calculate_size(&self, cx: &LayoutCx<'_>) -> Size {
        self.cells.measure(cx)
    }
}

impl Layoutable for LinearLayout {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_layout(&mut self, cx: &LayoutCx<'_>) {
        self.cells.arrange(cx);
    }
}

impl HitTestable for LinearLayout {
    fn hit_test_mode(&self) -> HitTestMode {
        HitTestMode::ChildrenOnly
    }
}

impl Component for LinearLayout {
    fn kind(&self) -> &'static str {
        "UiLinearLayout"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(orientation) = props.token("orientation") {
            self.set_orientation(orientation);
        }
        if self.cells.update(props) {
            self.set_needs_layout();
        }
    }

    fn child_removed(&mut self, child: NodeId) {
        self.cells.forget(child);
    }

    fn child_offset(&self, child: NodeId) -> DVec3 {
        let placed = self.cells.offset(child).unwrap_or_default();
        self.base.content_offset() + DVec3::new(placed.x, placed.y, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Spinner;
    use crate::util::testing::{props, settle};
    use magicscript_scene::Scene;
    use serde_json::json;

    fn square(side: f64) -> Spinner {
        Spinner::with_props(&props(json!({ "height": side })))
    }

    fn translation(scene: &Scene, id: NodeId) -> DVec3 {
        scene.world_transform(id).map(|m| m.w_axis.truncate()).unwrap_or(DVec3::NAN)
    }

    #[test]
    fn stacks_vertically_by_default() {
        let mut scene = Scene::new();
        let stack = scene.insert(
            None,
            LinearLayout::with_props(&props(json!({ "alignment": "center-center" }))),
        );
        let top = scene.insert(Some(stack), square(0.25));
        let bottom = scene.insert(Some(stack), square(0.5));
        scene.layout();

        let node = scene.node::<LinearLayout>(stack).unwrap();
        assert_eq!(node.orientation(), Orientation::Vertical);
        assert_eq!(node.items_count(), 2);
        assert_eq!(node.get_size(false), Size::new(0.5, 0.75));
        assert_eq!(translation(&scene, top), DVec3::new(-0.125, 0.375, 0.0));
        assert_eq!(translation(&scene, bottom), DVec3::new(-0.25, 0.125, 0.0));
    }

    #[test]
    fn horizontal_stack_with_padding() {
        let mut scene = Scene::new();
        let stack = scene.insert(
            None,
            LinearLayout::with_props(&props(json!({
                "alignment": "center-center",
                "orientation": "horizontal",
                "defaultItemPadding": [0, 0.125, 0, 0.125],
            }))),
        );
        let left = scene.insert(Some(stack), square(0.25));
        let right = scene.insert(Some(stack), square(0.5));
        scene.layout();

        let node = scene.node::<LinearLayout>(stack).unwrap();
        assert_eq!(node.get_size(false), Size::new(1.25, 0.5));
        assert_eq!(translation(&scene, left), DVec3::new(-0.5, 0.125, 0.0));
        assert_eq!(translation(&scene, right), DVec3::new(0.0, 0.25, 0.0));
    }

    #[test]
    fn stack_alignment_moves_the_content() {
        let mut scene = Scene::new();
        let stack = scene.insert(None, LinearLayout::new());
        let only = scene.insert(Some(stack), square(0.5));
        scene.layout();
        // Top-left aligned: the stack hangs right and down from its origin, like any node.
        let node = scene.node::<LinearLayout>(stack).unwrap();
        assert_eq!(node.base().content_offset(), DVec3::new(0.25, -0.25, 0.0));
        assert_eq!(translation(&scene, only), DVec3::ZERO);
    }

    #[test]
    fn same_orientation_keeps_layout() {
        let mut stack = LinearLayout::new();
        settle(&mut stack);
        stack.update(&props(json!({ "orientation": "vertical" })));
        assert!(!stack.is_layout_needed());
        stack.update(&props(json!({ "orientation": "horizontal" })));
        assert!(stack.is_layout_needed());
        settle(&mut stack);
        stack.update(&props(json!({ "defaultItemAlignment": "bottom-right" })));
        assert!(stack.is_layout_needed());
        assert_eq!(stack.default_item_alignment(), Alignment::BottomRight);
    }
}
