// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size, Vec2};
use magicscript_math::{Alignment, scale_size};
use magicscript_props::Props;
use magicscript_scene::{
    Component, HitTestMode, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase, NodeConfig,
};

/// A container whose extent is whatever its children cover (`UiGroup`).
///
/// The group owns no content of its own, so it never moves its pivot and is never hit
/// itself; ray tests go straight to the children.
#[derive(Debug)]
pub struct Group {
    base: NodeBase,
    union: Rect,
    items_count: usize,
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

impl Group {
    /// An empty group.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// An empty group. Groups take nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::locked(Alignment::CenterCenter),
            union: Rect::ZERO,
            items_count: 0,
        };
        node.setup_node();
        node
    }

    /// A group built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Number of children at the last layout pass.
    pub fn items_count(&self) -> usize {
        self.items_count
    }
}

impl Measurable for Group {
    fn calculate_size(&self, cx: &LayoutCx<'_>) -> Size {
        cx.union_bounds().map_or(Size::ZERO, |r| r.size())
    }
}

impl Layoutable for Group {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_pivot(&mut self) {}

    fn update_layout(&mut self, cx: &LayoutCx<'_>) {
        self.union = cx.union_bounds().unwrap_or(Rect::ZERO);
        self.items_count = cx.children().len();
    }

    fn get_bounds(&self, parent_space: bool, scaled: bool) -> Rect {
        let mut rect = self.union;
        if scaled {
            let size = scale_size(rect.size(), self.base.local_scale());
            let scale = self.base.local_scale();
            rect = Rect::from_origin_size((rect.x0 * scale.x, rect.y0 * scale.y), size);
        }
        if parent_space {
            let position = self.base.local_position();
            rect = rect + Vec2::new(position.x, position.y);
        }
        rect
    }
}

impl HitTestable for Group {
    fn hit_test_mode(&self) -> HitTestMode {
        HitTestMode::ChildrenOnly
    }
}

impl Component for Group {
    fn kind(&self) -> &'static str {
        "UiGroup"
    }
}
