// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::DVec3;
use kurbo::{Rect, Size, Vec2};
use magicscript_math::bounding_rect_xy;
use magicscript_props::{Color, Props};
use magicscript_scene::{
    Component, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase, NodeConfig,
};

/// A polyline through a list of points (`UiLine`).
#[derive(Debug)]
pub struct Line {
    base: NodeBase,
    points: Vec<DVec3>,
    color: Color,
    extent: Rect,
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Line {
    /// A white line with no points.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// A white line with no points. Lines take nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::default(),
            points: Vec::new(),
            color: Color::WHITE,
            extent: Rect::ZERO,
        };
        node.setup_node();
        node
    }

    /// A line built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Points, in local space.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Replace the points.
    pub fn set_points(&mut self, points: Vec<DVec3>) {
        if self.points != points {
            self.points = points;
            self.set_needs_layout();
        }
    }

    /// Line color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Segments between consecutive points.
    pub fn segments(&self) -> impl Iterator<Item = (DVec3, DVec3)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

impl Measurable for Line {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        bounding_rect_xy(&self.points).map_or(Size::ZERO, |r| r.size())
    }
}

impl Layoutable for Line {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_pivot(&mut self) {}

    fn update_layout(&mut self, _cx: &LayoutCx<'_>) {
        self.extent = bounding_rect_xy(&self.points).unwrap_or(Rect::ZERO);
    }

    fn get_bounds(&self, parent_space: bool, scaled: bool) -> Rect {
        let mut rect = if self.is_layout_needed() {
            bounding_rect_xy(&self.points).unwrap_or(Rect::ZERO)
        } else {
            self.extent
        };
        if scaled {
            let scale = self.base.local_scale();
            rect = Rect::new(
                rect.x0 * scale.x,
                rect.y0 * scale.y,
                rect.x1 * scale.x,
                rect.y1 * scale.y,
            )
            .abs();
        }
        if parent_space {
            let position = self.base.local_position();
            rect = rect + Vec2::new(position.x, position.y);
        }
        rect
    }
}

impl HitTestable for Line {}

impl Component for Line {
    fn kind(&self) -> &'static str {
        "UiLine"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(points) = props.vec3_list("points") {
            self.set_points(points);
        }
        if let Some(color) = props.color("color") {
            self.color = color;
        }
    }
}
