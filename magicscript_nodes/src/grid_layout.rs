// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::DVec3;
use kurbo::{Insets, Point, Size, Vec2};
use magicscript_math::Alignment;
use magicscript_props::Props;
use magicscript_scene::{
    ChildLayout, Component, HitTestMode, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase,
    NodeConfig, NodeId,
};

use crate::util::replace;

/// Row-major cell arrangement shared by [`GridLayout`] and
/// [`LinearLayout`](crate::LinearLayout).
///
/// Every column is as wide as its widest cell and every row as tall as its tallest one. A
/// cell is the child's scaled size plus the item padding. Children are placed in their cell
/// by the item alignment; their own alignment and local position are compensated for.
#[derive(Clone, Debug)]
pub(crate) struct Cells {
    columns: usize,
    rows: usize,
    alignment: Alignment,
    padding: Insets,
    skip_invisible: bool,
    placed: Vec<(NodeId, Vec2)>,
}

impl Cells {
    pub(crate) fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            alignment: Alignment::CenterCenter,
            padding: Insets::ZERO,
            skip_invisible: false,
            placed: Vec::new(),
        }
    }

    pub(crate) fn columns(&self) -> usize {
        self.columns
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    /// Returns whether either count changed.
    pub(crate) fn set_counts(&mut self, columns: usize, rows: usize) -> bool {
        let columns_changed = replace(&mut self.columns, columns);
        replace(&mut self.rows, rows) || columns_changed
    }

    pub(crate) fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub(crate) fn padding(&self) -> Insets {
        self.padding
    }

    pub(crate) fn skips_invisible(&self) -> bool {
        self.skip_invisible
    }

    /// Number of children placed by the last layout pass.
    pub(crate) fn items_count(&self) -> usize {
        self.placed.len()
    }

    /// Apply the item properties both layouts share. Returns whether any of them changed.
    pub(crate) fn update(&mut self, props: &Props) -> bool {
        let mut changed = false;
        if let Some(alignment) = props.token::<Alignment>("defaultItemAlignment") {
            changed |= replace(&mut self.alignment, alignment);
        }
        if let Some(padding) = props.padding("defaultItemPadding") {
            changed |= replace(&mut self.padding, padding);
        }
        if let Some(skip) = props.bool("skipInvisibleItems") {
            changed |= replace(&mut self.skip_invisible, skip);
        }
        changed
    }

    fn items<'a>(&self, cx: &LayoutCx<'a>) -> Vec<&'a ChildLayout> {
        cx.children()
            .iter()
            .filter(|c| c.visible || !self.skip_invisible)
            .collect()
    }

    /// Column widths and row heights for `items`.
    fn tracks(&self, items: &[&ChildLayout]) -> (Vec<f64>, Vec<f64>) {
        let count = items.len();
        if count == 0 {
            return (Vec::new(), Vec::new());
        }
        let rows = if self.columns > 0 {
            (count - 1) / self.columns + 1
        } else {
            self.rows.max(1)
        };
        let columns = if self.columns > 0 {
            self.columns
        } else {
            (count - 1) / rows + 1
        };
        let mut widths = vec![0.0_f64; columns];
        let mut heights = vec![0.0_f64; rows];
        for (index, item) in items.iter().enumerate() {
            let cell = self.cell_size(item.size);
            let (column, row) = (index % columns, index / columns);
            widths[column] = widths[column].max(cell.width);
            heights[row] = heights[row].max(cell.height);
        }
        (widths, heights)
    }

    fn cell_size(&self, size: Size) -> Size {
        let pad = self.padding;
        Size::new(size.width + pad.x0 + pad.x1, size.height + pad.y0 + pad.y1)
    }

    pub(crate) fn measure(&self, cx: &LayoutCx<'_>) -> Size {
        let (widths, heights) = self.tracks(&self.items(cx));
        Size::new(widths.iter().sum(), heights.iter().sum())
    }

    /// Place every item. The grid is centered on the content origin.
    pub(crate) fn arrange(&mut self, cx: &LayoutCx<'_>) {
        let items = self.items(cx);
        let (widths, heights) = self.tracks(&items);
        let size = Size::new(widths.iter().sum(), heights.iter().sum());
        let starts = |tracks: &[f64]| -> Vec<f64> {
            tracks
                .iter()
                .scan(0.0, |at, len| {
                    let start = *at;
                    *at += len;
                    Some(start)
                })
                .collect()
        };
        let (xs, ys) = (starts(&widths), starts(&heights));
        let pad = self.padding;
        let shift = self.alignment.shift_direction();

        self.placed.clear();
        for (index, item) in items.iter().enumerate() {
            let (column, row) = (index % widths.len(), index / widths.len());
            let inner = Size::new(
                widths[column] - pad.x0 - pad.x1,
                heights[row] - pad.y0 - pad.y1,
            );
            let center = Point::new(
                -0.5 * size.width + xs[column] + pad.x0 + 0.5 * inner.width,
                0.5 * size.height - ys[row] - pad.y0 - 0.5 * inner.height,
            );
            let target = center
                - Vec2::new(
                    shift.x * (inner.width - item.size.width),
                    shift.y * (inner.height - item.size.height),
                );
            self.placed.push((item.id, target - item.bounds.center()));
        }
    }

    /// Translation that moves `child` into its cell, if it was placed.
    pub(crate) fn offset(&self, child: NodeId) -> Option<Vec2> {
        self.placed
            .iter()
            .find_map(|&(id, offset)| (id == child).then_some(offset))
    }

    pub(crate) fn forget(&mut self, child: NodeId) {
        self.placed.retain(|&(id, _)| id != child);
    }
}

/// A container placing its children in a grid of rows and columns (`UiGridLayout`).
///
/// With `columns` set, rows are added as needed. Otherwise `rows` is fixed (at least one)
/// and columns are added as needed.
#[derive(Debug)]
pub struct GridLayout {
    base: NodeBase,
    cells: Cells,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl GridLayout {
    /// An empty single-row grid.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// An empty grid. Grids take nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::default(),
            cells: Cells::new(0, 0),
        };
        node.setup_node();
        node
    }

    /// A grid built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Requested column count; 0 lets the row count decide.
    pub fn columns(&self) -> usize {
        self.cells.columns()
    }

    /// Fix the column count.
    pub fn set_columns(&mut self, columns: usize) {
        if self.cells.set_counts(columns, self.cells.rows()) {
            self.set_needs_layout();
        }
    }

    /// Requested row count, used while no column count is set.
    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    /// Fix the row count.
    pub fn set_rows(&mut self, rows: usize) {
        if self.cells.set_counts(self.cells.columns(), rows) {
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

    /// Whether hidden children give up their cell.
    pub fn skips_invisible_items(&self) -> bool {
        self.cells.skips_invisible()
    }

    /// Number of children placed by the last layout pass.
    pub fn items_count(&self) -> usize {
        self.cells.items_count()
    }
}

impl Measurable for GridLayout {
    fn calculate_size(&self, cx: &LayoutCx<'_>) -> Size {
        self.cells.measure(cx)
    }
}

impl Layoutable for GridLayout {
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

impl HitTestable for GridLayout {
    fn hit_test_mode(&self) -> HitTestMode {
        HitTestMode::ChildrenOnly
    }
}

impl Component for GridLayout {
    fn kind(&self) -> &'static str {
        "UiGridLayout"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        let count = |key: &str| props.int(key).map(|n| usize::try_from(n).unwrap_or(0));
        let columns = count("columns").unwrap_or(self.cells.columns());
        let rows = count("rows").unwrap_or(self.cells.rows());
        let counted = self.cells.set_counts(columns, rows);
        if self.cells.update(props) || counted {
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
    use magicscript_math::Ray;
    use magicscript_scene::Scene;
    use serde_json::json;

    // Spinners are top-left aligned squares.
    fn square(side: f64) -> Spinner {
        Spinner::with_props(&props(json!({ "height": side })))
    }

    fn centered_grid(extra: serde_json::Value) -> GridLayout {
        let mut grid = GridLayout::with_props(&props(json!({ "alignment": "center-center" })));
        grid.update(&props(extra));
        grid
    }

    fn translation(scene: &Scene, id: NodeId) -> DVec3 {
        scene.world_transform(id).map(|m| m.w_axis.truncate()).unwrap_or(DVec3::NAN)
    }

    #[test]
    fn empty_grid_is_zero() {
        let mut scene = Scene::new();
        let grid = scene.insert(None, GridLayout::new());
        scene.layout();
        let node = scene.node::<GridLayout>(grid).unwrap();
        assert_eq!(node.get_size(false), Size::ZERO);
        assert_eq!(node.items_count(), 0);
        assert_eq!(node.default_item_alignment(), Alignment::CenterCenter);
    }

    #[test]
    fn columns_are_as_wide_as_their_widest_cell() {
        let mut scene = Scene::new();
        let grid = scene.insert(None, centered_grid(json!({ "columns": 2 })));
        let first = scene.insert(Some(grid), square(0.25));
        let second = scene.insert(Some(grid), square(0.5));
        let third = scene.insert(Some(grid), square(0.125));
        scene.layout();

        let node = scene.node::<GridLayout>(grid).unwrap();
        assert_eq!(node.items_count(), 3);
        assert_eq!(node.get_size(false), Size::new(0.75, 0.625));
        // Each square ends up centered in its cell.
        assert_eq!(translation(&scene, first), DVec3::new(-0.375, 0.1875, 0.0));
        assert_eq!(translation(&scene, second), DVec3::new(-0.125, 0.3125, 0.0));
        assert_eq!(translation(&scene, third), DVec3::new(-0.3125, -0.1875, 0.0));
    }

    #[test]
    fn rows_fix_the_row_count() {
        let mut scene = Scene::new();
        let grid = scene.insert(None, centered_grid(json!({ "rows": 2 })));
        for _ in 0..3 {
            scene.insert(Some(grid), square(0.25));
        }
        scene.layout();
        let node = scene.node::<GridLayout>(grid).unwrap();
        assert_eq!(node.get_size(false), Size::new(0.5, 0.5));

        scene
            .update(grid, &props(json!({ "columns": 3 })))
            .unwrap();
        scene.layout();
        let node = scene.node::<GridLayout>(grid).unwrap();
        assert_eq!(node.get_size(false), Size::new(0.75, 0.25), "columns win over rows");
    }

    #[test]
    fn item_alignment_moves_children_inside_their_cell() {
        let mut scene = Scene::new();
        let grid = scene.insert(
            None,
            centered_grid(json!({ "columns": 2, "defaultItemAlignment": "top-left" })),
        );
        scene.insert(Some(grid), square(0.25));
        scene.insert(Some(grid), square(0.5));
        let third = scene.insert(Some(grid), square(0.125));
        scene.layout();
        // Its column is 0.25 wide, so the square hugs the left edge at -0.375.
        assert_eq!(translation(&scene, third), DVec3::new(-0.375, -0.1875, 0.0));
    }

    #[test]
    fn own_position_and_alignment_are_ignored() {
        let mut scene = Scene::new();
        let grid = scene.insert(None, centered_grid(json!({ "columns": 1 })));
        let child = scene.insert(
            Some(grid),
            Spinner::with_props(&props(json!({
                "height": 0.5,
                "localPosition": [3, 4, 0],
                "alignment": "bottom-right",
            }))),
        );
        scene.layout();
        let node = scene.node::<GridLayout>(grid).unwrap();
        assert_eq!(node.get_size(false), Size::new(0.5, 0.5));
        let world = scene.world_transform(child).unwrap();
        let spinner = scene.node::<Spinner>(child).unwrap();
        let center = spinner.get_bounds(false, false).center();
        let placed = world.transform_point3(DVec3::new(center.x, center.y, 0.0));
        assert_eq!(placed, DVec3::ZERO);
    }

    #[test]
    fn invisible_items_keep_their_cell_unless_skipped() {
        let mut scene = Scene::new();
        let grid = scene.insert(None, centered_grid(json!({ "columns": 1 })));
        scene.insert(Some(grid), square(0.25));
        scene.insert(
            Some(grid),
            Spinner::with_props(&props(json!({ "height": 0.5, "visible": false }))),
        );
        scene.layout();
        let node = scene.node::<GridLayout>(grid).unwrap();
        assert_eq!(node.items_count(), 2);
        assert_eq!(node.get_size(false), Size::new(0.5, 0.75));

        scene
            .update(grid, &props(json!({ "skipInvisibleItems": true })))
            .unwrap();
        scene.layout();
        let node = scene.node::<GridLayout>(grid).unwrap();
        assert_eq!(node.items_count(), 1);
        assert_eq!(node.get_size(false), Size::new(0.25, 0.25));
    }

    #[test]
    fn padding_widens_every_cell() {
        let mut scene = Scene::new();
        let grid = scene.insert(
            None,
            centered_grid(json!({ "columns": 2, "defaultItemPadding": [0.125, 0, 0.125, 0] })),
        );
        scene.insert(Some(grid), square(0.25));
        scene.insert(Some(grid), square(0.25));
        scene.layout();
        let node = scene.node::<GridLayout>(grid).unwrap();
        assert_eq!(node.get_size(false), Size::new(0.5, 0.5));
        assert_eq!(node.default_item_padding(), Insets::new(0.0, 0.125, 0.0, 0.125));
    }

    #[test]
    fn unchanged_settings_keep_layout() {
        let mut grid = GridLayout::with_props(&props(json!({ "columns": 2 })));
        settle(&mut grid);
        grid.update(&props(json!({ "columns": 2, "skipInvisibleItems": false })));
        assert!(!grid.is_layout_needed());
        grid.set_rows(3);
        assert!(grid.is_layout_needed());
        assert_eq!(grid.rows(), 3);
    }

    #[test]
    fn removing_a_child_repacks_the_grid() {
        let mut scene = Scene::new();
        let grid = scene.insert(None, centered_grid(json!({ "columns": 1 })));
        let first = scene.insert(Some(grid), square(0.25));
        let second = scene.insert(Some(grid), square(0.25));
        scene.layout();
        assert_eq!(translation(&scene, second), DVec3::new(-0.125, 0.0, 0.0));

        scene.remove(first).unwrap();
        scene.layout();
        let node = scene.node::<GridLayout>(grid).unwrap();
        assert_eq!(node.items_count(), 1);
        assert_eq!(translation(&scene, second), DVec3::new(-0.125, 0.125, 0.0));
    }

    #[test]
    fn hits_go_to_the_child_in_the_cell() {
        let mut scene = Scene::new();
        let grid = scene.insert(None, centered_grid(json!({ "columns": 2 })));
        let first = scene.insert(Some(grid), square(0.25));
        let second = scene.insert(Some(grid), square(0.5));
        scene.insert(Some(grid), square(0.125));
        scene.layout();

        let ray = |x: f64, y: f64| Ray::new(DVec3::new(x, y, 1.0), DVec3::NEG_Z, 10.0);
        assert_eq!(scene.hit_test(grid, &ray(-0.25, 0.0625)), Some(first));
        assert_eq!(scene.hit_test(grid, &ray(0.125, 0.0625)), Some(second));
        assert_eq!(scene.hit_test(grid, &ray(0.125, -0.25)), None, "empty cell");
    }
}
