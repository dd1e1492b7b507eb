// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use magicscript_math::union_rects;

use crate::types::{ChildLayout, ChildRole, NodeId};

/// What a node can see of its children while it is measured and laid out.
///
/// The scene lays children out first and hands the parent one [`ChildLayout`] per child, in
/// insertion order. A node measured outside a scene sees no children.
#[derive(Copy, Clone, Debug)]
pub struct LayoutCx<'a> {
    children: &'a [ChildLayout],
}

impl<'a> LayoutCx<'a> {
    /// Context over already laid-out children.
    pub const fn new(children: &'a [ChildLayout]) -> Self {
        Self { children }
    }

    /// Context with no children.
    pub const fn detached() -> LayoutCx<'static> {
        LayoutCx { children: &[] }
    }

    /// Every child, in insertion order.
    pub fn children(&self) -> &'a [ChildLayout] {
        self.children
    }

    /// Summary for one child.
    pub fn child(&self, id: NodeId) -> Option<&'a ChildLayout> {
        self.children.iter().find(|c| c.id == id)
    }

    /// First child playing `role`.
    pub fn first_with_role(&self, role: ChildRole) -> Option<&'a ChildLayout> {
        self.children.iter().find(|c| c.role == role)
    }

    /// Union of every child's parent-space bounds.
    pub fn union_bounds(&self) -> Option<Rect> {
        union_rects(self.children.iter().map(|c| c.bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    fn summary(idx: u32, bounds: Rect) -> ChildLayout {
        ChildLayout {
            id: NodeId::new(idx, 1),
            role: ChildRole::Content,
            visible: true,
            size: bounds.size(),
            bounds,
        }
    }

    #[test]
    fn detached_has_no_children() {
        let cx = LayoutCx::detached();
        assert!(cx.children().is_empty());
        assert_eq!(cx.union_bounds(), None);
    }

    #[test]
    fn union_covers_all_children() {
        let children = [
            summary(0, Rect::new(-1.0, -1.0, 0.0, 0.0)),
            summary(1, Rect::new(0.5, 0.5, 2.0, 1.0)),
        ];
        let cx = LayoutCx::new(&children);
        assert_eq!(cx.union_bounds(), Some(Rect::new(-1.0, -1.0, 2.0, 1.0)));
        assert_eq!(cx.child(NodeId::new(1, 1)).map(|c| c.size), Some(Size::new(1.5, 0.5)));
        assert!(cx.child(NodeId::new(1, 2)).is_none(), "generation must match");
    }
}
