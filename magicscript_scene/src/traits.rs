// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits implemented by node kinds.
//!
//! A node is a plain struct embedding a [`NodeBase`]. It implements the layout protocol
//! ([`Measurable`], [`Layoutable`]), hit testing ([`HitTestable`]) and the scene entry point
//! ([`Component`]); focus and drag support are opt-in through [`Focusable`] and [`Draggable`].

use core::any::Any;
use core::fmt::Debug;

use glam::DVec3;
use kurbo::{Insets, Rect, Size};
use magicscript_focus::FocusResponse;
use magicscript_math::{EPSILON, Plane, Ray, scale_size};
use magicscript_props::Props;

use crate::base::NodeBase;
use crate::error::LoadError;
use crate::event::{ChildCommand, LoadTicket, NodeEvent, Resource};
use crate::layout::LayoutCx;
use crate::types::{ChildInfo, ChildRole, HitTestMode, NodeId};

/// Intrinsic measurement.
pub trait Measurable {
    /// Size of the node given its current fields and, for containers, its children.
    ///
    /// Must not mutate anything; the result is cached by [`Layoutable::layout_if_needed_with`].
    fn calculate_size(&self, cx: &LayoutCx<'_>) -> Size;
}

/// The dirty-flag layout protocol.
pub trait Layoutable: Measurable {
    /// Shared node state.
    fn base(&self) -> &NodeBase;

    /// Shared node state, mutably.
    fn base_mut(&mut self) -> &mut NodeBase;

    /// Arrange internal geometry for the freshly measured size.
    fn update_layout(&mut self, _cx: &LayoutCx<'_>) {}

    /// Move the content origin so content sits where the alignment puts it.
    fn update_pivot(&mut self) {
        let size = self.get_size(false);
        let shift = self.base().alignment().shift_direction();
        self.base_mut().set_content_offset(DVec3::new(
            shift.x * size.width,
            shift.y * size.height,
            0.0,
        ));
    }

    /// Mark the node as needing layout.
    fn set_needs_layout(&mut self) {
        self.base_mut().set_needs_layout();
    }

    /// Whether a layout pass is pending.
    fn is_layout_needed(&self) -> bool {
        self.base().is_layout_needed()
    }

    /// Lay out a node that has no scene children. See [`Layoutable::layout_if_needed_with`].
    fn layout_if_needed(&mut self) -> bool {
        self.layout_if_needed_with(&LayoutCx::detached())
    }

    /// Measure, re-pivot and arrange the node if it is dirty.
    ///
    /// Returns `true` if work was done; a clean node is left untouched.
    fn layout_if_needed_with(&mut self, cx: &LayoutCx<'_>) -> bool {
        if !self.is_layout_needed() {
            return false;
        }
        let size = self.calculate_size(cx);
        self.base_mut().finish_measure(size);
        self.update_pivot();
        self.update_layout(cx);
        true
    }

    /// Cached size, optionally multiplied by the node's scale.
    ///
    /// A dirty node is measured on the spot without children.
    fn get_size(&self, scaled: bool) -> Size {
        let size = self
            .base()
            .cached_size()
            .unwrap_or_else(|| self.calculate_size(&LayoutCx::detached()));
        if scaled {
            scale_size(size, self.base().local_scale())
        } else {
            size
        }
    }

    /// Box of the node placed by its alignment.
    ///
    /// In parent space the box is moved by the node's local position.
    fn get_bounds(&self, parent_space: bool, scaled: bool) -> Rect {
        let size = self.get_size(scaled);
        let offset = self.base().alignment().bounds_offset();
        let (ox, oy) = if parent_space {
            let p = self.base().local_position();
            (p.x, p.y)
        } else {
            (0.0, 0.0)
        };
        Rect::from_origin_size(
            (ox + offset.x * size.width, oy + offset.y * size.height),
            size,
        )
    }

    /// Edges of the local bounds as insets from the origin: `y0` top, `x0` left, `y1` bottom,
    /// `x1` right.
    fn get_edge_insets(&self) -> Insets {
        let b = self.get_bounds(false, false);
        Insets::new(b.x0, b.y0, b.x1, b.y1)
    }
}

/// Ray queries against a node's own geometry.
pub trait HitTestable: Layoutable {
    /// How the node combines its own test with its children's.
    fn hit_test_mode(&self) -> HitTestMode {
        HitTestMode::SelfOnly
    }

    /// Order in which children are tested. Defaults to insertion order.
    fn hit_test_order(&self, children: &[NodeId]) -> Vec<NodeId> {
        children.to_vec()
    }

    /// Intersect a ray, already in node local space, with the node's own bounds on the
    /// plane `z = 0`. Edges count as inside.
    fn self_hit_test(&self, local_ray: &Ray) -> Option<DVec3> {
        let base = self.base();
        if base.skips_raycast() || !base.is_visible() {
            return None;
        }
        let point = Plane::new(DVec3::ZERO, DVec3::Z).intersect_ray(local_ray)?;
        let bounds = self.get_bounds(false, false);
        let inside = point.x >= bounds.x0 - EPSILON
            && point.x <= bounds.x1 + EPSILON
            && point.y >= bounds.y0 - EPSILON
            && point.y <= bounds.y1 + EPSILON;
        inside.then_some(point)
    }
}

/// Nodes that can hold input focus.
pub trait Focusable: Layoutable {
    /// Whether the node may take focus now.
    fn can_have_focus(&self) -> bool {
        false
    }

    /// Whether the node holds focus.
    fn has_focus(&self) -> bool {
        self.base().focus().has_focus()
    }

    /// Take focus, queueing [`NodeEvent::FocusGained`] on the transition.
    fn enter_focus(&mut self) -> FocusResponse {
        if self.base_mut().focus_mut().enter() {
            self.base_mut().emit(NodeEvent::FocusGained);
            self.on_focus_gained();
        }
        FocusResponse::Held
    }

    /// Give focus up, queueing [`NodeEvent::FocusLost`] on the transition.
    fn leave_focus(&mut self) {
        if self.base_mut().focus_mut().leave() {
            self.base_mut().emit(NodeEvent::FocusLost);
            self.on_focus_lost();
        }
    }

    /// Hook run after focus is gained.
    fn on_focus_gained(&mut self) {}

    /// Hook run after focus is lost.
    fn on_focus_lost(&mut self) {}
}

/// Nodes that map a drag gesture to a value in `[0, 1]`.
pub trait Draggable: Layoutable {
    /// Axis, in node local space, along which pointer movement is measured.
    fn drag_axis(&self) -> Ray;

    /// Distance along the axis, in local units, that moves the value from 0 to 1.
    fn drag_range(&self) -> f64;

    /// Current value.
    fn drag_value(&self) -> f64;

    /// Apply a dragged value. Implementations clamp and emit their change event.
    fn set_drag_value(&mut self, value: f64);
}

/// A node kind the [`Scene`](crate::Scene) can own.
pub trait Component: HitTestable + Any + Debug {
    /// Script-side kind name, such as `"UiButton"`.
    fn kind(&self) -> &'static str;

    /// One-time setup of internal geometry.
    ///
    /// # Panics
    ///
    /// Panics if the node was already set up.
    fn setup_node(&mut self) {
        self.base_mut().mark_setup();
    }

    /// Apply a property patch. Unknown or malformed keys are skipped.
    fn update(&mut self, props: &Props) {
        self.base_mut().apply_props(props);
    }

    /// Advance animations by `dt` seconds.
    fn tick(&mut self, _dt: f64) {}

    /// Role this node plays under a container.
    fn child_role(&self) -> ChildRole {
        ChildRole::Content
    }

    /// Decide whether to take a new child. Refusing leaves the child detached.
    fn accept_child(&mut self, _child: ChildInfo) -> bool {
        true
    }

    /// A child was detached or destroyed.
    fn child_removed(&mut self, _child: NodeId) {}

    /// Where a child's origin sits in this node's local space.
    fn child_offset(&self, _child: NodeId) -> DVec3 {
        self.base().content_offset()
    }

    /// Clip planes in this node's local space, applied to the subtree of the named child.
    fn clip_planes(&self) -> Option<(NodeId, &[Plane])> {
        None
    }

    /// Handle an instruction queued by the parent.
    fn apply_command(&mut self, command: &ChildCommand) {
        if let ChildCommand::SetVisible(visible) = *command {
            self.base_mut().set_visible(visible);
        }
    }

    /// Activate the node (select, tap).
    fn activate(&mut self) {
        self.base_mut().emit(NodeEvent::Activated);
    }

    /// Whether the node reacts to long presses.
    fn can_be_long_pressed(&self) -> bool {
        false
    }

    /// A long press began.
    fn long_press_started(&mut self) {}

    /// A long press ended.
    fn long_press_ended(&mut self) {}

    /// Deliver the result of a load this node requested.
    ///
    /// Returns `false` when the ticket is not the one the node is waiting for.
    fn complete_load(&mut self, _ticket: LoadTicket, _result: Result<Resource, LoadError>) -> bool {
        false
    }

    /// Release resources before the node is dropped; cancel in-flight work here.
    fn destroy(&mut self) {}

    /// Focus support, if any.
    fn as_focusable(&self) -> Option<&dyn Focusable> {
        None
    }

    /// Focus support, mutably.
    fn as_focusable_mut(&mut self) -> Option<&mut dyn Focusable> {
        None
    }

    /// Drag support, if any.
    fn as_draggable(&self) -> Option<&dyn Draggable> {
        None
    }

    /// Drag support, mutably.
    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        None
    }

    /// Local bounds to outline when debug drawing is on.
    fn debug_outline(&self) -> Option<Rect> {
        self.base()
            .is_debug()
            .then(|| self.get_bounds(false, false))
    }
}
