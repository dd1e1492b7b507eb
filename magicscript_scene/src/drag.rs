// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping pointer rays onto a draggable node's axis.

use glam::DVec3;
use magicscript_math::{EPSILON, Ray, clamp};

use crate::traits::Draggable;
use crate::types::NodeId;

/// An in-progress drag on one node.
///
/// Created by [`Scene::begin_drag`](crate::Scene::begin_drag); each
/// [`Scene::drag`](crate::Scene::drag) measures pointer travel from where the drag began, so
/// the value follows the pointer without jumping to it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSession {
    /// The dragged node.
    pub node: NodeId,
    pub(crate) begin_point: DVec3,
    pub(crate) begin_value: f64,
}

impl DragSession {
    /// The node's value when the drag began.
    pub fn begin_value(&self) -> f64 {
        self.begin_value
    }
}

/// Point on the node's drag axis closest to a pointer ray given in node local space.
pub(crate) fn axis_point(draggable: &dyn Draggable, local_ray: &Ray) -> Option<DVec3> {
    draggable.drag_axis().closest_point_to(local_ray)
}

/// Value reached by moving from `begin` to `point` along the axis.
pub(crate) fn dragged_value(
    draggable: &dyn Draggable,
    begin_point: DVec3,
    begin_value: f64,
    point: DVec3,
) -> Option<f64> {
    let range = draggable.drag_range();
    if range <= EPSILON {
        return None;
    }
    let direction = draggable.drag_axis().direction.normalize_or_zero();
    let delta = (point - begin_point).dot(direction) / range;
    Some(clamp(begin_value + delta, 0.0, 1.0))
}
