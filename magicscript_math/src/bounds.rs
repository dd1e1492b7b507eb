// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::{DVec3, DVec4};
use kurbo::{Rect, Size};

use crate::Plane;

/// A 3D box describing a scroll viewport in its owner's local space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollBounds {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl ScrollBounds {
    /// Create bounds from two corners.
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Center of the box.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis.
    pub fn extent(&self) -> DVec3 {
        self.max - self.min
    }

    /// Extent of the XY face.
    pub fn size(&self) -> Size {
        let e = self.extent();
        Size::new(e.x, e.y)
    }

    /// XY face as a rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.min.x, self.min.y, self.max.x, self.max.y)
    }

    /// The six half-space planes whose intersection is the box.
    ///
    /// Order: min x, max x, min y, max y, min z, max z. Every normal points inward.
    pub fn clipping_planes(&self) -> [Plane; 6] {
        let (min, max) = (self.min, self.max);
        [
            Plane::from_coefficients(DVec4::new(1.0, 0.0, 0.0, -min.x)),
            Plane::from_coefficients(DVec4::new(-1.0, 0.0, 0.0, max.x)),
            Plane::from_coefficients(DVec4::new(0.0, 1.0, 0.0, -min.y)),
            Plane::from_coefficients(DVec4::new(0.0, -1.0, 0.0, max.y)),
            Plane::from_coefficients(DVec4::new(0.0, 0.0, 1.0, -min.z)),
            Plane::from_coefficients(DVec4::new(0.0, 0.0, -1.0, max.z)),
        ]
    }
}
