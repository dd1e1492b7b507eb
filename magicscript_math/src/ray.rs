// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::{DMat4, DVec3};

use crate::EPSILON;

/// A finite ray: `begin + direction * t` for `t` in `[0, length]`.
///
/// `direction` is usually normalized, but nothing here depends on it: a ray moved
/// into a scaled local space keeps its `length` and carries the scale in `direction`,
/// so [`Ray::end`] still maps to the same physical point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Start point.
    pub begin: DVec3,
    /// Direction of travel.
    pub direction: DVec3,
    /// Extent along `direction`.
    pub length: f64,
}

impl Ray {
    /// Create a ray from its parts.
    pub const fn new(begin: DVec3, direction: DVec3, length: f64) -> Self {
        Self {
            begin,
            direction,
            length,
        }
    }

    /// Ray from `begin` to `end` with a normalized direction.
    pub fn between(begin: DVec3, end: DVec3) -> Self {
        let delta = end - begin;
        Self::new(begin, delta.normalize_or_zero(), delta.length())
    }

    /// End point of the segment.
    pub fn end(&self) -> DVec3 {
        self.begin + self.direction * self.length
    }

    /// Map the ray through `transform` (points as points, direction as a vector).
    pub fn transformed(&self, transform: &DMat4) -> Self {
        Self::new(
            transform.transform_point3(self.begin),
            transform.transform_vector3(self.direction),
            self.length,
        )
    }

    /// Point on this ray's line closest to the line of `other`.
    ///
    /// Returns `None` when the lines are (nearly) parallel.
    pub fn closest_point_to(&self, other: &Self) -> Option<DVec3> {
        let n = self.direction.cross(other.direction);
        let n2 = other.direction.cross(n);
        let s2 = self.direction.dot(n2);
        if (-EPSILON..=EPSILON).contains(&s2) {
            return None;
        }
        let s1 = (other.begin - self.begin).dot(n2);
        Some(self.begin + self.direction * (s1 / s2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_point() {
        let ray = Ray::new(DVec3::new(1.0, 0.0, 0.0), DVec3::Y, 2.5);
        assert_eq!(ray.end(), DVec3::new(1.0, 2.5, 0.0));
    }

    #[test]
    fn between_normalizes() {
        let ray = Ray::between(DVec3::ZERO, DVec3::new(0.0, 0.0, -4.0));
        assert_eq!(ray.direction, DVec3::NEG_Z);
        assert_eq!(ray.length, 4.0);
    }

    #[test]
    fn closest_point_on_skew_lines() {
        let axis = Ray::new(DVec3::new(-1.0, 0.0, 0.0), DVec3::X, 2.0);
        let pointer = Ray::new(DVec3::new(0.3, 0.2, 5.0), DVec3::NEG_Z, 10.0);
        let p = axis.closest_point_to(&pointer).unwrap();
        assert!((p - DVec3::new(0.3, 0.0, 0.0)).length() < 1e-9, "{p:?}");
    }

    #[test]
    fn parallel_lines_have_no_closest_point() {
        let a = Ray::new(DVec3::ZERO, DVec3::X, 1.0);
        let b = Ray::new(DVec3::Y, DVec3::X, 1.0);
        assert!(a.closest_point_to(&b).is_none());
    }

    #[test]
    fn transform_keeps_length_and_scales_direction() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X, 3.0);
        let scaled = ray.transformed(&DMat4::from_scale(DVec3::splat(2.0)));
        assert_eq!(scaled.length, 3.0);
        assert_eq!(scaled.end(), DVec3::new(6.0, 0.0, 0.0));
    }
}
