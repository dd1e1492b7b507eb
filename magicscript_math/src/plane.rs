// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::{DMat4, DVec3, DVec4};

use crate::{EPSILON, Ray};

/// An oriented plane through `center` with unit `normal`.
///
/// The side the normal points to is "in front". Clip planes keep what is in front.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    /// Any point on the plane.
    pub center: DVec3,
    /// Unit normal.
    pub normal: DVec3,
}

impl Plane {
    /// Create a plane; `normal` is normalized.
    pub fn new(center: DVec3, normal: DVec3) -> Self {
        Self {
            center,
            normal: normal.normalize_or_zero(),
        }
    }

    /// Plane from the coefficients `(a, b, c, d)` of `a*x + b*y + c*z + d = 0`.
    pub fn from_coefficients(v: DVec4) -> Self {
        let n = v.truncate();
        let len_sq = n.length_squared();
        if len_sq <= 0.0 {
            return Self {
                center: DVec3::ZERO,
                normal: DVec3::ZERO,
            };
        }
        Self::new(n * (-v.w / len_sq), n)
    }

    /// Coefficients `(a, b, c, d)` with a unit normal.
    pub fn coefficients(&self) -> DVec4 {
        self.normal.extend(-self.normal.dot(self.center))
    }

    /// Signed distance from `point` to the plane, positive in front.
    pub fn distance_to_point(&self, point: DVec3) -> f64 {
        self.normal.dot(point - self.center)
    }

    /// Whether `point` lies strictly in front of the plane.
    pub fn is_point_in_front(&self, point: DVec3) -> bool {
        self.distance_to_point(point) > 0.0
    }

    /// Whether `point` is kept by this plane when used as a clip plane.
    ///
    /// Points on the plane (within [`EPSILON`]) are kept.
    pub fn keeps(&self, point: DVec3) -> bool {
        self.distance_to_point(point) >= -EPSILON
    }

    /// Intersection of the ray segment with the plane.
    ///
    /// Returns `None` when the segment is parallel to the plane or does not reach it.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<DVec3> {
        let u = ray.end() - ray.begin;
        let w = ray.begin - self.center;
        let d = self.normal.dot(u);
        let n = -self.normal.dot(w);
        if (-EPSILON..=EPSILON).contains(&d) {
            return None;
        }
        let s = n / d;
        if !(0.0..=1.0).contains(&s) {
            return None;
        }
        Some(ray.begin + u * s)
    }

    /// Map the plane through an affine `transform`.
    pub fn transformed(&self, transform: &DMat4) -> Self {
        let normal = transform.inverse().transpose().transform_vector3(self.normal);
        Self::new(transform.transform_point3(self.center), normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_point() {
        let plane = Plane::new(DVec3::new(0.5, -0.5, 0.5), DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(plane.distance_to_point(DVec3::new(-1.0, 2.0, 3.0)), 2.5);
    }

    #[test]
    fn point_on_plane_is_not_in_front() {
        let plane = Plane::new(DVec3::ZERO, DVec3::Z);
        assert!(!plane.is_point_in_front(DVec3::new(4.0, -2.0, 0.0)));
        assert!(plane.keeps(DVec3::new(4.0, -2.0, 0.0)));
        assert!(plane.is_point_in_front(DVec3::new(0.0, 0.0, 0.1)));
        assert!(!plane.keeps(DVec3::new(0.0, 0.0, -0.1)));
    }

    #[test]
    fn coefficients_round_trip() {
        let v = DVec4::new(0.0, -1.0, 0.0, 0.75);
        let plane = Plane::from_coefficients(v);
        assert_eq!(plane.normal, DVec3::NEG_Y);
        assert_eq!(plane.center, DVec3::new(0.0, 0.75, 0.0));
        assert_eq!(plane.coefficients(), v);
    }

    #[test]
    fn ray_too_short_misses() {
        let plane = Plane::new(DVec3::ZERO, DVec3::Z);
        let ray = Ray::new(DVec3::new(0.0, 0.0, 2.0), DVec3::NEG_Z, 1.0);
        assert!(plane.intersect_ray(&ray).is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        let plane = Plane::new(DVec3::ZERO, DVec3::Z);
        let ray = Ray::new(DVec3::new(0.0, 0.0, 1.0), DVec3::X, 10.0);
        assert!(plane.intersect_ray(&ray).is_none());
    }

    #[test]
    fn translated_plane() {
        let plane = Plane::new(DVec3::ZERO, DVec3::X);
        let moved = plane.transformed(&DMat4::from_translation(DVec3::new(2.0, 0.0, 0.0)));
        assert_eq!(moved.distance_to_point(DVec3::new(3.0, 0.0, 0.0)), 1.0);
        assert_eq!(moved.normal, DVec3::X);
    }
}
