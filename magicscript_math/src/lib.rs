// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MagicScript Math: the small geometry vocabulary shared by MagicScript UI nodes.
//!
//! UI nodes live in a 3D scene but measure and arrange themselves on their local XY plane.
//! This crate keeps both halves in one place:
//!
//! - 2D measurement uses Kurbo ([`kurbo::Size`], [`kurbo::Rect`], [`kurbo::Vec2`]).
//! - 3D placement uses glam's double precision types ([`glam::DVec3`], [`glam::DQuat`], [`glam::DMat4`]),
//!   so both layers agree on `f64`.
//!
//! ## API overview
//!
//! - [`Alignment`]: the 9-way anchor with its pivot shift and bounds offset tables.
//! - [`Ray`]: a finite segment used for hit testing and drag projection.
//! - [`Plane`]: a half-space used for ray intersection and clipping.
//! - [`ScrollBounds`]: a 3D box describing a scroll viewport, and the six clip planes it implies.
//! - [`clamp`], [`union_rects`], [`bounding_rect_xy`], [`scale_size`]: helpers used by measurement code.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use magicscript_math::{Plane, Ray};
//!
//! let plane = Plane::new(DVec3::ZERO, DVec3::Z);
//! let ray = Ray::new(DVec3::new(0.25, 0.5, 1.0), DVec3::NEG_Z, 2.0);
//! let hit = plane.intersect_ray(&ray).unwrap();
//! assert!((hit - DVec3::new(0.25, 0.5, 0.0)).length() < 1e-9);
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library for floating point math.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating point math.
//!
//! This crate is `no_std`.

#![no_std]

mod alignment;
mod bounds;
mod plane;
mod ray;
mod rect;

pub use alignment::Alignment;
pub use bounds::ScrollBounds;
pub use plane::Plane;
pub use ray::Ray;
pub use rect::{bounding_rect_xy, scale_size, union_rects};

/// Tolerance used by the intersection and projection routines.
pub const EPSILON: f64 = 0.0001;

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: if `min > max` the result is `min`.
/// A NaN `value` yields `min`.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    let upper = if value > max { max } else { value };
    if upper >= min { upper } else { min }
}
