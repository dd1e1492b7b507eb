// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::DVec3;
use kurbo::{Rect, Size};

/// Union of all rectangles, or `None` when there are none.
pub fn union_rects(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    let mut it = rects.into_iter();
    let first = it.next()?;
    Some(it.fold(first, |acc, r| acc.union(r)))
}

/// Bounding rectangle of the XY projection of `points`, or `None` when empty.
pub fn bounding_rect_xy(points: &[DVec3]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let seed = Rect::new(first.x, first.y, first.x, first.y);
    Some(rest.iter().fold(seed, |acc, p| {
        Rect::new(
            acc.x0.min(p.x),
            acc.y0.min(p.y),
            acc.x1.max(p.x),
            acc.y1.max(p.y),
        )
    }))
}

/// `size` multiplied by the XY components of `scale`.
pub fn scale_size(size: Size, scale: DVec3) -> Size {
    Size::new(size.width * scale.x, size.height * scale.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_of_nothing_is_none() {
        assert_eq!(union_rects(core::iter::empty()), None);
    }

    #[test]
    fn union_of_overlapping() {
        let u = union_rects([
            Rect::new(-0.5, -0.5, 0.5, 0.5),
            Rect::new(0.0, 0.0, 1.0, 1.0),
        ]);
        assert_eq!(u, Some(Rect::new(-0.5, -0.5, 1.0, 1.0)));
    }

    #[test]
    fn bounding_rect_ignores_z() {
        let r = bounding_rect_xy(&[
            DVec3::new(0.0, 0.0, 5.0),
            DVec3::new(0.25, -0.5, -3.0),
            DVec3::new(-0.5, 0.5, 0.0),
        ]);
        assert_eq!(r, Some(Rect::new(-0.5, -0.5, 0.25, 0.5)));
        assert_eq!(bounding_rect_xy(&[]), None);
    }

    #[test]
    fn scaled() {
        assert_eq!(
            scale_size(Size::new(1.0, 2.0), DVec3::new(0.5, 2.0, 9.0)),
            Size::new(0.5, 4.0)
        );
    }
}
