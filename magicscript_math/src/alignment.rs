// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The 9-way alignment anchor.

use kurbo::Vec2;

/// Anchor controlling where a node's measured box sits relative to its local origin.
///
/// The vertical half comes first, matching the script-side tokens (`"top-left"`,
/// `"center-center"`, ...). Local space is Y-up: "top" means the box hangs below
/// the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Origin at the top-left corner.
    #[default]
    TopLeft,
    /// Origin at the middle of the top edge.
    TopCenter,
    /// Origin at the top-right corner.
    TopRight,
    /// Origin at the middle of the left edge.
    CenterLeft,
    /// Origin at the center.
    CenterCenter,
    /// Origin at the middle of the right edge.
    CenterRight,
    /// Origin at the bottom-left corner.
    BottomLeft,
    /// Origin at the middle of the bottom edge.
    BottomCenter,
    /// Origin at the bottom-right corner.
    BottomRight,
}

impl Alignment {
    /// Every alignment, row by row.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::CenterCenter,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// The script-side token for this alignment.
    pub const fn token(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::CenterLeft => "center-left",
            Self::CenterCenter => "center-center",
            Self::CenterRight => "center-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Parse a script-side token. Unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.token() == token)
    }

    /// Direction, in units of the node's size, by which content is shifted from the origin.
    ///
    /// Content is laid out centered on the content origin, so a top-left aligned node
    /// moves its content half a width right and half a height down.
    pub const fn shift_direction(self) -> Vec2 {
        match self {
            Self::TopLeft => Vec2::new(0.5, -0.5),
            Self::TopCenter => Vec2::new(0.0, -0.5),
            Self::TopRight => Vec2::new(-0.5, -0.5),
            Self::CenterLeft => Vec2::new(0.5, 0.0),
            Self::CenterCenter => Vec2::new(0.0, 0.0),
            Self::CenterRight => Vec2::new(-0.5, 0.0),
            Self::BottomLeft => Vec2::new(0.5, 0.5),
            Self::BottomCenter => Vec2::new(0.0, 0.5),
            Self::BottomRight => Vec2::new(-0.5, 0.5),
        }
    }

    /// Offset, in units of the node's size, from the origin to the minimum corner of its bounds.
    pub const fn bounds_offset(self) -> Vec2 {
        match self {
            Self::TopLeft => Vec2::new(0.0, -1.0),
            Self::TopCenter => Vec2::new(-0.5, -1.0),
            Self::TopRight => Vec2::new(-1.0, -1.0),
            Self::CenterLeft => Vec2::new(0.0, -0.5),
            Self::CenterCenter => Vec2::new(-0.5, -0.5),
            Self::CenterRight => Vec2::new(-1.0, -0.5),
            Self::BottomLeft => Vec2::new(0.0, 0.0),
            Self::BottomCenter => Vec2::new(-0.5, 0.0),
            Self::BottomRight => Vec2::new(-1.0, 0.0),
        }
    }
}
