// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, and child roles.

use kurbo::{Rect, Size};

/// Identifier for a node in a [`Scene`](crate::Scene) (generational).
///
/// A removed node's slot is reused with a bumped generation, so stale identifiers never
/// alias a newer node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Per-node switches shared by every node kind.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node and its subtree are drawn and can be hit.
        const VISIBLE      = 0b0000_0001;
        /// Node reacts to input.
        const ENABLED      = 0b0000_0010;
        /// Node is skipped by its own hit test (children still participate).
        const SKIP_RAYCAST = 0b0000_0100;
        /// Node exposes its bounds outline for debug drawing.
        const DEBUG        = 0b0000_1000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::ENABLED
    }
}

/// The role a node plays when attached to a container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChildRole {
    /// Ordinary content.
    #[default]
    Content,
    /// A scroll bar; scroll views keep at most one.
    ScrollBar,
}

/// What a container learns about a prospective child.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChildInfo {
    /// The child being attached.
    pub id: NodeId,
    /// Its role.
    pub role: ChildRole,
}

/// How a node composes its own hit test with its children's.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HitTestMode {
    /// Only the node's own bounds are tested.
    #[default]
    SelfOnly,
    /// Only children are tested, in order; the node itself never hits.
    ChildrenOnly,
    /// The node must be hit first; then children are tested in order, falling back to the node.
    SelfThenChildren,
}

/// Summary of a laid-out child, handed to its parent during the layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChildLayout {
    /// Child identifier.
    pub id: NodeId,
    /// Child role.
    pub role: ChildRole,
    /// Whether the child is visible.
    pub visible: bool,
    /// Child size, scaled.
    pub size: Size,
    /// Child bounds in the parent's content space, scaled.
    pub bounds: Rect,
}
