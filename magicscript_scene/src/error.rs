// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::NodeId;

/// Structural errors reported by [`Scene`](crate::Scene).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The identifier does not refer to a live node.
    #[error("node {0:?} is not alive")]
    StaleNode(NodeId),
    /// A node cannot be its own child.
    #[error("node {0:?} cannot be attached to itself")]
    SelfAttachment(NodeId),
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },
    /// The child already has a parent; detach it first.
    #[error("node {child:?} is already attached to {parent:?}")]
    AlreadyAttached {
        /// The child.
        child: NodeId,
        /// Its current parent.
        parent: NodeId,
    },
}

/// Failure reported by the host for an asynchronous load.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// Nothing exists at the location.
    #[error("resource not found: {0}")]
    NotFound(String),
    /// The bytes could not be decoded as the expected kind.
    #[error("resource could not be decoded: {0}")]
    Decode(String),
    /// Transport or file system failure.
    #[error("resource transfer failed: {0}")]
    Io(String),
    /// The host dropped the load.
    #[error("resource load was cancelled")]
    Cancelled,
}

/// A [`NodeConfig`](crate::NodeConfig) document could not be read.
#[derive(Debug, thiserror::Error)]
#[error("invalid node configuration: {0}")]
pub struct ConfigError(#[from] serde_json::Error);
