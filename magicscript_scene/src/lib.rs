// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MagicScript Scene: the retained tree MagicScript UI nodes live in.
//!
//! Each UI node measures itself, arranges its internal geometry, and takes part in hit
//! testing, dragging and focus. This crate defines the shared parts: the per-node state, the
//! capability traits node kinds implement, and the arena that owns them.
//!
//! ## The layout protocol
//!
//! Every node carries a dirty flag. Property setters that can change a node's size or the
//! arrangement of its content set it, and only when the value actually changes; setters that
//! only touch appearance leave it alone. A layout pass then visits dirty nodes children first:
//!
//! 1. [`Measurable::calculate_size`] computes the intrinsic size from the node's fields and,
//!    for containers, its already laid-out children;
//! 2. [`Layoutable::update_pivot`] moves the content origin to where the node's
//!    [`Alignment`](magicscript_math::Alignment) puts it;
//! 3. [`Layoutable::update_layout`] arranges internal geometry for the new size;
//! 4. the flag is cleared, so a second call does nothing.
//!
//! ## Where things live
//!
//! - [`NodeBase`]: transform, alignment, flags, layout cache, focus state, and the outboxes a
//!   node queues events, host requests and child commands into.
//! - [`Measurable`], [`Layoutable`], [`HitTestable`], [`Focusable`], [`Draggable`]: small
//!   capability traits. A node implements the ones it needs.
//! - [`Component`]: what the scene needs to own a node: property updates, ticks, child
//!   management, activation, resource delivery.
//! - [`Scene`]: generational arena with the layout pass, clip plane propagation, ray hit
//!   testing, drag sessions, the focus coordinator, and the event and request queues.
//!
//! Key operations:
//! - [`Scene::insert`] → [`NodeId`]; [`Scene::add_child`] / [`Scene::remove_child`] /
//!   [`Scene::remove`].
//! - [`Scene::update`] applies a [`Props`] patch; [`Scene::layout`] settles the tree.
//! - [`Scene::hit_test`] / [`Scene::dragging_hit_test`], then [`Scene::begin_drag`] and
//!   [`Scene::drag`].
//! - [`Scene::request_focus`] / [`Scene::clear_focus`], [`Scene::activate`], and the long
//!   press pair.
//! - [`Scene::tick`] advances animations; [`Scene::complete_load`] delivers resources.
//! - [`Scene::drain_events`] and [`Scene::drain_requests`] hand out what nodes queued.
//!
//! ## Coordinates
//!
//! Local space is Y-up with content on the plane `z = 0`, facing `+Z`. A node's local matrix is
//! its translation, rotation and scale followed by the inverse of its anchor position. A parent
//! may move a child's origin (its content offset, or a scroll view's proxy offset), so world
//! transforms are composed through [`Component::child_offset`].
//!
//! ## Errors
//!
//! Structural misuse (stale ids, cycles, double attachment) is reported as [`SceneError`].
//! Malformed properties are never errors. Setting a node up twice is a programmer error and
//! panics.

mod base;
mod config;
mod drag;
mod error;
mod event;
mod layout;
mod scene;
mod traits;
mod types;

pub use base::NodeBase;
pub use config::NodeConfig;
pub use drag::DragSession;
pub use error::{ConfigError, LoadError, SceneError};
pub use event::{
    BrowseCommand, ChildCommand, HostRequest, LoadTicket, NodeEvent, PlaybackCommand, Resource,
    ResourceKind,
};
pub use layout::LayoutCx;
pub use scene::Scene;
pub use traits::{Component, Draggable, Focusable, HitTestable, Layoutable, Measurable};
pub use types::{ChildInfo, ChildLayout, ChildRole, HitTestMode, NodeFlags, NodeId};

pub use magicscript_focus::{FocusChange, FocusResponse};
pub use magicscript_props::Props;
