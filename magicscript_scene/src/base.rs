// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State shared by every node: transform, alignment, flags, layout cache, and outboxes.

use glam::{DMat4, DQuat, DVec3};
use kurbo::Size;
use magicscript_focus::FocusState;
use magicscript_math::Alignment;
use magicscript_props::Props;

use crate::event::{ChildCommand, HostRequest, LoadTicket, NodeEvent};
use crate::types::{NodeFlags, NodeId};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct LayoutState {
    needed: bool,
    size: Option<Size>,
    content_offset: DVec3,
}

/// The part of a node every node kind has.
///
/// Concrete nodes embed one and expose it through
/// [`Layoutable::base`](crate::Layoutable::base). Setters follow one rule: a value that
/// affects size or arrangement marks the node as needing layout, and only when it changes.
#[derive(Clone, Debug)]
pub struct NodeBase {
    name: Option<String>,
    anchor_position: DVec3,
    local_position: DVec3,
    local_rotation: DQuat,
    local_scale: DVec3,
    flags: NodeFlags,
    alignment: Alignment,
    alignment_locked: bool,
    layout: LayoutState,
    focus: FocusState,
    is_setup: bool,
    next_ticket: u64,
    events: Vec<NodeEvent>,
    requests: Vec<HostRequest>,
    commands: Vec<(NodeId, ChildCommand)>,
}

impl Default for NodeBase {
    fn default() -> Self {
        Self::new(Alignment::TopLeft)
    }
}

impl NodeBase {
    /// A base with a changeable alignment.
    pub fn new(alignment: Alignment) -> Self {
        Self {
            name: None,
            anchor_position: DVec3::ZERO,
            local_position: DVec3::ZERO,
            local_rotation: DQuat::IDENTITY,
            local_scale: DVec3::ONE,
            flags: NodeFlags::default(),
            alignment,
            alignment_locked: false,
            layout: LayoutState {
                needed: true,
                ..LayoutState::default()
            },
            focus: FocusState::default(),
            is_setup: false,
            next_ticket: 0,
            events: Vec::new(),
            requests: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// A base whose alignment is fixed; attempts to change it are ignored.
    pub fn locked(alignment: Alignment) -> Self {
        Self {
            alignment_locked: true,
            ..Self::new(alignment)
        }
    }

    /// Record that the owning node ran its one-time setup.
    ///
    /// # Panics
    ///
    /// Panics if called twice.
    pub fn mark_setup(&mut self) {
        assert!(!self.is_setup, "node must not be set up twice");
        self.is_setup = true;
    }

    /// Whether setup has run.
    pub fn is_setup(&self) -> bool {
        self.is_setup
    }

    // --- layout ---

    /// Mark the cached size and arrangement as stale.
    pub fn set_needs_layout(&mut self) {
        self.layout.needed = true;
        self.layout.size = None;
    }

    /// Whether a layout pass is pending.
    pub fn is_layout_needed(&self) -> bool {
        self.layout.needed
    }

    /// Size from the last measurement, if still valid.
    pub fn cached_size(&self) -> Option<Size> {
        self.layout.size
    }

    /// Store a fresh measurement and clear the pending flag.
    pub fn finish_measure(&mut self, size: Size) {
        self.layout.size = Some(size);
        self.layout.needed = false;
    }

    /// Offset from the node origin to its content origin (the pivot shift).
    pub fn content_offset(&self) -> DVec3 {
        self.layout.content_offset
    }

    /// Set the pivot shift. Computed during layout, so it never dirties.
    pub fn set_content_offset(&mut self, offset: DVec3) {
        self.layout.content_offset = offset;
    }

    // --- transform ---

    /// Script-side name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the script-side name.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Pivot point in local space.
    pub fn anchor_position(&self) -> DVec3 {
        self.anchor_position
    }

    /// Update the pivot point.
    pub fn set_anchor_position(&mut self, anchor: DVec3) {
        if self.anchor_position != anchor {
            self.anchor_position = anchor;
            self.set_needs_layout();
        }
    }

    /// Position in the parent's content space.
    pub fn local_position(&self) -> DVec3 {
        self.local_position
    }

    /// Update the position.
    pub fn set_local_position(&mut self, position: DVec3) {
        if self.local_position != position {
            self.local_position = position;
            self.set_needs_layout();
        }
    }

    /// Rotation relative to the parent.
    pub fn local_rotation(&self) -> DQuat {
        self.local_rotation
    }

    /// Update the rotation.
    pub fn set_local_rotation(&mut self, rotation: DQuat) {
        if self.local_rotation != rotation {
            self.local_rotation = rotation;
            self.set_needs_layout();
        }
    }

    /// Scale relative to the parent.
    pub fn local_scale(&self) -> DVec3 {
        self.local_scale
    }

    /// Update the scale.
    pub fn set_local_scale(&mut self, scale: DVec3) {
        if self.local_scale != scale {
            self.local_scale = scale;
            self.set_needs_layout();
        }
    }

    /// Replace position, rotation, and scale from a full matrix.
    pub fn set_local_transform(&mut self, transform: DMat4) {
        let (scale, rotation, position) = transform.to_scale_rotation_translation();
        self.set_local_scale(scale);
        self.set_local_rotation(rotation);
        self.set_local_position(position);
    }

    /// Local to parent-content transform: translate, rotate, scale, then undo the pivot.
    pub fn local_matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(
            self.local_scale,
            self.local_rotation,
            self.local_position,
        ) * DMat4::from_translation(-self.anchor_position)
    }

    // --- alignment ---

    /// Current alignment.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Whether the alignment is fixed by the node kind.
    pub fn is_alignment_locked(&self) -> bool {
        self.alignment_locked
    }

    /// Update the alignment. Ignored for nodes with a fixed alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        if !self.alignment_locked && self.alignment != alignment {
            self.alignment = alignment;
            self.set_needs_layout();
        }
    }

    // --- flags ---

    /// Current flags.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Whether the node is visible.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    /// Show or hide the node.
    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(NodeFlags::VISIBLE, visible);
    }

    /// Whether the node reacts to input.
    pub fn is_enabled(&self) -> bool {
        self.flags.contains(NodeFlags::ENABLED)
    }

    /// Enable or disable the node, queueing [`NodeEvent::Enabled`] or
    /// [`NodeEvent::Disabled`] on change.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.is_enabled() != enabled {
            self.flags.set(NodeFlags::ENABLED, enabled);
            self.emit(if enabled {
                NodeEvent::Enabled
            } else {
                NodeEvent::Disabled
            });
        }
    }

    /// Whether the node's own hit test is skipped.
    pub fn skips_raycast(&self) -> bool {
        self.flags.contains(NodeFlags::SKIP_RAYCAST)
    }

    /// Exclude the node from its own hit test.
    pub fn set_skip_raycast(&mut self, skip: bool) {
        self.flags.set(NodeFlags::SKIP_RAYCAST, skip);
    }

    /// Whether debug drawing is on.
    pub fn is_debug(&self) -> bool {
        self.flags.contains(NodeFlags::DEBUG)
    }

    /// Turn debug drawing on or off.
    pub fn set_debug(&mut self, debug: bool) {
        self.flags.set(NodeFlags::DEBUG, debug);
    }

    // --- focus ---

    /// Focus state.
    pub fn focus(&self) -> FocusState {
        self.focus
    }

    /// Mutable focus state.
    pub fn focus_mut(&mut self) -> &mut FocusState {
        &mut self.focus
    }

    // --- outboxes ---

    /// Queue a script-facing event.
    pub fn emit(&mut self, event: NodeEvent) {
        self.events.push(event);
    }

    /// Queue work for the host.
    pub fn request(&mut self, request: HostRequest) {
        self.requests.push(request);
    }

    /// Queue an instruction for a child.
    pub fn command(&mut self, child: NodeId, command: ChildCommand) {
        self.commands.push((child, command));
    }

    /// Allocate a new load ticket.
    pub fn next_ticket(&mut self) -> LoadTicket {
        self.next_ticket += 1;
        LoadTicket(self.next_ticket)
    }

    /// Take queued events.
    pub fn take_events(&mut self) -> Vec<NodeEvent> {
        core::mem::take(&mut self.events)
    }

    /// Take queued host requests.
    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        core::mem::take(&mut self.requests)
    }

    /// Take queued child commands.
    pub fn take_commands(&mut self) -> Vec<(NodeId, ChildCommand)> {
        core::mem::take(&mut self.commands)
    }

    /// Peek at queued events without taking them.
    pub fn pending_events(&self) -> &[NodeEvent] {
        &self.events
    }

    /// Peek at queued host requests without taking them.
    pub fn pending_requests(&self) -> &[HostRequest] {
        &self.requests
    }

    // --- properties ---

    /// Apply the keys every node understands.
    pub fn apply_props(&mut self, props: &Props) {
        if let Some(name) = props.string("name").or_else(|| props.string("id")) {
            self.name = Some(name.to_owned());
        }
        if let Some(anchor) = props.vec3("anchorPosition") {
            self.set_anchor_position(anchor);
        }
        if let Some(position) = props
            .vec3("localPosition")
            .or_else(|| props.vec3("position"))
        {
            self.set_local_position(position);
        }
        if let Some(rotation) = props.quat("localRotation") {
            self.set_local_rotation(rotation);
        }
        if let Some(scale) = props.vec3("localScale") {
            self.set_local_scale(scale);
        }
        if let Some(transform) = props.mat4("localTransform") {
            self.set_local_transform(transform);
        }
        if let Some(visible) = props.bool("visible") {
            self.set_visible(visible);
        }
        if let Some(skip) = props.bool("skipRaycast") {
            self.set_skip_raycast(skip);
        }
        if let Some(debug) = props.bool("debug") {
            self.set_debug(debug);
        }
        if let Some(alignment) = props.token::<Alignment>("alignment") {
            self.set_alignment(alignment);
        }
        if let Some(enabled) = props.bool("enabled") {
            self.set_enabled(enabled);
        }
    }
}
