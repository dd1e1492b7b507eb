// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Messages nodes queue for the script layer, for the host, and for their own children.

use glam::DVec3;

/// Notification for the scripting layer.
///
/// Nodes queue these while handling updates, input, and ticks; the scene hands them out in
/// emission order from [`Scene::drain_events`](crate::Scene::drain_events).
#[derive(Clone, Debug, PartialEq)]
pub enum NodeEvent {
    /// The node was activated (tap, select).
    Activated,
    /// The node became enabled.
    Enabled,
    /// The node became disabled.
    Disabled,
    /// The node gained focus.
    FocusGained,
    /// The node lost focus.
    FocusLost,
    /// A button was tapped.
    Tapped,
    /// A scroll view's scroll value changed through dragging.
    ScrollChanged(f64),
    /// A slider's value changed through dragging.
    SliderChanged(f64),
    /// A text edit's text changed through input.
    TextChanged(String),
    /// A toggle flipped.
    ToggleChanged(bool),
    /// A circle confirmation's value moved.
    ConfirmationUpdated(f64),
    /// A circle confirmation completed.
    ConfirmationCompleted,
    /// A circle confirmation drained back to empty.
    ConfirmationCanceled,
    /// An asynchronous resource arrived and was applied.
    ResourceLoaded,
    /// An asynchronous resource failed; the node shows its empty state.
    ResourceFailed(String),
    /// The node was removed from the scene.
    Deleted,
}

/// Handle for one asynchronous load, unique per node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(pub u64);

/// What kind of resource a load produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A bitmap image.
    Image,
    /// A 3D model.
    Model,
}

/// A resource delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Resource {
    /// A decoded image with its intrinsic size.
    Image {
        /// Intrinsic width.
        width: f64,
        /// Intrinsic height.
        height: f64,
    },
    /// A built model with its bounding box.
    Model {
        /// Minimum corner of the model's bounds.
        min: DVec3,
        /// Maximum corner of the model's bounds.
        max: DVec3,
    },
}

/// Playback control forwarded to the host's media player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackCommand {
    /// Start from the beginning.
    Start,
    /// Stop and rewind.
    Stop,
    /// Pause at the current position.
    Pause,
    /// Continue after a pause.
    Resume,
}

/// Navigation forwarded to the host's web view.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BrowseCommand {
    /// Load a new page, resetting history.
    Open(String),
    /// Go back in history.
    Back,
    /// Go forward in history.
    Forward,
    /// Reload the current page.
    Reload,
}

/// Work a node asks the host to perform.
#[derive(Clone, Debug, PartialEq)]
pub enum HostRequest {
    /// Download and decode a resource, then call
    /// [`Scene::complete_load`](crate::Scene::complete_load) with the same ticket.
    Load {
        /// Ticket to quote back.
        ticket: LoadTicket,
        /// Expected resource kind.
        kind: ResourceKind,
        /// Resource location.
        url: String,
    },
    /// Abandon an in-flight load. Results quoting this ticket are ignored anyway.
    CancelLoad {
        /// The abandoned ticket.
        ticket: LoadTicket,
    },
    /// Drive the node's media player.
    Playback {
        /// Command to apply.
        command: PlaybackCommand,
        /// Media location, when known.
        source: Option<String>,
    },
    /// Drive the node's web view.
    Browse(BrowseCommand),
}

/// Instruction from a container to one of its children.
///
/// Containers queue these while laying out or handling input; the scene applies them to the
/// target through [`Component::apply_command`](crate::Component::apply_command).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ChildCommand {
    /// Move a scroll bar thumb, in `[0, 1]`.
    ThumbPosition(f64),
    /// Resize a scroll bar thumb, as a fraction of the track.
    ThumbSize(f64),
    /// Fade in, optionally fading out again after a delay in seconds.
    Show {
        /// Fade rather than jump.
        animated: bool,
        /// Delay before hiding again.
        hide_after: Option<f64>,
    },
    /// Fade out.
    Hide {
        /// Fade rather than jump.
        animated: bool,
    },
    /// Set the visibility flag directly.
    SetVisible(bool),
}
