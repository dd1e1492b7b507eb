// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MagicScript Focus: focus state for UI nodes and the coordinator that keeps it exclusive.
//!
//! Focus is modelled in two layers:
//! - **Per-node state** ([`FocusState`]): `NoFocus → enter → Focused → leave → NoFocus`.
//!   Nodes own one of these and decide whether they may hold focus at all.
//! - **A coordinator** ([`FocusCoordinator`]) that guarantees at most one node holds focus at a
//!   time. It talks to nodes through the [`FocusHost`] trait, so it works with any container and
//!   any small copyable identifier `K`.
//!
//! Some nodes use focus as a trigger rather than a resting state: a toggle flips when it gains
//! focus and gives it straight back. Those nodes answer [`FocusResponse::Released`] from
//! [`FocusHost::enter_focus`], and the coordinator ends up with nothing focused.
//!
//! ## Minimal example
//!
//! ```rust
//! use magicscript_focus::{FocusChange, FocusCoordinator, FocusHost, FocusResponse, FocusState};
//!
//! struct Fields(Vec<FocusState>);
//!
//! impl FocusHost<usize> for Fields {
//!     fn can_have_focus(&self, id: usize) -> bool {
//!         id < self.0.len()
//!     }
//!     fn enter_focus(&mut self, id: usize) -> FocusResponse {
//!         self.0[id].enter();
//!         FocusResponse::Held
//!     }
//!     fn leave_focus(&mut self, id: usize, _on_behalf_of: Option<usize>) -> bool {
//!         self.0[id].leave();
//!         true
//!     }
//! }
//!
//! let mut fields = Fields(vec![FocusState::default(); 2]);
//! let mut focus = FocusCoordinator::new();
//!
//! focus.request_focus(&mut fields, 0);
//! let change = focus.request_focus(&mut fields, 1);
//! assert_eq!(change, FocusChange::Moved { from: Some(0), to: Some(1) });
//! assert!(!fields.0[0].has_focus());
//! assert!(fields.0[1].has_focus());
//! ```
//!
//! This crate is `no_std` and has no dependencies.

#![no_std]

/// Focus state of a single node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusState {
    /// Not focused.
    #[default]
    NoFocus,
    /// Holding focus.
    Focused,
}

impl FocusState {
    /// Whether the node holds focus.
    pub const fn has_focus(self) -> bool {
        matches!(self, Self::Focused)
    }

    /// Transition to [`FocusState::Focused`]. Returns `true` if the state changed.
    pub fn enter(&mut self) -> bool {
        let changed = *self != Self::Focused;
        *self = Self::Focused;
        changed
    }

    /// Transition to [`FocusState::NoFocus`]. Returns `true` if the state changed.
    pub fn leave(&mut self) -> bool {
        let changed = *self != Self::NoFocus;
        *self = Self::NoFocus;
        changed
    }
}

/// How a node reacted to gaining focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusResponse {
    /// The node keeps focus until asked to leave.
    Held,
    /// The node handled focus as a one-shot trigger and has already left.
    Released,
}

/// Access to focusable nodes, implemented by whatever owns them.
pub trait FocusHost<K> {
    /// Whether `id` may currently take focus (exists, enabled, focusable kind).
    fn can_have_focus(&self, id: K) -> bool;

    /// Give `id` focus.
    fn enter_focus(&mut self, id: K) -> FocusResponse;

    /// Take focus away from `id` because `on_behalf_of` wants it (or `None` to clear).
    ///
    /// Returning `false` refuses the hand-over; the coordinator then leaves focus unchanged.
    fn leave_focus(&mut self, id: K, on_behalf_of: Option<K>) -> bool;
}

/// Result of a coordinator request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusChange<K> {
    /// Nothing changed.
    Unchanged,
    /// Focus moved. `to` is `None` when focus was cleared or released immediately.
    Moved {
        /// Previously focused node.
        from: Option<K>,
        /// Newly focused node.
        to: Option<K>,
    },
}

/// Keeps at most one node focused.
#[derive(Clone, Debug)]
pub struct FocusCoordinator<K> {
    focused: Option<K>,
}

impl<K> Default for FocusCoordinator<K> {
    fn default() -> Self {
        Self { focused: None }
    }
}

impl<K: Copy + Eq> FocusCoordinator<K> {
    /// Coordinator with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused node, if any.
    pub fn focused(&self) -> Option<K> {
        self.focused
    }

    /// Move focus to `id`.
    ///
    /// The current holder is asked to leave first. Requests for the node that already holds
    /// focus, for nodes that cannot take focus, or refused hand-overs change nothing.
    pub fn request_focus<H: FocusHost<K> + ?Sized>(&mut self, host: &mut H, id: K) -> FocusChange<K> {
        if self.focused == Some(id) || !host.can_have_focus(id) {
            return FocusChange::Unchanged;
        }
        let from = self.focused;
        if let Some(current) = from
            && !host.leave_focus(current, Some(id))
        {
            return FocusChange::Unchanged;
        }
        self.focused = match host.enter_focus(id) {
            FocusResponse::Held => Some(id),
            FocusResponse::Released => None,
        };
        FocusChange::Moved {
            from,
            to: self.focused,
        }
    }

    /// Clear focus.
    pub fn clear_focus<H: FocusHost<K> + ?Sized>(&mut self, host: &mut H) -> FocusChange<K> {
        let Some(current) = self.focused else {
            return FocusChange::Unchanged;
        };
        if !host.leave_focus(current, None) {
            return FocusChange::Unchanged;
        }
        self.focused = None;
        FocusChange::Moved {
            from: Some(current),
            to: None,
        }
    }

    /// Drop `id` without asking it to leave, for nodes that no longer exist.
    pub fn forget(&mut self, id: K) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three nodes: 0 and 1 hold focus, 2 releases it immediately (toggle-like).
    #[derive(Default)]
    struct Host {
        states: [FocusState; 3],
        enabled: [bool; 3],
        refuse_leave: bool,
        releases: usize,
    }

    impl Host {
        fn new() -> Self {
            Self {
                enabled: [true; 3],
                ..Self::default()
            }
        }
    }

    impl FocusHost<usize> for Host {
        fn can_have_focus(&self, id: usize) -> bool {
            self.enabled.get(id).copied().unwrap_or(false)
        }

        fn enter_focus(&mut self, id: usize) -> FocusResponse {
            if id == 2 {
                self.releases += 1;
                return FocusResponse::Released;
            }
            self.states[id].enter();
            FocusResponse::Held
        }

        fn leave_focus(&mut self, id: usize, on_behalf_of: Option<usize>) -> bool {
            if self.refuse_leave || on_behalf_of == Some(id) {
                return false;
            }
            self.states[id].leave()
        }
    }

    #[test]
    fn state_transitions_report_changes() {
        let mut s = FocusState::default();
        assert!(s.enter());
        assert!(!s.enter());
        assert!(s.has_focus());
        assert!(s.leave());
        assert!(!s.leave());
    }

    #[test]
    fn only_one_node_focused() {
        let mut host = Host::new();
        let mut focus = FocusCoordinator::new();
        assert_eq!(
            focus.request_focus(&mut host, 0),
            FocusChange::Moved {
                from: None,
                to: Some(0)
            }
        );
        let _ = focus.request_focus(&mut host, 1);
        assert!(!host.states[0].has_focus());
        assert!(host.states[1].has_focus());
        assert_eq!(focus.focused(), Some(1));
    }

    #[test]
    fn repeated_request_is_a_no_op() {
        let mut host = Host::new();
        let mut focus = FocusCoordinator::new();
        let _ = focus.request_focus(&mut host, 0);
        assert_eq!(focus.request_focus(&mut host, 0), FocusChange::Unchanged);
    }

    #[test]
    fn disabled_nodes_cannot_take_focus() {
        let mut host = Host::new();
        host.enabled[1] = false;
        let mut focus = FocusCoordinator::new();
        assert_eq!(focus.request_focus(&mut host, 1), FocusChange::Unchanged);
        assert_eq!(focus.request_focus(&mut host, 7), FocusChange::Unchanged);
    }

    #[test]
    fn releasing_nodes_leave_nothing_focused() {
        let mut host = Host::new();
        let mut focus = FocusCoordinator::new();
        let _ = focus.request_focus(&mut host, 0);
        assert_eq!(
            focus.request_focus(&mut host, 2),
            FocusChange::Moved {
                from: Some(0),
                to: None
            }
        );
        assert_eq!(host.releases, 1);
        assert_eq!(focus.focused(), None);
        assert!(!host.states[0].has_focus());
    }

    #[test]
    fn refused_hand_over_keeps_focus() {
        let mut host = Host::new();
        let mut focus = FocusCoordinator::new();
        let _ = focus.request_focus(&mut host, 0);
        host.refuse_leave = true;
        assert_eq!(focus.request_focus(&mut host, 1), FocusChange::Unchanged);
        assert_eq!(focus.clear_focus(&mut host), FocusChange::Unchanged);
        assert_eq!(focus.focused(), Some(0));
    }

    #[test]
    fn forget_drops_without_leaving() {
        let mut host = Host::new();
        let mut focus = FocusCoordinator::new();
        let _ = focus.request_focus(&mut host, 0);
        focus.forget(0);
        assert_eq!(focus.focused(), None);
        assert!(host.states[0].has_focus(), "forget does not call back into the host");
        assert_eq!(focus.clear_focus(&mut host), FocusChange::Unchanged);
    }
}
