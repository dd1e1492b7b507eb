// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};
use magicscript_scene::{HostRequest, Layoutable, LoadTicket, NodeBase, ResourceKind};

/// Store `value` in `slot`, reporting whether it changed.
pub(crate) fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// `value` when it is positive, `fallback` otherwise.
pub(crate) fn positive_or(value: f64, fallback: f64) -> f64 {
    if value > 0.0 { value } else { fallback }
}

/// Bounds of a node without alignment: its size centered on the origin.
pub(crate) fn centered_bounds<T: Layoutable + ?Sized>(node: &T, parent_space: bool, scaled: bool) -> Rect {
    let size = node.get_size(scaled);
    let center = if parent_space {
        let p = node.base().local_position();
        Point::new(p.x, p.y)
    } else {
        Point::ORIGIN
    };
    Rect::from_center_size(center, size)
}

/// The one load a node waits for.
///
/// Starting a new load cancels the previous one, so late results for an old location are
/// never applied.
#[derive(Clone, Debug, Default)]
pub(crate) struct Loader {
    pending: Option<LoadTicket>,
}

impl Loader {
    /// Ask the host for `url`, cancelling whatever was in flight.
    pub(crate) fn load(&mut self, base: &mut NodeBase, kind: ResourceKind, url: &str) {
        self.cancel(base);
        let ticket = base.next_ticket();
        self.pending = Some(ticket);
        base.request(HostRequest::Load {
            ticket,
            kind,
            url: url.to_owned(),
        });
    }

    /// Cancel the in-flight load, if any.
    pub(crate) fn cancel(&mut self, base: &mut NodeBase) {
        if let Some(ticket) = self.pending.take() {
            base.request(HostRequest::CancelLoad { ticket });
        }
    }

    /// Claim a delivered result. Only the pending ticket is accepted.
    pub(crate) fn finish(&mut self, ticket: LoadTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Whether a load is in flight.
    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use magicscript_props::Props;
    use magicscript_scene::Layoutable;

    /// Parse a JSON literal into a property bag.
    pub(crate) fn props(value: serde_json::Value) -> Props {
        Props::try_from(value).unwrap()
    }

    /// Lay a node out so the next setter starts from a clean state.
    pub(crate) fn settle<T: Layoutable>(node: &mut T) {
        node.layout_if_needed();
        assert!(!node.is_layout_needed(), "layout must clear the flag");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_reports_changes() {
        let mut value = 1.0;
        assert!(!replace(&mut value, 1.0));
        assert!(replace(&mut value, 2.0));
        assert_eq!(value, 2.0);
    }

    #[test]
    fn loader_cancels_and_claims() {
        let mut base = NodeBase::default();
        let mut loader = Loader::default();
        loader.load(&mut base, ResourceKind::Image, "file:///a.png");
        loader.load(&mut base, ResourceKind::Image, "file:///b.png");
        let requests = base.take_requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1], HostRequest::CancelLoad { ticket: LoadTicket(1) });
        assert!(!loader.finish(LoadTicket(1)), "cancelled tickets are stale");
        assert!(loader.finish(LoadTicket(2)));
        assert!(!loader.is_pending());

        loader.cancel(&mut base);
        assert!(base.take_requests().is_empty(), "nothing left to cancel");
    }
}
