// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The node arena: structure, layout pass, clipping, input dispatch.

use core::any::Any;

use glam::DMat4;
use hashbrown::HashMap;
use log::{debug, trace};
use magicscript_focus::{FocusChange, FocusCoordinator, FocusHost, FocusResponse};
use magicscript_math::{Plane, Ray};
use magicscript_props::Props;
use smallvec::SmallVec;

use crate::config::NodeConfig;
use crate::drag::{self, DragSession};
use crate::error::{LoadError, SceneError};
use crate::event::{HostRequest, LoadTicket, NodeEvent, Resource};
use crate::layout::LayoutCx;
use crate::traits::Component;
use crate::types::{ChildInfo, ChildLayout, HitTestMode, NodeId};

/// Upper bound on layout passes per [`Scene::layout`]; later passes only pick up children
/// dirtied by commands from their parents.
const MAX_LAYOUT_PASSES: usize = 4;

type ClipPlanes = SmallVec<[Plane; 6]>;

struct Slot {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    name: Option<String>,
    node: Box<dyn Component>,
    /// World-space planes from every enclosing viewport.
    clip: ClipPlanes,
}

/// Owner of a tree of nodes.
///
/// Nodes live in generational slots addressed by [`NodeId`]. Parents own their children:
/// removing a node destroys its subtree.
///
/// Property updates mark nodes dirty; [`Scene::layout`] measures and arranges dirty nodes
/// children first, then refreshes clip planes. Hit testing, dragging and focus run against the
/// laid-out tree. Whatever nodes queue along the way comes out of [`Scene::drain_events`] and
/// [`Scene::drain_requests`].
///
/// ## Example
///
/// ```rust
/// use magicscript_scene::{Scene, NodeEvent};
/// # use magicscript_scene::{Component, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase};
/// # use kurbo::Size;
/// # #[derive(Debug, Default)]
/// # struct Square { base: NodeBase }
/// # impl Measurable for Square {
/// #     fn calculate_size(&self, _: &LayoutCx<'_>) -> Size { Size::new(1.0, 1.0) }
/// # }
/// # impl Layoutable for Square {
/// #     fn base(&self) -> &NodeBase { &self.base }
/// #     fn base_mut(&mut self) -> &mut NodeBase { &mut self.base }
/// # }
/// # impl HitTestable for Square {}
/// # impl Component for Square { fn kind(&self) -> &'static str { "Square" } }
///
/// let mut scene = Scene::new();
/// let root = scene.insert(None, Square::default());
/// assert_eq!(scene.layout(), 1);
/// assert_eq!(scene.layout(), 0, "clean nodes are skipped");
///
/// scene.activate(root);
/// assert_eq!(scene.drain_events(), vec![(root, NodeEvent::Activated)]);
/// ```
pub struct Scene {
    slots: Vec<Option<Slot>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    names: HashMap<String, NodeId>,
    focus: FocusCoordinator<NodeId>,
    events: Vec<(NodeId, NodeEvent)>,
    requests: Vec<(NodeId, HostRequest)>,
    config: NodeConfig,
    clip_dirty: bool,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("focused", &self.focus.focused())
            .field("pending_events", &self.events.len())
            .field("pending_requests", &self.requests.len())
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with the default configuration.
    pub fn new() -> Self {
        Self::with_config(NodeConfig::default())
    }

    /// Empty scene with `config`.
    pub fn with_config(config: NodeConfig) -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            names: HashMap::new(),
            focus: FocusCoordinator::new(),
            events: Vec::new(),
            requests: Vec::new(),
            config,
            clip_dirty: false,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    // --- structure ---

    /// Insert `node`, as a child of `parent` or as a root.
    ///
    /// The node is live even if the parent is stale or refuses it; it then stays a root.
    pub fn insert<C: Component>(&mut self, parent: Option<NodeId>, node: C) -> NodeId {
        self.insert_boxed(parent, Box::new(node))
    }

    /// Insert an already boxed node. See [`Scene::insert`].
    pub fn insert_boxed(&mut self, parent: Option<NodeId>, node: Box<dyn Component>) -> NodeId {
        let slot = |generation| Slot {
            generation,
            parent: None,
            children: Vec::new(),
            name: None,
            node,
            clip: ClipPlanes::new(),
        };
        let id = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(slot(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let idx = idx as u32;
            NodeId::new(idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(slot(generation)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let idx = (self.slots.len() - 1) as u32;
            NodeId::new(idx, generation)
        };
        self.sync_name(id);
        self.flush(id);
        self.clip_dirty = true;
        if let Some(parent) = parent
            && let Err(err) = self.add_child(parent, id)
        {
            debug!("inserted {id:?} as a root: {err}");
        }
        id
    }

    /// Attach a detached node under `parent`.
    ///
    /// Returns `Ok(false)` when the parent refuses the child (a scroll view that already has
    /// content, for instance); the child stays detached. On success the parent and its
    /// ancestors need layout.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool, SceneError> {
        if !self.is_alive(parent) {
            return Err(SceneError::StaleNode(parent));
        }
        let role = match self.slot(child) {
            Some(slot) => {
                if let Some(current) = slot.parent {
                    return Err(SceneError::AlreadyAttached {
                        child,
                        parent: current,
                    });
                }
                slot.node.child_role()
            }
            None => return Err(SceneError::StaleNode(child)),
        };
        if parent == child {
            return Err(SceneError::SelfAttachment(child));
        }
        if self.ancestors(parent).any(|a| a == child) {
            return Err(SceneError::Cycle { parent, child });
        }
        let accepted = self
            .slot_mut(parent)
            .is_some_and(|p| p.node.accept_child(ChildInfo { id: child, role }));
        if !accepted {
            debug!("{parent:?} refused child {child:?} ({role:?})");
            self.flush(parent);
            return Ok(false);
        }
        self.link_parent(child, parent);
        self.invalidate_from(parent);
        self.flush(parent);
        Ok(true)
    }

    /// Detach `child` from `parent`, leaving it as a live root.
    ///
    /// Returns `Ok(false)` if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool, SceneError> {
        if !self.is_alive(parent) {
            return Err(SceneError::StaleNode(parent));
        }
        if !self.is_alive(child) {
            return Err(SceneError::StaleNode(child));
        }
        if self.parent_of(child) != Some(parent) {
            return Ok(false);
        }
        self.unlink_parent(child, parent);
        Ok(true)
    }

    /// Remove a node and destroy its subtree.
    ///
    /// Each destroyed node cancels its in-flight work and queues [`NodeEvent::Deleted`].
    pub fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        let parent = self.slot(id).ok_or(SceneError::StaleNode(id))?.parent;
        if let Some(parent) = parent {
            self.unlink_parent(id, parent);
        }
        self.destroy_subtree(id);
        Ok(())
    }

    // --- nodes ---

    /// Apply a property patch. Ancestors of a node that became dirty are dirtied too.
    pub fn update(&mut self, id: NodeId, props: &Props) -> Result<(), SceneError> {
        let slot = self.slot_mut(id).ok_or(SceneError::StaleNode(id))?;
        slot.node.update(props);
        self.sync_name(id);
        self.settle(id);
        Ok(())
    }

    /// The node behind `id`.
    pub fn get(&self, id: NodeId) -> Option<&dyn Component> {
        self.slot(id).map(|s| &*s.node)
    }

    /// The node behind `id`, if it is a `T`.
    pub fn node<T: Component>(&self, id: NodeId) -> Option<&T> {
        let node: &dyn Any = &*self.slot(id)?.node;
        node.downcast_ref()
    }

    /// Mutate the node behind `id` as a `T`, then propagate the consequences like
    /// [`Scene::update`].
    pub fn edit<T: Component, R>(&mut self, id: NodeId, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let node: &mut dyn Any = &mut *self.slot_mut(id)?.node;
        let result = f(node.downcast_mut()?);
        self.sync_name(id);
        self.settle(id);
        Some(result)
    }

    /// Look a node up by its script-side name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied().filter(|id| self.is_alive(*id))
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parent of a node, or `None` for roots and stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id)?.parent
    }

    /// Children of a node in insertion order, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.slot(id)
            .map(|s| s.children.as_slice())
            .unwrap_or_default()
    }

    /// Every live node without a parent, in slot order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.live_ids()
            .into_iter()
            .filter(|id| self.parent_of(*id).is_none())
            .collect()
    }

    /// World-space clip planes currently applied to a node.
    pub fn clip_planes_of(&self, id: NodeId) -> &[Plane] {
        self.slot(id)
            .map(|s| s.clip.as_slice())
            .unwrap_or_default()
    }

    /// Local to world transform: each ancestor's local matrix, moved by its content offset
    /// for the child on the path.
    pub fn world_transform(&self, id: NodeId) -> Option<DMat4> {
        let local = self.slot(id)?.node.base().local_matrix();
        Some(self.parent_world(id)? * local)
    }

    // --- layout ---

    /// Lay out every dirty node, children before parents, then refresh clip planes.
    ///
    /// Returns how many nodes were measured.
    pub fn layout(&mut self) -> usize {
        let mut total = 0;
        for _ in 0..MAX_LAYOUT_PASSES {
            let mut count = 0;
            for root in self.roots() {
                count += self.layout_subtree(root);
            }
            total += count;
            if count == 0 {
                break;
            }
        }
        self.finish_layout(total);
        total
    }

    /// Lay out the subtree under `id`. See [`Scene::layout`].
    pub fn layout_if_needed(&mut self, id: NodeId) -> usize {
        let mut total = 0;
        for _ in 0..MAX_LAYOUT_PASSES {
            let count = self.layout_subtree(id);
            total += count;
            if count == 0 {
                break;
            }
        }
        self.finish_layout(total);
        total
    }

    // --- input ---

    /// Topmost node under `ray` in the subtree of `root`.
    ///
    /// Children are tried in each node's hit-test order and the first hit wins.
    pub fn hit_test(&self, root: NodeId, ray: &Ray) -> Option<NodeId> {
        let parent_world = self.parent_world(root)?;
        self.hit_node(root, parent_world, ray)
    }

    /// The nearest node on the hit path, starting at the hit node and walking up to `root`,
    /// that can be dragged.
    pub fn dragging_hit_test(&self, root: NodeId, ray: &Ray) -> Option<NodeId> {
        let mut current = Some(self.hit_test(root, ray)?);
        while let Some(id) = current {
            let slot = self.slot(id)?;
            if slot.node.as_draggable().is_some() && slot.node.base().is_enabled() {
                return Some(id);
            }
            if id == root {
                break;
            }
            current = slot.parent;
        }
        None
    }

    /// Start dragging whatever [`Scene::dragging_hit_test`] finds.
    pub fn begin_drag(&self, root: NodeId, ray: &Ray) -> Option<DragSession> {
        let node = self.dragging_hit_test(root, ray)?;
        self.begin_drag_on(node, ray)
    }

    /// Start dragging a specific node.
    pub fn begin_drag_on(&self, node: NodeId, ray: &Ray) -> Option<DragSession> {
        let local_ray = self.local_ray(node, ray)?;
        let slot = self.slot(node)?;
        if !slot.node.base().is_enabled() {
            return None;
        }
        let draggable = slot.node.as_draggable()?;
        let begin_point = drag::axis_point(draggable, &local_ray)?;
        Some(DragSession {
            node,
            begin_point,
            begin_value: draggable.drag_value(),
        })
    }

    /// Move a drag to `ray`. Returns the value handed to the node.
    pub fn drag(&mut self, session: &DragSession, ray: &Ray) -> Option<f64> {
        let local_ray = self.local_ray(session.node, ray)?;
        let draggable = self.slot_mut(session.node)?.node.as_draggable_mut()?;
        let point = drag::axis_point(&*draggable, &local_ray)?;
        let value =
            drag::dragged_value(&*draggable, session.begin_point, session.begin_value, point)?;
        draggable.set_drag_value(value);
        self.settle(session.node);
        Some(value)
    }

    /// Activate a node. Disabled and stale nodes are skipped.
    pub fn activate(&mut self, id: NodeId) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        if !slot.node.base().is_enabled() {
            return false;
        }
        slot.node.activate();
        self.settle(id);
        true
    }

    /// Forward the start of a long press. Returns `false` if the node does not take them.
    pub fn long_press_started(&mut self, id: NodeId) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        if !slot.node.can_be_long_pressed() || !slot.node.base().is_enabled() {
            return false;
        }
        slot.node.long_press_started();
        self.settle(id);
        true
    }

    /// Forward the end of a long press.
    pub fn long_press_ended(&mut self, id: NodeId) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        if !slot.node.can_be_long_pressed() {
            return false;
        }
        slot.node.long_press_ended();
        self.settle(id);
        true
    }

    /// Move focus to `id`.
    pub fn request_focus(&mut self, id: NodeId) -> FocusChange<NodeId> {
        let mut focus = core::mem::take(&mut self.focus);
        let change = focus.request_focus(self, id);
        self.focus = focus;
        change
    }

    /// Clear focus.
    pub fn clear_focus(&mut self) -> FocusChange<NodeId> {
        let mut focus = core::mem::take(&mut self.focus);
        let change = focus.clear_focus(self);
        self.focus = focus;
        change
    }

    /// The focused node.
    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    // --- time and host ---

    /// Advance every node's animations by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        for id in self.live_ids() {
            if let Some(slot) = self.slot_mut(id) {
                slot.node.tick(dt);
                self.settle(id);
            }
        }
    }

    /// Deliver the result of a [`HostRequest::Load`].
    ///
    /// Returns `false` for stale nodes and tickets the node no longer waits for.
    pub fn complete_load(
        &mut self,
        id: NodeId,
        ticket: LoadTicket,
        result: Result<Resource, LoadError>,
    ) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        let applied = slot.node.complete_load(ticket, result);
        if !applied {
            debug!("{id:?} ignored load result for {ticket:?}");
        }
        self.settle(id);
        applied
    }

    /// Take queued events, in emission order.
    pub fn drain_events(&mut self) -> Vec<(NodeId, NodeEvent)> {
        core::mem::take(&mut self.events)
    }

    /// Take queued host requests, in emission order.
    pub fn drain_requests(&mut self) -> Vec<(NodeId, HostRequest)> {
        core::mem::take(&mut self.requests)
    }

    // --- internals ---

    fn slot(&self, id: NodeId) -> Option<&Slot> {
        let slot = self.slots.get(id.idx())?.as_ref()?;
        (slot.generation == id.1).then_some(slot)
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(id.idx())?.as_mut()?;
        if slot.generation != id.1 {
            return None;
        }
        Some(slot)
    }

    fn live_ids(&self) -> Vec<NodeId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                let slot = s.as_ref()?;
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                let idx = i as u32;
                Some(NodeId::new(idx, slot.generation))
            })
            .collect()
    }

    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(self.parent_of(id), |p| self.parent_of(*p))
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.slot_mut(parent) {
            p.children.push(id);
        }
        if let Some(c) = self.slot_mut(id) {
            c.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.slot_mut(parent) {
            p.children.retain(|c| *c != id);
            p.node.child_removed(id);
        }
        if let Some(c) = self.slot_mut(id) {
            c.parent = None;
        }
        self.invalidate_from(parent);
        self.flush(parent);
    }

    fn destroy_subtree(&mut self, id: NodeId) {
        let children = self.children_of(id).to_vec();
        for child in children {
            self.destroy_subtree(child);
        }
        if let Some(slot) = self.slot_mut(id) {
            slot.node.destroy();
        }
        self.flush(id);
        self.events.push((id, NodeEvent::Deleted));
        self.focus.forget(id);
        if let Some(slot) = self.slots[id.idx()].take()
            && let Some(name) = slot.name
            && self.names.get(&name) == Some(&id)
        {
            self.names.remove(&name);
        }
        self.free_list.push(id.idx());
        self.clip_dirty = true;
    }

    /// Mark `id` and its ancestors as needing layout.
    fn invalidate_from(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node) = current {
            let Some(slot) = self.slot_mut(node) else {
                break;
            };
            slot.node.set_needs_layout();
            current = slot.parent;
        }
        self.clip_dirty = true;
    }

    /// Collect what an edited node queued and dirty its ancestors if it became dirty.
    fn settle(&mut self, id: NodeId) {
        self.flush(id);
        let dirty = self
            .slot(id)
            .is_some_and(|s| s.node.is_layout_needed());
        if dirty && let Some(parent) = self.parent_of(id) {
            self.invalidate_from(parent);
        }
    }

    /// Move a node's queued events and requests to the scene, and apply its child commands.
    fn flush(&mut self, id: NodeId) {
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        let base = slot.node.base_mut();
        let events = base.take_events();
        let requests = base.take_requests();
        let commands = base.take_commands();
        self.events.extend(events.into_iter().map(|e| (id, e)));
        self.requests.extend(requests.into_iter().map(|r| (id, r)));
        for (target, command) in commands {
            if self.parent_of(target) != Some(id) {
                debug!("{id:?} dropped {command:?} for {target:?}, which is not its child");
                continue;
            }
            if let Some(child) = self.slot_mut(target) {
                child.node.apply_command(&command);
            }
            self.flush(target);
        }
    }

    fn sync_name(&mut self, id: NodeId) {
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        let name = slot.node.base().name().map(str::to_owned);
        if slot.name == name {
            return;
        }
        let old = core::mem::replace(&mut slot.name, name.clone());
        if let Some(old) = old
            && self.names.get(&old) == Some(&id)
        {
            self.names.remove(&old);
        }
        if let Some(name) = name {
            self.names.insert(name, id);
        }
    }

    fn layout_subtree(&mut self, id: NodeId) -> usize {
        let children = self.children_of(id).to_vec();
        let mut count = 0;
        for &child in &children {
            count += self.layout_subtree(child);
        }
        let summaries: Vec<ChildLayout> = children
            .iter()
            .filter_map(|&c| self.child_layout(c))
            .collect();
        let Some(slot) = self.slot_mut(id) else {
            return count;
        };
        if slot.node.layout_if_needed_with(&LayoutCx::new(&summaries)) {
            trace!("laid out {id:?} ({})", slot.node.kind());
            count += 1;
        }
        self.flush(id);
        count
    }

    fn child_layout(&self, id: NodeId) -> Option<ChildLayout> {
        let node = &self.slot(id)?.node;
        Some(ChildLayout {
            id,
            role: node.child_role(),
            visible: node.base().is_visible(),
            size: node.get_size(true),
            bounds: node.get_bounds(true, true),
        })
    }

    fn finish_layout(&mut self, laid_out: usize) {
        if laid_out > 0 || self.clip_dirty {
            self.update_clipping();
        }
        if self.live_ids().into_iter().any(|id| {
            self.slot(id)
                .is_some_and(|s| s.node.is_layout_needed())
        }) {
            debug!("layout did not settle after {MAX_LAYOUT_PASSES} passes");
        }
    }

    /// Recompute every node's clip planes, top down.
    fn update_clipping(&mut self) {
        let mut stack: Vec<(NodeId, DMat4, ClipPlanes)> = self
            .roots()
            .into_iter()
            .rev()
            .map(|r| (r, DMat4::IDENTITY, ClipPlanes::new()))
            .collect();

        while let Some((id, parent_world, planes)) = stack.pop() {
            let Some(slot) = self.slot_mut(id) else {
                continue;
            };
            let world = parent_world * slot.node.base().local_matrix();
            let own = slot.node.clip_planes().map(|(content, local)| {
                let world_planes: ClipPlanes = local.iter().map(|p| p.transformed(&world)).collect();
                (content, world_planes)
            });
            // Visit children in the order they appear in `children`.
            for &child in slot.children.iter().rev() {
                let mut child_planes = planes.clone();
                if let Some((content, extra)) = &own
                    && *content == child
                {
                    child_planes.extend(extra.iter().copied());
                }
                let offset = DMat4::from_translation(slot.node.child_offset(child));
                stack.push((child, world * offset, child_planes));
            }
            slot.clip = planes;
        }
        self.clip_dirty = false;
    }

    /// World transform of the space `id` is positioned in.
    fn parent_world(&self, id: NodeId) -> Option<DMat4> {
        match self.slot(id)?.parent {
            None => Some(DMat4::IDENTITY),
            Some(parent) => {
                let offset = self.slot(parent)?.node.child_offset(id);
                Some(self.world_transform(parent)? * DMat4::from_translation(offset))
            }
        }
    }

    fn local_ray(&self, id: NodeId, ray: &Ray) -> Option<Ray> {
        let world = self.world_transform(id)?;
        if world.determinant().abs() <= f64::EPSILON {
            return None;
        }
        Some(ray.transformed(&world.inverse()))
    }

    fn hit_node(&self, id: NodeId, parent_world: DMat4, ray: &Ray) -> Option<NodeId> {
        let slot = self.slot(id)?;
        if !slot.node.base().is_visible() {
            return None;
        }
        let world = parent_world * slot.node.base().local_matrix();
        let hit_children = || {
            slot.node
                .hit_test_order(&slot.children)
                .into_iter()
                .find_map(|child| {
                    let offset = DMat4::from_translation(slot.node.child_offset(child));
                    self.hit_node(child, world * offset, ray)
                })
        };
        match slot.node.hit_test_mode() {
            HitTestMode::SelfOnly => self.hit_self(slot, &world, ray).then_some(id),
            HitTestMode::ChildrenOnly => hit_children(),
            HitTestMode::SelfThenChildren => {
                if self.hit_self(slot, &world, ray) {
                    hit_children().or(Some(id))
                } else {
                    None
                }
            }
        }
    }

    fn hit_self(&self, slot: &Slot, world: &DMat4, ray: &Ray) -> bool {
        if world.determinant().abs() <= f64::EPSILON {
            return false;
        }
        let local_ray = ray.transformed(&world.inverse());
        if !self.config.double_sided && local_ray.direction.z > 0.0 {
            return false;
        }
        let Some(local_point) = slot.node.self_hit_test(&local_ray) else {
            return false;
        };
        let world_point = world.transform_point3(local_point);
        slot.clip.iter().all(|p| p.keeps(world_point))
    }
}

impl FocusHost<NodeId> for Scene {
    fn can_have_focus(&self, id: NodeId) -> bool {
        self.slot(id).is_some_and(|s| {
            let base = s.node.base();
            base.is_enabled()
                && base.is_visible()
                && s.node.as_focusable().is_some_and(|f| f.can_have_focus())
        })
    }

    fn enter_focus(&mut self, id: NodeId) -> FocusResponse {
        let response = self
            .slot_mut(id)
            .and_then(|s| s.node.as_focusable_mut())
            .map_or(FocusResponse::Released, |f| f.enter_focus());
        self.settle(id);
        response
    }

    fn leave_focus(&mut self, id: NodeId, on_behalf_of: Option<NodeId>) -> bool {
        if on_behalf_of == Some(id) {
            return false;
        }
        if let Some(f) = self.slot_mut(id).and_then(|s| s.node.as_focusable_mut()) {
            f.leave_focus();
        }
        self.settle(id);
        true
    }
}
