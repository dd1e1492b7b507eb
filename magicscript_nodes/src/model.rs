// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::DVec3;
use kurbo::{Rect, Size};
use log::warn;
use magicscript_props::{Color, Props};
use magicscript_scene::{
    Component, HitTestable, LayoutCx, Layoutable, LoadError, LoadTicket, Measurable, NodeBase,
    NodeConfig, NodeEvent, Resource, ResourceKind,
};

use crate::util::{Loader, centered_bounds, replace};

/// A 3D model loaded from a file or URL (`Model`).
///
/// Models have no alignment; their bounds are centered on the origin.
#[derive(Debug)]
pub struct Model {
    base: NodeBase,
    path: Option<String>,
    color: Option<Color>,
    import_scale: f64,
    extent: Option<(DVec3, DVec3)>,
    loader: Loader,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// An empty model.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// An empty model. Models take nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::default(),
            path: None,
            color: None,
            import_scale: 1.0,
            extent: None,
            loader: Loader::default(),
        };
        node.setup_node();
        node
    }

    /// A model built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Location of the model being shown or loaded.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Load the model at `path`, cancelling the previous load.
    pub fn set_path(&mut self, path: &str) {
        if self.path.as_deref() == Some(path) {
            return;
        }
        self.path = Some(path.to_owned());
        self.loader.load(&mut self.base, ResourceKind::Model, path);
    }

    /// Tint applied to the model's materials.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Factor applied to the model's own units.
    pub fn import_scale(&self) -> f64 {
        self.import_scale
    }

    /// Change the import scale.
    pub fn set_import_scale(&mut self, scale: f64) {
        if replace(&mut self.import_scale, scale) {
            self.set_needs_layout();
        }
    }

    /// Bounding box of the loaded model, in its own units.
    pub fn extent(&self) -> Option<(DVec3, DVec3)> {
        self.extent
    }
}

impl Measurable for Model {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        let Some((min, max)) = self.extent else {
            return Size::ZERO;
        };
        let span = (max - min).abs() * self.import_scale.abs();
        Size::new(span.x, span.y)
    }
}

impl Layoutable for Model {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_pivot(&mut self) {}

    fn get_bounds(&self, parent_space: bool, scaled: bool) -> Rect {
        centered_bounds(self, parent_space, scaled)
    }
}

impl HitTestable for Model {}

impl Component for Model {
    fn kind(&self) -> &'static str {
        "Model"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(path) = props.file_url("modelPath") {
            self.set_path(path);
        }
        if let Some(color) = props.color("color") {
            self.color = Some(color);
        }
        if let Some(scale) = props.number("importScale") {
            self.set_import_scale(scale);
        }
    }

    fn complete_load(&mut self, ticket: LoadTicket, result: Result<Resource, LoadError>) -> bool {
        if !self.loader.finish(ticket) {
            return false;
        }
        self.extent = match result {
            Ok(Resource::Model { min, max }) => {
                self.base.emit(NodeEvent::ResourceLoaded);
                Some((min, max))
            }
            Ok(other) => {
                warn!("model {:?} received {other:?}", self.path);
                self.base
                    .emit(NodeEvent::ResourceFailed("not a model".to_owned()));
                None
            }
            Err(err) => {
                warn!("model {:?} failed to load: {err}", self.path);
                self.base.emit(NodeEvent::ResourceFailed(err.to_string()));
                None
            }
        };
        self.set_needs_layout();
        true
    }

    fn destroy(&mut self) {
        self.loader.cancel(&mut self.base);
    }
}
