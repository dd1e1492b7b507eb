// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size};
use log::warn;
use magicscript_props::{Color, Props};
use magicscript_scene::{
    Component, HitTestable, LayoutCx, Layoutable, LoadError, LoadTicket, Measurable, NodeBase,
    NodeConfig, NodeEvent, Resource, ResourceKind,
};

use crate::util::{Loader, positive_or, replace};

/// A picture loaded from a file or URL, or a named system icon (`UiImage`).
#[derive(Debug)]
pub struct Image {
    base: NodeBase,
    width: f64,
    height: f64,
    path: Option<String>,
    icon: Option<String>,
    use_default_icon: bool,
    use_frame: bool,
    color: Option<Color>,
    image: Option<Size>,
    loader: Loader,
    frame: Option<Rect>,
}

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

impl Image {
    /// Side length used for a dimension that is not set.
    pub const DEFAULT_SIZE: f64 = 0.2;

    /// An empty image.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// An empty image. Images take nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::default(),
            width: 0.0,
            height: 0.0,
            path: None,
            icon: None,
            use_default_icon: false,
            use_frame: false,
            color: None,
            image: None,
            loader: Loader::default(),
            frame: None,
        };
        node.setup_node();
        node
    }

    /// An image built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Request a width; 0 leaves it to the image.
    pub fn set_width(&mut self, width: f64) {
        if replace(&mut self.width, width.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// Request a height; 0 leaves it to the image.
    pub fn set_height(&mut self, height: f64) {
        if replace(&mut self.height, height.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// Location of the picture being shown or loaded.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Show the picture at `path`. The previous load, if still running, is cancelled.
    pub fn set_path(&mut self, path: &str) {
        if self.path.as_deref() == Some(path) {
            return;
        }
        self.path = Some(path.to_owned());
        self.loader.load(&mut self.base, ResourceKind::Image, path);
    }

    /// Name of the system icon shown instead of a file.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Whether the icon falls back to the default set.
    pub fn uses_default_icon(&self) -> bool {
        self.use_default_icon
    }

    /// Tint applied to the picture, or the fill when there is none.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Intrinsic size of the loaded picture.
    pub fn image_size(&self) -> Option<Size> {
        self.image
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loader.is_pending()
    }

    /// Frame drawn around the picture from the last layout pass, when `useFrame` is on.
    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    fn requested_size(&self) -> Size {
        // Icons are square unless a width is given.
        let height = positive_or(self.height, Self::DEFAULT_SIZE);
        let width = if self.icon.is_some() && self.image.is_none() {
            positive_or(self.width, height)
        } else {
            positive_or(self.width, Self::DEFAULT_SIZE)
        };
        Size::new(width, height)
    }
}

impl Measurable for Image {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        let Some(intrinsic) = self.image.filter(|s| s.width > 0.0 && s.height > 0.0) else {
            return self.requested_size();
        };
        // An unset dimension has factor 0 and leaves the other one in charge.
        let horizontal = self.width / intrinsic.width;
        let vertical = self.height / intrinsic.height;
        let factor = if horizontal > 0.0 && vertical > 0.0 {
            horizontal.min(vertical)
        } else {
            horizontal.max(vertical)
        };
        Size::new(factor * intrinsic.width, factor * intrinsic.height)
    }
}

impl Layoutable for Image {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_layout(&mut self, _cx: &LayoutCx<'_>) {
        self.frame = self.use_frame.then(|| self.get_bounds(false, false));
    }
}

impl HitTestable for Image {}

impl Component for Image {
    fn kind(&self) -> &'static str {
        "UiImage"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(path) = props.file_url("filePath") {
            self.set_path(path);
        }
        if let Some(icon) = props.string("icon")
            && self.icon.as_deref() != Some(icon)
        {
            self.icon = Some(icon.to_owned());
            self.set_needs_layout();
        }
        if let Some(use_default) = props.bool("useDefaultIcon") {
            self.use_default_icon = use_default;
        }
        if let Some(width) = props.number("width") {
            self.set_width(width);
        }
        if let Some(height) = props.number("height") {
            self.set_height(height);
        }
        if let Some(use_frame) = props.bool("useFrame")
            && replace(&mut self.use_frame, use_frame)
        {
            self.set_needs_layout();
        }
        if let Some(color) = props.color("color") {
            self.color = Some(color);
        }
    }

    fn complete_load(&mut self, ticket: LoadTicket, result: Result<Resource, LoadError>) -> bool {
        if !self.loader.finish(ticket) {
            return false;
        }
        match result {
            Ok(Resource::Image { width, height }) => {
                self.image = Some(Size::new(width, height));
                self.base.emit(NodeEvent::ResourceLoaded);
            }
            Ok(other) => {
                warn!("image {:?} received {other:?}", self.path);
                self.image = None;
                self.base
                    .emit(NodeEvent::ResourceFailed("not an image".to_owned()));
            }
            Err(err) => {
                warn!("image {:?} failed to load: {err}", self.path);
                self.image = None;
                self.base.emit(NodeEvent::ResourceFailed(err.to_string()));
            }
        }
        self.set_needs_layout();
        true
    }

    fn destroy(&mut self) {
        self.loader.cancel(&mut self.base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{props, settle};
    use magicscript_scene::HostRequest;
    use serde_json::json;

    fn loaded(props_value: serde_json::Value, width: f64, height: f64) -> Image {
        let mut image = Image::with_props(&props(props_value));
        let ticket = match image.base_mut().take_requests().pop() {
            Some(HostRequest::Load { ticket, .. }) => ticket,
            other => panic!("expected a load, got {other:?}"),
        };
        assert!(image.complete_load(ticket, Ok(Resource::Image { width, height })));
        settle(&mut image);
        image
    }

    #[test]
    fn empty_image_uses_requested_size() {
        let mut image = Image::new();
        settle(&mut image);
        assert_eq!(image.get_size(false), Size::new(0.2, 0.2));
        image.update(&props(json!({ "width": 0.5 })));
        settle(&mut image);
        assert_eq!(image.get_size(false), Size::new(0.5, 0.2));
    }

    #[test]
    fn icons_are_square() {
        let mut image = Image::with_props(&props(json!({ "icon": "settings", "height": 0.1 })));
        settle(&mut image);
        assert_eq!(image.get_size(false), Size::new(0.1, 0.1));
    }

    #[test]
    fn both_dimensions_fit_inside() {
        let image = loaded(
            json!({ "filePath": "file:///a.png", "width": 1.0, "height": 1.0 }),
            200.0,
            100.0,
        );
        assert_eq!(image.get_size(false), Size::new(1.0, 0.5));
    }

    #[test]
    fn one_dimension_fills() {
        let image = loaded(
            json!({ "filePath": "file:///a.png", "width": 1.0 }),
            100.0,
            200.0,
        );
        assert_eq!(image.get_size(false), Size::new(1.0, 2.0));
    }

    #[test]
    fn small_width_is_not_overridden_by_the_default() {
        let image = loaded(
            json!({ "filePath": "file:///a.png", "width": 0.1 }),
            128.0,
            128.0,
        );
        assert_eq!(image.get_size(false), Size::new(0.1, 0.1));

        let image = loaded(
            json!({ "filePath": "file:///a.png", "height": 0.05 }),
            256.0,
            128.0,
        );
        assert_eq!(image.get_size(false), Size::new(0.1, 0.05));
    }

    #[test]
    fn loaded_picture_without_dimensions_collapses() {
        let image = loaded(json!({ "filePath": "file:///a.png" }), 100.0, 50.0);
        assert_eq!(image.get_size(false), Size::ZERO);
    }

    #[test]
    fn new_path_cancels_previous_load() {
        let mut image = Image::with_props(&props(json!({ "filePath": "https://a/1.png" })));
        image.update(&props(json!({ "filePath": { "uri": "https://a/2.png" } })));
        let requests = image.base_mut().take_requests();
        assert_eq!(requests.len(), 3);
        let HostRequest::Load { ticket: first, .. } = requests[0].clone() else {
            panic!("first request must be a load");
        };
        assert_eq!(requests[1], HostRequest::CancelLoad { ticket: first });
        assert!(!image.complete_load(first, Ok(Resource::Image { width: 1.0, height: 1.0 })));
        assert_eq!(image.image_size(), None);
    }

    #[test]
    fn bad_locations_are_ignored() {
        let mut image = Image::with_props(&props(json!({ "filePath": "/tmp/a.png" })));
        assert!(image.base_mut().take_requests().is_empty());
        assert_eq!(image.path(), None);
    }

    #[test]
    fn failure_clears_the_picture() {
        let mut image = loaded(json!({ "filePath": "file:///a.png" }), 10.0, 10.0);
        image.update(&props(json!({ "filePath": "file:///b.png" })));
        let ticket = match image.base_mut().take_requests().pop() {
            Some(HostRequest::Load { ticket, .. }) => ticket,
            other => panic!("expected a load, got {other:?}"),
        };
        let err = LoadError::NotFound("file:///b.png".to_owned());
        assert!(image.complete_load(ticket, Err(err.clone())));
        assert_eq!(image.image_size(), None);
        assert_eq!(
            image.base_mut().take_events().last(),
            Some(&NodeEvent::ResourceFailed(err.to_string()))
        );
    }

    #[test]
    fn frame_follows_the_picture() {
        let mut image = Image::with_props(&props(json!({ "useFrame": true, "width": 0.4 })));
        settle(&mut image);
        assert_eq!(image.frame().map(|f| f.size()), Some(Size::new(0.4, 0.2)));
    }

    #[test]
    fn destroy_cancels() {
        let mut image = Image::with_props(&props(json!({ "filePath": "file:///a.png" })));
        image.base_mut().take_requests();
        image.destroy();
        assert!(matches!(
            image.base_mut().take_requests().as_slice(),
            [HostRequest::CancelLoad { .. }]
        ));
        assert!(!image.is_loading());
    }
}
