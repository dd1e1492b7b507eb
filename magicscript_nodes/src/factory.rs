// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use log::debug;
use magicscript_props::Props;
use magicscript_scene::{Component, NodeConfig, NodeId, Scene};

use crate::{
    Audio, Button, CircleConfirmation, GridLayout, Group, Image, Line, LinearLayout, Model,
    ProgressBar, ScrollBar, ScrollView, Slider, Spinner, Text, TextEdit, Toggle, Video, WebView,
};

/// Script-side names of every node kind [`NodeFactory`] can build.
pub const KINDS: [&str; 19] = [
    "UiButton",
    "UiSlider",
    "UiScrollView",
    "UiScrollBar",
    "UiTextEdit",
    "UiText",
    "UiToggle",
    "UiProgressBar",
    "UiImage",
    "UiVideo",
    "UiWebView",
    "UiLine",
    "UiGroup",
    "UiGridLayout",
    "UiLinearLayout",
    "UiSpinner",
    "UiCircleConfirmation",
    "Audio",
    "Model",
];

/// Builds nodes from their script-side kind name and initial properties.
#[derive(Clone, Debug, Default)]
pub struct NodeFactory {
    config: NodeConfig,
}

impl NodeFactory {
    /// A factory handing `config` to every node it builds.
    pub fn new(config: NodeConfig) -> Self {
        Self { config }
    }

    /// A factory sharing the scene's configuration.
    pub fn for_scene(scene: &Scene) -> Self {
        Self::new(scene.config().clone())
    }

    /// Configuration handed to new nodes.
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Build a node of `kind` and apply `props`.
    ///
    /// Unknown kinds yield `None`.
    pub fn create(&self, kind: &str, props: &Props) -> Option<Box<dyn Component>> {
        let config = &self.config;
        let mut node: Box<dyn Component> = match kind {
            "UiButton" => Box::new(Button::with_config(config)),
            "UiSlider" => Box::new(Slider::with_config(config)),
            "UiScrollView" => Box::new(ScrollView::with_config(config)),
            "UiScrollBar" => Box::new(ScrollBar::with_config(config)),
            "UiTextEdit" => Box::new(TextEdit::with_config(config)),
            "UiText" => Box::new(Text::with_config(config)),
            "UiToggle" => Box::new(Toggle::with_config(config)),
            "UiProgressBar" => Box::new(ProgressBar::with_config(config)),
            "UiImage" => Box::new(Image::with_config(config)),
            "UiVideo" => Box::new(Video::with_config(config)),
            "UiWebView" => Box::new(WebView::with_config(config)),
            "UiLine" => Box::new(Line::with_config(config)),
            "UiGroup" => Box::new(Group::with_config(config)),
            "UiGridLayout" => Box::new(GridLayout::with_config(config)),
            "UiLinearLayout" => Box::new(LinearLayout::with_config(config)),
            "UiSpinner" => Box::new(Spinner::with_config(config)),
            "UiCircleConfirmation" => Box::new(CircleConfirmation::with_config(config)),
            "Audio" => Box::new(Audio::with_config(config)),
            "Model" => Box::new(Model::with_config(config)),
            _ => {
                debug!("no node kind named {kind:?}");
                return None;
            }
        };
        node.update(props);
        Some(node)
    }

    /// Build a node and insert it into `scene` under `parent`.
    pub fn spawn(
        &self,
        scene: &mut Scene,
        parent: Option<NodeId>,
        kind: &str,
        props: &Props,
    ) -> Option<NodeId> {
        let node = self.create(kind, props)?;
        Some(scene.insert_boxed(parent, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::props;
    use serde_json::json;

    #[test]
    fn every_kind_round_trips_its_name() {
        let factory = NodeFactory::default();
        for kind in KINDS {
            let node = factory.create(kind, &Props::new());
            assert_eq!(node.map(|n| n.kind()), Some(kind));
        }
    }

    #[test]
    fn unknown_kind_is_none() {
        assert!(NodeFactory::default().create("UiDropdownList", &Props::new()).is_none());
    }

    #[test]
    fn props_are_applied() {
        let factory = NodeFactory::default();
        let mut scene = Scene::new();
        let id = factory
            .spawn(&mut scene, None, "UiSlider", &props(json!({ "value": 0.25, "name": "volume" })))
            .unwrap();
        assert_eq!(scene.find_by_name("volume"), Some(id));
        assert_eq!(scene.node::<Slider>(id).map(Slider::value), Some(0.25));
    }

    #[test]
    fn config_reaches_the_nodes() {
        let config = NodeConfig {
            confirmation_duration: 1.0,
            ..NodeConfig::default()
        };
        let mut scene = Scene::with_config(config);
        let factory = NodeFactory::for_scene(&scene);
        let ring = factory
            .spawn(&mut scene, None, "UiCircleConfirmation", &Props::new())
            .unwrap();
        scene.long_press_started(ring);
        scene.tick(1.0);
        assert_eq!(
            scene.node::<CircleConfirmation>(ring).map(CircleConfirmation::value),
            Some(1.0)
        );
    }
}
