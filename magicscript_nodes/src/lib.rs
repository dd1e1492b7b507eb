// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MagicScript Nodes: the concrete UI node kinds a MagicScript scene is built from.
//!
//! Every node is a plain struct embedding a [`NodeBase`](magicscript_scene::NodeBase) and
//! implementing the capability traits from [`magicscript_scene`]. Nodes are built with
//! `new()`, `with_config(&NodeConfig)` or `with_props(&Props)`, or by kind name through
//! [`NodeFactory`].
//!
//! ## Node kinds
//!
//! - Controls: [`Button`], [`Slider`], [`Toggle`], [`TextEdit`], [`CircleConfirmation`].
//! - Indicators: [`ProgressBar`], [`Spinner`], [`ScrollBar`].
//! - Containers: [`ScrollView`] (clipped, draggable viewport), [`Group`] (union of its
//!   children), [`GridLayout`] and [`LinearLayout`] (children placed in cells).
//! - Content: [`Text`], [`Image`], [`Line`], [`Model`], [`Video`], [`WebView`], [`Audio`].
//!
//! Text measurement lives in [`LabelNode`], shared by every node that shows text. Glyph
//! advances come from a [`TextMetrics`] implementation; [`ApproximateMetrics`] is a
//! deterministic stand-in for a real font.
//!
//! ## Host work
//!
//! Nodes never touch files, networks or media decoders. [`Image`] and [`Model`] queue
//! [`HostRequest::Load`](magicscript_scene::HostRequest::Load) and wait for
//! [`Scene::complete_load`](magicscript_scene::Scene::complete_load); a newer location cancels
//! the older load. [`Video`], [`Audio`] and [`WebView`] forward their actions as playback and
//! browse requests.
//!
//! ## Example
//!
//! ```rust
//! use magicscript_nodes::{NodeFactory, Slider};
//! use magicscript_props::Props;
//! use magicscript_scene::{Layoutable, Scene};
//!
//! let mut scene = Scene::new();
//! let factory = NodeFactory::for_scene(&scene);
//! let props = Props::from_json_str(r#"{ "width": 0.8, "max": 10, "value": 4 }"#).unwrap();
//! let slider = factory.spawn(&mut scene, None, "UiSlider", &props).unwrap();
//! scene.layout();
//!
//! let node = scene.node::<Slider>(slider).unwrap();
//! assert_eq!(node.value(), 4.0);
//! assert_eq!(node.get_size(false).width, 0.8);
//! ```

mod audio;
mod button;
mod circle_confirmation;
mod factory;
mod grid_layout;
mod group;
mod image;
mod label;
mod line;
mod linear_layout;
mod model;
mod progress_bar;
mod scroll_bar;
mod scroll_view;
mod slider;
mod spinner;
mod text;
mod text_edit;
mod toggle;
mod util;
mod video;
mod web_view;

pub use audio::{Audio, AudioAction, SpatialChannel};
pub use button::{Button, ButtonType, LabelSide, Outline};
pub use circle_confirmation::CircleConfirmation;
pub use factory::{KINDS, NodeFactory};
pub use grid_layout::GridLayout;
pub use group::Group;
pub use image::Image;
pub use label::{
    ApproximateMetrics, FontParams, FontStyle, FontWeight, LabelLine, LabelNode, TextAlignment,
    TextMetrics,
};
pub use line::Line;
pub use linear_layout::LinearLayout;
pub use model::Model;
pub use progress_bar::ProgressBar;
pub use scroll_bar::{Orientation, ScrollBar};
pub use scroll_view::{ScrollBarVisibility, ScrollDirection, ScrollView};
pub use slider::Slider;
pub use spinner::Spinner;
pub use text::Text;
pub use text_edit::{TextEdit, TextEntry};
pub use toggle::{Toggle, ToggleType};
pub use video::{PlaybackState, Video, VideoAction, ViewMode};
pub use web_view::{WebView, WebViewAction};
