// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use magicscript_math::Alignment;
use magicscript_props::{Props, token_enum};
use magicscript_scene::{
    BrowseCommand, Component, HitTestable, HostRequest, LayoutCx, Layoutable, Measurable, NodeBase,
    NodeConfig,
};

use crate::util::{positive_or, replace};

token_enum! {
    /// Navigation actions a script can send to a web view.
    pub enum WebViewAction: "web view action" {
        /// Previous page in history.
        Back => "back",
        /// Next page in history.
        Forward => "forward",
        /// Load the current page again.
        Reload => "reload",
    }
}

/// A browser surface (`UiWebView`).
///
/// Page loading and rendering belong to the host; the node forwards navigation as
/// [`HostRequest::Browse`].
#[derive(Debug)]
pub struct WebView {
    base: NodeBase,
    width: f64,
    height: f64,
    url: Option<String>,
}

impl Default for WebView {
    fn default() -> Self {
        Self::new()
    }
}

impl WebView {
    /// Side length used while a dimension is 0.
    pub const DEFAULT_SIZE: f64 = 1.0;

    /// A blank page.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// A blank page. Web views take nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let mut node = Self {
            base: NodeBase::locked(Alignment::CenterCenter),
            width: 0.0,
            height: 0.0,
            url: None,
        };
        node.setup_node();
        node
    }

    /// A web view built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// Request a width; 0 uses the default.
    pub fn set_width(&mut self, width: f64) {
        if replace(&mut self.width, width.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// Request a height; 0 uses the default.
    pub fn set_height(&mut self, height: f64) {
        if replace(&mut self.height, height.max(0.0)) {
            self.set_needs_layout();
        }
    }

    /// The page last opened.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Open `url`, starting a fresh history.
    pub fn open(&mut self, url: &str) {
        self.url = Some(url.to_owned());
        self.base
            .request(HostRequest::Browse(BrowseCommand::Open(url.to_owned())));
    }

    /// Run a navigation action.
    pub fn navigate(&mut self, action: WebViewAction) {
        let command = match action {
            WebViewAction::Back => BrowseCommand::Back,
            WebViewAction::Forward => BrowseCommand::Forward,
            WebViewAction::Reload => BrowseCommand::Reload,
        };
        self.base.request(HostRequest::Browse(command));
    }
}

impl Measurable for WebView {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        Size::new(
            positive_or(self.width, Self::DEFAULT_SIZE),
            positive_or(self.height, Self::DEFAULT_SIZE),
        )
    }
}

impl Layoutable for WebView {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
}

impl HitTestable for WebView {}

impl Component for WebView {
    fn kind(&self) -> &'static str {
        "UiWebView"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if let Some(width) = props.number("width") {
            self.set_width(width);
        }
        if let Some(height) = props.number("height") {
            self.set_height(height);
        }
        if let Some(url) = props.string("url") {
            self.open(url);
        }
        if let Some(action) = props.token("action") {
            self.navigate(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{props, settle};
    use serde_json::json;

    #[test]
    fn size_defaults_per_axis() {
        let mut web = WebView::with_props(&props(json!({ "width": 0.8 })));
        settle(&mut web);
        assert_eq!(web.get_size(false), Size::new(0.8, 1.0));
        assert_eq!(web.base().alignment(), Alignment::CenterCenter);
    }

    #[test]
    fn navigation_is_forwarded_in_order() {
        let mut web = WebView::with_props(&props(json!({
            "url": "https://magicscript.org",
            "action": "reload",
        })));
        web.update(&props(json!({ "action": "back" })));
        assert_eq!(web.url(), Some("https://magicscript.org"));
        assert_eq!(
            web.base_mut().take_requests(),
            vec![
                HostRequest::Browse(BrowseCommand::Open("https://magicscript.org".to_owned())),
                HostRequest::Browse(BrowseCommand::Reload),
                HostRequest::Browse(BrowseCommand::Back),
            ]
        );
    }

    #[test]
    fn navigation_is_not_layout() {
        let mut web = WebView::new();
        settle(&mut web);
        web.update(&props(json!({ "url": "https://a.b", "action": "forward" })));
        assert!(!web.is_layout_needed());
    }
}
