// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use kurbo::Size;
use magicscript_math::Alignment;
use magicscript_props::Props;
use magicscript_scene::{
    Component, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase, NodeConfig,
};

use crate::label::{LabelLine, LabelNode, TextMetrics};

/// Static text (`UiText`).
///
/// Sized by its label. Anchored bottom-left unless the script picks another alignment.
#[derive(Debug)]
pub struct Text {
    base: NodeBase,
    label: LabelNode,
    lines: Vec<LabelLine>,
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Text {
    /// Empty text with default settings.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// Empty text. Text takes nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        Self::with_label(LabelNode::new())
    }

    /// Empty text measured with custom metrics.
    pub fn with_metrics(metrics: Rc<dyn TextMetrics>) -> Self {
        Self::with_label(LabelNode::with_metrics(metrics))
    }

    /// Text built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    fn with_label(label: LabelNode) -> Self {
        let mut node = Self {
            base: NodeBase::new(Alignment::BottomLeft),
            label,
            lines: Vec::new(),
        };
        node.setup_node();
        node
    }

    /// The label holding the text settings.
    pub fn label(&self) -> &LabelNode {
        &self.label
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.label.set_text(text) {
            self.set_needs_layout();
        }
    }

    /// Lines from the last layout pass.
    pub fn lines(&self) -> &[LabelLine] {
        &self.lines
    }
}

impl Measurable for Text {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        self.label.size()
    }
}

impl Layoutable for Text {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_layout(&mut self, _cx: &LayoutCx<'_>) {
        self.lines = self.label.lay_out(self.get_size(false));
    }
}

impl HitTestable for Text {}

impl Component for Text {
    fn kind(&self) -> &'static str {
        "UiText"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        if self.label.apply_props(props) {
            self.set_needs_layout();
        }
    }
}
