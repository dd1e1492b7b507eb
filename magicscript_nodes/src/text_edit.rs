// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Insets, Line, Point, Rect, RoundedRect, Size};
use magicscript_math::{Alignment, clamp};
use magicscript_props::{Color, Props, token_enum};
use magicscript_scene::{
    Component, Focusable, HitTestable, LayoutCx, Layoutable, Measurable, NodeBase, NodeConfig,
    NodeEvent,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::button::Outline;
use crate::label::{LabelLine, LabelNode};
use crate::scroll_view::ScrollBarVisibility;
use crate::util::replace;

token_enum! {
    /// Kind of input a text edit expects, passed on to the host keyboard.
    pub enum TextEntry: "text entry mode" {
        /// Free text.
        Normal => "normal",
        /// An email address.
        Email => "email",
        /// Digits only.
        Numeric => "numeric",
        /// A secret; implies password masking.
        Password => "password",
        /// Free text over several lines; implies multiline.
        Multiline => "multiline",
    }
}

/// An editable text field (`UiTextEdit`).
///
/// Keyboard input comes from the host through [`TextEdit::input_text`]. The field shows its
/// text, or its hint while the text is empty.
#[derive(Debug)]
pub struct TextEdit {
    base: NodeBase,
    text: String,
    char_limit: usize,
    password: bool,
    entry: TextEntry,
    label: LabelNode,
    hint: LabelNode,
    scroll_bar_visibility: ScrollBarVisibility,
    scroll_speed: f64,
    scroll_value: f64,
    lines: Vec<LabelLine>,
}

impl Default for TextEdit {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEdit {
    /// Glyph shown for every grapheme of a password.
    pub const MASK: char = '•';
    /// Text size while `textSize` is 0.
    pub const DEFAULT_TEXT_SIZE: f64 = 0.02;
    /// Extra space between characters until one is set.
    pub const DEFAULT_CHAR_SPACING: f64 = 0.005;
    /// Padding around the text until one is set.
    pub const DEFAULT_PADDING: f64 = 0.003;
    /// Corner radius of the focus outline.
    pub const OUTLINE_RADIUS: f64 = 0.02;
    /// Stroke width of the focus outline.
    pub const OUTLINE_THICKNESS: f64 = 0.004;

    /// An empty field with no size.
    pub fn new() -> Self {
        Self::with_config(&NodeConfig::default())
    }

    /// An empty field. Text edits take nothing from the configuration.
    pub fn with_config(_config: &NodeConfig) -> Self {
        let styled = |label: &mut LabelNode| {
            label.set_default_text_size(Self::DEFAULT_TEXT_SIZE);
            label.set_char_spacing(Self::DEFAULT_CHAR_SPACING);
            let pad = Self::DEFAULT_PADDING;
            label.set_padding(Insets::new(pad, pad, pad, pad));
        };
        let mut label = LabelNode::new();
        let mut hint = LabelNode::new();
        styled(&mut label);
        styled(&mut hint);
        hint.set_text_color(Color::gray(0.75, 0.75));

        let mut node = Self {
            base: NodeBase::new(Alignment::TopLeft),
            text: String::new(),
            char_limit: 0,
            password: false,
            entry: TextEntry::Normal,
            label,
            hint,
            scroll_bar_visibility: ScrollBarVisibility::Auto,
            scroll_speed: 0.5,
            scroll_value: 0.0,
            lines: Vec::new(),
        };
        node.setup_node();
        node
    }

    /// A field built from an initial property set.
    pub fn with_props(props: &Props) -> Self {
        let mut node = Self::new();
        node.update(props);
        node
    }

    /// The stored text, already truncated to the character limit.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, truncating it to the character limit.
    pub fn set_text(&mut self, text: &str) {
        let text = self.truncated(text);
        if replace(&mut self.text, text) {
            self.refresh_display();
        }
    }

    /// Apply text typed on the host keyboard. Emits [`NodeEvent::TextChanged`] when the stored
    /// text changes.
    pub fn input_text(&mut self, text: &str) -> bool {
        let text = self.truncated(text);
        if !replace(&mut self.text, text) {
            return false;
        }
        self.refresh_display();
        self.base.emit(NodeEvent::TextChanged(self.text.clone()));
        true
    }

    /// Maximum number of graphemes; 0 means unlimited.
    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    /// Change the limit and truncate the current text to it.
    pub fn set_char_limit(&mut self, limit: usize) {
        if replace(&mut self.char_limit, limit) {
            let text = self.truncated(&self.text);
            if replace(&mut self.text, text) {
                self.refresh_display();
            }
        }
    }

    /// Whether the text is masked.
    pub fn is_password(&self) -> bool {
        self.password
    }

    /// Mask or unmask the text.
    pub fn set_password(&mut self, password: bool) {
        if replace(&mut self.password, password) {
            self.refresh_display();
        }
    }

    /// Expected kind of input.
    pub fn text_entry(&self) -> TextEntry {
        self.entry
    }

    /// Change the expected kind of input. Password and multiline entry switch those modes on.
    pub fn set_text_entry(&mut self, entry: TextEntry) {
        self.entry = entry;
        match entry {
            TextEntry::Password => self.set_password(true),
            TextEntry::Multiline => self.set_multiline(true),
            TextEntry::Normal | TextEntry::Email | TextEntry::Numeric => {}
        }
    }

    /// Whether the text wraps.
    pub fn is_multiline(&self) -> bool {
        self.label.multiline()
    }

    /// Wrap the text, or keep it on one line.
    pub fn set_multiline(&mut self, multiline: bool) {
        let changed = self.label.set_multiline(multiline);
        self.hint.set_multiline(multiline);
        if changed {
            self.set_needs_layout();
        }
    }

    /// Text shown while the field is empty.
    pub fn hint(&self) -> &str {
        self.hint.text()
    }

    /// Field size.
    pub fn size(&self) -> Size {
        self.label.bounds_size()
    }

    /// Resize the field.
    pub fn set_size(&mut self, size: Size) {
        let size = Size::new(size.width.max(0.0), size.height.max(0.0));
        let changed = self.label.set_bounds_size(size);
        self.hint.set_bounds_size(size);
        if changed {
            self.set_needs_layout();
        }
    }

    /// The label that shows the (possibly masked) text.
    pub fn label(&self) -> &LabelNode {
        &self.label
    }

    /// The label that shows the hint.
    pub fn hint_label(&self) -> &LabelNode {
        &self.hint
    }

    /// Whether the hint is shown instead of the text.
    pub fn shows_hint(&self) -> bool {
        self.text.is_empty()
    }

    /// Lines of whichever label is shown, from the last layout pass.
    pub fn lines(&self) -> &[LabelLine] {
        &self.lines
    }

    /// Scroll bar policy for multiline fields.
    pub fn scroll_bar_visibility(&self) -> ScrollBarVisibility {
        self.scroll_bar_visibility
    }

    /// Scroll speed for multiline fields, never negative.
    pub fn scroll_speed(&self) -> f64 {
        self.scroll_speed
    }

    /// Scroll position for multiline fields, in `[0, 1]`.
    pub fn scroll_value(&self) -> f64 {
        self.scroll_value
    }

    /// Underline along the bottom edge.
    pub fn underline(&self) -> Line {
        let size = self.get_size(false);
        let y = -0.5 * size.height;
        Line::new((-0.5 * size.width, y), (0.5 * size.width, y))
    }

    /// Outline drawn while the field has focus.
    pub fn focus_outline(&self) -> Option<Outline> {
        let size = self.get_size(false);
        (self.has_focus() && size.width > 0.0 && size.height > 0.0).then(|| Outline {
            shape: RoundedRect::from_rect(
                Rect::from_center_size(Point::ORIGIN, size),
                Self::OUTLINE_RADIUS,
            ),
            thickness: Self::OUTLINE_THICKNESS,
        })
    }

    fn truncated(&self, text: &str) -> String {
        if self.char_limit == 0 {
            return text.to_owned();
        }
        text.graphemes(true).take(self.char_limit).collect()
    }

    fn refresh_display(&mut self) {
        let display = if self.password {
            core::iter::repeat_n(Self::MASK, self.text.graphemes(true).count()).collect()
        } else {
            self.text.clone()
        };
        if self.label.set_text(display) {
            self.set_needs_layout();
        }
    }
}

impl Measurable for TextEdit {
    fn calculate_size(&self, _cx: &LayoutCx<'_>) -> Size {
        self.size()
    }
}

impl Layoutable for TextEdit {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn update_layout(&mut self, _cx: &LayoutCx<'_>) {
        let size = self.get_size(false);
        let shown = if self.shows_hint() {
            &self.hint
        } else {
            &self.label
        };
        self.lines = shown.lay_out(size);
    }
}

impl HitTestable for TextEdit {}

impl Focusable for TextEdit {
    fn can_have_focus(&self) -> bool {
        self.base.is_enabled()
    }
}

impl Component for TextEdit {
    fn kind(&self) -> &'static str {
        "UiTextEdit"
    }

    fn update(&mut self, props: &Props) {
        self.base.apply_props(props);
        // The limit goes first so a text in the same patch is cut to it.
        if let Some(limit) = props.int("charLimit") {
            self.set_char_limit(usize::try_from(limit).unwrap_or(0));
        }
        if let Some(text) = props.string("text") {
            self.set_text(text);
        }
        if let Some(hint) = props.string("hint")
            && self.hint.set_text(hint)
        {
            self.set_needs_layout();
        }
        if let Some(color) = props.color("textColor") {
            self.label.set_text_color(color);
        }
        if let Some(color) = props.color("hintColor") {
            self.hint.set_text_color(color);
        }
        let styled = self.label.apply_style_props(props);
        if self.hint.apply_style_props(props) || styled {
            self.set_needs_layout();
        }
        if let Some(padding) = props
            .padding("padding")
            .or_else(|| props.padding("textPadding"))
        {
            let changed = self.label.set_padding(padding);
            self.hint.set_padding(padding);
            if changed {
                self.set_needs_layout();
            }
        }
        if let Some(multiline) = props.bool("multiline") {
            self.set_multiline(multiline);
        }
        if let Some(password) = props.bool("password") {
            self.set_password(password);
        }
        if let Some(entry) = props.token("textEntry") {
            self.set_text_entry(entry);
        }
        if let Some(visibility) = props.token("scrollBarVisibility") {
            self.scroll_bar_visibility = visibility;
        }
        if let Some(speed) = props.number("scrollSpeed") {
            self.scroll_speed = speed.max(0.0);
        }
        if let Some(value) = props.number("scrollValue") {
            self.scroll_value = clamp(value, 0.0, 1.0);
        }
        let size = self.size();
        let width = props.number("width").unwrap_or(size.width);
        let height = props.number("height").unwrap_or(size.height);
        self.set_size(Size::new(width, height));
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        Some(self)
    }

    fn as_focusable_mut(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}
