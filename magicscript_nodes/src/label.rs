// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement and the label primitive that text-bearing nodes build on.
//!
//! A [`LabelNode`] is not a scene node of its own. Buttons, toggles, sliders and text edits
//! embed one and fold its size into their own measurement. Glyph metrics come from a
//! [`TextMetrics`] implementation; the default [`ApproximateMetrics`] needs no font data and is
//! fully deterministic.

use std::rc::Rc;

use core::fmt::Debug;

use kurbo::{Insets, Point, Rect, Size};
use magicscript_props::{Color, Props, token_enum};
use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

use crate::util::replace;

token_enum! {
    /// Slant of the font.
    pub enum FontStyle: "font style" {
        /// Upright.
        Normal => "normal",
        /// Slanted.
        Italic => "italic",
    }
}

token_enum! {
    /// Stroke weight of the font.
    pub enum FontWeight: "font weight" {
        /// Regular weight.
        Regular => "regular",
        /// Thinnest.
        ExtraLight => "extra-light",
        /// Thin.
        Light => "light",
        /// Slightly heavier than regular.
        Medium => "medium",
        /// Heavy.
        Bold => "bold",
        /// Heaviest.
        ExtraBold => "extra-bold",
    }
}

token_enum! {
    /// Horizontal placement of each line inside the label.
    pub enum TextAlignment: "text alignment" {
        /// Flush left.
        Left => "left",
        /// Centered.
        Center => "center",
        /// Flush right.
        Right => "right",
    }
}

impl FontWeight {
    /// How much wider glyphs get relative to the regular weight.
    pub fn width_factor(self) -> f64 {
        match self {
            Self::ExtraLight => 0.94,
            Self::Light => 0.97,
            Self::Regular => 1.0,
            Self::Medium => 1.02,
            Self::Bold => 1.06,
            Self::ExtraBold => 1.1,
        }
    }
}

/// Font selection for a label.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontParams {
    /// Slant.
    pub style: FontStyle,
    /// Weight.
    pub weight: FontWeight,
}

/// Glyph metrics in ems.
pub trait TextMetrics: Debug {
    /// Horizontal advance of one grapheme cluster.
    fn advance(&self, grapheme: &str, font: FontParams) -> f64;

    /// Distance between consecutive baselines at line spacing 1.
    fn line_height(&self, _font: FontParams) -> f64 {
        1.2
    }
}

/// Metrics that classify graphemes by shape instead of reading a font.
///
/// Narrow punctuation, wide letters, capitals and digits each get a fixed advance; anything
/// outside ASCII is one em wide.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ApproximateMetrics;

impl TextMetrics for ApproximateMetrics {
    fn advance(&self, grapheme: &str, font: FontParams) -> f64 {
        let Some(first) = grapheme.chars().next() else {
            return 0.0;
        };
        let em = match first {
            ' ' | '\t' => 0.28,
            'i' | 'j' | 'l' | '!' | '.' | ',' | '\'' | '|' | ':' | ';' | '`' => 0.28,
            'f' | 'r' | 't' | 'I' | '(' | ')' | '[' | ']' | '-' => 0.36,
            'm' | 'w' | 'M' | 'W' | '@' | '%' => 0.86,
            'A'..='Z' => 0.66,
            '0'..='9' => 0.56,
            c if c.is_ascii() => 0.52,
            _ => 1.0,
        };
        em * font.weight.width_factor()
    }
}

/// One laid-out line of a label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelLine {
    /// Displayed text.
    pub text: String,
    /// Left end of the baseline, relative to the label's center.
    pub origin: Point,
    /// Measured width.
    pub width: f64,
}

/// Text block measured with [`TextMetrics`].
///
/// Setters that can change the measured size return `true` when the value actually changed,
/// so the owning node knows whether to request layout.
#[derive(Clone, Debug)]
pub struct LabelNode {
    text: String,
    text_size: f64,
    default_text_size: f64,
    text_color: Color,
    text_alignment: TextAlignment,
    all_caps: bool,
    multiline: bool,
    char_spacing: f64,
    line_spacing: f64,
    tracking: f64,
    bounds: Size,
    padding: Insets,
    font: FontParams,
    metrics: Rc<dyn TextMetrics>,
}

impl Default for LabelNode {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelNode {
    /// Text size used while `textSize` is 0.
    pub const DEFAULT_TEXT_SIZE: f64 = 0.015;
    /// Glyphs are drawn at this fraction of the nominal text size.
    pub const GLYPH_SCALE: f64 = 0.8;

    /// An empty label using [`ApproximateMetrics`].
    pub fn new() -> Self {
        Self::with_metrics(Rc::new(ApproximateMetrics))
    }

    /// An empty label measured with `metrics`.
    pub fn with_metrics(metrics: Rc<dyn TextMetrics>) -> Self {
        Self {
            text: String::new(),
            text_size: 0.0,
            default_text_size: Self::DEFAULT_TEXT_SIZE,
            text_color: Color::gray(0.75, 1.0),
            text_alignment: TextAlignment::Left,
            all_caps: false,
            multiline: false,
            char_spacing: 0.0,
            line_spacing: 1.0,
            tracking: 50.0,
            bounds: Size::ZERO,
            padding: Insets::ZERO,
            font: FontParams::default(),
            metrics,
        }
    }

    /// Raw text, before all-caps.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        replace(&mut self.text, text.into())
    }

    /// Requested text size; 0 means the default.
    pub fn text_size(&self) -> f64 {
        self.text_size
    }

    /// Request a text size. Negative sizes count as 0.
    pub fn set_text_size(&mut self, size: f64) -> bool {
        replace(&mut self.text_size, size.max(0.0))
    }

    /// Size used while no text size is requested.
    pub fn default_text_size(&self) -> f64 {
        self.default_text_size
    }

    /// Change the fallback size. Owners such as buttons use a larger one.
    pub fn set_default_text_size(&mut self, size: f64) -> bool {
        replace(&mut self.default_text_size, size.max(0.0))
    }

    /// Height of one em in scene units.
    pub fn font_size(&self) -> f64 {
        let nominal = if self.text_size > 0.0 {
            self.text_size
        } else {
            self.default_text_size
        };
        Self::GLYPH_SCALE * nominal
    }

    /// Text color.
    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// Change the text color. Appearance only.
    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    /// Line alignment.
    pub fn text_alignment(&self) -> TextAlignment {
        self.text_alignment
    }

    /// Change the line alignment.
    pub fn set_text_alignment(&mut self, alignment: TextAlignment) -> bool {
        replace(&mut self.text_alignment, alignment)
    }

    /// Whether the text is shown uppercased.
    pub fn all_caps(&self) -> bool {
        self.all_caps
    }

    /// Uppercase the displayed text.
    pub fn set_all_caps(&mut self, all_caps: bool) -> bool {
        replace(&mut self.all_caps, all_caps)
    }

    /// Whether line breaks and wrapping are honored.
    pub fn multiline(&self) -> bool {
        self.multiline
    }

    /// Honor line breaks and wrap to the bounds width.
    pub fn set_multiline(&mut self, multiline: bool) -> bool {
        replace(&mut self.multiline, multiline)
    }

    /// Extra space after each grapheme, in ems.
    pub fn char_spacing(&self) -> f64 {
        self.char_spacing
    }

    /// Change the extra grapheme spacing.
    pub fn set_char_spacing(&mut self, spacing: f64) -> bool {
        replace(&mut self.char_spacing, spacing)
    }

    /// Baseline distance multiplier.
    pub fn line_spacing(&self) -> f64 {
        self.line_spacing
    }

    /// Change the baseline distance multiplier.
    pub fn set_line_spacing(&mut self, spacing: f64) -> bool {
        replace(&mut self.line_spacing, spacing.max(0.0))
    }

    /// Tracking in thousandths of an em.
    pub fn tracking(&self) -> f64 {
        self.tracking
    }

    /// Change the tracking.
    pub fn set_tracking(&mut self, tracking: f64) -> bool {
        replace(&mut self.tracking, tracking)
    }

    /// Fixed size; a zero dimension is measured from the text.
    pub fn bounds_size(&self) -> Size {
        self.bounds
    }

    /// Fix the size, or let a zero dimension follow the text.
    pub fn set_bounds_size(&mut self, bounds: Size) -> bool {
        let bounds = Size::new(bounds.width.max(0.0), bounds.height.max(0.0));
        replace(&mut self.bounds, bounds)
    }

    /// Space between the edges and the text.
    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Change the padding.
    pub fn set_padding(&mut self, padding: Insets) -> bool {
        replace(&mut self.padding, padding)
    }

    /// Font selection.
    pub fn font(&self) -> FontParams {
        self.font
    }

    /// Change the font style.
    pub fn set_font_style(&mut self, style: FontStyle) -> bool {
        replace(&mut self.font.style, style)
    }

    /// Change the font weight.
    pub fn set_font_weight(&mut self, weight: FontWeight) -> bool {
        replace(&mut self.font.weight, weight)
    }

    /// Text as displayed.
    pub fn display_text(&self) -> String {
        if self.all_caps {
            self.text.to_uppercase()
        } else {
            self.text.clone()
        }
    }

    /// Apply the text keys shared by every text-bearing node.
    ///
    /// `fontParameters` is applied after the flat keys, so its entries win. Returns whether
    /// anything that affects the measured size changed.
    pub fn apply_props(&mut self, props: &Props) -> bool {
        let mut changed = false;
        if let Some(text) = props.string("text") {
            changed |= self.set_text(text);
        }
        if let Some(color) = props.color("textColor") {
            self.set_text_color(color);
        }
        changed |= self.apply_style_props(props);
        if let Some(bounds) = props.object("boundsSize") {
            if let Some(size) = bounds.size("boundsSize") {
                changed |= self.set_bounds_size(size);
            }
            if let Some(wrap) = bounds.bool("wrap") {
                changed |= self.set_multiline(wrap);
            }
        }
        changed
    }

    /// Apply the typography keys only, leaving text, color and bounds alone.
    ///
    /// Nodes that show one style through several labels (a text edit's text and hint) apply
    /// these to each label.
    pub fn apply_style_props(&mut self, props: &Props) -> bool {
        let mut changed = false;
        if let Some(size) = props.number("textSize") {
            changed |= self.set_text_size(size);
        }
        if let Some(alignment) = props.token::<TextAlignment>("textAlignment") {
            changed |= self.set_text_alignment(alignment);
        }
        if let Some(spacing) = props.number("charSpacing") {
            changed |= self.set_char_spacing(spacing);
        }
        if let Some(spacing) = props.number("lineSpacing") {
            changed |= self.set_line_spacing(spacing);
        }
        if let Some(tracking) = props.number("tracking") {
            changed |= self.set_tracking(tracking);
        }
        if let Some(all_caps) = props.bool("allCaps") {
            changed |= self.set_all_caps(all_caps);
        }
        if let Some(style) = props.token::<FontStyle>("style") {
            changed |= self.set_font_style(style);
        }
        if let Some(weight) = props.token::<FontWeight>("weight") {
            changed |= self.set_font_weight(weight);
        }
        if let Some(font) = props.object("fontParameters") {
            if let Some(style) = font.token::<FontStyle>("style") {
                changed |= self.set_font_style(style);
            }
            if let Some(weight) = font.token::<FontWeight>("weight") {
                changed |= self.set_font_weight(weight);
            }
            if let Some(size) = font.number("fontSize") {
                changed |= self.set_text_size(size);
            }
            if let Some(tracking) = font.number("tracking") {
                changed |= self.set_tracking(tracking);
            }
            if let Some(all_caps) = font.bool("allCaps") {
                changed |= self.set_all_caps(all_caps);
            }
        }
        changed
    }

    // --- measurement ---

    /// Width of one line of displayed text.
    pub fn line_width(&self, line: &str) -> f64 {
        let font_size = self.font_size();
        let spacing = self.tracking / 1000.0 + self.char_spacing;
        let mut count = 0_usize;
        let mut ems = 0.0;
        for grapheme in line.graphemes(true) {
            ems += self.metrics.advance(grapheme, self.font);
            count += 1;
        }
        if count > 1 {
            ems += (count - 1) as f64 * spacing;
        }
        (ems * font_size).max(0.0)
    }

    /// Distance between baselines.
    pub fn line_advance(&self) -> f64 {
        self.metrics.line_height(self.font) * self.font_size() * self.line_spacing
    }

    /// Displayed text split into lines.
    ///
    /// Single-line labels keep everything on one line. Multiline labels break at `\n` and,
    /// when the bounds have a width, wrap greedily at word boundaries.
    pub fn lines(&self) -> SmallVec<[String; 4]> {
        let display = self.display_text();
        if !self.multiline {
            return smallvec::smallvec![display.replace('\n', " ")];
        }
        let wrap_width = if self.bounds.width > 0.0 {
            self.bounds.width - self.padding.x0 - self.padding.x1
        } else {
            0.0
        };
        let mut lines = SmallVec::new();
        for paragraph in display.split('\n') {
            if wrap_width > 0.0 {
                self.wrap_into(paragraph, wrap_width, &mut lines);
            } else {
                lines.push(paragraph.to_owned());
            }
        }
        lines
    }

    fn wrap_into(&self, paragraph: &str, max_width: f64, lines: &mut SmallVec<[String; 4]>) {
        let mut current = String::new();
        for word in paragraph.split_word_bounds() {
            let blank = word.trim().is_empty();
            if current.is_empty() && blank {
                continue;
            }
            let candidate = format!("{current}{word}");
            if !current.is_empty() && !blank && self.line_width(&candidate) > max_width {
                lines.push(current.trim_end().to_owned());
                current = word.to_owned();
            } else {
                current = candidate;
            }
        }
        lines.push(current.trim_end().to_owned());
    }

    /// Size of the text alone, without padding or bounds.
    pub fn preferred_size(&self) -> Size {
        let lines = self.lines();
        let width = lines
            .iter()
            .map(|l| self.line_width(l))
            .fold(0.0_f64, f64::max);
        let line_height = self.metrics.line_height(self.font) * self.font_size();
        let extra_lines = lines.len().saturating_sub(1) as f64;
        Size::new(width, line_height + extra_lines * self.line_advance())
    }

    /// Measured size.
    ///
    /// Empty text takes the bounds size. Bounds with both dimensions set are used as they
    /// are; otherwise each unset dimension is the preferred text size plus padding.
    pub fn size(&self) -> Size {
        if self.text.is_empty() || (self.bounds.width > 0.0 && self.bounds.height > 0.0) {
            return self.bounds;
        }
        let preferred = self.preferred_size();
        let pad = self.padding;
        Size::new(
            if self.bounds.width > 0.0 {
                self.bounds.width
            } else {
                preferred.width + pad.x0 + pad.x1
            },
            if self.bounds.height > 0.0 {
                self.bounds.height
            } else {
                preferred.height + pad.y0 + pad.y1
            },
        )
    }

    /// Area inside the padding, for a label of `size` centered on its origin.
    pub fn text_frame(&self, size: Size) -> Rect {
        let pad = self.padding;
        Rect::new(
            -0.5 * size.width + pad.x0,
            -0.5 * size.height + pad.y1,
            0.5 * size.width - pad.x1,
            0.5 * size.height - pad.y0,
        )
    }

    /// Lines positioned inside a label of `size` centered on its origin.
    ///
    /// The first baseline sits one line height below the top of the text frame.
    pub fn lay_out(&self, size: Size) -> Vec<LabelLine> {
        let frame = self.text_frame(size);
        let first = self.metrics.line_height(self.font) * self.font_size();
        let advance = self.line_advance();
        let mut y = frame.y1 - first;
        let mut out = Vec::new();
        for text in self.lines() {
            let width = self.line_width(&text);
            let x = match self.text_alignment {
                TextAlignment::Left => frame.x0,
                TextAlignment::Center => frame.center().x - 0.5 * width,
                TextAlignment::Right => frame.x1 - width,
            };
            out.push(LabelLine {
                text,
                origin: Point::new(x, y),
                width,
            });
            y -= advance;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magicscript_props::Token;

    #[test]
    fn defaults() {
        let label = LabelNode::new();
        assert_eq!(label.text(), "");
        assert_eq!(label.text_size(), 0.0);
        assert!((label.font_size() - 0.8 * 0.015).abs() < 1e-12);
        assert_eq!(label.text_color(), Color::gray(0.75, 1.0));
        assert_eq!(label.line_spacing(), 1.0);
        assert_eq!(label.tracking(), 50.0);
        assert_eq!(label.text_alignment(), TextAlignment::Left);
        assert!(!label.all_caps() && !label.multiline());
        assert_eq!(label.size(), Size::ZERO, "empty text measures as its bounds");
    }

    #[test]
    fn bounds_win_when_fully_set() {
        let mut label = LabelNode::new();
        label.set_text("Hello");
        let natural = label.size();
        assert!(natural.width > 0.0 && natural.height > 0.0);

        label.set_bounds_size(Size::new(0.3, 0.1));
        assert_eq!(label.size(), Size::new(0.3, 0.1));

        label.set_bounds_size(Size::new(0.3, 0.0));
        assert_eq!(label.size().width, 0.3);
        assert!((label.size().height - natural.height).abs() < 1e-12);
    }

    #[test]
    fn padding_adds_to_measured_axes() {
        let mut label = LabelNode::new();
        label.set_text("Hi");
        let plain = label.size();
        label.set_padding(Insets::new(0.01, 0.02, 0.03, 0.04));
        let padded = label.size();
        assert!((padded.width - plain.width - 0.04).abs() < 1e-12);
        assert!((padded.height - plain.height - 0.06).abs() < 1e-12);
    }

    #[test]
    fn setters_report_changes_only() {
        let mut label = LabelNode::new();
        assert!(label.set_text("a"));
        assert!(!label.set_text("a"));
        assert!(label.set_text_size(0.02));
        assert!(!label.set_text_size(0.02));
        assert!(label.set_text_size(-1.0), "clamped to zero");
        assert_eq!(label.text_size(), 0.0);
    }

    #[test]
    fn all_caps_and_graphemes() {
        let mut label = LabelNode::new();
        label.set_text("e\u{301}a");
        let two = label.line_width(&label.display_text());
        label.set_all_caps(true);
        assert_eq!(label.display_text(), "E\u{301}A");
        assert!(label.line_width(&label.display_text()) > two, "capitals are wider");
    }

    #[test]
    fn multiline_wraps_to_bounds_width() {
        let mut label = LabelNode::new();
        label.set_text("one two three four five six");
        let single = label.size();
        label.set_multiline(true);
        label.set_bounds_size(Size::new(single.width * 0.4, 0.0));
        let lines = label.lines();
        assert!(lines.len() > 1, "wrapped into {lines:?}");
        assert!(lines.iter().all(|l| !l.starts_with(' ') && !l.ends_with(' ')));
        assert!(label.size().height > single.height);
        assert_eq!(lines.join(" "), "one two three four five six");
    }

    #[test]
    fn line_breaks_need_multiline() {
        let mut label = LabelNode::new();
        label.set_text("a\nb");
        assert_eq!(label.lines().len(), 1);
        label.set_multiline(true);
        assert_eq!(label.lines().as_slice(), ["a", "b"]);
    }

    #[test]
    fn alignment_moves_line_origins() {
        let mut label = LabelNode::new();
        label.set_text("abc");
        let size = Size::new(1.0, 0.1);
        let left = label.lay_out(size)[0].origin.x;
        label.set_text_alignment(TextAlignment::Right);
        let right = label.lay_out(size)[0].origin.x;
        assert_eq!(left, -0.5);
        assert!((right + label.line_width("abc") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn font_parameters_apply_after_flat_keys() {
        let mut label = LabelNode::new();
        let props = Props::from_json_str(
            r#"{ "textSize": 0.02, "weight": "light",
                 "fontParameters": { "fontSize": 0.03, "weight": "bold", "allCaps": true } }"#,
        )
        .unwrap();
        assert!(label.apply_props(&props));
        assert_eq!(label.text_size(), 0.03);
        assert_eq!(label.font().weight, FontWeight::Bold);
        assert!(label.all_caps());
        assert!(!label.apply_props(&props), "second application changes nothing");
    }

    #[test]
    fn unknown_tokens_are_ignored() {
        assert_eq!(FontWeight::from_token("heavy"), None);
        let mut label = LabelNode::new();
        let props = Props::from_json_str(r#"{ "textAlignment": "justify" }"#).unwrap();
        assert!(!label.apply_props(&props));
        assert_eq!(label.text_alignment(), TextAlignment::Left);
    }
}
