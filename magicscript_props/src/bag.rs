// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::{DMat4, DQuat, DVec3, DVec4};
use kurbo::{Insets, Size};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Color, PropsError, Token};

/// A partial property update: string keys mapped to JSON values.
///
/// Accessors never fail loudly. See the crate docs for the conversion rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(Map<String, Value>);

impl Props {
    /// Create an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document whose root must be an object.
    pub fn from_json_str(text: &str) -> Result<Self, PropsError> {
        let value: Value = serde_json::from_str(text)?;
        Self::try_from(value)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a property.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merge `other` into `self`; keys in `other` win.
    pub fn merge(&mut self, other: &Self) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Whether a key is present, regardless of its value.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no properties.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys present in this bag.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Raw JSON value for `key`.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.raw(key)?.as_str()
    }

    /// Boolean value. Numbers and strings are not coerced.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.raw(key)?.as_bool()
    }

    /// Integral number value.
    pub fn int(&self, key: &str) -> Option<i64> {
        let value = self.raw(key)?;
        if let Some(i) = value.as_i64() {
            return Some(i);
        }
        let whole = value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e18)?;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Only whole numbers within i64 range reach the cast."
        )]
        let i = whole as i64;
        Some(i)
    }

    /// Numeric value. Numeric strings such as `"0.5"` are accepted.
    pub fn number(&self, key: &str) -> Option<f64> {
        number(self.raw(key)?)
    }

    /// Two element array as a size.
    pub fn size(&self, key: &str) -> Option<Size> {
        let [w, h] = numbers::<2>(self.raw(key)?)?;
        Some(Size::new(w, h))
    }

    /// Three element array.
    pub fn vec3(&self, key: &str) -> Option<DVec3> {
        vec3(self.raw(key)?)
    }

    /// Four element array.
    pub fn vec4(&self, key: &str) -> Option<DVec4> {
        numbers::<4>(self.raw(key)?).map(DVec4::from_array)
    }

    /// Quaternion given as `[x, y, z, w]`. The result is normalized.
    pub fn quat(&self, key: &str) -> Option<DQuat> {
        let q = DQuat::from_array(numbers::<4>(self.raw(key)?)?);
        (q.length_squared() > 0.0).then(|| q.normalize())
    }

    /// Sixteen element array, column-major.
    pub fn mat4(&self, key: &str) -> Option<DMat4> {
        numbers::<16>(self.raw(key)?).map(|m| DMat4::from_cols_array(&m))
    }

    /// Padding given as `[top, right, bottom, left]`.
    pub fn padding(&self, key: &str) -> Option<Insets> {
        let [top, right, bottom, left] = numbers::<4>(self.raw(key)?)?;
        Some(Insets::new(left, top, right, bottom))
    }

    /// Color given as `[r, g, b]` or `[r, g, b, a]`.
    pub fn color(&self, key: &str) -> Option<Color> {
        color(self.raw(key)?)
    }

    /// Resource location given as a string or as `{ "uri": ... }`.
    ///
    /// Only `http(s)` and `file` locations are accepted.
    pub fn file_url(&self, key: &str) -> Option<&str> {
        let value = self.raw(key)?;
        let path = match value {
            Value::Object(map) => map.get("uri")?.as_str()?,
            other => other.as_str()?,
        };
        (path.starts_with("http") || path.starts_with("file")).then_some(path)
    }

    /// Nested object, for properties such as `scrollBounds` or `fontParameters`.
    pub fn object(&self, key: &str) -> Option<Self> {
        match self.raw(key)? {
            Value::Object(map) => Some(Self(map.clone())),
            _ => None,
        }
    }

    /// Array of three element points.
    ///
    /// A non-array yields `None`. An array containing any malformed point yields an
    /// empty list, so callers clear their points rather than keep a partial set.
    pub fn vec3_list(&self, key: &str) -> Option<Vec<DVec3>> {
        let items = self.raw(key)?.as_array()?;
        let points: Option<Vec<DVec3>> = items.iter().map(vec3).collect();
        Some(points.unwrap_or_default())
    }

    /// Enum value parsed from its token table.
    pub fn token<T: Token>(&self, key: &str) -> Option<T> {
        let token = self.string(key)?;
        let parsed = T::from_token(token);
        if parsed.is_none() {
            log::debug!("ignoring unknown {} token {token:?} for `{key}`", T::KIND);
        }
        parsed
    }
}

impl TryFrom<Value> for Props {
    type Error = PropsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(PropsError::NotAnObject {
                found: kind_of(&other),
            }),
        }
    }
}

impl From<Map<String, Value>> for Props {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn numbers<const N: usize>(value: &Value) -> Option<[f64; N]> {
    let items = value.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = number(item)?;
    }
    Some(out)
}

fn vec3(value: &Value) -> Option<DVec3> {
    numbers::<3>(value).map(DVec3::from_array)
}

fn color(value: &Value) -> Option<Color> {
    let items = value.as_array()?;
    if items.len() < 3 {
        return None;
    }
    let r = number(&items[0])?;
    let g = number(&items[1])?;
    let b = number(&items[2])?;
    let a = items.get(3).and_then(number).unwrap_or(1.0);
    Some(Color::rgba(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use magicscript_math::Alignment;
    use serde_json::json;

    fn props(value: Value) -> Props {
        Props::try_from(value).unwrap()
    }

    #[test]
    fn wrong_types_are_ignored() {
        let p = props(json!({
            "text": 5,
            "enabled": "yes",
            "width": [1, 2],
            "localPosition": [1, 2, "x"],
        }));
        assert_eq!(p.string("text"), None);
        assert_eq!(p.bool("enabled"), None);
        assert_eq!(p.number("width"), None);
        assert_eq!(p.vec3("localPosition"), None);
        assert_eq!(p.number("missing"), None);
    }

    #[test]
    fn numeric_strings_are_numbers() {
        let p = props(json!({ "a": "0.25", "b": " 2 ", "c": "wide", "d": [1, "2", 3] }));
        assert_eq!(p.number("a"), Some(0.25));
        assert_eq!(p.number("b"), Some(2.0));
        assert_eq!(p.number("c"), None);
        assert_eq!(p.vec3("d"), Some(DVec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn ints_accept_whole_floats_only() {
        let p = props(json!({ "a": 12, "b": 3.0, "c": 3.5 }));
        assert_eq!(p.int("a"), Some(12));
        assert_eq!(p.int("b"), Some(3));
        assert_eq!(p.int("c"), None);
    }

    #[test]
    fn colors_default_alpha() {
        let p = props(json!({ "rgb": [1, 0.5, 0], "rgba": [0, 0, 0, 0.25], "bad": [1, 0] }));
        assert_eq!(p.color("rgb"), Some(Color::rgba(1.0, 0.5, 0.0, 1.0)));
        assert_eq!(p.color("rgba"), Some(Color::rgba(0.0, 0.0, 0.0, 0.25)));
        assert_eq!(p.color("bad"), None);
    }

    #[test]
    fn padding_order() {
        let p = props(json!({ "padding": [1, 2, 3, 4] }));
        let insets = p.padding("padding").unwrap();
        assert_eq!(insets.y0, 1.0, "top");
        assert_eq!(insets.x1, 2.0, "right");
        assert_eq!(insets.y1, 3.0, "bottom");
        assert_eq!(insets.x0, 4.0, "left");
    }

    #[test]
    fn file_urls() {
        let p = props(json!({
            "plain": "https://example.com/a.png",
            "wrapped": { "uri": "file:///tmp/a.png" },
            "relative": "assets/a.png",
        }));
        assert_eq!(p.file_url("plain"), Some("https://example.com/a.png"));
        assert_eq!(p.file_url("wrapped"), Some("file:///tmp/a.png"));
        assert_eq!(p.file_url("relative"), None);
    }

    #[test]
    fn nested_objects_and_tokens() {
        let p = props(json!({
            "scrollBounds": { "min": [0, 0, 0] },
            "alignment": "bottom-right",
            "other": "sideways",
        }));
        let bounds = p.object("scrollBounds").unwrap();
        assert_eq!(bounds.vec3("min"), Some(DVec3::ZERO));
        assert!(!bounds.contains("max"));
        assert_eq!(p.token::<Alignment>("alignment"), Some(Alignment::BottomRight));
        assert_eq!(p.token::<Alignment>("other"), None);
    }

    #[test]
    fn point_lists_clear_on_bad_points() {
        let p = props(json!({
            "good": [[0, 0, 0], [1, 1, 1]],
            "bad": [[0, 0, 0], [1, 1]],
            "none": 4,
        }));
        assert_eq!(p.vec3_list("good").map(|v| v.len()), Some(2));
        assert_eq!(p.vec3_list("bad"), Some(Vec::new()));
        assert_eq!(p.vec3_list("none"), None);
    }

    #[test]
    fn quaternions_are_normalized() {
        let p = props(json!({ "r": [0, 0, 0, 2], "zero": [0, 0, 0, 0] }));
        assert_eq!(p.quat("r"), Some(DQuat::IDENTITY));
        assert_eq!(p.quat("zero"), None);
    }

    #[test]
    fn documents_must_be_objects() {
        assert!(matches!(
            Props::from_json_str("[1, 2]"),
            Err(PropsError::NotAnObject { found: "an array" })
        ));
        assert!(matches!(
            Props::from_json_str("{"),
            Err(PropsError::Json(_))
        ));
    }

    #[test]
    fn merge_prefers_newer_keys() {
        let mut base = Props::new().with("a", 1).with("b", 2);
        base.merge(&Props::new().with("b", 3));
        assert_eq!(base.int("a"), Some(1));
        assert_eq!(base.int("b"), Some(3));
    }
}
