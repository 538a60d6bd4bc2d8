//! Core types for keep-mounted.
//!
//! Identity keys, structured prop values, inline style and element flags.
//! Everything else in the crate is built out of these.

use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Key
// =============================================================================

/// Identity key of a child.
///
/// A key names one logical "page" being kept mounted. Keys are normalized to
/// their string form, so a number key and its decimal text are the same key:
/// `Key::from(1) == Key::from("1")`, and `Key::from(1.5) == Key::from("1.5")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key(value.to_string())
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key(value.to_string())
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Key(value.to_string())
    }
}

impl From<f64> for Key {
    /// Integral values print without a fraction (`2.0` → `"2"`); infinities
    /// print as `Infinity` / `-Infinity`.
    fn from(value: f64) -> Self {
        let text = if value.is_infinite() {
            if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
        } else {
            value.to_string()
        };
        Key(text)
    }
}

// =============================================================================
// Value - structured prop value
// =============================================================================

/// A structured property value.
///
/// Equality is structural: lists compare element-wise, maps compare key sets
/// and values. Numbers compare numerically, except that `NaN` equals `NaN`
/// so a prop bag holding `NaN` is still equal to itself.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (name, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Props> for Value {
    fn from(value: Props) -> Self {
        Value::Map(value.0)
    }
}

// =============================================================================
// Props - property bag
// =============================================================================

/// An ordered property bag.
///
/// Used both for a child's props and for pass-through wrapper attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(BTreeMap<String, Value>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// ```ignore
    /// let props = Props::new().with("x", 1).with("title", "Home");
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Props(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// =============================================================================
// Style
// =============================================================================

/// Inline style applied to a wrapper.
///
/// `base` is the pass-through `style` attribute, if any. The visibility
/// override is appended after it, so `display: none` always wins over a
/// `display` set by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    pub hidden: bool,
    pub base: Option<String>,
}

impl Style {
    /// Style that hides an element while keeping it mounted.
    pub const HIDDEN: Self = Self {
        hidden: true,
        base: None,
    };

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn with_base(mut self, base: Option<String>) -> Self {
        self.base = base;
        self
    }

    /// True when there is nothing to write into a `style` attribute.
    pub fn is_empty(&self) -> bool {
        !self.hidden && self.base.is_none()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.base, self.hidden) {
            (Some(base), true) => write!(f, "{}; display: none", base.trim_end_matches([';', ' '])),
            (Some(base), false) => f.write_str(base),
            (None, true) => f.write_str("display: none"),
            (None, false) => Ok(()),
        }
    }
}

// =============================================================================
// Element Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Per-element flags stored in the registry.
    ///
    /// Combine with bitwise OR: `ElementFlags::WRAPPER | ElementFlags::KEPT`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ElementFlags: u8 {
        const NONE = 0;
        /// Created by the wrapper primitive.
        const WRAPPER = 1 << 0;
        /// Owned by a keep_mounted container; survives active-key swaps.
        const KEPT = 1 << 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys_normalize_to_text() {
        assert_eq!(Key::from("1"), Key::from(1));
        assert_eq!(Key::from("a"), Key::from("a".to_string()));
        assert_eq!(Key::from(7i64), Key::from(7u32));
        assert_eq!(Key::from(1.5), Key::from("1.5"));
        assert_eq!(Key::from(2.0), Key::from(2));
        assert_eq!(Key::from(f64::INFINITY).as_str(), "Infinity");
        assert_ne!(Key::from("01"), Key::from(1));
    }

    #[test]
    fn test_value_nan_equals_nan() {
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_ne!(Value::from(1), Value::from("1"));
        assert_eq!(Value::from(2), Value::from(2.0));
    }

    #[test]
    fn test_props_structural_equality() {
        let a = Props::new()
            .with("x", 1)
            .with("nested", Props::new().with("list", vec![Value::from(1), Value::Null]));
        let b = Props::new()
            .with("nested", Props::new().with("list", vec![Value::from(1), Value::Null]))
            .with("x", 1);
        assert_eq!(a, b);

        let c = Props::new()
            .with("x", 1)
            .with("nested", Props::new().with("list", vec![Value::from(2), Value::Null]));
        assert_ne!(a, c);
        assert_ne!(a, Props::new().with("x", 1));
    }

    #[test]
    fn test_value_display() {
        let props = Props::new().with("a", 1).with("b", "two");
        assert_eq!(Value::from(props).to_string(), "{a: 1, b: \"two\"}");
        assert_eq!(Value::from(vec![Value::from(true), Value::Null]).to_string(), "[true, null]");
    }

    #[test]
    fn test_style_hidden() {
        assert!(Style::HIDDEN.is_hidden());
        assert!(!Style::default().is_hidden());
        assert!(Style::default().is_empty());
        assert_eq!(Style::HIDDEN.to_string(), "display: none");
    }

    #[test]
    fn test_style_base_keeps_hidden_last() {
        let base = Some("color: red; display: flex;".to_string());
        assert_eq!(
            Style::HIDDEN.with_base(base.clone()).to_string(),
            "color: red; display: flex; display: none"
        );
        assert_eq!(Style::default().with_base(base).to_string(), "color: red; display: flex;");
    }

    #[test]
    fn test_element_flags() {
        let flags = ElementFlags::WRAPPER | ElementFlags::KEPT;
        assert!(flags.contains(ElementFlags::KEPT));
        assert!(!ElementFlags::WRAPPER.contains(ElementFlags::KEPT));
    }
}
