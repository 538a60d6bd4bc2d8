//! Primitive types - Props and cleanup.
//!
//! These types define the interface for element props.
//! Props support static values, signals, and getters for reactivity.

use std::rc::Rc;

use spark_signals::Signal;

use crate::types::{ElementFlags, Key, Props};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by primitives.
///
/// Call this to unmount the element and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// When bound into the arrays the reactive connection is preserved: reading
/// the cell inside an effect tracks the underlying signal.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }

    /// Wrap a getter closure.
    pub fn getter(f: impl Fn() -> T + 'static) -> Self {
        PropValue::Getter(Rc::new(f))
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

// =============================================================================
// Wrapper Element Props
// =============================================================================

/// Props for the [`wrapper`](super::wrapper) primitive.
///
/// ```ignore
/// wrapper(WrapperElementProps {
///     tag: "section".into(),
///     visible: Some(PropValue::getter(move || active.get() == key)),
///     children: Some(Box::new(|| { /* child elements */ })),
///     ..Default::default()
/// });
/// ```
pub struct WrapperElementProps {
    /// Optional element ID for lookup.
    pub id: Option<String>,

    /// Element tag. Empty falls back to `"div"`.
    pub tag: String,

    /// Attributes forwarded to the element. The snapshot folds a `style`
    /// entry into the visibility style.
    pub attrs: Props,

    /// Identity key of the kept child inside this wrapper.
    pub key: Option<Key>,

    /// Whether the element is displayed (default: true).
    pub visible: Option<PropValue<bool>>,

    /// Extra flags; `WRAPPER` is always added.
    pub flags: ElementFlags,

    /// Render children inside this element's parent context.
    pub children: Option<Box<dyn FnOnce()>>,
}

impl Default for WrapperElementProps {
    fn default() -> Self {
        Self {
            id: None,
            tag: crate::render::DEFAULT_TAG.to_string(),
            attrs: Props::new(),
            key: None,
            visible: None,
            flags: ElementFlags::NONE,
            children: None,
        }
    }
}
