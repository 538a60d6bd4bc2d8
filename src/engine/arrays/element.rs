//! Element Arrays
//!
//! What a mounted element looks like: its tag and its attributes.

use std::cell::RefCell;

use crate::types::Props;

thread_local! {
    /// Element tag ("div", "section", ...). Empty for released slots.
    static TAG: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };

    /// Attributes forwarded to the element.
    static ATTRS: RefCell<Vec<Props>> = const { RefCell::new(Vec::new()) };
}

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    TAG.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(String::new());
        }
    });
    ATTRS.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(Props::new());
        }
    });
}

/// Clear values at index (called when releasing).
pub fn clear_at_index(index: usize) {
    TAG.with(|arr| {
        if let Some(tag) = arr.borrow_mut().get_mut(index) {
            tag.clear();
        }
    });
    ATTRS.with(|arr| {
        if let Some(attrs) = arr.borrow_mut().get_mut(index) {
            *attrs = Props::new();
        }
    });
}

/// Reset all arrays.
pub fn reset() {
    TAG.with(|arr| arr.borrow_mut().clear());
    ATTRS.with(|arr| arr.borrow_mut().clear());
}

pub fn get_tag(index: usize) -> String {
    TAG.with(|arr| arr.borrow().get(index).cloned().unwrap_or_default())
}

pub fn set_tag(index: usize, tag: impl Into<String>) {
    ensure_capacity(index);
    TAG.with(|arr| arr.borrow_mut()[index] = tag.into());
}

pub fn get_attrs(index: usize) -> Props {
    ATTRS.with(|arr| arr.borrow().get(index).cloned().unwrap_or_default())
}

pub fn set_attrs(index: usize, attrs: Props) {
    ensure_capacity(index);
    ATTRS.with(|arr| arr.borrow_mut()[index] = attrs);
}
