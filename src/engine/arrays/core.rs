//! Core Arrays
//!
//! The fundamental element columns:
//! - parentIndex: Parent in hierarchy
//! - visible: Visibility binding (static, signal or getter)
//! - flags: [`ElementFlags`]
//! - key: Identity key of the kept child, if any
//!
//! Visibility is stored as a binding, not a value. Reading it through
//! [`is_visible`] inside an effect tracks whatever signal backs it.

use std::cell::RefCell;

use crate::primitives::PropValue;
use crate::types::{ElementFlags, Key};

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Parent element index (None for root).
    static PARENT_INDEX: RefCell<Vec<Option<usize>>> = const { RefCell::new(Vec::new()) };

    /// Visibility binding (None = default visible).
    static VISIBLE: RefCell<Vec<Option<PropValue<bool>>>> = const { RefCell::new(Vec::new()) };

    /// Element flags.
    static FLAGS: RefCell<Vec<ElementFlags>> = const { RefCell::new(Vec::new()) };

    /// Identity key of the kept child wrapped by this element.
    static KEY: RefCell<Vec<Option<Key>>> = const { RefCell::new(Vec::new()) };
}

fn grow<T>(arr: &mut Vec<T>, index: usize, fill: impl Fn() -> T) {
    while arr.len() <= index {
        arr.push(fill());
    }
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    PARENT_INDEX.with(|arr| grow(&mut arr.borrow_mut(), index, || None));
    VISIBLE.with(|arr| grow(&mut arr.borrow_mut(), index, || None));
    FLAGS.with(|arr| grow(&mut arr.borrow_mut(), index, ElementFlags::default));
    KEY.with(|arr| grow(&mut arr.borrow_mut(), index, || None));
}

/// Clear values at index (called when releasing).
pub fn clear_at_index(index: usize) {
    PARENT_INDEX.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = None;
        }
    });
    VISIBLE.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = None;
        }
    });
    FLAGS.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = ElementFlags::NONE;
        }
    });
    KEY.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = None;
        }
    });
}

/// Reset all arrays.
pub fn reset() {
    PARENT_INDEX.with(|arr| arr.borrow_mut().clear());
    VISIBLE.with(|arr| arr.borrow_mut().clear());
    FLAGS.with(|arr| arr.borrow_mut().clear());
    KEY.with(|arr| arr.borrow_mut().clear());
}

// =============================================================================
// Parent Index
// =============================================================================

pub fn get_parent_index(index: usize) -> Option<usize> {
    PARENT_INDEX.with(|arr| arr.borrow().get(index).copied().flatten())
}

pub fn set_parent_index(index: usize, parent: Option<usize>) {
    PARENT_INDEX.with(|arr| {
        let mut arr = arr.borrow_mut();
        grow(&mut arr, index, || None);
        arr[index] = parent;
    });
}

// =============================================================================
// Visibility
// =============================================================================

/// Current visibility at index. Elements without a binding are visible.
///
/// The binding is cloned out before it is read, so a getter may itself
/// touch the arrays.
pub fn is_visible(index: usize) -> bool {
    let binding = VISIBLE.with(|arr| arr.borrow().get(index).cloned().flatten());
    binding.map(|b| b.get()).unwrap_or(true)
}

pub fn set_visible(index: usize, visible: PropValue<bool>) {
    VISIBLE.with(|arr| {
        let mut arr = arr.borrow_mut();
        grow(&mut arr, index, || None);
        arr[index] = Some(visible);
    });
}

// =============================================================================
// Flags
// =============================================================================

pub fn get_flags(index: usize) -> ElementFlags {
    FLAGS.with(|arr| arr.borrow().get(index).copied().unwrap_or_default())
}

pub fn set_flags(index: usize, flags: ElementFlags) {
    FLAGS.with(|arr| {
        let mut arr = arr.borrow_mut();
        grow(&mut arr, index, ElementFlags::default);
        arr[index] = flags;
    });
}

// =============================================================================
// Key
// =============================================================================

pub fn get_key(index: usize) -> Option<Key> {
    KEY.with(|arr| arr.borrow().get(index).cloned().flatten())
}

pub fn set_key(index: usize, key: Option<Key>) {
    KEY.with(|arr| {
        let mut arr = arr.borrow_mut();
        grow(&mut arr, index, || None);
        arr[index] = key;
    });
}
