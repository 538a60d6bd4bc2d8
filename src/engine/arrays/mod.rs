//! Parallel Arrays
//!
//! All mounted element state lives in these parallel arrays.
//! Each array index corresponds to one element.
//!
//! # Array Categories
//!
//! - **core**: Parent, visibility, flags, kept key
//! - **element**: Tag and attributes

pub mod core;
pub mod element;

use self::core as core_arrays;
use self::element as element_arrays;

/// Ensure all arrays have capacity for the given index.
///
/// Called by registry when allocating.
pub fn ensure_all_capacity(index: usize) {
    core_arrays::ensure_capacity(index);
    element_arrays::ensure_capacity(index);
}

/// Clear all array values at an index.
///
/// Called by registry when releasing.
pub fn clear_all_at_index(index: usize) {
    core_arrays::clear_at_index(index);
    element_arrays::clear_at_index(index);
}

/// Reset all parallel arrays to release memory.
///
/// Called automatically when the last element is released.
pub fn reset_all_arrays() {
    core_arrays::reset();
    element_arrays::reset();
}
