//! Wrapper Primitive - Container element around a kept child.
//!
//! Allocates one index, records tag, attributes, key and the visibility
//! binding, then renders its children with itself as the parent context.
//!
//! # Example
//!
//! ```ignore
//! use keep_mounted::primitives::{wrapper, PropValue, WrapperElementProps};
//! use spark_signals::signal;
//!
//! let shown = signal(true);
//!
//! let cleanup = wrapper(WrapperElementProps {
//!     visible: Some(shown.clone().into()),
//!     ..Default::default()
//! });
//!
//! // Hide without unmounting
//! shown.set(false);
//! ```

use crate::engine::arrays::{core, element};
use crate::engine::{allocate_index, get_current_parent_index, release_index, with_parent_context};
use crate::render::DEFAULT_TAG;
use crate::types::ElementFlags;

use super::types::{Cleanup, WrapperElementProps};

/// Create a wrapper element.
///
/// Returns a cleanup function that releases the element and everything
/// rendered inside it.
pub fn wrapper(props: WrapperElementProps) -> Cleanup {
    // 1. ALLOCATE INDEX
    let index = allocate_index(props.id.as_deref());

    // 2. CORE SETUP - Parent, flags, key
    if let Some(parent) = get_current_parent_index() {
        core::set_parent_index(index, Some(parent));
    }
    core::set_flags(index, props.flags | ElementFlags::WRAPPER);
    core::set_key(index, props.key);

    // 3. ELEMENT SETUP - Tag and attributes
    let tag = if props.tag.is_empty() { DEFAULT_TAG.to_string() } else { props.tag };
    element::set_tag(index, tag);
    element::set_attrs(index, props.attrs);

    // 4. BIND VISIBILITY
    if let Some(visible) = props.visible {
        core::set_visible(index, visible);
    }

    // 5. RENDER CHILDREN
    if let Some(children) = props.children {
        with_parent_context(Some(index), children);
    }

    // 6. RETURN CLEANUP
    Box::new(move || release_index(index))
}
