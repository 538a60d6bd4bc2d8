//! # keep-mounted
//!
//! Keep previously rendered children mounted when a parent swaps which child
//! is active. Inactive children are hidden with `display: none` instead of
//! being destroyed, so their state survives the swap.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! Two layers:
//!
//! - A pure core. [`KeepMountedCache::update`] computes the next cache state
//!   from the current children without mutating anything, [`render`] turns a
//!   cache into wrapper descriptors, and [`KeepMounted`] is a container
//!   instance chaining the two.
//! - A reactive layer. [`primitives::keep_mounted`] drives the same cache from
//!   a children getter and allocates one wrapper element per key in the
//!   [`engine`] registry; moving the active key only flips visibility.
//!
//! ```text
//! Children → update (pure) → KeepMountedCache → render → [Wrapper; n]
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Keys, prop values, style, element flags
//! - [`children`] - Child descriptors and the children value
//! - [`cache`] - The keyed cache and its update policies
//! - [`render`] - Wrapper descriptors
//! - [`container`] - The `KeepMounted` container instance
//! - [`engine`] - Element registry and parallel arrays
//! - [`primitives`] - `wrapper` and `keep_mounted`

pub mod cache;
pub mod children;
pub mod container;
pub mod engine;
pub mod error;
pub mod primitives;
pub mod render;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use cache::{CacheChange, CacheUpdate, KeepMountedCache, UpdatePolicy};
pub use children::{Child, Children};
pub use error::{KeepMountedError, Result};
pub use container::KeepMounted;
pub use render::{render, split_style_attr, visibility_style, Wrapper, WrapperProps, DEFAULT_TAG};

pub use engine::{
    allocate_index, get_allocated_count, get_allocated_indices, get_current_parent_index,
    is_allocated, on_destroy, pop_parent_context, push_parent_context, release_index,
    reset_registry, snapshot,
};

pub use primitives::{
    keep_mounted, wrapper, ChildGetter, Cleanup, KeepMountedProps,
    PropValue, WrapperElementProps,
};
