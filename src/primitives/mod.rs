//! Primitives - Element building blocks.
//!
//! - [`wrapper`] - Container element with tag, attributes and a visibility binding
//! - [`keep_mounted`] - Conditional rendering that hides instead of destroying
//!
//! # Architecture
//!
//! Elements are indices into parallel arrays (ECS pattern). Each primitive:
//! 1. Allocates an index from the registry
//! 2. Binds props directly to the arrays (preserving reactivity!)
//! 3. Returns a cleanup function
//!
//! Pass signals and getters through as-is; extracting the value first breaks
//! the reactive connection.
//!
//! ```ignore
//! // CORRECT - visibility follows the signal
//! wrapper(WrapperElementProps { visible: Some(PropValue::Signal(shown)), ..Default::default() });
//!
//! // WRONG - frozen at creation time
//! wrapper(WrapperElementProps { visible: Some(PropValue::Static(shown.get())), ..Default::default() });
//! ```

mod types;
mod wrapper;
mod control_flow;

pub use types::*;
pub use wrapper::wrapper;
pub use control_flow::{keep_mounted, ChildGetter, KeepMountedProps};
