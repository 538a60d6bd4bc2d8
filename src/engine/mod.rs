//! Engine - Element registry and parallel arrays.
//!
//! The engine manages the core data structures:
//! - Registry: Index allocation, ID mapping, parent context
//! - Arrays: Parallel arrays for element state
//! - Snapshot: Textual dump of the mounted tree
//!
//! # Architecture
//!
//! Elements are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: div  (parent=-1, key=a, visible=false, flags=WRAPPER|KEPT)
//! Index 1: text (parent=0,  key=-,  visible=true,  flags=NONE)
//! Index 2: div  (parent=-1, key=b, visible=true,  flags=WRAPPER|KEPT)
//! ```
//!
//! A kept element keeps its index for as long as its container lives; only
//! the visibility cell changes when the active key moves.

mod registry;
mod snapshot;
pub mod arrays;

pub use registry::*;
pub use snapshot::snapshot;
