//! Error types.

use thiserror::Error;

/// Contract violations detected while updating a keep-mounted cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeepMountedError {
    /// Non-empty children whose child carries no identity key.
    #[error("keep_mounted child `{kind}` has no key; every kept child needs a unique key")]
    MissingKey { kind: String },

    /// A sequence holding real children instead of one keyed child.
    #[error("keep_mounted expects a single keyed child, got a list of {len} entries")]
    NotSingleChild { len: usize },
}

pub type Result<T> = std::result::Result<T, KeepMountedError>;
