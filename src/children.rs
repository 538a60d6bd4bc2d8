//! Child descriptors and the children value handed to a keep-mounted container.

use crate::error::{KeepMountedError, Result};
use crate::types::{Key, Props, Value};

// =============================================================================
// Child
// =============================================================================

/// A tree-like render descriptor.
///
/// The container never looks inside a child beyond its `key` and `props`;
/// `kind` and `children` are carried along untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Child {
    pub key: Option<Key>,
    pub kind: String,
    pub props: Props,
    pub children: Vec<Child>,
}

impl Child {
    /// Create an unkeyed child of the given kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Create a keyed child of the given kind.
    pub fn keyed(kind: impl Into<String>, key: impl Into<Key>) -> Self {
        Self::new(kind).key(key)
    }

    pub fn key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name, value);
        self
    }

    pub fn child(mut self, child: Child) -> Self {
        self.children.push(child);
        self
    }
}

// =============================================================================
// Children
// =============================================================================

/// The children value passed to a keep-mounted container.
///
/// Conditional rendering in the parent produces either one keyed child, or
/// nothing, or a list of placeholders where every branch was switched off.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Children {
    #[default]
    None,
    Single(Child),
    List(Vec<Option<Child>>),
}

impl Children {
    /// True when there is nothing to keep: no value, or only placeholders.
    pub fn is_empty(&self) -> bool {
        match self {
            Children::None => true,
            Children::Single(_) => false,
            Children::List(items) => items.iter().all(Option::is_none),
        }
    }

    /// The single keyed child, or `None` when the children are empty.
    ///
    /// Fails when the children are non-empty but do not form one keyed child.
    pub fn active(&self) -> Result<Option<(&Key, &Child)>> {
        match self {
            _ if self.is_empty() => Ok(None),
            Children::Single(child) => match &child.key {
                Some(key) => Ok(Some((key, child))),
                None => Err(KeepMountedError::MissingKey {
                    kind: child.kind.clone(),
                }),
            },
            Children::List(items) => Err(KeepMountedError::NotSingleChild { len: items.len() }),
            Children::None => Ok(None),
        }
    }
}

impl From<Child> for Children {
    fn from(child: Child) -> Self {
        Children::Single(child)
    }
}

impl From<Option<Child>> for Children {
    fn from(child: Option<Child>) -> Self {
        match child {
            Some(child) => Children::Single(child),
            None => Children::None,
        }
    }
}

impl From<Vec<Option<Child>>> for Children {
    fn from(items: Vec<Option<Child>>) -> Self {
        Children::List(items)
    }
}
