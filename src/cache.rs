//! Keep-mounted cache - key to last-seen child, in insertion order.
//!
//! The cache is owned by one container instance. Updating it is a pure step:
//! [`KeepMountedCache::update`] returns the next state instead of mutating, and
//! the caller decides when to commit it.
//!
//! ```text
//! render(a {x:1})  → {a}        Inserted(a)
//! render(b {})     → {a, b}     Inserted(b)
//! render(a {x:2})  → {a', b}    Replaced(a)   (PropsAware)
//!                  → {a, b}     Unchanged(a)  (InsertOnce)
//! render(<empty>)  → {a, b}     Skipped
//! ```

use std::rc::Rc;

use indexmap::IndexMap;

use crate::children::{Child, Children};
use crate::error::Result;
use crate::types::Key;

// =============================================================================
// Update Policy
// =============================================================================

/// How an existing entry reacts to a new description under the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePolicy {
    /// Replace the entry when the new props or nested children are
    /// structurally different. Otherwise the stored descriptor is kept, so
    /// nothing remounts. The element kind is not compared.
    #[default]
    PropsAware,
    /// Insert on first sight, never update afterwards.
    InsertOnce,
}

// =============================================================================
// Cache Change
// =============================================================================

/// What an update did to the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheChange {
    /// Children were empty; the cache is untouched.
    Skipped,
    /// First time this key was seen.
    Inserted(Key),
    /// Key was known and its descriptor was replaced.
    Replaced(Key),
    /// Key was known and the stored descriptor was kept.
    Unchanged(Key),
}

impl CacheChange {
    /// Key the change applies to, `None` for [`CacheChange::Skipped`].
    pub fn key(&self) -> Option<&Key> {
        match self {
            CacheChange::Skipped => None,
            CacheChange::Inserted(key) | CacheChange::Replaced(key) | CacheChange::Unchanged(key) => {
                Some(key)
            }
        }
    }

    /// True when the stored descriptor for the key is new.
    pub fn is_write(&self) -> bool {
        matches!(self, CacheChange::Inserted(_) | CacheChange::Replaced(_))
    }
}

/// Result of [`KeepMountedCache::update`]: next state plus what changed.
#[derive(Debug, Clone)]
pub struct CacheUpdate {
    pub cache: KeepMountedCache,
    /// Key of the child that should be visible, `None` when children were empty.
    pub active: Option<Key>,
    pub change: CacheChange,
}

// =============================================================================
// Cache
// =============================================================================

/// Mapping from child key to the last kept child description.
///
/// Entries are shared (`Rc`) so cloning the cache is cheap and an unchanged
/// entry can be recognised with [`Rc::ptr_eq`].
#[derive(Debug, Clone, Default)]
pub struct KeepMountedCache {
    entries: IndexMap<Key, Rc<Child>>,
    policy: UpdatePolicy,
}

impl KeepMountedCache {
    /// Empty cache with the default [`UpdatePolicy::PropsAware`] policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: UpdatePolicy) -> Self {
        Self {
            entries: IndexMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &Key) -> Option<&Rc<Child>> {
        self.entries.get(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Rc<Child>)> {
        self.entries.iter()
    }

    /// Decide what an update with `children` would do, without touching state.
    pub fn plan(&self, children: &Children) -> Result<CacheChange> {
        let Some((key, child)) = children.active()? else {
            return Ok(CacheChange::Skipped);
        };

        let change = match (self.entries.get(key), self.policy) {
            (None, _) => CacheChange::Inserted(key.clone()),
            (Some(prev), UpdatePolicy::PropsAware)
                if prev.props != child.props || prev.children != child.children =>
            {
                CacheChange::Replaced(key.clone())
            }
            (Some(_), _) => CacheChange::Unchanged(key.clone()),
        };
        Ok(change)
    }

    /// Compute the next cache state for a render with `children`.
    ///
    /// `self` is left untouched. New and replaced entries keep their position
    /// in insertion order; a replaced key does not move to the end.
    pub fn update(&self, children: &Children) -> Result<CacheUpdate> {
        let change = self.plan(children)?;
        let mut cache = self.clone();

        if change.is_write() {
            if let Some((key, child)) = children.active()? {
                cache.entries.insert(key.clone(), Rc::new(child.clone()));
            }
        }

        match &change {
            CacheChange::Inserted(key) => log::debug!("keep_mounted: inserted `{}`", key),
            CacheChange::Replaced(key) => log::debug!("keep_mounted: props changed, replaced `{}`", key),
            CacheChange::Unchanged(key) => log::trace!("keep_mounted: kept `{}`", key),
            CacheChange::Skipped => log::trace!("keep_mounted: empty children, cache untouched"),
        }

        Ok(CacheUpdate {
            cache,
            active: change.key().cloned(),
            change,
        })
    }

    /// Drop one entry, keeping the order of the rest.
    ///
    /// Rendering never evicts; this is the only way an entry leaves the cache
    /// before the whole cache is torn down.
    pub fn remove(&mut self, key: &Key) -> Option<Rc<Child>> {
        let removed = self.entries.shift_remove(key);
        if removed.is_none() {
            log::warn!("keep_mounted: forget called for unknown key `{}`", key);
        }
        removed
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Props, Value};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn page(key: &str, x: i32) -> Children {
        Child::keyed("page", key).prop("x", x).into()
    }

    fn keys(cache: &KeepMountedCache) -> Vec<String> {
        cache.keys().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_insert_new_keys_in_order() {
        let cache = KeepMountedCache::new();
        let step = cache.update(&page("a", 1)).unwrap();
        assert_eq!(step.change, CacheChange::Inserted(Key::from("a")));
        let step = step.cache.update(&page("b", 1)).unwrap();
        assert_eq!(step.change, CacheChange::Inserted(Key::from("b")));
        assert_eq!(step.active, Some(Key::from("b")));
        assert_eq!(keys(&step.cache), vec!["a", "b"]);
    }

    #[test]
    fn test_update_is_pure() {
        let cache = KeepMountedCache::new();
        let step = cache.update(&page("a", 1)).unwrap();
        assert!(cache.is_empty());
        assert_eq!(step.cache.len(), 1);
    }

    #[test]
    fn test_props_aware_replaces_on_change() {
        let first = KeepMountedCache::new().update(&page("a", 1)).unwrap().cache;
        let before = first.get(&Key::from("a")).unwrap().clone();

        let step = first.update(&page("a", 2)).unwrap();
        assert_eq!(step.change, CacheChange::Replaced(Key::from("a")));
        let after = step.cache.get(&Key::from("a")).unwrap();
        assert!(!Rc::ptr_eq(&before, after));
        assert_eq!(after.props, Props::new().with("x", 2));
    }

    #[test]
    fn test_props_aware_keeps_reference_on_equal_props() {
        let first = KeepMountedCache::new().update(&page("a", 1)).unwrap().cache;
        let before = first.get(&Key::from("a")).unwrap().clone();

        let step = first.update(&page("a", 1)).unwrap();
        assert_eq!(step.change, CacheChange::Unchanged(Key::from("a")));
        assert!(Rc::ptr_eq(&before, step.cache.get(&Key::from("a")).unwrap()));
    }

    #[test]
    fn test_props_aware_ignores_non_prop_changes() {
        let first = KeepMountedCache::new().update(&page("a", 1)).unwrap().cache;
        let children: Children = Child::keyed("other-kind", "a").prop("x", 1).into();
        let step = first.update(&children).unwrap();
        assert_eq!(step.change, CacheChange::Unchanged(Key::from("a")));
        assert_eq!(step.cache.get(&Key::from("a")).unwrap().kind, "page");
    }

    #[test]
    fn test_props_aware_replaces_on_nested_change() {
        let tab = |content: &str| -> Children {
            Child::keyed("page", "a")
                .prop("x", 1)
                .child(Child::new("text").prop("content", content))
                .into()
        };

        let cache = KeepMountedCache::new().update(&tab("old")).unwrap().cache;
        let cache = cache.update(&page("b", 1)).unwrap().cache;

        let step = cache.update(&tab("new")).unwrap();
        assert_eq!(step.change, CacheChange::Replaced(Key::from("a")));
        let stored = step.cache.get(&Key::from("a")).unwrap();
        assert_eq!(stored.children[0].props.get("content"), Some(&Value::from("new")));

        let step = step.cache.update(&tab("new")).unwrap();
        assert_eq!(step.change, CacheChange::Unchanged(Key::from("a")));
    }

    #[test]
    fn test_insert_once_never_updates() {
        let first = KeepMountedCache::with_policy(UpdatePolicy::InsertOnce)
            .update(&page("a", 1))
            .unwrap()
            .cache;
        let before = first.get(&Key::from("a")).unwrap().clone();

        let step = first.update(&page("a", 2)).unwrap();
        assert_eq!(step.change, CacheChange::Unchanged(Key::from("a")));
        assert!(Rc::ptr_eq(&before, step.cache.get(&Key::from("a")).unwrap()));
        assert_eq!(step.cache.policy(), UpdatePolicy::InsertOnce);
    }

    #[test]
    fn test_replaced_key_keeps_position() {
        let cache = KeepMountedCache::new();
        let cache = cache.update(&page("a", 1)).unwrap().cache;
        let cache = cache.update(&page("b", 1)).unwrap().cache;
        let cache = cache.update(&page("a", 2)).unwrap().cache;
        assert_eq!(keys(&cache), vec!["a", "b"]);
    }

    #[rstest]
    #[case(UpdatePolicy::PropsAware)]
    #[case(UpdatePolicy::InsertOnce)]
    fn test_empty_children_skip(#[case] policy: UpdatePolicy) {
        let cache = KeepMountedCache::with_policy(policy)
            .update(&page("a", 1))
            .unwrap()
            .cache;

        for empty in [Children::None, Children::List(vec![None, None])] {
            let step = cache.update(&empty).unwrap();
            assert_eq!(step.change, CacheChange::Skipped);
            assert_eq!(step.active, None);
            assert_eq!(keys(&step.cache), vec!["a"]);
        }
    }

    #[rstest]
    #[case(UpdatePolicy::PropsAware)]
    #[case(UpdatePolicy::InsertOnce)]
    fn test_cache_grows_with_distinct_keys(#[case] policy: UpdatePolicy) {
        let mut cache = KeepMountedCache::with_policy(policy);
        for (i, key) in ["a", "b", "c", "b", "a", "d"].iter().enumerate() {
            cache = cache.update(&page(key, i as i32)).unwrap().cache;
        }
        assert_eq!(keys(&cache), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let cache = KeepMountedCache::new();
        assert!(cache.update(&Child::new("page").into()).is_err());
        assert!(cache.plan(&Child::new("page").into()).is_err());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut cache = KeepMountedCache::new();
        for key in ["a", "b", "c"] {
            cache = cache.update(&page(key, 0)).unwrap().cache;
        }
        assert!(cache.remove(&Key::from("b")).is_some());
        assert!(cache.remove(&Key::from("zzz")).is_none());
        assert_eq!(keys(&cache), vec!["a", "c"]);

        cache.clear();
        assert!(cache.is_empty());
    }
}
