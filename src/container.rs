//! KeepMounted container - owns one cache and renders through it.
//!
//! A container instance is created once per logical mount point and torn
//! down (dropped or cleared) when that mount point goes away. Two containers
//! never share a cache.
//!
//! # Example
//!
//! ```ignore
//! use keep_mounted::{Child, KeepMounted, Props, WrapperProps};
//!
//! let mut tabs = KeepMounted::new(WrapperProps::default());
//!
//! tabs.render(&Child::keyed("page", "a").prop("x", 1).into())?; // [a]
//! tabs.render(&Child::keyed("page", "b").into())?;              // [a (hidden), b]
//! let out = tabs.render(&Child::keyed("page", "a").prop("x", 2).into())?;
//! assert!(out[0].is_visible() && !out[1].is_visible());
//! ```

use crate::cache::{CacheChange, KeepMountedCache, UpdatePolicy};
use crate::children::Children;
use crate::error::Result;
use crate::render::{Wrapper, WrapperProps, render};
use crate::types::Key;

/// A keep-mounted container instance.
#[derive(Debug, Clone, Default)]
pub struct KeepMounted {
    cache: KeepMountedCache,
    props: WrapperProps,
    active: Option<Key>,
    last_change: Option<CacheChange>,
}

impl KeepMounted {
    /// Container with the default [`UpdatePolicy::PropsAware`] policy.
    pub fn new(props: WrapperProps) -> Self {
        Self::with_policy(props, UpdatePolicy::default())
    }

    pub fn with_policy(props: WrapperProps, policy: UpdatePolicy) -> Self {
        Self {
            cache: KeepMountedCache::with_policy(policy),
            props,
            active: None,
            last_change: None,
        }
    }

    /// Update the cache with `children`, then render every kept child.
    ///
    /// On error the container state is left exactly as it was.
    pub fn render(&mut self, children: &Children) -> Result<Vec<Wrapper>> {
        let update = self.cache.update(children)?;
        self.cache = update.cache;
        self.active = update.active;
        self.last_change = Some(update.change);
        Ok(self.view())
    }

    /// Render the current state again without updating.
    pub fn view(&self) -> Vec<Wrapper> {
        render(&self.cache, self.active.as_ref(), &self.props)
    }

    pub fn cache(&self) -> &KeepMountedCache {
        &self.cache
    }

    pub fn props(&self) -> &WrapperProps {
        &self.props
    }

    /// Replace the pass-through wrapper props. Takes effect on the next render.
    pub fn set_props(&mut self, props: WrapperProps) {
        self.props = props;
    }

    /// Key of the visible child after the last render.
    pub fn active_key(&self) -> Option<&Key> {
        self.active.as_ref()
    }

    /// What the last render did to the cache.
    pub fn last_change(&self) -> Option<&CacheChange> {
        self.last_change.as_ref()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Stop keeping `key` mounted. Returns false when the key was not kept.
    ///
    /// Forgetting the active key also clears the active key.
    pub fn forget(&mut self, key: &Key) -> bool {
        let removed = self.cache.remove(key).is_some();
        if removed && self.active.as_ref() == Some(key) {
            self.active = None;
        }
        removed
    }

    /// Tear down: drop every kept child.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.active = None;
        self.last_change = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::children::Child;
    use crate::error::KeepMountedError;
    use crate::types::{Props, Style, Value};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::rc::Rc;

    fn visible_keys(wrappers: &[Wrapper]) -> Vec<String> {
        wrappers
            .iter()
            .filter(|w| w.is_visible())
            .map(|w| w.key.to_string())
            .collect()
    }

    fn all_keys(wrappers: &[Wrapper]) -> Vec<String> {
        wrappers.iter().map(|w| w.key.to_string()).collect()
    }

    #[test]
    fn test_tab_swap_walkthrough() {
        let mut km = KeepMounted::new(WrapperProps::default());

        let out = km
            .render(&Child::keyed("page", "a").prop("x", 1).into())
            .unwrap();
        assert_eq!(all_keys(&out), vec!["a"]);
        assert_eq!(visible_keys(&out), vec!["a"]);

        let out = km.render(&Child::keyed("page", "b").into()).unwrap();
        assert_eq!(all_keys(&out), vec!["a", "b"]);
        assert_eq!(visible_keys(&out), vec!["b"]);
        assert_eq!(out[0].style, Style::HIDDEN);

        let out = km
            .render(&Child::keyed("page", "a").prop("x", 2).into())
            .unwrap();
        assert_eq!(all_keys(&out), vec!["a", "b"]);
        assert_eq!(visible_keys(&out), vec!["a"]);
        assert_eq!(out[0].child.props.get("x"), Some(&Value::from(2)));
        assert_eq!(km.last_change(), Some(&CacheChange::Replaced(Key::from("a"))));
    }

    #[test]
    fn test_insert_once_walkthrough() {
        let mut km = KeepMounted::with_policy(WrapperProps::default(), UpdatePolicy::InsertOnce);
        km.render(&Child::keyed("page", "a").prop("x", 1).into()).unwrap();
        km.render(&Child::keyed("page", "b").into()).unwrap();
        let out = km
            .render(&Child::keyed("page", "a").prop("x", 2).into())
            .unwrap();
        assert_eq!(out[0].child.props, Props::new().with("x", 1));
        assert_eq!(visible_keys(&out), vec!["a"]);
    }

    #[rstest]
    #[case(UpdatePolicy::PropsAware)]
    #[case(UpdatePolicy::InsertOnce)]
    fn test_exactly_one_visible(#[case] policy: UpdatePolicy) {
        let mut km = KeepMounted::with_policy(WrapperProps::default(), policy);
        let mut seen = Vec::new();
        for key in [3, 1, 4, 1, 5, 9, 2, 6, 5, 3] {
            if !seen.contains(&key) {
                seen.push(key);
            }
            let out = km
                .render(&Child::keyed("page", key).prop("n", key).into())
                .unwrap();
            assert_eq!(out.len(), seen.len());
            assert_eq!(visible_keys(&out), vec![key.to_string()]);
        }
    }

    #[test]
    fn test_empty_children_hide_everything() {
        let mut km = KeepMounted::new(WrapperProps::default());
        km.render(&Child::keyed("page", "a").into()).unwrap();
        km.render(&Child::keyed("page", "b").into()).unwrap();

        let out = km.render(&Children::List(vec![None, None])).unwrap();
        assert_eq!(all_keys(&out), vec!["a", "b"]);
        assert!(visible_keys(&out).is_empty());
        assert_eq!(km.active_key(), None);
        assert_eq!(km.last_change(), Some(&CacheChange::Skipped));
    }

    #[test]
    fn test_equal_props_keep_descriptor() {
        let mut km = KeepMounted::new(WrapperProps::default());
        let first = km
            .render(&Child::keyed("page", "a").prop("x", 1).into())
            .unwrap();
        let again = km
            .render(&Child::keyed("page", "a").prop("x", 1).into())
            .unwrap();
        assert!(Rc::ptr_eq(&first[0].child, &again[0].child));
    }

    #[test]
    fn test_error_leaves_state_untouched() {
        let mut km = KeepMounted::new(WrapperProps::default());
        km.render(&Child::keyed("page", "a").into()).unwrap();

        let err = km.render(&Child::new("page").into()).unwrap_err();
        assert_eq!(err, KeepMountedError::MissingKey { kind: "page".into() });
        assert_eq!(km.active_key(), Some(&Key::from("a")));
        assert_eq!(km.len(), 1);
    }

    #[test]
    fn test_instances_do_not_share_cache() {
        let mut left = KeepMounted::new(WrapperProps::default());
        let mut right = KeepMounted::new(WrapperProps::default());
        left.render(&Child::keyed("page", "a").into()).unwrap();
        right.render(&Child::keyed("page", "b").into()).unwrap();
        assert_eq!(all_keys(&left.view()), vec!["a"]);
        assert_eq!(all_keys(&right.view()), vec!["b"]);
    }

    #[test]
    fn test_forget_and_clear() {
        let mut km = KeepMounted::new(WrapperProps::default());
        km.render(&Child::keyed("page", "a").into()).unwrap();
        km.render(&Child::keyed("page", "b").into()).unwrap();

        assert!(km.forget(&Key::from("b")));
        assert!(!km.forget(&Key::from("b")));
        assert_eq!(km.active_key(), None);
        assert_eq!(all_keys(&km.view()), vec!["a"]);

        km.clear();
        assert!(km.is_empty());
        assert!(km.view().is_empty());
    }

    #[test]
    fn test_set_props_applies_to_all_wrappers() {
        let mut km = KeepMounted::new(WrapperProps::default());
        km.render(&Child::keyed("page", "a").into()).unwrap();
        km.set_props(WrapperProps::default().as_tag("li"));
        assert!(km.view().iter().all(|w| w.tag == "li"));
        assert_eq!(km.props().as_tag, "li");
    }
}
