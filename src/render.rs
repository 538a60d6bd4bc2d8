//! Render step - turn a cache into wrapper descriptors.
//!
//! Read-only: nothing here touches the cache. Every cached entry becomes one
//! wrapper, in insertion order. The wrapper for the active key gets no style
//! override; every other wrapper gets `display: none`.
//!
//! A pass-through `style` attribute is not forwarded as a plain attribute. It
//! becomes the base of the wrapper's [`Style`], with the visibility override
//! appended after it, so a hidden wrapper stays hidden whatever the caller
//! put in `style`.

use std::rc::Rc;

use crate::cache::KeepMountedCache;
use crate::children::Child;
use crate::types::{Key, Props, Style, Value};

/// Default wrapper tag: a generic block container.
pub const DEFAULT_TAG: &str = "div";

// =============================================================================
// Wrapper Props
// =============================================================================

/// Pass-through configuration for every wrapper a container produces.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapperProps {
    /// Tag of the wrapper element.
    pub as_tag: String,
    /// Extra attributes forwarded to each wrapper. A `style` entry is merged
    /// into the wrapper's [`Style`] instead.
    pub attrs: Props,
}

impl Default for WrapperProps {
    fn default() -> Self {
        Self {
            as_tag: DEFAULT_TAG.to_string(),
            attrs: Props::new(),
        }
    }
}

impl WrapperProps {
    pub fn as_tag(mut self, tag: impl Into<String>) -> Self {
        self.as_tag = tag.into();
        self
    }

    pub fn attrs(mut self, attrs: Props) -> Self {
        self.attrs = attrs;
        self
    }
}

// =============================================================================
// Wrapper
// =============================================================================

/// One rendered wrapper around a kept child.
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapper {
    pub key: Key,
    pub tag: String,
    pub attrs: Props,
    pub style: Style,
    pub child: Rc<Child>,
}

impl Wrapper {
    pub fn is_visible(&self) -> bool {
        !self.style.is_hidden()
    }
}

/// Style for the wrapper of `key` given the active key.
pub fn visibility_style(key: &Key, active: Option<&Key>) -> Style {
    if active == Some(key) {
        Style::default()
    } else {
        Style::HIDDEN
    }
}

/// Split a `style` entry out of `attrs`.
///
/// String values are taken as-is; any other value uses its display form.
pub fn split_style_attr(attrs: &Props) -> (Props, Option<String>) {
    let mut rest = attrs.clone();
    let base = rest.remove("style").map(|value| match value {
        Value::Str(text) => text,
        other => other.to_string(),
    });
    (rest, base)
}

/// Render every cached entry as a wrapper.
pub fn render(cache: &KeepMountedCache, active: Option<&Key>, props: &WrapperProps) -> Vec<Wrapper> {
    let (attrs, base) = split_style_attr(&props.attrs);
    cache
        .iter()
        .map(|(key, child)| Wrapper {
            key: key.clone(),
            tag: props.as_tag.clone(),
            attrs: attrs.clone(),
            style: visibility_style(key, active).with_base(base.clone()),
            child: Rc::clone(child),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::children::Children;
    use pretty_assertions::assert_eq;

    fn cache_of(keys: &[&str]) -> KeepMountedCache {
        let mut cache = KeepMountedCache::new();
        for key in keys {
            let children: Children = Child::keyed("page", *key).into();
            cache = cache.update(&children).unwrap().cache;
        }
        cache
    }

    #[test]
    fn test_render_one_wrapper_per_entry() {
        let cache = cache_of(&["a", "b", "c"]);
        let wrappers = render(&cache, Some(&Key::from("b")), &WrapperProps::default());

        let keys: Vec<_> = wrappers.iter().map(|w| w.key.to_string()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);

        let visible: Vec<_> = wrappers.iter().map(Wrapper::is_visible).collect();
        assert_eq!(visible, vec![false, true, false]);
        assert_eq!(wrappers[1].style, Style::default());
        assert_eq!(wrappers[0].style, Style::HIDDEN);
    }

    #[test]
    fn test_render_without_active_hides_all() {
        let cache = cache_of(&["a", "b"]);
        let wrappers = render(&cache, None, &WrapperProps::default());
        assert!(wrappers.iter().all(|w| !w.is_visible()));
    }

    #[test]
    fn test_render_forwards_tag_and_attrs() {
        let cache = cache_of(&["a"]);
        let props = WrapperProps::default()
            .as_tag("section")
            .attrs(Props::new().with("class", "tab-panel"));
        let wrappers = render(&cache, Some(&Key::from("a")), &props);

        assert_eq!(wrappers[0].tag, "section");
        assert_eq!(wrappers[0].attrs.get("class"), Some(&Value::from("tab-panel")));
    }

    #[test]
    fn test_render_shares_cached_child() {
        let cache = cache_of(&["a"]);
        let wrappers = render(&cache, None, &WrapperProps::default());
        assert!(Rc::ptr_eq(&wrappers[0].child, cache.get(&Key::from("a")).unwrap()));
    }

    #[test]
    fn test_style_attr_merges_under_visibility() {
        let cache = cache_of(&["a", "b"]);
        let props = WrapperProps::default().attrs(
            Props::new()
                .with("class", "panel")
                .with("style", "padding: 1px; display: flex"),
        );
        let wrappers = render(&cache, Some(&Key::from("b")), &props);

        assert_eq!(wrappers[0].attrs, Props::new().with("class", "panel"));
        assert!(!wrappers[0].is_visible());
        assert_eq!(
            wrappers[0].style.to_string(),
            "padding: 1px; display: flex; display: none"
        );
        assert!(wrappers[1].is_visible());
        assert_eq!(wrappers[1].style.to_string(), "padding: 1px; display: flex");
    }

    #[test]
    fn test_default_tag() {
        assert_eq!(WrapperProps::default().as_tag, DEFAULT_TAG);
    }
}
