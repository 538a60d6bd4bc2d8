//! Control Flow Primitives - Keep-mounted conditional rendering.
//!
//! [`keep_mounted`] is conditional rendering that does not destroy: the parent
//! swaps which child is active, and every child seen so far stays allocated
//! inside its own wrapper, hidden with `display: none` while inactive.
//!
//! # Pattern: EffectScope-based Cleanup
//!
//! Like every control flow primitive, it uses spark-signals' EffectScope:
//! 1. Create an EffectScope to manage the lifetime of child effects/components
//! 2. Run rendering logic inside `scope.run()`
//! 3. Register cleanup with `on_scope_dispose()`
//! 4. Return `Box::new(move || scope.stop())` as the Cleanup
//!
//! # Pattern: Parent Context Restoration
//!
//! The parent index is captured when `keep_mounted()` is called and restored
//! around every wrapper it creates later, so wrappers for keys first seen on
//! a re-run still land under the right parent.
//!
//! # Component Lifecycle
//!
//! - New key: allocate a wrapper, render its content once
//! - Known key, props changed (`PropsAware`): update the key's child signal
//!   (NO re-render!)
//! - Active key moves: only the visibility bindings change
//! - Empty children: nothing is allocated or released, everything is hidden
//! - On cleanup: every kept wrapper is released, the cache is dropped

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use spark_signals::{effect, effect_scope, on_scope_dispose, signal, Signal};

use crate::cache::{CacheChange, KeepMountedCache, UpdatePolicy};
use crate::children::{Child, Children};
use crate::engine::{get_current_parent_index, with_parent_context};
use crate::primitives::Cleanup;
use crate::render::WrapperProps;
use crate::types::{ElementFlags, Key};

use super::types::{PropValue, WrapperElementProps};
use super::wrapper::wrapper;

/// Options for [`keep_mounted`].
#[derive(Debug, Clone, Default)]
pub struct KeepMountedProps {
    /// Tag and attributes given to every wrapper.
    pub wrapper: WrapperProps,
    /// What happens when a known key comes back with different props.
    pub policy: UpdatePolicy,
}

/// Getter over the cached descriptor of one kept child.
pub type ChildGetter = Rc<dyn Fn() -> Rc<Child>>;

/// One kept key: its descriptor signal and the cleanup of its wrapper.
struct Kept {
    child: Signal<Rc<Child>>,
    cleanup: Cleanup,
}

/// Render the active child and keep every previously active child mounted.
///
/// # Arguments
///
/// * `children_getter` - Getter returning the current children (creates reactive dependency)
/// * `render_fn` - Renders the content of a newly seen key, receiving a getter
///   over that key's cached descriptor and the key itself
/// * `props` - Wrapper tag/attributes and the cache update policy
///
/// # Returns
///
/// A cleanup function that releases every kept wrapper and stops tracking.
///
/// # Example
///
/// ```ignore
/// use keep_mounted::primitives::{keep_mounted, KeepMountedProps};
/// use keep_mounted::{Child, Children};
/// use spark_signals::signal;
///
/// let tab = signal("home".to_string());
/// let tab_clone = tab.clone();
///
/// let cleanup = keep_mounted(
///     move || Child::keyed("page", tab_clone.get()).into(),
///     |get_child, key| render_page(get_child, key),
///     KeepMountedProps::default(),
/// );
///
/// // "home" stays allocated, hidden; "settings" is mounted and shown
/// tab.set("settings".to_string());
///
/// // Back to "home": no re-render, only visibility flips
/// tab.set("home".to_string());
///
/// cleanup();
/// ```
///
/// # Contract Violations
///
/// A non-empty children value without a usable key is logged with
/// `log::error!` and ignored; the previous state stays on screen.
pub fn keep_mounted<RenderF, R>(
    children_getter: impl Fn() -> Children + 'static,
    render_fn: RenderF,
    props: KeepMountedProps,
) -> Cleanup
where
    RenderF: Fn(ChildGetter, Key) -> R + 'static,
    R: Into<Cleanup>,
{
    // Capture parent index at creation time
    let parent_index = get_current_parent_index();

    let scope = effect_scope(false);

    let cache = Rc::new(RefCell::new(KeepMountedCache::with_policy(props.policy)));
    let kept: Rc<RefCell<IndexMap<Key, Kept>>> = Rc::new(RefCell::new(IndexMap::new()));
    let active: Signal<Option<Key>> = signal(None);
    // Last active key written to `active`; compared here instead of reading
    // the signal so the effect does not depend on its own output.
    let last_active: Rc<RefCell<Option<Key>>> = Rc::new(RefCell::new(None));

    let kept_effect = kept.clone();
    let kept_dispose = kept.clone();
    let cache_dispose = cache.clone();
    let wrapper_props = props.wrapper;
    let render_fn = Rc::new(render_fn);

    scope.run(move || {
        let _effect_cleanup = effect(move || {
            let children = children_getter();

            let update = match cache.borrow().update(&children) {
                Ok(update) => update,
                Err(err) => {
                    log::error!("[keep_mounted] {}", err);
                    return;
                }
            };
            *cache.borrow_mut() = update.cache;

            match &update.change {
                CacheChange::Inserted(key) => {
                    let Some(child) = cache.borrow().get(key).cloned() else {
                        return;
                    };
                    let child_signal = signal(child);
                    let getter_signal = child_signal.clone();
                    let getter: ChildGetter = Rc::new(move || getter_signal.get());

                    let active_for_wrapper = active.clone();
                    let key_for_wrapper = key.clone();
                    let render_fn = render_fn.clone();
                    let key_for_render = key.clone();
                    let content: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));
                    let content_slot = content.clone();

                    let wrapper_cleanup = with_parent_context(parent_index, || {
                        wrapper(WrapperElementProps {
                            tag: wrapper_props.as_tag.clone(),
                            attrs: wrapper_props.attrs.clone(),
                            key: Some(key.clone()),
                            visible: Some(PropValue::getter(move || {
                                active_for_wrapper.get().as_ref() == Some(&key_for_wrapper)
                            })),
                            flags: ElementFlags::KEPT,
                            children: Some(Box::new(move || {
                                *content_slot.borrow_mut() =
                                    Some(render_fn(getter, key_for_render).into());
                            })),
                            ..Default::default()
                        })
                    });

                    let cleanup: Cleanup = Box::new(move || {
                        if let Some(content_cleanup) = content.borrow_mut().take() {
                            content_cleanup();
                        }
                        wrapper_cleanup();
                    });
                    kept_effect.borrow_mut().insert(
                        key.clone(),
                        Kept {
                            child: child_signal,
                            cleanup,
                        },
                    );
                }
                CacheChange::Replaced(key) => {
                    let child = cache.borrow().get(key).cloned();
                    if let (Some(child), Some(entry)) = (child, kept_effect.borrow().get(key)) {
                        entry.child.set(child);
                    }
                }
                CacheChange::Unchanged(_) | CacheChange::Skipped => {}
            }

            if *last_active.borrow() != update.active {
                *last_active.borrow_mut() = update.active.clone();
                active.set(update.active);
            }
        });

        // Release every kept wrapper when the container goes away
        on_scope_dispose(move || {
            let entries: Vec<Kept> = kept_dispose.borrow_mut().drain(..).map(|(_, k)| k).collect();
            for entry in entries {
                (entry.cleanup)();
            }
            cache_dispose.borrow_mut().clear();
        });
    });

    Box::new(move || {
        scope.stop();
    })
}

// =============================================================================
// Tests
// =============================================================================
