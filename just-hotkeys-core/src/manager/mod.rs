//! Registering shortcuts and dispatching `keydown` events to them.
//!
//! ```
//! use just_hotkeys_core::manager::{create_shortcuts, ShortcutMap, ShortcutOptions};
//!
//! let manager = create_shortcuts(
//!     ShortcutMap::new()
//!         .bind("cmd+k", |_| println!("search"))
//!         .bind("esc", |_| println!("close")),
//!     ShortcutOptions::new(),
//! );
//! assert_eq!(manager.active_shortcuts(), vec!["cmd+k", "escape"]);
//! manager.destroy();
//! ```

mod options;
mod registry;

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use crate::event::{KEYDOWN, KeyEvent, Listener};

pub use options::ShortcutOptions;

use options::Settings;
use registry::Registry;

/// Called with the event that triggered the shortcut.
pub type ShortcutCallback = Rc<dyn Fn(&dyn KeyEvent)>;

/// Shortcut strings and their callbacks, in the order they were given.
#[derive(Clone, Default)]
pub struct ShortcutMap {
    entries: Vec<(String, ShortcutCallback)>,
}

impl ShortcutMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bind<S, F>(mut self, shortcut: S, callback: F) -> Self
    where
        S: Into<String>,
        F: Fn(&dyn KeyEvent) + 'static,
    {
        self.insert(shortcut, Rc::new(callback));
        self
    }

    pub fn insert<S: Into<String>>(&mut self, shortcut: S, callback: ShortcutCallback) {
        self.entries.push((shortcut.into(), callback));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn shortcuts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(shortcut, _)| shortcut.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, ShortcutCallback)> for ShortcutMap {
    fn from_iter<I: IntoIterator<Item = (S, ShortcutCallback)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(shortcut, callback)| (shortcut.into(), callback))
                .collect(),
        }
    }
}

impl IntoIterator for ShortcutMap {
    type Item = (String, ShortcutCallback);
    type IntoIter = std::vec::IntoIter<(String, ShortcutCallback)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Debug for ShortcutMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.shortcuts()).finish()
    }
}

struct Shared {
    settings: Settings,
    registry: RefCell<Registry>,
    /// Present until destroyed. The target holds the only strong reference.
    listener: RefCell<Option<Weak<dyn Fn(&dyn KeyEvent)>>>,
}

impl Shared {
    fn handle_key_down(&self, event: &dyn KeyEvent) {
        if !self.settings.enable_in_inputs
            && event.target().is_some_and(|element| element.is_input_like())
        {
            tracing::trace!("Ignoring {:?} typed into an input", event.key());
            return;
        }

        let matched = self
            .registry
            .borrow()
            .find_match(event)
            .map(|(normalized, binding)| (normalized.to_owned(), Rc::clone(&binding.callback)));
        let Some((normalized, callback)) = matched else {
            tracing::trace!("No shortcut for {:?}", event.key());
            return;
        };

        tracing::trace!("{:?} triggered {}", event.key(), normalized);
        if self.settings.prevent_default {
            event.prevent_default();
        }
        if self.settings.stop_propagation {
            event.stop_propagation();
        }
        callback(event);
    }

    fn detach(&self) {
        let listener = self.listener.borrow_mut().take();
        let attached = listener
            .as_ref()
            .and_then(Weak::upgrade)
            .zip(self.settings.target.upgrade());
        if let Some((listener, target)) = attached {
            target.remove_event_listener(KEYDOWN, &listener);
            tracing::debug!("Detached keydown listener");
        }
    }
}

/// Handle to a set of shortcuts listening on one target.
///
/// Clones share the same registry, so a callback can hold a clone and change
/// the shortcuts it belongs to. The listener stays attached until
/// [`Manager::destroy`] is called, even if every handle is dropped; use
/// [`Manager::into_guard`] to tie it to a scope instead.
///
/// The manager does not keep its target alive. Dropping the last reference to
/// a target releases its listeners, and with them every callback.
#[derive(Clone)]
pub struct Manager {
    shared: Rc<Shared>,
}

/// Create a manager for `bindings` and attach its `keydown` listener.
pub fn create_shortcuts(bindings: ShortcutMap, options: ShortcutOptions) -> Manager {
    Manager::new(bindings, options)
}

/// Like [`create_shortcuts`], returning only the teardown.
pub fn shortcuts(bindings: ShortcutMap, options: ShortcutOptions) -> impl Fn() {
    let manager = create_shortcuts(bindings, options);
    move || manager.destroy()
}

impl Manager {
    pub fn new(bindings: ShortcutMap, options: ShortcutOptions) -> Self {
        let mut registry = Registry::default();
        for (shortcut, callback) in bindings {
            registry.upsert(&shortcut, callback);
        }

        let (target, settings) = options.resolve();
        let shared = Rc::new(Shared {
            settings,
            registry: RefCell::new(registry),
            listener: RefCell::new(None),
        });

        // The listener owns the manager state until `destroy` takes it off
        // the target, or the target itself goes away.
        let state = Rc::clone(&shared);
        let listener: Listener = Rc::new(move |event: &dyn KeyEvent| state.handle_key_down(event));
        target.add_event_listener(KEYDOWN, Rc::clone(&listener));
        *shared.listener.borrow_mut() = Some(Rc::downgrade(&listener));
        tracing::debug!(
            "Attached keydown listener for {} shortcuts",
            shared.registry.borrow().len()
        );

        Self { shared }
    }

    /// Register more shortcuts. A shortcut that normalizes to an existing one
    /// replaces its callback and keeps its place in the matching order.
    pub fn add(&self, bindings: ShortcutMap) {
        let mut registry = self.shared.registry.borrow_mut();
        for (shortcut, callback) in bindings {
            let normalized = registry.upsert(&shortcut, callback);
            tracing::debug!("Added shortcut {}", normalized);
        }
    }

    /// Unregister shortcuts by any spelling that normalizes to them. Unknown
    /// shortcuts are ignored.
    pub fn remove<I, S>(&self, shortcuts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = self.shared.registry.borrow_mut();
        for shortcut in shortcuts {
            if registry.remove(shortcut.as_ref()) {
                tracing::debug!("Removed shortcut {}", shortcut.as_ref());
            }
        }
    }

    /// Detach the listener and forget every shortcut. Safe to call again.
    pub fn destroy(&self) {
        self.shared.detach();
        self.shared.registry.borrow_mut().clear();
    }

    /// Normalized shortcuts in matching order, as of this call.
    pub fn active_shortcuts(&self) -> Vec<String> {
        self.shared.registry.borrow().keys()
    }

    /// Whether the listener is still attached.
    pub fn is_active(&self) -> bool {
        self.shared
            .listener
            .borrow()
            .as_ref()
            .is_some_and(|listener| listener.strong_count() > 0)
    }

    /// Destroy the manager when the returned guard is dropped.
    pub fn into_guard(self) -> ShortcutGuard {
        ShortcutGuard { manager: self }
    }
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("shortcuts", &self.active_shortcuts())
            .field("active", &self.is_active())
            .finish()
    }
}

/// Destroys its manager on drop.
#[derive(Debug)]
#[must_use = "dropping the guard destroys the shortcuts immediately"]
pub struct ShortcutGuard {
    manager: Manager,
}

impl Deref for ShortcutGuard {
    type Target = Manager;

    fn deref(&self) -> &Manager {
        &self.manager
    }
}

impl Drop for ShortcutGuard {
    fn drop(&mut self) {
        self.manager.destroy();
    }
}
