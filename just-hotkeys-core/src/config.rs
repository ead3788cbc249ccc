//! Declarative bindings: shortcuts naming actions, resolved against a table of
//! callbacks registered by the application.

use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{HotkeyError, Result};
use crate::event::KeyEvent;
use crate::manager::{ShortcutCallback, ShortcutMap, ShortcutOptions};
use crate::parser;

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Keybind {
    pub shortcut: String,
    pub action: String,
}

impl Keybind {
    pub fn new<S: ToString, A: ToString>(shortcut: S, action: A) -> Self {
        Self {
            shortcut: shortcut.to_string(),
            action: action.to_string(),
        }
    }

    pub fn normalized(&self) -> String {
        parser::normalize_shortcut(&self.shortcut)
    }
}

/// How a manager built from a bindings file treats events.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Behavior {
    pub prevent_default: bool,
    pub stop_propagation: bool,
    pub enable_in_inputs: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            prevent_default: true,
            stop_propagation: false,
            enable_in_inputs: false,
        }
    }
}

impl From<Behavior> for ShortcutOptions {
    fn from(behavior: Behavior) -> Self {
        ShortcutOptions::new()
            .prevent_default(behavior.prevent_default)
            .stop_propagation(behavior.stop_propagation)
            .enable_in_inputs(behavior.enable_in_inputs)
    }
}

pub trait Config {
    fn mapped_bindings(&self) -> Vec<Keybind>;

    fn behavior(&self) -> Behavior {
        Behavior::default()
    }
}

/// A bindings document, usually written in RON:
///
/// ```ron
/// (
///     options: (enable_in_inputs: true),
///     keybinds: [
///         (shortcut: "cmd+k", action: "open-search"),
///         (shortcut: "esc", action: "close-modal"),
///     ],
/// )
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct Bindings {
    #[serde(default)]
    pub options: Behavior,
    #[serde(default)]
    pub keybinds: Vec<Keybind>,
}

impl Config for Bindings {
    fn mapped_bindings(&self) -> Vec<Keybind> {
        self.keybinds.clone()
    }

    fn behavior(&self) -> Behavior {
        self.options
    }
}

impl TryFrom<&str> for Bindings {
    type Error = HotkeyError;

    fn try_from(contents: &str) -> Result<Self> {
        Ok(ron::from_str(contents)?)
    }
}

/// Callbacks the application offers to bindings files, by action name.
#[derive(Clone, Default)]
pub struct Actions {
    table: IndexMap<String, ShortcutCallback>,
}

impl Actions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn register<N, F>(mut self, name: N, callback: F) -> Self
    where
        N: Into<String>,
        F: Fn(&dyn KeyEvent) + 'static,
    {
        self.table.insert(name.into(), Rc::new(callback));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// # Errors
    ///
    /// Errors when no action of that name was registered.
    pub fn get(&self, name: &str) -> Result<ShortcutCallback> {
        self.table
            .get(name)
            .cloned()
            .ok_or_else(|| HotkeyError::ActionNotFound(name.to_owned()))
    }

    /// Resolve every keybind of `config` into a shortcut map, in file order.
    /// Keybinds naming an unknown action are logged and left out.
    pub fn bind(&self, config: &impl Config) -> ShortcutMap {
        let mut map = ShortcutMap::new();
        for kb in config.mapped_bindings() {
            match self.get(&kb.action) {
                Ok(callback) => map.insert(kb.shortcut, callback),
                Err(err) => tracing::error!("Invalid key binding: {}\n{:?}", err, kb),
            }
        }
        map
    }
}

impl std::fmt::Debug for Actions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
