use indexmap::IndexMap;

use super::ShortcutCallback;
use crate::event::KeyEvent;
use crate::parser::{self, ParsedShortcut};

pub struct Binding {
    pub parsed: ParsedShortcut,
    pub callback: ShortcutCallback,
}

/// Bindings keyed by normalized shortcut, in registration order.
///
/// Replacing a binding keeps its original position, so it keeps its priority
/// when several bindings match the same event.
#[derive(Default)]
pub struct Registry {
    bindings: IndexMap<String, Binding>,
}

impl Registry {
    pub fn upsert(&mut self, shortcut: &str, callback: ShortcutCallback) -> String {
        let normalized = parser::normalize_shortcut(shortcut);
        let binding = Binding {
            parsed: parser::parse_shortcut(shortcut),
            callback,
        };
        if self.bindings.insert(normalized.clone(), binding).is_some() {
            tracing::debug!("Replaced binding for {:?}", normalized);
        }
        normalized
    }

    pub fn remove(&mut self, shortcut: &str) -> bool {
        self.bindings
            .shift_remove(&parser::normalize_shortcut(shortcut))
            .is_some()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn find_match(&self, event: &dyn KeyEvent) -> Option<(&str, &Binding)> {
        self.bindings
            .iter()
            .find(|(_, binding)| parser::matches_shortcut(event, &binding.parsed))
            .map(|(normalized, binding)| (normalized.as_str(), binding))
    }

    pub fn keys(&self) -> Vec<String> {
        self.bindings.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::event::SyntheticKeyEvent;

    fn noop() -> ShortcutCallback {
        Rc::new(|_: &dyn KeyEvent| {})
    }

    #[test]
    fn keys_are_normalized() {
        let mut registry = Registry::default();
        assert_eq!(registry.upsert("Command+K", noop()), "cmd+k");
        assert_eq!(registry.upsert("cmd+k", noop()), "cmd+k");
        assert_eq!(registry.keys(), vec!["cmd+k"]);
    }

    #[test]
    fn replacement_keeps_position() {
        let mut registry = Registry::default();
        registry.upsert("cmd+k", noop());
        registry.upsert("escape", noop());
        registry.upsert("cmd+/", noop());
        registry.upsert("esc", noop());

        assert_eq!(registry.keys(), vec!["cmd+k", "escape", "cmd+/"]);
    }

    #[test]
    fn removal_keeps_remaining_order() {
        let mut registry = Registry::default();
        registry.upsert("a", noop());
        registry.upsert("b", noop());
        registry.upsert("c", noop());

        assert!(registry.remove("B"));
        assert!(!registry.remove("z"));
        assert_eq!(registry.keys(), vec!["a", "c"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn find_match_picks_the_matching_binding() {
        let mut registry = Registry::default();
        registry.upsert("k", noop());
        registry.upsert("cmd+k", noop());
        registry.upsert("cmd+shift+k", noop());

        let event = SyntheticKeyEvent::new("K").meta().shift();
        let (normalized, binding) = registry.find_match(&event).unwrap();
        assert_eq!(normalized, "cmd+shift+k");
        assert!(binding.parsed.shift);
        assert!(registry.find_match(&SyntheticKeyEvent::new("k").alt()).is_none());
    }
}
