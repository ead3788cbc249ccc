use std::fmt;
use std::rc::{Rc, Weak};

use crate::event::KeyEventTarget;
use crate::platform;

/// Caller-supplied settings for a manager. Unset fields fall back to the
/// defaults: the platform's default target, `prevent_default` on,
/// `stop_propagation` off, `enable_in_inputs` off.
#[derive(Clone, Default)]
pub struct ShortcutOptions {
    pub target: Option<Rc<dyn KeyEventTarget>>,
    pub prevent_default: Option<bool>,
    pub stop_propagation: Option<bool>,
    pub enable_in_inputs: Option<bool>,
}

impl ShortcutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn target(mut self, target: Rc<dyn KeyEventTarget>) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn prevent_default(mut self, enabled: bool) -> Self {
        self.prevent_default = Some(enabled);
        self
    }

    #[must_use]
    pub fn stop_propagation(mut self, enabled: bool) -> Self {
        self.stop_propagation = Some(enabled);
        self
    }

    #[must_use]
    pub fn enable_in_inputs(mut self, enabled: bool) -> Self {
        self.enable_in_inputs = Some(enabled);
        self
    }

    /// The target to attach to, and the settings the manager keeps.
    pub(crate) fn resolve(self) -> (Rc<dyn KeyEventTarget>, Settings) {
        let target = self.target.unwrap_or_else(platform::default_target);
        let settings = Settings {
            target: Rc::downgrade(&target),
            prevent_default: self.prevent_default.unwrap_or(true),
            stop_propagation: self.stop_propagation.unwrap_or(false),
            enable_in_inputs: self.enable_in_inputs.unwrap_or(false),
        };
        (target, settings)
    }
}

impl fmt::Debug for ShortcutOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutOptions")
            .field("target", &self.target.as_ref().map(|_| "..."))
            .field("prevent_default", &self.prevent_default)
            .field("stop_propagation", &self.stop_propagation)
            .field("enable_in_inputs", &self.enable_in_inputs)
            .finish()
    }
}

/// Options after defaults were applied. Fixed for the life of a manager.
///
/// The target is owned by whoever created it; it owns the listener, which
/// owns the manager state.
pub(crate) struct Settings {
    pub target: Weak<dyn KeyEventTarget>,
    pub prevent_default: bool,
    pub stop_propagation: bool,
    pub enable_in_inputs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::EventHub;

    #[test]
    fn defaults_apply_to_unset_fields() {
        let (_, settings) = ShortcutOptions::new().resolve();
        assert!(settings.prevent_default);
        assert!(!settings.stop_propagation);
        assert!(!settings.enable_in_inputs);
    }

    #[test]
    fn set_fields_override_defaults() {
        let hub = Rc::new(EventHub::new());
        let (target, settings) = ShortcutOptions::new()
            .target(hub.clone())
            .prevent_default(false)
            .stop_propagation(true)
            .enable_in_inputs(true)
            .resolve();
        assert!(!settings.prevent_default);
        assert!(settings.stop_propagation);
        assert!(settings.enable_in_inputs);
        assert!(std::ptr::addr_eq(Rc::as_ptr(&target), Rc::as_ptr(&hub)));
        assert!(std::ptr::addr_eq(settings.target.as_ptr(), Rc::as_ptr(&hub)));
    }
}
