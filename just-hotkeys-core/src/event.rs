//! The event source a manager listens on, and the events it delivers.

use std::borrow::Cow;
use std::cell::Cell;
use std::rc::Rc;

/// Event type the manager subscribes to.
pub const KEYDOWN: &str = "keydown";

/// A registered event handler. Identity is the allocation: removing a
/// listener removes the one registered with the same `Rc`.
pub type Listener = Rc<dyn Fn(&dyn KeyEvent)>;

/// Anything listeners can be attached to, such as a DOM node or an [`EventHub`].
///
/// [`EventHub`]: crate::hub::EventHub
pub trait KeyEventTarget {
    fn add_event_listener(&self, kind: &str, listener: Listener);

    /// Removing a listener that is not registered does nothing.
    fn remove_event_listener(&self, kind: &str, listener: &Listener);
}

/// A keyboard event as seen by the dispatcher.
pub trait KeyEvent {
    fn key(&self) -> Cow<'_, str>;
    fn ctrl_key(&self) -> bool;
    fn meta_key(&self) -> bool;
    fn alt_key(&self) -> bool;
    fn shift_key(&self) -> bool;

    /// The element the event originated from, if it is an element at all.
    fn target(&self) -> Option<EventElement>;

    fn prevent_default(&self);
    fn stop_propagation(&self);
}

/// What the dispatcher needs to know about an event's target element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventElement {
    pub tag_name: Option<String>,
    pub content_editable: Option<String>,
}

impl EventElement {
    pub fn new<T: ToString>(tag_name: T) -> Self {
        Self {
            tag_name: Some(tag_name.to_string()),
            content_editable: None,
        }
    }

    #[must_use]
    pub fn with_content_editable<T: ToString>(mut self, flag: T) -> Self {
        self.content_editable = Some(flag.to_string());
        self
    }

    /// Form controls and editable regions, where typed keys belong to the user.
    pub fn is_input_like(&self) -> bool {
        let editable_tag = self.tag_name.as_deref().is_some_and(|tag| {
            ["input", "textarea", "select"]
                .iter()
                .any(|name| tag.eq_ignore_ascii_case(name))
        });
        editable_tag || self.content_editable.as_deref() == Some("true")
    }
}

/// A keyboard event built in code, for hosts without a DOM and for tests.
///
/// Records whether [`KeyEvent::prevent_default`] and
/// [`KeyEvent::stop_propagation`] were called.
#[derive(Debug, Clone, Default)]
pub struct SyntheticKeyEvent {
    key: String,
    ctrl: bool,
    meta: bool,
    alt: bool,
    shift: bool,
    target: Option<EventElement>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl SyntheticKeyEvent {
    pub fn new<T: ToString>(key: T) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    #[must_use]
    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    #[must_use]
    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    #[must_use]
    pub fn on(mut self, target: EventElement) -> Self {
        self.target = Some(target);
        self
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

impl KeyEvent for SyntheticKeyEvent {
    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.key)
    }

    fn ctrl_key(&self) -> bool {
        self.ctrl
    }

    fn meta_key(&self) -> bool {
        self.meta
    }

    fn alt_key(&self) -> bool {
        self.alt
    }

    fn shift_key(&self) -> bool {
        self.shift
    }

    fn target(&self) -> Option<EventElement> {
        self.target.clone()
    }

    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }
}
