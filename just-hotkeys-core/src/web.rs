//! Browser bindings through `web-sys`.

use std::borrow::Cow;
use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, EventTarget, HtmlElement, KeyboardEvent};

use crate::errors::{self, HotkeyError};
use crate::event::{EventElement, KeyEvent, KeyEventTarget, Listener};
use crate::hub::same_listener;

impl KeyEvent for KeyboardEvent {
    fn key(&self) -> Cow<'_, str> {
        Cow::Owned(KeyboardEvent::key(self))
    }

    fn ctrl_key(&self) -> bool {
        KeyboardEvent::ctrl_key(self)
    }

    fn meta_key(&self) -> bool {
        KeyboardEvent::meta_key(self)
    }

    fn alt_key(&self) -> bool {
        KeyboardEvent::alt_key(self)
    }

    fn shift_key(&self) -> bool {
        KeyboardEvent::shift_key(self)
    }

    fn target(&self) -> Option<EventElement> {
        let target = Event::target(self)?;
        if let Some(element) = target.dyn_ref::<HtmlElement>() {
            return Some(EventElement {
                tag_name: Some(element.tag_name()),
                content_editable: Some(element.content_editable()),
            });
        }
        target.dyn_ref::<Element>().map(|element| EventElement {
            tag_name: Some(element.tag_name()),
            content_editable: None,
        })
    }

    fn prevent_default(&self) {
        Event::prevent_default(self);
    }

    fn stop_propagation(&self) {
        Event::stop_propagation(self);
    }
}

type DomClosure = Closure<dyn FnMut(KeyboardEvent)>;

/// A DOM node (document, window, element) as a listener target.
///
/// Keeps the JS closure of every attached listener alive until it is removed.
pub struct DomTarget {
    target: EventTarget,
    closures: RefCell<Vec<(String, Listener, DomClosure)>>,
}

impl DomTarget {
    pub fn new<T: Into<EventTarget>>(target: T) -> Self {
        Self {
            target: target.into(),
            closures: RefCell::new(Vec::new()),
        }
    }
}

impl KeyEventTarget for DomTarget {
    fn add_event_listener(&self, kind: &str, listener: Listener) {
        if contains(&self.closures.borrow(), kind, &listener) {
            return;
        }
        let handler = listener.clone();
        let closure = DomClosure::new(move |event: KeyboardEvent| handler(&event));
        errors::log!(
            self.target
                .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
                .map_err(|err| HotkeyError::Listener(format!("{err:?}")))
        );
        self.closures
            .borrow_mut()
            .push((kind.to_owned(), listener, closure));
    }

    fn remove_event_listener(&self, kind: &str, listener: &Listener) {
        let mut closures = self.closures.borrow_mut();
        let Some(index) = closures
            .iter()
            .position(|(registered, existing, _)| registered == kind && same_listener(existing, listener))
        else {
            return;
        };
        let (_, _, closure) = closures.remove(index);
        errors::log!(
            self.target
                .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
                .map_err(|err| HotkeyError::Listener(format!("{err:?}")))
        );
    }
}

fn contains<C>(closures: &[(String, Listener, C)], kind: &str, listener: &Listener) -> bool {
    closures
        .iter()
        .any(|(registered, existing, _)| registered == kind && same_listener(existing, listener))
}

/// The page's `document`, when running in a window.
pub fn document_target() -> Option<DomTarget> {
    let document = web_sys::window()?.document()?;
    Some(DomTarget::new(document))
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::event::KEYDOWN;

    fn listener() -> Listener {
        Rc::new(|_: &dyn KeyEvent| {})
    }

    #[test]
    fn attached_listener_is_found_by_identity_and_kind() {
        let attached = listener();
        let closures = vec![(KEYDOWN.to_owned(), Rc::clone(&attached), ())];

        assert!(contains(&closures, KEYDOWN, &attached));
        assert!(!contains(&closures, "keyup", &attached));
        assert!(!contains(&closures, KEYDOWN, &listener()));
    }
}
