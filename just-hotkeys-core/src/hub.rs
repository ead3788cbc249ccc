use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{KeyEvent, KeyEventTarget, Listener};

thread_local! {
    static GLOBAL: Rc<EventHub> = Rc::new(EventHub::new());
}

/// A plain event target: stores listeners per event type and calls them when
/// the host hands it an event.
///
/// This is the fallback target when no document is around. Hosts that get
/// keyboard input elsewhere (a terminal, a game loop) feed it through
/// [`EventHub::dispatch`].
#[derive(Default)]
pub struct EventHub {
    listeners: RefCell<Vec<(String, Listener)>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hub shared by everything on this thread that did not pick a target.
    pub fn global() -> Rc<EventHub> {
        GLOBAL.with(Rc::clone)
    }

    /// Call every listener registered for `kind`, in registration order.
    /// Returns how many were called.
    ///
    /// Listeners may add or remove listeners while running. Listeners added
    /// during a dispatch wait for the next one; listeners removed during a
    /// dispatch are skipped if they have not run yet.
    pub fn dispatch(&self, kind: &str, event: &dyn KeyEvent) -> usize {
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(registered, _)| registered == kind)
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        let mut called = 0;
        for listener in &listeners {
            if self.contains(kind, listener) {
                listener(event);
                called += 1;
            }
        }
        called
    }

    fn contains(&self, kind: &str, listener: &Listener) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|(registered, existing)| registered == kind && same_listener(existing, listener))
    }

    pub fn listener_count(&self, kind: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(registered, _)| registered == kind)
            .count()
    }
}

impl KeyEventTarget for EventHub {
    fn add_event_listener(&self, kind: &str, listener: Listener) {
        if !self.contains(kind, &listener) {
            self.listeners.borrow_mut().push((kind.to_owned(), listener));
        }
    }

    fn remove_event_listener(&self, kind: &str, listener: &Listener) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(index) = listeners
            .iter()
            .position(|(registered, existing)| registered == kind && same_listener(existing, listener))
        {
            listeners.remove(index);
        }
    }
}

pub(crate) fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::event::{KEYDOWN, SyntheticKeyEvent};

    fn counting_listener(count: &Rc<Cell<usize>>) -> Listener {
        let count = Rc::clone(count);
        Rc::new(move |_: &dyn KeyEvent| count.set(count.get() + 1))
    }

    #[test]
    fn dispatch_reaches_listeners_of_that_kind() {
        let hub = EventHub::new();
        let count = Rc::new(Cell::new(0));
        hub.add_event_listener(KEYDOWN, counting_listener(&count));
        hub.add_event_listener("keyup", counting_listener(&count));

        assert_eq!(hub.dispatch(KEYDOWN, &SyntheticKeyEvent::new("a")), 1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn same_listener_is_registered_once() {
        let hub = EventHub::new();
        let count = Rc::new(Cell::new(0));
        let listener = counting_listener(&count);
        hub.add_event_listener(KEYDOWN, Rc::clone(&listener));
        hub.add_event_listener(KEYDOWN, Rc::clone(&listener));

        assert_eq!(hub.listener_count(KEYDOWN), 1);
    }

    #[test]
    fn remove_only_matches_identity() {
        let hub = EventHub::new();
        let count = Rc::new(Cell::new(0));
        let kept = counting_listener(&count);
        let removed = counting_listener(&count);
        hub.add_event_listener(KEYDOWN, Rc::clone(&kept));
        hub.add_event_listener(KEYDOWN, Rc::clone(&removed));

        hub.remove_event_listener(KEYDOWN, &removed);
        hub.remove_event_listener(KEYDOWN, &removed);
        hub.remove_event_listener("keyup", &kept);

        assert_eq!(hub.listener_count(KEYDOWN), 1);
        hub.dispatch(KEYDOWN, &SyntheticKeyEvent::new("a"));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn listeners_removed_mid_dispatch_are_skipped() {
        let hub = Rc::new(EventHub::new());
        let count = Rc::new(Cell::new(0));
        let later = counting_listener(&count);
        let remover: Listener = {
            let hub = Rc::downgrade(&hub);
            let later = Rc::clone(&later);
            Rc::new(move |_: &dyn KeyEvent| {
                if let Some(hub) = hub.upgrade() {
                    hub.remove_event_listener(KEYDOWN, &later);
                }
            })
        };
        hub.add_event_listener(KEYDOWN, remover);
        hub.add_event_listener(KEYDOWN, Rc::clone(&later));

        assert_eq!(hub.dispatch(KEYDOWN, &SyntheticKeyEvent::new("a")), 1);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn listeners_added_mid_dispatch_wait_for_the_next() {
        let hub = Rc::new(EventHub::new());
        let count = Rc::new(Cell::new(0));
        let later = counting_listener(&count);
        let adder: Listener = {
            let hub = Rc::downgrade(&hub);
            let later = Rc::clone(&later);
            Rc::new(move |_: &dyn KeyEvent| {
                if let Some(hub) = hub.upgrade() {
                    hub.add_event_listener(KEYDOWN, Rc::clone(&later));
                }
            })
        };
        hub.add_event_listener(KEYDOWN, adder);

        assert_eq!(hub.dispatch(KEYDOWN, &SyntheticKeyEvent::new("a")), 1);
        assert_eq!(count.get(), 0);
        assert_eq!(hub.dispatch(KEYDOWN, &SyntheticKeyEvent::new("a")), 2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn global_hub_is_shared_per_thread() {
        assert!(Rc::ptr_eq(&EventHub::global(), &EventHub::global()));
    }
}
