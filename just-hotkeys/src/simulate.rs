use std::cell::RefCell;
use std::rc::Rc;

use just_hotkeys_core::config::{Actions, Config};
use just_hotkeys_core::event::{KEYDOWN, SyntheticKeyEvent};
use just_hotkeys_core::hub::EventHub;
use just_hotkeys_core::manager::{ShortcutOptions, create_shortcuts};

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Outcome {
    pub action: Option<String>,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

/// Run one `keydown` through a manager built from `config`, with every action
/// recording its own name.
pub fn simulate(config: &impl Config, event: &SyntheticKeyEvent) -> Outcome {
    let fired: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let actions = config
        .mapped_bindings()
        .into_iter()
        .fold(Actions::new(), |actions, kb| {
            let fired = Rc::clone(&fired);
            let name = kb.action.clone();
            actions.register(kb.action, move |_| *fired.borrow_mut() = Some(name.clone()))
        });

    let hub = Rc::new(EventHub::new());
    let options = ShortcutOptions::from(config.behavior()).target(hub.clone());
    let manager = create_shortcuts(actions.bind(config), options);
    hub.dispatch(KEYDOWN, event);
    manager.destroy();

    let action = fired.borrow_mut().take();
    Outcome {
        action,
        default_prevented: event.default_prevented(),
        propagation_stopped: event.propagation_stopped(),
    }
}
