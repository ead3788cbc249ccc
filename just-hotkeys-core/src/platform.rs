//! Where a manager listens when the caller does not say.

use std::rc::Rc;

use crate::event::KeyEventTarget;
use crate::hub::EventHub;

/// The target used when [`ShortcutOptions::target`] is unset, resolved each
/// time a manager is created.
///
/// In a browser (feature `web` on `wasm32`) this is the page's `document`,
/// wrapped once per thread. Without a document it is this thread's
/// [`EventHub::global`]. Both live as long as the thread.
///
/// [`ShortcutOptions::target`]: crate::manager::ShortcutOptions::target
pub fn default_target() -> Rc<dyn KeyEventTarget> {
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    {
        thread_local! {
            static DOCUMENT: Option<Rc<crate::web::DomTarget>> =
                crate::web::document_target().map(Rc::new);
        }
        if let Some(document) = DOCUMENT.with(Clone::clone) {
            return document;
        }
    }

    EventHub::global()
}
