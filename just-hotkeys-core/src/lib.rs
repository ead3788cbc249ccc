
pub mod config;
pub mod errors;
pub mod event;
pub mod hub;
pub mod manager;
pub mod parser;
pub mod platform;
#[cfg(feature = "web")]
pub mod web;

pub use manager::{Manager, ShortcutMap, ShortcutOptions, create_shortcuts, shortcuts};
pub use parser::{ParsedShortcut, matches_shortcut, normalize_shortcut, parse_shortcut};

/// The directory name for xdg
pub const JUST_HOTKEYS_DIR_NAME: &str = "just-hotkeys";
