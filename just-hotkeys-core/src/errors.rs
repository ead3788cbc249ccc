use thiserror::Error;

#[cfg(feature = "web")]
macro_rules! log {
    ($a: expr) => {
        match $a {
            Ok(value) => value,
            Err(err) => tracing::error!("{}", $crate::errors::HotkeyError::from(err)),
        }
    };
}

#[cfg(feature = "web")]
pub(crate) use log;

pub type Result<T> = std::result::Result<T, HotkeyError>;

#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),
    #[error("RON error: {0}.")]
    RonError(#[from] ron::error::SpannedError),
    #[error("Invalid shortcut: {0}.")]
    Shortcut(#[from] ShortcutError),

    #[error("No action named `{0}` is registered.")]
    ActionNotFound(String),
    #[error("Listener could not be changed: {0}.")]
    Listener(String),
}

/// Rejections of the strict shortcut grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum ShortcutError {
    #[error("no key given, only modifiers")]
    MissingKey,
    #[error("more than one key given (`{first}` and `{second}`)")]
    MultipleKeys { first: String, second: String },
    #[error("empty segment between `+` separators")]
    EmptySegment,
}
