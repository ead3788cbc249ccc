use thiserror::Error;

macro_rules! exit_on_error {
    ($a: expr) => {
        match $a {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("Exiting due to error: {}", HotkeyError::from(err));
                std::process::exit(1);
            }
        }
    };
}

pub(crate) use exit_on_error;

pub type Result<T> = std::result::Result<T, HotkeyError>;

#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),
    #[error("RON error: {0}.")]
    RonError(#[from] ron::Error),
    #[error("{0}")]
    Core(#[from] just_hotkeys_core::errors::HotkeyError),

    #[error("No config file found.")]
    NoConfigFound,
    #[error("{0} shortcut(s) failed strict parsing.")]
    StrictViolations(usize),
}
