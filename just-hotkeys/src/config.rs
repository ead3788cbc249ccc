use crate::errors::{HotkeyError, Result};

use just_hotkeys_core::config::Bindings;
use std::{
    fs,
    path::{Path, PathBuf},
};
use xdg::BaseDirectories;

pub const CONFIG_FILE_NAME: &str = "config.ron";

/// The given path, or `config.ron` under the xdg config home.
///
/// # Errors
///
/// Errors when no path was given and there is no config file in the xdg
/// config directories.
pub fn locate(path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = path {
        return Ok(path.to_owned());
    }
    BaseDirectories::with_prefix(just_hotkeys_core::JUST_HOTKEYS_DIR_NAME)
        .find_config_file(CONFIG_FILE_NAME)
        .ok_or(HotkeyError::NoConfigFound)
}

/// # Errors
///
/// This errors when no config file is found at the path, or when the file is
/// not a valid bindings document.
pub fn load(path: Option<&Path>) -> Result<Bindings> {
    let file_name = locate(path)?;
    if !file_name.exists() {
        return Err(HotkeyError::NoConfigFound);
    }
    tracing::debug!("Loading bindings from {}", file_name.display());
    let contents = fs::read_to_string(file_name)?;
    Ok(Bindings::try_from(contents.as_str())?)
}
