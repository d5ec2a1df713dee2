// SPDX-License-Identifier: MPL-2.0
//! Location of the settings directory.
//!
//! # Resolution Order
//!
//! 1. **Explicit override** - parameter to [`get_app_config_dir_with_override`]
//! 2. **Environment variable** `LOCALE_CONTEXT_CONFIG_DIR` (if non-empty)
//! 3. **Platform default** - via the `dirs` crate, with the app name appended

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "LocaleContext";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "LOCALE_CONTEXT_CONFIG_DIR";

/// Returns the application config directory path.
///
/// Platform defaults:
/// - Linux: `~/.config/LocaleContext/`
/// - macOS: `~/Library/Application Support/LocaleContext/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\LocaleContext\`
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
