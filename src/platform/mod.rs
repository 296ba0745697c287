// SuiteShell platform abstraction
// Resolves where settings, the session file and per-account web profiles live on
// Windows, macOS and Linux.
//
// Each OS module only knows its base directories; the app folder names are joined here.

use std::path::PathBuf;

pub mod native;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
use linux as os;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
use macos as os;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
use windows as os;

/// Lowercase folder name, used on Linux.
const APP_DIR: &str = "suiteshell";
/// Title-case folder name, used on macOS and Windows.
const APP_DIR_TITLE: &str = "SuiteShell";

fn app_dir_name() -> &'static str {
    if cfg!(target_os = "linux") {
        APP_DIR
    } else {
        APP_DIR_TITLE
    }
}

/// Directory holding `settings.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/suiteshell` or `~/.config/suiteshell`
/// - **macOS**: `~/Library/Application Support/SuiteShell`
/// - **Windows**: `%APPDATA%/SuiteShell`
pub fn get_config_dir() -> PathBuf {
    os::base_config_dir().join(app_dir_name())
}

/// Directory holding the session file and the partition profiles.
///
/// - **Linux**: `$XDG_DATA_HOME/suiteshell` or `~/.local/share/suiteshell`
/// - **macOS**: `~/Library/Application Support/SuiteShell`
/// - **Windows**: `%LOCALAPPDATA%/SuiteShell`
pub fn get_data_dir() -> PathBuf {
    os::base_data_dir().join(app_dir_name())
}

/// Path of the persisted window session.
pub fn get_session_path() -> PathBuf {
    get_data_dir().join("session.json")
}
