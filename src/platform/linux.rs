// Base directories on Linux, following the XDG base directory spec.

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

fn xdg_or(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => fallback.iter().fold(home_dir(), |path, part| path.join(part)),
    }
}

/// `$XDG_CONFIG_HOME` or `~/.config`.
pub fn base_config_dir() -> PathBuf {
    xdg_or("XDG_CONFIG_HOME", &[".config"])
}

/// `$XDG_DATA_HOME` or `~/.local/share`.
pub fn base_data_dir() -> PathBuf {
    xdg_or("XDG_DATA_HOME", &[".local", "share"])
}
