// Base directories on Windows. Settings roam with %APPDATA%; profiles and the
// session stay machine-local under %LOCALAPPDATA%.

use std::env;
use std::path::PathBuf;

fn env_dir(var: &str, fallback: &str) -> PathBuf {
    env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(fallback))
}

pub fn base_config_dir() -> PathBuf {
    env_dir("APPDATA", "C:\\Users\\Default\\AppData\\Roaming")
}

pub fn base_data_dir() -> PathBuf {
    env_dir("LOCALAPPDATA", "C:\\Users\\Default\\AppData\\Local")
}
