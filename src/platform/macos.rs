// Base directories on macOS. Config and data share Application Support.

use std::env;
use std::path::PathBuf;

fn application_support() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
}

pub fn base_config_dir() -> PathBuf {
    application_support()
}

pub fn base_data_dir() -> PathBuf {
    application_support()
}
