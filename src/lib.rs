//! SuiteShell: a desktop shell hosting the Microsoft 365 web apps in native windows,
//! with personal/work account isolation and session restore.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
