// SuiteShell shared type definitions
// Each submodule defines types used across the shell.

pub mod account;
pub mod app_type;
pub mod errors;
pub mod events;
pub mod session;
pub mod settings;
pub mod window;
