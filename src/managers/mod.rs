// SuiteShell state managers
// Managers own mutable shell state: the window registry, the session file,
// window lifecycles and the derived tray/badge indicators.

pub mod indicator_manager;
pub mod lifecycle;
pub mod session_manager;
pub mod window_registry;
