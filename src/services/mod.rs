// SuiteShell services
// Stateless helpers and shared infrastructure: partition resolution, app classification,
// launcher routing, notification fan-out and the settings store.

pub mod broadcaster;
pub mod classifier;
pub mod launcher;
pub mod page_signals;
pub mod partition;
pub mod settings_engine;
