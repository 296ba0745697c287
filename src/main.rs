//! SuiteShell entry point.
//!
//! Usage: `suiteshell [app] [--work|--personal]`, e.g. `suiteshell word --work`.
//! When built without the `gui` feature, prints the session that would be restored.

use suiteshell::app::{App, LaunchRoute};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("suiteshell=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(feature = "gui")]
fn main() {
    init_tracing();
    let route = LaunchRoute::from_args(std::env::args().skip(1));
    let app = App::new(None, None);
    suiteshell::ui::webview_app::run(app, route);
}

#[cfg(not(feature = "gui"))]
fn main() {
    use suiteshell::managers::session_manager::SessionManagerTrait;
    use suiteshell::services::launcher::resolve_url;

    init_tracing();
    let route = LaunchRoute::from_args(std::env::args().skip(1));
    let app = App::new(None, None);
    let policy = app.lifecycle.policy();

    println!("SuiteShell v{} (headless)", env!("CARGO_PKG_VERSION"));
    println!("  session file: {}", app.lifecycle.sessions().path().display());

    match app.lifecycle.sessions().load_session() {
        Some(snapshot) if snapshot.is_restorable() && policy.restore_on_start => {
            println!("  would restore {} window(s):", snapshot.windows.len());
            for w in &snapshot.windows {
                println!(
                    "    {:<10} {:<8} {}x{} at ({}, {}){}",
                    w.app_type.as_str(),
                    w.account_type.as_str(),
                    w.bounds.width,
                    w.bounds.height,
                    w.bounds.x,
                    w.bounds.y,
                    if w.is_maximized { " maximized" } else { "" }
                );
            }
        }
        _ => {
            let url = resolve_url(
                policy.home_app,
                policy.account_type,
                None,
                policy.custom_home_url.as_deref(),
            );
            println!("  would open {} at {}", policy.home_app, url);
        }
    }

    if let Some(route) = route {
        let account = route.account.unwrap_or(policy.account_type);
        println!(
            "  launch route: {} ({}) -> {}",
            route.app,
            account,
            resolve_url(route.app, account, None, None)
        );
    }
}
