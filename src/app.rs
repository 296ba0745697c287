//! App Core for SuiteShell.
//!
//! Central struct holding the settings store, the lifecycle orchestrator and the
//! indicator state, and managing application startup and shutdown.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn};

use crate::managers::indicator_manager::IndicatorManager;
use crate::managers::lifecycle::{Lifecycle, LifecyclePolicy, StartupOutcome};
use crate::managers::session_manager::SessionManager;
use crate::platform::native::NativeWindowHost;
use crate::services::classifier::classify;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::account::AccountType;
use crate::types::app_type::AppType;
use crate::types::errors::{HostError, SessionError, SettingsError};
use crate::types::window::{OpenRequest, WindowId};

/// A window request coming from outside the shell: a CLI argument, a hotkey or the tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRoute {
    pub app: AppType,
    /// `None` uses the configured default account.
    pub account: Option<AccountType>,
}

impl LaunchRoute {
    /// Parses `[app] [--work|--personal]` style arguments. Unknown words are ignored.
    pub fn from_args<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut app = None;
        let mut account = None;
        for arg in args {
            let word = arg.as_ref().trim_start_matches('-');
            match word {
                "work" | "personal" => account = Some(AccountType::parse(word)),
                other => {
                    if app.is_none() {
                        app = AppType::from_arg(other);
                    }
                }
            }
        }
        app.map(|app| Self { app, account })
    }
}

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub lifecycle: Lifecycle,
    pub indicators: IndicatorManager,
}

impl App {
    /// Creates the app, loading settings from `settings_path` (or the platform
    /// path). A missing or unreadable settings file falls back to defaults.
    pub fn new(settings_path: Option<String>, session_path: Option<PathBuf>) -> Self {
        let mut settings_engine = SettingsEngine::new(settings_path);
        let settings = match settings_engine.load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "settings unreadable, using defaults");
                settings_engine.get_settings().clone()
            }
        };

        let policy = LifecyclePolicy::from_settings(&settings);
        let mut lifecycle = Lifecycle::new(SessionManager::new(session_path), policy);
        let mut indicators = IndicatorManager::new();
        indicators.attach(lifecycle.broadcaster_mut());

        Self {
            settings_engine,
            lifecycle,
            indicators,
        }
    }

    /// Startup sequence: restore the previous session or open the home window,
    /// then apply an optional launch route on top.
    pub fn startup(
        &mut self,
        host: &mut dyn NativeWindowHost,
        route: Option<&LaunchRoute>,
        now: Instant,
    ) -> StartupOutcome {
        let outcome = self.lifecycle.startup(host, now);
        info!(?outcome, "startup complete");
        if let Some(route) = route {
            if let Err(e) = self.route(host, route) {
                warn!(error = %e, "launch route failed");
            }
        }
        outcome
    }

    /// Shows or opens the window a launch route points at.
    pub fn route(
        &mut self,
        host: &mut dyn NativeWindowHost,
        route: &LaunchRoute,
    ) -> Result<WindowId, HostError> {
        let account = route
            .account
            .unwrap_or(self.lifecycle.policy().account_type);
        self.lifecycle.focus_or_open(host, route.app, account)
    }

    /// Opens `url` in a new window under the same account as `opener`.
    pub fn open_url_from(
        &mut self,
        host: &mut dyn NativeWindowHost,
        opener: WindowId,
        url: &str,
    ) -> Result<WindowId, HostError> {
        use crate::managers::window_registry::WindowRegistryTrait;

        let account = self
            .lifecycle
            .registry()
            .get(opener)
            .map(|w| w.account_type)
            .unwrap_or(self.lifecycle.policy().account_type);
        let request = OpenRequest::new(classify(url, ""), account).with_url(url);
        self.lifecycle.open_window(host, request)
    }

    /// Writes one setting and applies it to the running shell.
    pub fn set_setting(
        &mut self,
        key: &str,
        value: serde_json::Value,
        now: Instant,
    ) -> Result<(), SettingsError> {
        self.settings_engine.set_value(key, value)?;
        let settings = self.settings_engine.get_settings().clone();
        self.lifecycle.apply_settings(&settings, now);
        Ok(())
    }

    /// Shutdown sequence: persist the session from live state, then close every window.
    pub fn shutdown(&mut self, host: &mut dyn NativeWindowHost) -> Result<(), SessionError> {
        self.lifecycle.quit(host)
    }
}
