use serde::{Deserialize, Serialize};

use super::account::AccountType;
use super::app_type::AppType;

/// Top-level shell settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ShellSettings {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub web: WebSettings,
}

/// Which app and account a fresh window opens with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    #[serde(default)]
    pub home_app: AppType,
    #[serde(default)]
    pub account_type: AccountType,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            home_app: AppType::Home,
            account_type: AccountType::Personal,
        }
    }
}

/// Window behavior policies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowSettings {
    #[serde(default)]
    pub start_hidden: bool,
    #[serde(default)]
    pub hide_on_close: bool,
    #[serde(default = "default_true")]
    pub restore_on_start: bool,
    #[serde(default = "default_width")]
    pub default_width: i32,
    #[serde(default = "default_height")]
    pub default_height: i32,
}

fn default_true() -> bool {
    true
}

fn default_width() -> i32 {
    1181
}

fn default_height() -> i32 {
    670
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            start_hidden: false,
            hide_on_close: false,
            restore_on_start: true,
            default_width: default_width(),
            default_height: default_height(),
        }
    }
}

/// Content loading settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WebSettings {
    /// Identity string sent as the user agent. `None` keeps the engine default.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Overrides the launcher URL for the home window.
    #[serde(default)]
    pub custom_home_url: Option<String>,
}
