use serde::{Deserialize, Serialize};

use super::account::AccountType;
use super::app_type::AppType;

/// Process-unique window identifier. Never reused while the process runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Window position and size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(100, 100, 1181, 670)
    }
}

/// Metadata for one live native window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagedWindow {
    pub id: WindowId,
    #[serde(default)]
    pub app_type: AppType,
    #[serde(default)]
    pub account_type: AccountType,
    pub url: String,
    #[serde(default)]
    pub bounds: Bounds,
    #[serde(default)]
    pub is_maximized: bool,
    #[serde(default)]
    pub is_full_screen: bool,
}

/// Partial update merged into a registry record by `WindowRegistry::update`.
///
/// There is no `account_type` field: a window's account never changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowPatch {
    pub app_type: Option<AppType>,
    pub url: Option<String>,
    pub bounds: Option<Bounds>,
    pub is_maximized: Option<bool>,
    pub is_full_screen: Option<bool>,
}

/// Geometry as reported by the native window right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveGeometry {
    pub bounds: Bounds,
    pub is_maximized: bool,
    pub is_full_screen: bool,
}

/// Lifecycle phase of a window as tracked by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    Creating,
    Live,
    Closing,
    Gone,
}

/// A request to open a new window, from a user action, CLI argument, hotkey,
/// or session restore.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRequest {
    pub app_type: AppType,
    pub account_type: AccountType,
    /// Explicit address. When `None` the launcher URL for `app_type` is used.
    pub url: Option<String>,
    pub bounds: Option<Bounds>,
    pub maximized: bool,
    pub full_screen: bool,
}

impl OpenRequest {
    pub fn new(app_type: AppType, account_type: AccountType) -> Self {
        Self {
            app_type,
            account_type,
            url: None,
            bounds: None,
            maximized: false,
            full_screen: false,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Rebuilds the request that recreates a persisted window.
    pub fn from_record(record: &ManagedWindow) -> Self {
        Self {
            app_type: record.app_type,
            account_type: record.account_type,
            url: Some(record.url.clone()).filter(|u| !u.is_empty()),
            bounds: Some(record.bounds),
            maximized: record.is_maximized,
            full_screen: record.is_full_screen,
        }
    }
}
