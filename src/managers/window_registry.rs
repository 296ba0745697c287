//! Window Registry for SuiteShell.
//!
//! The authoritative in-memory set of live windows and their metadata. Records are
//! mutated only from native window events and the orchestrator's create/close path.
//!
//! `bounds` always holds the last *restored* geometry: resize and move events are
//! ignored while a window is maximized or fullscreen.

use std::collections::HashMap;

use tracing::{trace, warn};

use crate::platform::native::WindowGeometry;
use crate::services::classifier::classify;
use crate::types::account::AccountType;
use crate::types::app_type::AppType;
use crate::types::errors::RegistryError;
use crate::types::window::{Bounds, ManagedWindow, WindowId, WindowPatch};

/// Trait defining the window registry interface.
pub trait WindowRegistryTrait {
    fn register(&mut self, window: ManagedWindow) -> Result<(), RegistryError>;
    fn update(&mut self, id: WindowId, patch: WindowPatch) -> bool;
    fn unregister(&mut self, id: WindowId) -> Option<ManagedWindow>;
    fn get(&self, id: WindowId) -> Option<&ManagedWindow>;
    fn all(&self) -> Vec<&ManagedWindow>;
    fn by_account(&self, account: AccountType) -> Vec<&ManagedWindow>;
    fn by_app_type(&self, app: AppType) -> Vec<&ManagedWindow>;
    fn snapshot<G: WindowGeometry + ?Sized>(&self, geometry: &G) -> Vec<ManagedWindow>;
}

/// Arena of live windows keyed by id, iterated in creation order.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: HashMap<WindowId, ManagedWindow>,
    order: Vec<WindowId>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    /// Records a resize. Ignored while maximized or fullscreen.
    pub fn apply_resize(&mut self, id: WindowId, bounds: Bounds) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        if window.is_maximized || window.is_full_screen {
            trace!(window_id = %id, "resize ignored, window not in restored state");
            return false;
        }
        window.bounds = bounds;
        true
    }

    /// Records a move. Ignored while maximized or fullscreen.
    pub fn apply_move(&mut self, id: WindowId, x: i32, y: i32) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        if window.is_maximized || window.is_full_screen {
            return false;
        }
        window.bounds.x = x;
        window.bounds.y = y;
        true
    }

    pub fn set_maximized(&mut self, id: WindowId, maximized: bool) -> bool {
        self.update(
            id,
            WindowPatch {
                is_maximized: Some(maximized),
                ..WindowPatch::default()
            },
        )
    }

    pub fn set_full_screen(&mut self, id: WindowId, full_screen: bool) -> bool {
        self.update(
            id,
            WindowPatch {
                is_full_screen: Some(full_screen),
                ..WindowPatch::default()
            },
        )
    }

    /// Records a navigation and reclassifies the window.
    ///
    /// Returns the new app type when it changed.
    pub fn apply_navigation(&mut self, id: WindowId, url: &str, title: &str) -> Option<AppType> {
        let window = self.windows.get_mut(&id)?;
        window.url = url.to_string();
        self.reclassify(id, title)
    }

    /// Reclassifies from the current URL and `title`. Returns the new app type when it changed.
    pub fn reclassify(&mut self, id: WindowId, title: &str) -> Option<AppType> {
        let window = self.windows.get_mut(&id)?;
        let app = classify(&window.url, title);
        if app == window.app_type {
            return None;
        }
        window.app_type = app;
        Some(app)
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.order.clone()
    }
}

impl WindowRegistryTrait for WindowRegistry {
    /// Inserts a new record. A second registration for the same id is rejected
    /// and leaves the existing record untouched.
    fn register(&mut self, window: ManagedWindow) -> Result<(), RegistryError> {
        let id = window.id;
        if self.windows.contains_key(&id) {
            warn!(window_id = %id, "duplicate window registration ignored");
            return Err(RegistryError::AlreadyRegistered(id));
        }
        self.order.push(id);
        self.windows.insert(id, window);
        Ok(())
    }

    /// Merges `patch` into the record. Unknown ids are a teardown race and are ignored.
    fn update(&mut self, id: WindowId, patch: WindowPatch) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        if let Some(app_type) = patch.app_type {
            window.app_type = app_type;
        }
        if let Some(url) = patch.url {
            window.url = url;
        }
        if let Some(bounds) = patch.bounds {
            window.bounds = bounds;
        }
        if let Some(maximized) = patch.is_maximized {
            window.is_maximized = maximized;
        }
        if let Some(full_screen) = patch.is_full_screen {
            window.is_full_screen = full_screen;
        }
        true
    }

    fn unregister(&mut self, id: WindowId) -> Option<ManagedWindow> {
        let removed = self.windows.remove(&id)?;
        self.order.retain(|w| *w != id);
        Some(removed)
    }

    fn get(&self, id: WindowId) -> Option<&ManagedWindow> {
        self.windows.get(&id)
    }

    fn all(&self) -> Vec<&ManagedWindow> {
        self.order
            .iter()
            .filter_map(|id| self.windows.get(id))
            .collect()
    }

    fn by_account(&self, account: AccountType) -> Vec<&ManagedWindow> {
        self.all()
            .into_iter()
            .filter(|w| w.account_type == account)
            .collect()
    }

    fn by_app_type(&self, app: AppType) -> Vec<&ManagedWindow> {
        self.all()
            .into_iter()
            .filter(|w| w.app_type == app)
            .collect()
    }

    /// Records for persistence, in creation order.
    ///
    /// Geometry is read from the native window rather than the cache. Live bounds
    /// are only taken while the window is in its restored state, so a maximized or
    /// fullscreen rectangle is never persisted as restored bounds.
    fn snapshot<G: WindowGeometry + ?Sized>(&self, geometry: &G) -> Vec<ManagedWindow> {
        self.all()
            .into_iter()
            .map(|window| {
                let mut record = window.clone();
                if let Some(live) = geometry.live_geometry(window.id) {
                    record.is_maximized = live.is_maximized;
                    record.is_full_screen = live.is_full_screen;
                    if !live.is_maximized && !live.is_full_screen {
                        record.bounds = live.bounds;
                    }
                }
                record
            })
            .collect()
    }
}
