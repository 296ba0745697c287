//! Native window API contract.
//!
//! The lifecycle code drives windows only through these traits, so it runs
//! unchanged against the tao/wry host and against synthetic hosts in tests.

use crate::types::account::Partition;
use crate::types::errors::HostError;
use crate::types::events::WindowEvent;
use crate::types::window::{Bounds, LiveGeometry, WindowId};

/// Everything the host needs to allocate a native window.
///
/// Geometry is not part of it: the window is placed afterwards with
/// `set_bounds`, then `set_maximized` / `set_full_screen`, so that the
/// platform remembers the restored rectangle under a maximized window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub id: WindowId,
    pub title: String,
    pub partition: Partition,
}

/// Read-only access to the live geometry of native windows.
pub trait WindowGeometry {
    /// Current geometry of the native window, or `None` if it no longer exists.
    fn live_geometry(&self, id: WindowId) -> Option<LiveGeometry>;
}

/// Create, show, hide, close and navigate native windows.
///
/// Windows are created hidden. Events flow back to the orchestrator as
/// `WindowEvent`s; `close` must eventually produce `WindowEvent::Closed`.
pub trait NativeWindowHost: WindowGeometry {
    fn create(&mut self, spec: &WindowSpec) -> Result<(), HostError>;
    fn show(&mut self, id: WindowId) -> Result<(), HostError>;
    fn hide(&mut self, id: WindowId) -> Result<(), HostError>;
    fn close(&mut self, id: WindowId) -> Result<(), HostError>;
    fn is_visible(&self, id: WindowId) -> bool;
    /// Starts loading `url`. Returns once the load is initiated, not when it finishes.
    fn load_url(&mut self, id: WindowId, url: &str, user_agent: Option<&str>)
        -> Result<(), HostError>;
    fn set_bounds(&mut self, id: WindowId, bounds: Bounds) -> Result<(), HostError>;
    fn set_maximized(&mut self, id: WindowId, maximized: bool) -> Result<(), HostError>;
    fn set_full_screen(&mut self, id: WindowId, full_screen: bool) -> Result<(), HostError>;
    fn set_title(&mut self, id: WindowId, title: &str) -> Result<(), HostError>;

    /// Whether some surface (a tray icon, a dock menu) can bring hidden windows back.
    fn has_tray(&self) -> bool {
        false
    }
}

/// Tracks the maximize and fullscreen flags last reported for one native window.
///
/// Platforms that only report raw moves and resizes are diffed against this, so
/// a state change is always delivered before the move or resize it caused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateTracker {
    maximized: bool,
    full_screen: bool,
}

impl StateTracker {
    /// Records a state the shell requested itself, so it is not reported back.
    pub fn set_maximized(&mut self, maximized: bool) {
        self.maximized = maximized;
    }

    pub fn set_full_screen(&mut self, full_screen: bool) {
        self.full_screen = full_screen;
    }

    /// Transitions between the tracked flags and `live`.
    pub fn transitions(&mut self, live: &LiveGeometry) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        if live.is_maximized != self.maximized {
            self.maximized = live.is_maximized;
            events.push(if live.is_maximized {
                WindowEvent::Maximized
            } else {
                WindowEvent::Unmaximized
            });
        }
        if live.is_full_screen != self.full_screen {
            self.full_screen = live.is_full_screen;
            events.push(if live.is_full_screen {
                WindowEvent::EnteredFullScreen
            } else {
                WindowEvent::LeftFullScreen
            });
        }
        events
    }

    /// Events for a raw move to `(x, y)`, observed with geometry `live`.
    pub fn moved(&mut self, live: &LiveGeometry, x: i32, y: i32) -> Vec<WindowEvent> {
        let mut events = self.transitions(live);
        events.push(WindowEvent::Moved { x, y });
        events
    }

    /// Events for a raw resize, observed with geometry `live`.
    pub fn resized(&mut self, live: &LiveGeometry) -> Vec<WindowEvent> {
        let mut events = self.transitions(live);
        events.push(WindowEvent::Resized(live.bounds));
        events
    }
}
