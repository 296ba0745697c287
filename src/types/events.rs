use super::app_type::AppType;
use super::window::{Bounds, WindowId};

/// A native window or content event, delivered on the UI thread.
///
/// For a single window these arrive in the order the platform emits them.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// Content is ready to display for the first time.
    ReadyToShow,
    Resized(Bounds),
    Moved { x: i32, y: i32 },
    Maximized,
    Unmaximized,
    EnteredFullScreen,
    LeftFullScreen,
    Navigated { url: String, title: String },
    TitleChanged(String),
    /// Audio/video capture or playback started (`true`) or stopped.
    MediaChanged(bool),
    /// Unread count scraped from the page.
    UnreadCount(u32),
    CloseRequested,
    /// Native teardown finished.
    Closed,
}

/// Derived-state notification fanned out by the `Broadcaster`.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    WindowCreated { id: WindowId, app_type: AppType },
    WindowClosed { id: WindowId },
    AppChanged { id: WindowId, app_type: AppType },
    MediaChanged { id: WindowId, active: bool },
    BadgeChanged { id: WindowId, count: u32 },
}

/// Topic names, one per `Notification` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    WindowCreated,
    WindowClosed,
    AppChanged,
    MediaChanged,
    BadgeChanged,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::WindowCreated => "window-created",
            Topic::WindowClosed => "window-closed",
            Topic::AppChanged => "app-changed",
            Topic::MediaChanged => "media-changed",
            Topic::BadgeChanged => "badge-changed",
        }
    }
}

impl Notification {
    pub fn topic(&self) -> Topic {
        match self {
            Notification::WindowCreated { .. } => Topic::WindowCreated,
            Notification::WindowClosed { .. } => Topic::WindowClosed,
            Notification::AppChanged { .. } => Topic::AppChanged,
            Notification::MediaChanged { .. } => Topic::MediaChanged,
            Notification::BadgeChanged { .. } => Topic::BadgeChanged,
        }
    }

    pub fn window_id(&self) -> WindowId {
        match self {
            Notification::WindowCreated { id, .. }
            | Notification::WindowClosed { id }
            | Notification::AppChanged { id, .. }
            | Notification::MediaChanged { id, .. }
            | Notification::BadgeChanged { id, .. } => *id,
        }
    }
}
