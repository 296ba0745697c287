//! Native window host built on `tao` + `wry`.
//!
//! Architecture:
//! - One tao window per managed window, created hidden. The webview is attached
//!   lazily on the first `load_url`, inside the `WebContext` of the window's
//!   partition, so personal and work windows never share cookies or storage.
//! - Page callbacks (load finished, title changes, IPC, new-window requests) run
//!   on the UI thread but outside the lifecycle borrow, so they post `UserEvent`s
//!   through the event loop proxy instead of touching shell state directly.
//! - Staggered restores and autosave are deadlines; the loop sleeps with
//!   `ControlFlow::WaitUntil(next_deadline)`.
//! - There is no tray icon yet, so closing the last visible window quits even
//!   with hide-on-close set.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use tao::dpi::{PhysicalPosition, PhysicalSize};
use tao::event::{Event, StartCause, WindowEvent as TaoWindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Fullscreen, Window, WindowBuilder, WindowId as TaoWindowId};
use tracing::{debug, info, warn};
use wry::{PageLoadEvent, WebContext, WebView, WebViewBuilder};

use crate::app::{App, LaunchRoute};
use crate::managers::indicator_manager::IndicatorState;
use crate::platform;
use crate::platform::native::{NativeWindowHost, StateTracker, WindowGeometry, WindowSpec};
use crate::services::page_signals::{parse_ipc, TitleUnread, MEDIA_WATCH_JS};
use crate::types::account::Partition;
use crate::types::errors::HostError;
use crate::types::events::WindowEvent;
use crate::types::window::{Bounds, LiveGeometry, WindowId};

#[derive(Debug)]
enum UserEvent {
    /// Event raised by page content or by host teardown.
    Window(WindowId, WindowEvent),
    /// A page asked for a new window (`target=_blank`, `window.open`).
    OpenUrl { from: WindowId, url: String },
}

struct NativeEntry {
    // Declared before `window` so the webview is dropped first.
    webview: Option<WebView>,
    window: Window,
    partition: Partition,
    base_title: String,
    unread: u32,
    state: StateTracker,
}

impl NativeEntry {
    fn render_title(&self) {
        if self.unread > 0 {
            self.window
                .set_title(&format!("({}) {}", self.unread, self.base_title));
        } else {
            self.window.set_title(&self.base_title);
        }
    }

    fn geometry(&self) -> LiveGeometry {
        let (x, y) = self
            .window
            .outer_position()
            .map(|p| (p.x, p.y))
            .unwrap_or((0, 0));
        let size = self.window.inner_size();
        LiveGeometry {
            bounds: Bounds::new(x, y, size.width as i32, size.height as i32),
            is_maximized: self.window.is_maximized(),
            is_full_screen: self.window.fullscreen().is_some(),
        }
    }
}

/// Native windows and per-partition browsing contexts.
struct NativeState {
    entries: HashMap<WindowId, NativeEntry>,
    by_tao: HashMap<TaoWindowId, WindowId>,
    contexts: HashMap<Partition, WebContext>,
    data_root: PathBuf,
}

impl NativeState {
    fn new(data_root: PathBuf) -> Self {
        Self {
            entries: HashMap::new(),
            by_tao: HashMap::new(),
            contexts: HashMap::new(),
            data_root,
        }
    }

    fn entry(&self, id: WindowId) -> Result<&NativeEntry, HostError> {
        self.entries.get(&id).ok_or(HostError::UnknownWindow(id))
    }

    fn entry_mut(&mut self, id: WindowId) -> Result<&mut NativeEntry, HostError> {
        self.entries.get_mut(&id).ok_or(HostError::UnknownWindow(id))
    }

    /// Maps a tao window event onto shell events.
    ///
    /// tao reports maximize and fullscreen transitions only as moves and
    /// resizes, so the state flags are diffed on both and emitted first.
    fn translate(&mut self, tao_id: TaoWindowId, event: &TaoWindowEvent) -> Vec<(WindowId, WindowEvent)> {
        let Some(id) = self.by_tao.get(&tao_id).copied() else {
            return Vec::new();
        };
        let Some(entry) = self.entries.get_mut(&id) else {
            return Vec::new();
        };

        let events = match event {
            TaoWindowEvent::CloseRequested => vec![WindowEvent::CloseRequested],
            TaoWindowEvent::Moved(position) => {
                let live = entry.geometry();
                entry.state.moved(&live, position.x, position.y)
            }
            TaoWindowEvent::Resized(_) => {
                let live = entry.geometry();
                entry.state.resized(&live)
            }
            _ => Vec::new(),
        };
        events.into_iter().map(|e| (id, e)).collect()
    }

    fn render_indicators(&mut self, state: &IndicatorState) {
        for (id, entry) in self.entries.iter_mut() {
            let unread = state.unread_for(*id);
            if unread != entry.unread {
                entry.unread = unread;
                entry.render_title();
            }
        }
        debug!(
            tooltip = %state.tray_tooltip(),
            badge = %state.badge_label(),
            presence = ?state.presence(),
            "indicators updated"
        );
    }
}

fn build_webview(
    entry: &NativeEntry,
    context: &mut WebContext,
    id: WindowId,
    url: &str,
    user_agent: Option<&str>,
    proxy: &EventLoopProxy<UserEvent>,
) -> Result<WebView, String> {
    let load_proxy = proxy.clone();
    let titles = TitleUnread::new();
    let title_proxy = proxy.clone();
    let ipc_proxy = proxy.clone();
    let nw_proxy = proxy.clone();

    let mut builder = WebViewBuilder::with_web_context(context)
        .with_url(url)
        .with_initialization_script(MEDIA_WATCH_JS)
        .with_on_page_load_handler(move |event, url| {
            if let PageLoadEvent::Finished = event {
                let _ = load_proxy.send_event(UserEvent::Window(
                    id,
                    WindowEvent::Navigated {
                        url,
                        title: String::new(),
                    },
                ));
                let _ = load_proxy.send_event(UserEvent::Window(id, WindowEvent::ReadyToShow));
            }
        })
        .with_document_title_changed_handler(move |title| {
            let unread = titles.observe(&title);
            let _ = title_proxy.send_event(UserEvent::Window(id, WindowEvent::TitleChanged(title)));
            if let Some(count) = unread {
                let _ = title_proxy.send_event(UserEvent::Window(id, WindowEvent::UnreadCount(count)));
            }
        })
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            if let Some(event) = parse_ipc(msg.body()) {
                let _ = ipc_proxy.send_event(UserEvent::Window(id, event));
            }
        })
        .with_new_window_req_handler(move |url, _features| {
            if url.starts_with("http://") || url.starts_with("https://") {
                let _ = nw_proxy.send_event(UserEvent::OpenUrl { from: id, url });
            }
            wry::NewWindowResponse::Deny
        })
        .with_devtools(cfg!(debug_assertions));

    if let Some(user_agent) = user_agent {
        builder = builder.with_user_agent(user_agent);
    }

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = entry
            .window
            .default_vbox()
            .ok_or_else(|| "window has no GTK container".to_string())?;
        builder.build_gtk(vbox).map_err(|e| e.to_string())?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&entry.window).map_err(|e| e.to_string())?;

    Ok(webview)
}

/// `NativeWindowHost` over the running tao event loop.
struct TaoHost<'a> {
    target: &'a EventLoopWindowTarget<UserEvent>,
    proxy: &'a EventLoopProxy<UserEvent>,
    state: &'a mut NativeState,
}

impl WindowGeometry for TaoHost<'_> {
    fn live_geometry(&self, id: WindowId) -> Option<LiveGeometry> {
        self.state.entries.get(&id).map(NativeEntry::geometry)
    }
}

impl NativeWindowHost for TaoHost<'_> {
    fn create(&mut self, spec: &WindowSpec) -> Result<(), HostError> {
        let window = WindowBuilder::new()
            .with_title(&spec.title)
            .with_visible(false)
            .build(self.target)
            .map_err(|e| HostError::CreateFailed(e.to_string()))?;

        self.state.by_tao.insert(window.id(), spec.id);
        self.state.entries.insert(
            spec.id,
            NativeEntry {
                webview: None,
                window,
                partition: spec.partition,
                base_title: spec.title.clone(),
                unread: 0,
                state: StateTracker::default(),
            },
        );
        Ok(())
    }

    fn show(&mut self, id: WindowId) -> Result<(), HostError> {
        let entry = self.state.entry(id)?;
        entry.window.set_visible(true);
        entry.window.set_focus();
        Ok(())
    }

    fn hide(&mut self, id: WindowId) -> Result<(), HostError> {
        self.state.entry(id)?.window.set_visible(false);
        Ok(())
    }

    /// Drops the native window and reports `Closed` through the event loop.
    fn close(&mut self, id: WindowId) -> Result<(), HostError> {
        let entry = self
            .state
            .entries
            .remove(&id)
            .ok_or(HostError::UnknownWindow(id))?;
        self.state.by_tao.remove(&entry.window.id());
        drop(entry);
        let _ = self
            .proxy
            .send_event(UserEvent::Window(id, WindowEvent::Closed));
        Ok(())
    }

    fn is_visible(&self, id: WindowId) -> bool {
        self.state
            .entries
            .get(&id)
            .is_some_and(|e| e.window.is_visible())
    }

    fn load_url(&mut self, id: WindowId, url: &str, user_agent: Option<&str>) -> Result<(), HostError> {
        let load_failed = |reason: String| HostError::LoadFailed {
            url: url.to_string(),
            reason,
        };
        let NativeState {
            entries,
            contexts,
            data_root,
            ..
        } = &mut *self.state;
        let entry = entries.get_mut(&id).ok_or(HostError::UnknownWindow(id))?;

        if let Some(webview) = &entry.webview {
            return webview.load_url(url).map_err(|e| load_failed(e.to_string()));
        }

        let partition = entry.partition;
        let context = contexts
            .entry(partition)
            .or_insert_with(|| WebContext::new(Some(partition.data_dir(data_root.as_path()))));
        let webview = build_webview(entry, context, id, url, user_agent, self.proxy)
            .map_err(load_failed)?;
        entry.webview = Some(webview);
        Ok(())
    }

    fn set_bounds(&mut self, id: WindowId, bounds: Bounds) -> Result<(), HostError> {
        let window = &self.state.entry(id)?.window;
        window.set_outer_position(PhysicalPosition::new(bounds.x, bounds.y));
        window.set_inner_size(PhysicalSize::new(
            bounds.width.max(1) as u32,
            bounds.height.max(1) as u32,
        ));
        Ok(())
    }

    fn set_maximized(&mut self, id: WindowId, maximized: bool) -> Result<(), HostError> {
        let entry = self.state.entry_mut(id)?;
        entry.window.set_maximized(maximized);
        entry.state.set_maximized(maximized);
        Ok(())
    }

    fn set_full_screen(&mut self, id: WindowId, full_screen: bool) -> Result<(), HostError> {
        let entry = self.state.entry_mut(id)?;
        let mode = full_screen.then_some(Fullscreen::Borderless(None));
        entry.window.set_fullscreen(mode);
        entry.state.set_full_screen(full_screen);
        Ok(())
    }

    fn set_title(&mut self, id: WindowId, title: &str) -> Result<(), HostError> {
        let entry = self.state.entry_mut(id)?;
        entry.base_title = title.to_string();
        entry.render_title();
        Ok(())
    }
}

// ─── Main entry point ───

pub fn run(mut app: App, route: Option<LaunchRoute>) {
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();
    let mut native = NativeState::new(platform::get_data_dir());

    event_loop.run(move |event, target, control_flow| {
        let mut host = TaoHost {
            target,
            proxy: &proxy,
            state: &mut native,
        };

        match event {
            Event::NewEvents(StartCause::Init) => {
                app.startup(&mut host, route.as_ref(), Instant::now());
            }

            Event::WindowEvent {
                window_id,
                event: window_event,
                ..
            } => {
                for (id, shell_event) in host.state.translate(window_id, &window_event) {
                    app.lifecycle.handle_event(&mut host, id, shell_event);
                }
            }

            Event::UserEvent(UserEvent::Window(id, shell_event)) => {
                app.lifecycle.handle_event(&mut host, id, shell_event);
            }

            Event::UserEvent(UserEvent::OpenUrl { from, url }) => {
                if let Err(e) = app.open_url_from(&mut host, from, &url) {
                    warn!(url = %url, error = %e, "failed to open new window");
                }
            }

            Event::LoopDestroyed => {
                if let Err(e) = app.shutdown(&mut host) {
                    warn!(error = %e, "session not saved on exit");
                }
                return;
            }

            _ => {}
        }

        app.lifecycle.tick(&mut host, Instant::now());
        if let Some(state) = app.indicators.take_changes() {
            host.state.render_indicators(&state);
        }

        *control_flow = if app.lifecycle.is_quitting() && app.lifecycle.registry().is_empty() {
            info!("all windows closed, exiting");
            ControlFlow::Exit
        } else {
            match app.lifecycle.next_deadline() {
                Some(deadline) => ControlFlow::WaitUntil(deadline),
                None => ControlFlow::Wait,
            }
        };
    });
}
