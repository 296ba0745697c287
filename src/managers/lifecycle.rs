//! Lifecycle Orchestrator for SuiteShell.
//!
//! Drives window creation (including staggered session restore), routes native
//! window events into the registry, and publishes derived-state notifications.
//!
//! Per-window phases: `Creating → Live → Closing → Gone`. A window becomes `Live`
//! on its first ready-to-show signal, or immediately if its content cannot be
//! loaded. A close request moves it to `Closing`; with hide-on-close active, no
//! quit in progress and a way to reveal it again, the close is vetoed and the
//! window goes back to `Live`, hidden. `Gone` is reached when the native window reports
//! `Closed`, at which point the registry record is removed exactly once.
//!
//! All entry points run on the single UI thread. Timers (staggered restores and
//! autosave) are deadlines checked by `tick`; the event loop sleeps until
//! `next_deadline`.

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::managers::session_manager::{SessionManager, SessionManagerTrait};
use crate::managers::window_registry::{WindowRegistry, WindowRegistryTrait};
use crate::platform::native::{NativeWindowHost, WindowSpec};
use crate::services::broadcaster::Broadcaster;
use crate::services::launcher::resolve_url;
use crate::services::partition::partition_for;
use crate::types::account::AccountType;
use crate::types::app_type::AppType;
use crate::types::errors::{HostError, SessionError};
use crate::types::events::{Notification, WindowEvent};
use crate::types::settings::ShellSettings;
use crate::types::window::{Bounds, ManagedWindow, OpenRequest, WindowId, WindowPhase};

/// Spacing between consecutive window creations during session restore.
pub const RESTORE_STAGGER: Duration = Duration::from_millis(400);

/// Window policies taken from the user settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecyclePolicy {
    pub home_app: AppType,
    pub account_type: AccountType,
    pub start_hidden: bool,
    pub hide_on_close: bool,
    pub restore_on_start: bool,
    pub default_bounds: Bounds,
    pub user_agent: Option<String>,
    pub custom_home_url: Option<String>,
}

impl LifecyclePolicy {
    pub fn from_settings(settings: &ShellSettings) -> Self {
        let defaults = Bounds::default();
        Self {
            home_app: settings.general.home_app,
            account_type: settings.general.account_type,
            start_hidden: settings.window.start_hidden,
            hide_on_close: settings.window.hide_on_close,
            restore_on_start: settings.window.restore_on_start,
            default_bounds: Bounds::new(
                defaults.x,
                defaults.y,
                settings.window.default_width.max(200),
                settings.window.default_height.max(150),
            ),
            user_agent: settings.web.user_agent.clone().filter(|ua| !ua.is_empty()),
            custom_home_url: settings.web.custom_home_url.clone(),
        }
    }
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self::from_settings(&ShellSettings::default())
    }
}

/// What `startup` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupOutcome {
    /// This many windows were queued from the previous session.
    Restored(usize),
    /// No usable session; one default window was opened.
    Default(Option<WindowId>),
    /// Startup already ran in this process.
    AlreadyStarted,
}

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The close was vetoed and the window hidden.
    Hidden,
    /// Native teardown was started.
    Closing,
    /// The window is not registered.
    Ignored,
}

#[derive(Debug, Clone)]
struct PendingRestore {
    due: Instant,
    request: OpenRequest,
}

/// Owns the registry, the session store and the broadcaster for one shell process.
pub struct Lifecycle {
    registry: WindowRegistry,
    sessions: SessionManager,
    broadcaster: Broadcaster,
    policy: LifecyclePolicy,
    phases: HashMap<WindowId, WindowPhase>,
    keep_hidden: HashSet<WindowId>,
    pending: VecDeque<PendingRestore>,
    next_id: u64,
    started: bool,
    quitting: bool,
}

impl Lifecycle {
    pub fn new(sessions: SessionManager, policy: LifecyclePolicy) -> Self {
        Self {
            registry: WindowRegistry::new(),
            sessions,
            broadcaster: Broadcaster::new(),
            policy,
            phases: HashMap::new(),
            keep_hidden: HashSet::new(),
            pending: VecDeque::new(),
            next_id: 0,
            started: false,
            quitting: false,
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn broadcaster_mut(&mut self) -> &mut Broadcaster {
        &mut self.broadcaster
    }

    pub fn policy(&self) -> &LifecyclePolicy {
        &self.policy
    }

    pub fn phase(&self, id: WindowId) -> WindowPhase {
        self.phases.get(&id).copied().unwrap_or(WindowPhase::Gone)
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Due times of restores that have not fired yet, in order.
    pub fn pending_restores(&self) -> Vec<Instant> {
        self.pending.iter().map(|p| p.due).collect()
    }

    fn allocate_id(&mut self) -> WindowId {
        self.next_id += 1;
        WindowId(self.next_id)
    }

    fn window_title(app: AppType, account: AccountType) -> String {
        match account {
            AccountType::Personal => app.display_name().to_string(),
            AccountType::Work => format!("{} (Work)", app.display_name()),
        }
    }

    /// Opens a new window for `request`.
    ///
    /// The native window is created hidden, placed, registered, and starts
    /// loading. It is shown on `ReadyToShow`. When the load cannot even be
    /// started, the window goes live right away with whatever the host shows.
    pub fn open_window(
        &mut self,
        host: &mut dyn NativeWindowHost,
        request: OpenRequest,
    ) -> Result<WindowId, HostError> {
        self.open_with(host, request, false)
    }

    fn open_with(
        &mut self,
        host: &mut dyn NativeWindowHost,
        request: OpenRequest,
        hidden: bool,
    ) -> Result<WindowId, HostError> {
        let id = self.allocate_id();
        let url = resolve_url(
            request.app_type,
            request.account_type,
            request.url.as_deref(),
            self.policy.custom_home_url.as_deref(),
        );
        let partition = partition_for(request.account_type);
        let spec = WindowSpec {
            id,
            title: Self::window_title(request.app_type, request.account_type),
            partition,
        };

        if let Err(e) = host.create(&spec) {
            warn!(window_id = %id, error = %e, "native window creation failed");
            return Err(e);
        }

        let bounds = request.bounds.unwrap_or(self.policy.default_bounds);
        Self::place(host, id, bounds, request.maximized, request.full_screen);

        let record = ManagedWindow {
            id,
            app_type: request.app_type,
            account_type: request.account_type,
            url: url.clone(),
            bounds,
            is_maximized: request.maximized,
            is_full_screen: request.full_screen,
        };
        if let Err(e) = self.registry.register(record) {
            let _ = host.close(id);
            return Err(HostError::CreateFailed(e.to_string()));
        }
        self.phases.insert(id, WindowPhase::Creating);
        if hidden {
            self.keep_hidden.insert(id);
        }

        info!(
            window_id = %id,
            app = %request.app_type,
            account = %request.account_type,
            partition = %partition,
            "window created"
        );

        if let Err(e) = host.load_url(id, &url, self.policy.user_agent.as_deref()) {
            warn!(window_id = %id, error = %e, "content load failed, showing window anyway");
            self.go_live(host, id);
        }

        self.broadcaster.publish(&Notification::WindowCreated {
            id,
            app_type: request.app_type,
        });
        Ok(id)
    }

    /// Applies the restored rectangle first, then the window state on top of it.
    fn place(
        host: &mut dyn NativeWindowHost,
        id: WindowId,
        bounds: Bounds,
        maximized: bool,
        full_screen: bool,
    ) {
        let mut result = host.set_bounds(id, bounds);
        if maximized {
            result = result.and(host.set_maximized(id, true));
        }
        if full_screen {
            result = result.and(host.set_full_screen(id, true));
        }
        if let Err(e) = result {
            warn!(window_id = %id, error = %e, "failed to place window");
        }
    }

    /// `Creating → Live`; shows the window unless it starts hidden.
    fn go_live(&mut self, host: &mut dyn NativeWindowHost, id: WindowId) {
        if self.phase(id) != WindowPhase::Creating {
            return;
        }
        self.phases.insert(id, WindowPhase::Live);
        if self.keep_hidden.remove(&id) {
            debug!(window_id = %id, "window live, starting hidden");
        } else if let Err(e) = host.show(id) {
            warn!(window_id = %id, error = %e, "failed to show window");
        }
    }

    /// Opens the configured home window.
    pub fn open_default_window(
        &mut self,
        host: &mut dyn NativeWindowHost,
    ) -> Result<WindowId, HostError> {
        let request = OpenRequest::new(self.policy.home_app, self.policy.account_type);
        self.open_window(host, request)
    }

    /// Shows the first window already displaying `app` under `account`, or opens one.
    ///
    /// This is the entry point for launcher routes from the CLI, hotkeys and the tray.
    pub fn focus_or_open(
        &mut self,
        host: &mut dyn NativeWindowHost,
        app: AppType,
        account: AccountType,
    ) -> Result<WindowId, HostError> {
        let existing = self
            .registry
            .by_app_type(app)
            .into_iter()
            .find(|w| w.account_type == account)
            .map(|w| w.id);

        match existing {
            Some(id) => {
                self.keep_hidden.remove(&id);
                if self.phase(id) == WindowPhase::Live {
                    host.show(id)?;
                }
                Ok(id)
            }
            None => self.open_window(host, OpenRequest::new(app, account)),
        }
    }

    /// Routes one native event for window `id`.
    ///
    /// Events for windows that are no longer registered are a teardown race and are dropped.
    pub fn handle_event(&mut self, host: &mut dyn NativeWindowHost, id: WindowId, event: WindowEvent) {
        if !self.registry.contains(id) {
            trace!(window_id = %id, ?event, "event for unknown window dropped");
            return;
        }

        match event {
            WindowEvent::ReadyToShow => self.go_live(host, id),
            WindowEvent::Resized(bounds) => {
                self.registry.apply_resize(id, bounds);
            }
            WindowEvent::Moved { x, y } => {
                self.registry.apply_move(id, x, y);
            }
            WindowEvent::Maximized => {
                self.registry.set_maximized(id, true);
            }
            WindowEvent::Unmaximized => {
                self.registry.set_maximized(id, false);
            }
            WindowEvent::EnteredFullScreen => {
                self.registry.set_full_screen(id, true);
            }
            WindowEvent::LeftFullScreen => {
                self.registry.set_full_screen(id, false);
            }
            WindowEvent::Navigated { url, title } => {
                let changed = self.registry.apply_navigation(id, &url, &title);
                self.app_changed(host, id, changed);
            }
            WindowEvent::TitleChanged(title) => {
                let changed = self.registry.reclassify(id, &title);
                self.app_changed(host, id, changed);
            }
            WindowEvent::MediaChanged(active) => {
                self.broadcaster
                    .publish(&Notification::MediaChanged { id, active });
            }
            WindowEvent::UnreadCount(count) => {
                self.broadcaster
                    .publish(&Notification::BadgeChanged { id, count });
            }
            WindowEvent::CloseRequested => {
                self.request_close(host, id);
            }
            WindowEvent::Closed => {
                self.finish_close(id);
            }
        }
    }

    fn app_changed(&mut self, host: &mut dyn NativeWindowHost, id: WindowId, changed: Option<AppType>) {
        let Some(app_type) = changed else {
            return;
        };
        debug!(window_id = %id, app = %app_type, "app changed");
        if let Some(window) = self.registry.get(id) {
            let title = Self::window_title(app_type, window.account_type);
            let _ = host.set_title(id, &title);
        }
        self.broadcaster
            .publish(&Notification::AppChanged { id, app_type });
    }

    /// Handles a close request for `id`.
    ///
    /// Closing the last window, or the last visible one when the host has no
    /// tray, quits the shell instead.
    pub fn request_close(&mut self, host: &mut dyn NativeWindowHost, id: WindowId) -> CloseOutcome {
        if !self.registry.contains(id) {
            return CloseOutcome::Ignored;
        }
        self.phases.insert(id, WindowPhase::Closing);

        // Without a tray, hiding the last visible window would leave nothing
        // that can bring the shell back. Windows still loading count as visible.
        let others_visible = self.registry.ids().into_iter().any(|other| {
            other != id
                && (host.is_visible(other)
                    || (self.phase(other) == WindowPhase::Creating
                        && !self.keep_hidden.contains(&other)))
        });
        let stranded = !others_visible && !host.has_tray();

        if self.policy.hide_on_close && !self.quitting && !stranded {
            self.phases.insert(id, WindowPhase::Live);
            if let Err(e) = host.hide(id) {
                warn!(window_id = %id, error = %e, "failed to hide window");
            }
            debug!(window_id = %id, "close vetoed, window hidden");
            return CloseOutcome::Hidden;
        }

        if !self.quitting && (self.registry.len() == 1 || stranded) && self.pending.is_empty() {
            info!(window_id = %id, "last window closing, quitting");
            let _ = self.quit(host);
            return CloseOutcome::Closing;
        }

        match host.close(id) {
            Ok(()) => {}
            Err(HostError::UnknownWindow(_)) => self.finish_close(id),
            Err(e) => warn!(window_id = %id, error = %e, "native close failed"),
        }
        CloseOutcome::Closing
    }

    /// Native teardown finished: removes the record and announces it. Idempotent.
    fn finish_close(&mut self, id: WindowId) {
        if self.registry.unregister(id).is_none() {
            return;
        }
        self.phases.remove(&id);
        self.keep_hidden.remove(&id);
        info!(window_id = %id, "window closed");
        self.broadcaster.publish(&Notification::WindowClosed { id });
    }

    /// Restores the previous session or opens the default window. Runs at most once.
    ///
    /// Restored windows are queued `RESTORE_STAGGER` apart; the first one opens
    /// immediately.
    pub fn startup(&mut self, host: &mut dyn NativeWindowHost, now: Instant) -> StartupOutcome {
        if self.started {
            return StartupOutcome::AlreadyStarted;
        }
        self.started = true;

        let snapshot = if self.policy.restore_on_start {
            self.sessions.start_periodic_save(now);
            self.sessions
                .load_session()
                .filter(|snapshot| snapshot.is_restorable())
        } else {
            None
        };

        let outcome = match snapshot {
            Some(snapshot) => {
                let count = snapshot.windows.len();
                info!(windows = count, "restoring previous session");
                for (index, record) in snapshot.windows.iter().enumerate() {
                    self.pending.push_back(PendingRestore {
                        due: now + RESTORE_STAGGER * index as u32,
                        request: OpenRequest::from_record(record),
                    });
                }
                StartupOutcome::Restored(count)
            }
            None => {
                let request = OpenRequest::new(self.policy.home_app, self.policy.account_type);
                let id = self.open_with(host, request, self.policy.start_hidden).ok();
                StartupOutcome::Default(id)
            }
        };

        self.tick(host, now);
        outcome
    }

    /// Fires due restores and the autosave.
    pub fn tick(&mut self, host: &mut dyn NativeWindowHost, now: Instant) {
        while self.pending.front().is_some_and(|p| p.due <= now) {
            let Some(pending) = self.pending.pop_front() else {
                break;
            };
            let _ = self.open_with(host, pending.request, self.policy.start_hidden);
        }

        if self.sessions.autosave_due(now) {
            let _ = self.save_session(host);
        }
    }

    /// Earliest instant at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let restore = self.pending.front().map(|p| p.due);
        match (restore, self.sessions.next_autosave()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Persists a snapshot of the live windows. Failures are logged and returned.
    pub fn save_session(&self, host: &dyn NativeWindowHost) -> Result<(), SessionError> {
        let records = self.registry.snapshot(host);
        let result = self.sessions.save_session(&records);
        if let Err(e) = &result {
            warn!(error = %e, "session save failed");
        }
        result
    }

    /// Enables or disables restore-on-start for the rest of the session, arming or
    /// stopping the autosave schedule to match.
    pub fn set_restore_on_start(&mut self, enabled: bool, now: Instant) {
        self.policy.restore_on_start = enabled;
        if enabled {
            self.sessions.start_periodic_save(now);
        } else {
            self.sessions.stop_periodic_save();
        }
    }

    /// Applies changed user settings to the running shell.
    ///
    /// Only new windows pick up account, home app, bounds and user agent changes.
    pub fn apply_settings(&mut self, settings: &ShellSettings, now: Instant) {
        let policy = LifecyclePolicy::from_settings(settings);
        let restore_changed = policy.restore_on_start != self.policy.restore_on_start;
        self.policy = policy;
        if restore_changed {
            self.set_restore_on_start(self.policy.restore_on_start, now);
        }
    }

    /// Hides every visible window, or shows all of them if none is visible.
    pub fn toggle_visibility(&mut self, host: &mut dyn NativeWindowHost) {
        let ids = self.registry.ids();
        let any_visible = ids.iter().any(|id| host.is_visible(*id));
        for id in ids {
            let result = if any_visible {
                host.hide(id)
            } else {
                self.keep_hidden.remove(&id);
                host.show(id)
            };
            if let Err(e) = result {
                warn!(window_id = %id, error = %e, "visibility toggle failed");
            }
        }
    }

    /// Begins the quit sequence.
    ///
    /// Pending restores are dropped and the autosave stops. The session is saved
    /// from live state before any window is torn down; then every window is closed.
    pub fn quit(&mut self, host: &mut dyn NativeWindowHost) -> Result<(), SessionError> {
        if self.quitting {
            return Ok(());
        }
        self.quitting = true;
        let dropped = self.pending.len();
        self.pending.clear();
        self.sessions.stop_periodic_save();
        if dropped > 0 {
            debug!(dropped, "pending restores cancelled by quit");
        }

        let result = self.save_session(host);

        for id in self.registry.ids() {
            self.request_close(host, id);
        }
        result
    }
}
