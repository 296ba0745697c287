//! Indicator Manager for SuiteShell.
//!
//! Derived UI state for the tray icon, the unread badge and the presence status,
//! rebuilt from broadcaster notifications.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::services::broadcaster::{Broadcaster, SubscriptionId};
use crate::types::app_type::AppType;
use crate::types::events::Notification;
use crate::types::window::WindowId;

const BADGE_CAP: u32 = 99;

/// Presence shown to the chat service and in the tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Available,
    InCall,
}

/// Snapshot of everything the tray and badge render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorState {
    apps: BTreeMap<WindowId, AppType>,
    unread: BTreeMap<WindowId, u32>,
    media: BTreeSet<WindowId>,
}

impl IndicatorState {
    /// Folds one notification into the state. Returns `true` if anything visible changed.
    pub fn apply(&mut self, notification: &Notification) -> bool {
        match notification {
            Notification::WindowCreated { id, app_type } => {
                self.apps.insert(*id, *app_type);
                true
            }
            Notification::AppChanged { id, app_type } => {
                self.apps.insert(*id, *app_type) != Some(*app_type)
            }
            Notification::WindowClosed { id } => {
                let existed = self.apps.remove(id).is_some();
                let had_unread = self.unread.remove(id).is_some_and(|n| n > 0);
                let had_media = self.media.remove(id);
                existed || had_unread || had_media
            }
            Notification::BadgeChanged { id, count } => {
                let previous = if *count == 0 {
                    self.unread.remove(id)
                } else {
                    self.unread.insert(*id, *count)
                };
                previous.unwrap_or(0) != *count
            }
            Notification::MediaChanged { id, active } => {
                if *active {
                    self.media.insert(*id)
                } else {
                    self.media.remove(id)
                }
            }
        }
    }

    pub fn window_count(&self) -> usize {
        self.apps.len()
    }

    /// Total unread items across all windows.
    pub fn badge_total(&self) -> u32 {
        self.unread.values().fold(0u32, |acc, n| acc.saturating_add(*n))
    }

    /// Badge text: empty when nothing is unread, capped at `99+`.
    pub fn badge_label(&self) -> String {
        match self.badge_total() {
            0 => String::new(),
            n if n > BADGE_CAP => format!("{BADGE_CAP}+"),
            n => n.to_string(),
        }
    }

    pub fn presence(&self) -> Presence {
        if self.media.is_empty() {
            Presence::Available
        } else {
            Presence::InCall
        }
    }

    pub fn unread_for(&self, id: WindowId) -> u32 {
        self.unread.get(&id).copied().unwrap_or(0)
    }

    /// App shown by each open window, in id order. Used to build the tray menu.
    pub fn open_apps(&self) -> Vec<(WindowId, AppType)> {
        self.apps.iter().map(|(id, app)| (*id, *app)).collect()
    }

    pub fn tray_tooltip(&self) -> String {
        let windows = match self.window_count() {
            1 => "1 window".to_string(),
            n => format!("{n} windows"),
        };
        let mut tooltip = format!("SuiteShell - {windows}");
        if self.badge_total() > 0 {
            tooltip.push_str(&format!(", {} unread", self.badge_label()));
        }
        if self.presence() == Presence::InCall {
            tooltip.push_str(", in a call");
        }
        tooltip
    }
}

/// Keeps an `IndicatorState` in sync with a `Broadcaster`.
pub struct IndicatorManager {
    state: Rc<RefCell<IndicatorState>>,
    dirty: Rc<Cell<bool>>,
    subscription: Option<SubscriptionId>,
}

impl IndicatorManager {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(IndicatorState::default())),
            dirty: Rc::new(Cell::new(false)),
            subscription: None,
        }
    }

    /// Subscribes to `broadcaster`. Calling it again replaces the previous subscription.
    pub fn attach(&mut self, broadcaster: &mut Broadcaster) {
        if let Some(id) = self.subscription.take() {
            broadcaster.unsubscribe(id);
        }
        let state = Rc::clone(&self.state);
        let dirty = Rc::clone(&self.dirty);
        let id = broadcaster.subscribe(move |notification| {
            if state.borrow_mut().apply(notification) {
                dirty.set(true);
            }
        });
        self.subscription = Some(id);
    }

    pub fn detach(&mut self, broadcaster: &mut Broadcaster) {
        if let Some(id) = self.subscription.take() {
            broadcaster.unsubscribe(id);
        }
    }

    pub fn state(&self) -> IndicatorState {
        self.state.borrow().clone()
    }

    /// Returns the state if it changed since the last call. The UI polls this
    /// after each event batch instead of rendering inside the publish call.
    pub fn take_changes(&self) -> Option<IndicatorState> {
        if !self.dirty.replace(false) {
            return None;
        }
        Some(self.state.borrow().clone())
    }
}

impl Default for IndicatorManager {
    fn default() -> Self {
        Self::new()
    }
}
