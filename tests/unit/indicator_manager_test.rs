//! Unit tests for tray/badge/presence state derived from notifications.

use suiteshell::managers::indicator_manager::{IndicatorManager, IndicatorState, Presence};
use suiteshell::services::broadcaster::Broadcaster;
use suiteshell::types::app_type::AppType;
use suiteshell::types::events::Notification;
use suiteshell::types::window::WindowId;

fn created(id: u64, app_type: AppType) -> Notification {
    Notification::WindowCreated {
        id: WindowId(id),
        app_type,
    }
}

fn badge(id: u64, count: u32) -> Notification {
    Notification::BadgeChanged {
        id: WindowId(id),
        count,
    }
}

#[test]
fn test_badge_total_and_label() {
    let mut state = IndicatorState::default();
    state.apply(&created(1, AppType::Outlook));
    state.apply(&created(2, AppType::Teams));
    state.apply(&badge(1, 3));
    state.apply(&badge(2, 4));

    assert_eq!(state.badge_total(), 7);
    assert_eq!(state.badge_label(), "7");

    state.apply(&badge(1, 120));
    assert_eq!(state.badge_label(), "99+");

    state.apply(&badge(1, 0));
    state.apply(&badge(2, 0));
    assert_eq!(state.badge_label(), "");
}

#[test]
fn test_repeated_badge_value_is_not_a_change() {
    let mut state = IndicatorState::default();
    assert!(state.apply(&badge(1, 5)));
    assert!(!state.apply(&badge(1, 5)));
    assert!(!state.apply(&badge(2, 0)));
}

#[test]
fn test_presence_follows_media() {
    let mut state = IndicatorState::default();
    state.apply(&created(1, AppType::Teams));
    assert_eq!(state.presence(), Presence::Available);

    state.apply(&Notification::MediaChanged {
        id: WindowId(1),
        active: true,
    });
    assert_eq!(state.presence(), Presence::InCall);

    state.apply(&Notification::MediaChanged {
        id: WindowId(1),
        active: false,
    });
    assert_eq!(state.presence(), Presence::Available);
}

#[test]
fn test_closing_window_clears_its_contributions() {
    let mut state = IndicatorState::default();
    state.apply(&created(1, AppType::Teams));
    state.apply(&badge(1, 2));
    state.apply(&Notification::MediaChanged {
        id: WindowId(1),
        active: true,
    });

    assert!(state.apply(&Notification::WindowClosed { id: WindowId(1) }));

    assert_eq!(state.window_count(), 0);
    assert_eq!(state.badge_total(), 0);
    assert_eq!(state.presence(), Presence::Available);
    assert!(!state.apply(&Notification::WindowClosed { id: WindowId(1) }));
}

#[test]
fn test_open_apps_tracks_app_changes() {
    let mut state = IndicatorState::default();
    state.apply(&created(2, AppType::Home));
    state.apply(&created(1, AppType::Word));
    state.apply(&Notification::AppChanged {
        id: WindowId(2),
        app_type: AppType::Excel,
    });

    assert_eq!(
        state.open_apps(),
        vec![(WindowId(1), AppType::Word), (WindowId(2), AppType::Excel)]
    );
}

#[test]
fn test_tray_tooltip() {
    let mut state = IndicatorState::default();
    state.apply(&created(1, AppType::Outlook));
    assert_eq!(state.tray_tooltip(), "SuiteShell - 1 window");

    state.apply(&created(2, AppType::Teams));
    state.apply(&badge(1, 12));
    state.apply(&Notification::MediaChanged {
        id: WindowId(2),
        active: true,
    });
    assert_eq!(
        state.tray_tooltip(),
        "SuiteShell - 2 windows, 12 unread, in a call"
    );
}

#[test]
fn test_manager_tracks_broadcaster() {
    let mut broadcaster = Broadcaster::new();
    let mut manager = IndicatorManager::new();
    manager.attach(&mut broadcaster);

    assert!(manager.take_changes().is_none());

    broadcaster.publish(&created(1, AppType::Outlook));
    broadcaster.publish(&badge(1, 9));

    let changed = manager.take_changes().expect("state changed");
    assert_eq!(changed.badge_total(), 9);
    assert_eq!(changed.window_count(), 1);
    assert!(manager.take_changes().is_none());

    manager.detach(&mut broadcaster);
    assert_eq!(broadcaster.subscriber_count(), 0);
    broadcaster.publish(&badge(1, 1));
    assert!(manager.take_changes().is_none());
    assert_eq!(manager.state().badge_total(), 9);
}

#[test]
fn test_attach_twice_keeps_one_subscription() {
    let mut broadcaster = Broadcaster::new();
    let mut manager = IndicatorManager::new();
    manager.attach(&mut broadcaster);
    manager.attach(&mut broadcaster);
    assert_eq!(broadcaster.subscriber_count(), 1);
}
