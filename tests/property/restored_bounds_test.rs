//! Property-based tests for the restored-bounds invariant.
//!
//! For any interleaving of resize, move, maximize and fullscreen events, the
//! registry's bounds equal the last geometry reported while the window was
//! in its restored state.

#[path = "../support/fake_host.rs"]
mod fake_host;

use fake_host::FakeHost;
use suiteshell::managers::lifecycle::{Lifecycle, LifecyclePolicy};
use suiteshell::managers::session_manager::SessionManager;
use suiteshell::managers::window_registry::WindowRegistryTrait;
use suiteshell::platform::native::StateTracker;
use suiteshell::types::account::AccountType;
use suiteshell::types::app_type::AppType;
use suiteshell::types::events::WindowEvent;
use suiteshell::types::window::{Bounds, LiveGeometry, OpenRequest};
use proptest::prelude::*;
use tempfile::TempDir;

fn arb_bounds() -> impl Strategy<Value = Bounds> {
    (-3000i32..3000, -3000i32..3000, 200i32..4000, 150i32..3000)
        .prop_map(|(x, y, w, h)| Bounds::new(x, y, w, h))
}

fn arb_event() -> impl Strategy<Value = WindowEvent> {
    prop_oneof![
        4 => arb_bounds().prop_map(WindowEvent::Resized),
        3 => (-3000i32..3000, -3000i32..3000).prop_map(|(x, y)| WindowEvent::Moved { x, y }),
        1 => Just(WindowEvent::Maximized),
        1 => Just(WindowEvent::Unmaximized),
        1 => Just(WindowEvent::EnteredFullScreen),
        1 => Just(WindowEvent::LeftFullScreen),
    ]
}

/// A raw move or resize as a platform reports it, with the window state at that moment.
fn arb_platform_report() -> impl Strategy<Value = (bool, LiveGeometry)> {
    (any::<bool>(), arb_bounds(), any::<bool>(), prop::bool::weighted(0.2)).prop_map(
        |(is_move, bounds, is_maximized, is_full_screen)| {
            (
                is_move,
                LiveGeometry {
                    bounds,
                    is_maximized,
                    is_full_screen,
                },
            )
        },
    )
}

/// Reference model of what the registry should hold.
#[derive(Debug, Clone, Copy)]
struct Model {
    bounds: Bounds,
    maximized: bool,
    full_screen: bool,
}

impl Model {
    fn apply(&mut self, event: &WindowEvent) {
        let restored = !self.maximized && !self.full_screen;
        match event {
            WindowEvent::Resized(b) if restored => self.bounds = *b,
            WindowEvent::Moved { x, y } if restored => {
                self.bounds.x = *x;
                self.bounds.y = *y;
            }
            WindowEvent::Maximized => self.maximized = true,
            WindowEvent::Unmaximized => self.maximized = false,
            WindowEvent::EnteredFullScreen => self.full_screen = true,
            WindowEvent::LeftFullScreen => self.full_screen = false,
            _ => {}
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn bounds_track_only_restored_geometry(
        initial in arb_bounds(),
        events in proptest::collection::vec(arb_event(), 0..40),
    ) {
        let dir = TempDir::new().unwrap();
        let sessions = SessionManager::new(Some(dir.path().join("session.json")));
        let mut lifecycle = Lifecycle::new(sessions, LifecyclePolicy::default());
        let mut host = FakeHost::new();
        let id = lifecycle
            .open_window(
                &mut host,
                OpenRequest::new(AppType::Word, AccountType::Personal).with_bounds(initial),
            )
            .unwrap();

        let mut model = Model { bounds: initial, maximized: false, full_screen: false };
        for event in &events {
            model.apply(event);
            lifecycle.handle_event(&mut host, id, event.clone());
        }

        let record = lifecycle.registry().get(id).unwrap();
        prop_assert_eq!(record.bounds, model.bounds);
        prop_assert_eq!(record.is_maximized, model.maximized);
        prop_assert_eq!(record.is_full_screen, model.full_screen);
    }

    #[test]
    fn maximize_round_trip_restores_prior_bounds(
        before in arb_bounds(),
        while_maximized in proptest::collection::vec(arb_bounds(), 1..10),
    ) {
        let dir = TempDir::new().unwrap();
        let sessions = SessionManager::new(Some(dir.path().join("session.json")));
        let mut lifecycle = Lifecycle::new(sessions, LifecyclePolicy::default());
        let mut host = FakeHost::new();
        let id = lifecycle
            .open_window(&mut host, OpenRequest::new(AppType::Excel, AccountType::Work))
            .unwrap();

        lifecycle.handle_event(&mut host, id, WindowEvent::Resized(before));
        lifecycle.handle_event(&mut host, id, WindowEvent::Maximized);
        for b in while_maximized {
            lifecycle.handle_event(&mut host, id, WindowEvent::Resized(b));
        }
        lifecycle.handle_event(&mut host, id, WindowEvent::Unmaximized);

        prop_assert_eq!(lifecycle.registry().get(id).unwrap().bounds, before);
    }

    // Platforms report maximize as raw moves and resizes in either order; once
    // diffed through the tracker, only reports taken in the restored state count.
    #[test]
    fn raw_platform_reports_track_restored_geometry(
        initial in arb_bounds(),
        reports in proptest::collection::vec(arb_platform_report(), 0..40),
    ) {
        let dir = TempDir::new().unwrap();
        let sessions = SessionManager::new(Some(dir.path().join("session.json")));
        let mut lifecycle = Lifecycle::new(sessions, LifecyclePolicy::default());
        let mut host = FakeHost::new();
        let id = lifecycle
            .open_window(
                &mut host,
                OpenRequest::new(AppType::Teams, AccountType::Work).with_bounds(initial),
            )
            .unwrap();
        let mut tracker = StateTracker::default();

        let mut expected = initial;
        let mut state = (false, false);
        for (is_move, live) in &reports {
            if !live.is_maximized && !live.is_full_screen {
                if *is_move {
                    expected.x = live.bounds.x;
                    expected.y = live.bounds.y;
                } else {
                    expected = live.bounds;
                }
            }
            state = (live.is_maximized, live.is_full_screen);

            let events = if *is_move {
                tracker.moved(live, live.bounds.x, live.bounds.y)
            } else {
                tracker.resized(live)
            };
            for event in events {
                lifecycle.handle_event(&mut host, id, event);
            }
        }

        let record = lifecycle.registry().get(id).unwrap();
        prop_assert_eq!(record.bounds, expected);
        prop_assert_eq!((record.is_maximized, record.is_full_screen), state);
    }
}
