//! Derived-State Broadcaster.
//!
//! A publish point for window-level notifications. Publishing is synchronous
//! and reaches every current subscriber in subscription order. There is no
//! replay: a subscriber only sees notifications published after it subscribed.

use tracing::trace;

use crate::types::events::Notification;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Notification)>;

/// Typed publish/subscribe registry with deterministic fan-out order.
#[derive(Default)]
pub struct Broadcaster {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener`. Listeners must return quickly and queue their own follow-up work.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Delivers `notification` to every current subscriber.
    pub fn publish(&mut self, notification: &Notification) {
        trace!(
            topic = notification.topic().as_str(),
            window_id = %notification.window_id(),
            listeners = self.listeners.len(),
            "publish"
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(notification);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster")
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
