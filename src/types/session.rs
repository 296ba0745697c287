use serde::{Deserialize, Serialize};

use super::window::ManagedWindow;

/// Persisted set of windows, in restore order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub version: u32,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    pub windows: Vec<ManagedWindow>,
}

impl SessionSnapshot {
    /// A snapshot with no windows falls through to default window creation.
    pub fn is_restorable(&self) -> bool {
        !self.windows.is_empty()
    }
}
