//! Session Manager for SuiteShell.
//!
//! Owns the on-disk session file: writes snapshots of the window registry, reads
//! them back on startup, and applies the staleness policy. Also keeps the
//! periodic autosave schedule.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::platform;
use crate::types::errors::SessionError;
use crate::types::session::SessionSnapshot;
use crate::types::window::ManagedWindow;

/// Schema tag written into every snapshot.
pub const SESSION_VERSION: u32 = 1;
/// Snapshots older than this are never restored.
pub const SESSION_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);
/// How far in the future a snapshot timestamp may lie before it is rejected.
pub const SESSION_CLOCK_SKEW: Duration = Duration::from_secs(5 * 60);
/// Autosave period while restore-on-start is enabled.
pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Trait defining session persistence operations.
pub trait SessionManagerTrait {
    fn save_session(&self, windows: &[ManagedWindow]) -> Result<(), SessionError>;
    fn load_session(&self) -> Option<SessionSnapshot>;
    fn has_session(&self) -> bool;
    fn clear_session(&self) -> Result<(), SessionError>;
    fn start_periodic_save(&mut self, now: Instant);
    fn stop_periodic_save(&mut self);
}

/// File-backed session store.
pub struct SessionManager {
    path: PathBuf,
    next_autosave: Option<Instant>,
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

impl SessionManager {
    /// Creates a session manager for the file at `path_override`, or the
    /// platform session path when `None`.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        Self {
            path: path_override.unwrap_or_else(platform::get_session_path),
            next_autosave: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes a snapshot stamped with `timestamp`.
    ///
    /// The file is replaced atomically: the snapshot goes to a temp file in the
    /// same directory which is then renamed over the old one. A failed write
    /// leaves the previous file untouched.
    pub fn save_at(&self, windows: &[ManagedWindow], timestamp: i64) -> Result<(), SessionError> {
        let snapshot = SessionSnapshot {
            version: SESSION_VERSION,
            timestamp,
            windows: windows.to_vec(),
        };
        let json = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| SessionError::Io(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| SessionError::Io(e.to_string()))?;
        tmp.write_all(&json)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| SessionError::Io(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| SessionError::Io(e.error.to_string()))?;

        debug!(windows = windows.len(), path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Reads the snapshot and applies the staleness policy relative to `now_ms`.
    ///
    /// A stale snapshot is deleted as a side effect. Snapshots written by another
    /// schema version, or stamped further than `SESSION_CLOCK_SKEW` in the
    /// future, are malformed.
    pub fn load_at(&self, now_ms: i64) -> Result<SessionSnapshot, SessionError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SessionError::NotFound(self.path.display().to_string()))
            }
            Err(e) => return Err(SessionError::Io(e.to_string())),
        };

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| SessionError::Malformed(e.to_string()))?;
        if !value.get("windows").is_some_and(|w| w.is_array()) {
            return Err(SessionError::Malformed(
                "`windows` is not an array".to_string(),
            ));
        }
        let snapshot: SessionSnapshot =
            serde_json::from_value(value).map_err(|e| SessionError::Malformed(e.to_string()))?;

        if snapshot.version != SESSION_VERSION {
            return Err(SessionError::Malformed(format!(
                "unsupported version {}",
                snapshot.version
            )));
        }

        let age = now_ms.saturating_sub(snapshot.timestamp);
        if age < -(SESSION_CLOCK_SKEW.as_millis() as i64) {
            return Err(SessionError::Malformed(format!(
                "timestamp is {} ms in the future",
                -age
            )));
        }
        if age > SESSION_MAX_AGE.as_millis() as i64 {
            if let Err(e) = self.clear_session() {
                warn!(error = %e, "failed to delete stale session");
            }
            return Err(SessionError::Stale(age));
        }

        Ok(snapshot)
    }

    /// Whether the autosave schedule is armed.
    pub fn is_periodic_save_running(&self) -> bool {
        self.next_autosave.is_some()
    }

    /// When the next autosave is due, if armed.
    pub fn next_autosave(&self) -> Option<Instant> {
        self.next_autosave
    }

    /// Returns `true` if an autosave is due at `now`, and schedules the next one.
    pub fn autosave_due(&mut self, now: Instant) -> bool {
        match self.next_autosave {
            Some(due) if due <= now => {
                self.next_autosave = Some(now + AUTOSAVE_INTERVAL);
                true
            }
            _ => false,
        }
    }
}

impl SessionManagerTrait for SessionManager {
    fn save_session(&self, windows: &[ManagedWindow]) -> Result<(), SessionError> {
        self.save_at(windows, now_millis())
    }

    /// Loads the current snapshot. Missing, malformed and stale files all yield `None`.
    fn load_session(&self) -> Option<SessionSnapshot> {
        match self.load_at(now_millis()) {
            Ok(snapshot) => Some(snapshot),
            Err(SessionError::NotFound(_)) => {
                debug!("no previous session");
                None
            }
            Err(e) => {
                info!(error = %e, "discarding previous session");
                None
            }
        }
    }

    fn has_session(&self) -> bool {
        self.path.exists()
    }

    fn clear_session(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(e.to_string())),
        }
    }

    /// Arms the autosave schedule; the first save is due one interval after `now`.
    fn start_periodic_save(&mut self, now: Instant) {
        if self.next_autosave.is_none() {
            self.next_autosave = Some(now + AUTOSAVE_INTERVAL);
        }
    }

    fn stop_periodic_save(&mut self) {
        self.next_autosave = None;
    }
}
