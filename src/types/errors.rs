use thiserror::Error;

use super::window::WindowId;

// === SessionError ===

/// Errors related to session persistence.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No session file exists.
    #[error("Session file not found: {0}")]
    NotFound(String),
    /// Reading, writing or deleting the session file failed.
    #[error("Session I/O error: {0}")]
    Io(String),
    /// The file exists but does not contain a valid snapshot.
    #[error("Malformed session file: {0}")]
    Malformed(String),
    /// The snapshot is older than the restore threshold. Carries its age in ms.
    #[error("Session is stale: {0} ms old")]
    Stale(i64),
    /// Encoding the snapshot failed.
    #[error("Session serialization error: {0}")]
    Serialization(String),
}

// === SettingsError ===

/// Errors related to settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The key path does not exist in the settings.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The value has the wrong type for the key.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
    /// A file system operation failed.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// JSON encoding or decoding failed.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
}

// === RegistryError ===

/// Errors related to window registry mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A record already exists for this window id.
    #[error("Window already registered: {0}")]
    AlreadyRegistered(WindowId),
}

// === HostError ===

/// Errors reported by the native window host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The native window could not be created.
    #[error("Failed to create window: {0}")]
    CreateFailed(String),
    /// Starting a content load failed.
    #[error("Failed to load {url}: {reason}")]
    LoadFailed { url: String, reason: String },
    /// No native window exists for the id.
    #[error("Unknown window: {0}")]
    UnknownWindow(WindowId),
}
