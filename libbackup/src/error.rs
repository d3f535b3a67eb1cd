use std::fmt;

use thiserror::Error;

/// The orchestration step a backup failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    Configuring,
    Creating,
    Starting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolving => "resolving",
            Stage::Configuring => "configuring",
            Stage::Creating => "creating",
            Stage::Starting => "starting",
        };
        f.write_str(name)
    }
}

/// Failures talking to the container engine.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("container engine socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("container engine transport error: {0}")]
    Http(#[from] hyper::Error),

    #[error("failed to build container engine request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("failed to decode container engine response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("container engine returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid container reference {0:?}")]
    InvalidReference(String),

    #[error("unsupported container engine host {0:?}, only unix:// sockets are supported")]
    UnsupportedHost(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to inspect container")]
    InspectFailed(#[source] RuntimeError),

    #[error("no mounts found for container")]
    NoMountsFound,

    #[error("no mount found for volume")]
    VolumeNotFound,

    #[error("mount destination {0:?} is not a plain absolute path")]
    UnsafeMountPath(String),
}

#[derive(Debug, Error)]
#[error("identity lookup failed: {0}")]
pub struct IdentityError(pub String);

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("invalid volume name {volume:?} for container {container}")]
    InvalidVolumeName { container: String, volume: String },

    #[error("failed to resolve volume {volume} in container {container}")]
    Resolve {
        container: String,
        volume: String,
        #[source]
        source: ResolveError,
    },

    #[error("failed to resolve helper identity for volume {volume} of container {container}")]
    Identity {
        container: String,
        volume: String,
        #[source]
        source: IdentityError,
    },

    #[error("failed to create backup container {name} for volume {volume} of container {container}")]
    CreateFailed {
        container: String,
        volume: String,
        name: String,
        #[source]
        source: RuntimeError,
    },

    // The created helper stays behind: auto-remove only fires on exit.
    #[error(
        "failed to start backup container {id} for volume {volume} of container {container}, it was created but not removed"
    )]
    StartFailed {
        container: String,
        volume: String,
        id: String,
        #[source]
        source: RuntimeError,
    },
}

impl BackupError {
    pub fn stage(&self) -> Stage {
        match self {
            BackupError::InvalidVolumeName { .. } | BackupError::Resolve { .. } => Stage::Resolving,
            BackupError::Identity { .. } => Stage::Configuring,
            BackupError::CreateFailed { .. } => Stage::Creating,
            BackupError::StartFailed { .. } => Stage::Starting,
        }
    }

    pub fn container(&self) -> &str {
        match self {
            BackupError::InvalidVolumeName { container, .. }
            | BackupError::Resolve { container, .. }
            | BackupError::Identity { container, .. }
            | BackupError::CreateFailed { container, .. }
            | BackupError::StartFailed { container, .. } => container,
        }
    }

    pub fn volume(&self) -> &str {
        match self {
            BackupError::InvalidVolumeName { volume, .. }
            | BackupError::Resolve { volume, .. }
            | BackupError::Identity { volume, .. }
            | BackupError::CreateFailed { volume, .. }
            | BackupError::StartFailed { volume, .. } => volume,
        }
    }
}
