//! Backs up a named volume of a running container by launching a short-lived,
//! auto-removing helper container that archives the volume into a host
//! directory.
//!
//! The entry point is [`BackupManager::backup_volume`]. Everything it needs
//! from the container engine goes through the role traits in [`runtime`], so
//! tests can swap the engine for a stub.

pub mod archive;
pub mod backup;
pub mod error;
pub mod helper;
pub mod mount;
pub mod ownership;
pub mod runtime;
mod sanitize;

pub use archive::{ArchiveCommand, BACKUP_DIR, Clock, SystemClock};
pub use backup::{BackupManager, Dispatched};
pub use error::{BackupError, IdentityError, ResolveError, RuntimeError, Stage};
pub use helper::{BackupJob, HELPER_IMAGE, HelperProcessSpec};
pub use mount::resolve_mount;
pub use ownership::{IdSource, Identity, OwnershipResolver};
pub use runtime::engine::DockerEngine;
pub use runtime::{ContainerRuntime, Creator, Inspector, Starter};
