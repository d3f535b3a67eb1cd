use std::path::Path;

use tracing::{debug, info};

use crate::archive::{ArchiveCommand, Clock, SystemClock};
use crate::error::{BackupError, ResolveError};
use crate::helper::{BackupJob, HelperProcessSpec};
use crate::mount::resolve_mount;
use crate::ownership::OwnershipResolver;
use crate::runtime::{ContainerRuntime, StartOptions};
use crate::sanitize::{is_plain_absolute_path, is_valid_volume_name};

/// What was launched by a successful [`BackupManager::backup_volume`].
///
/// Only the launch is confirmed; whether the archive completes is never
/// observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub helper_id: String,
    pub helper_name: String,
    pub archive_file: String,
}

pub struct BackupManager<R> {
    runtime: R,
    clock: Box<dyn Clock>,
    ownership: OwnershipResolver,
}

impl<R: ContainerRuntime> BackupManager<R> {
    pub fn new(runtime: R) -> Self {
        Self {
            runtime,
            clock: Box::new(SystemClock),
            ownership: OwnershipResolver::process(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_ownership(mut self, ownership: OwnershipResolver) -> Self {
        self.ownership = ownership;
        self
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Launches a helper container that archives `volume` of `container`
    /// into `host_output_path`, which must be an existing absolute directory.
    ///
    /// The create and start calls are issued once each with no retry. If
    /// start fails the created helper is left in place.
    #[tracing::instrument(skip(self, host_output_path))]
    pub async fn backup_volume(
        &self,
        container: &str,
        volume: &str,
        host_output_path: impl AsRef<Path>,
    ) -> Result<Dispatched, BackupError> {
        if !is_valid_volume_name(volume) {
            return Err(BackupError::InvalidVolumeName {
                container: container.to_string(),
                volume: volume.to_string(),
            });
        }

        let resolve_err = |source: ResolveError| BackupError::Resolve {
            container: container.to_string(),
            volume: volume.to_string(),
            source,
        };
        let mount = resolve_mount(&self.runtime, container, volume)
            .await
            .map_err(resolve_err)?;
        if !is_plain_absolute_path(&mount.destination) {
            return Err(resolve_err(ResolveError::UnsafeMountPath(
                mount.destination,
            )));
        }
        debug!(destination = %mount.destination, "resolved volume mount");

        let job = BackupJob::new(
            container,
            volume,
            host_output_path.as_ref(),
            self.clock.as_ref(),
        );
        let command = ArchiveCommand::build(&job.volume_name, &mount.destination, &job.created_at);
        let identity = self
            .ownership
            .resolve()
            .map_err(|source| BackupError::Identity {
                container: container.to_string(),
                volume: volume.to_string(),
                source,
            })?;
        let spec = HelperProcessSpec::build(&job, &command, &identity);
        debug!(helper = %spec.name, user = %spec.user, "configured backup helper");

        let created = self
            .runtime
            .create(&spec.process_config(), &spec.host_config(), &spec.name)
            .await
            .map_err(|source| BackupError::CreateFailed {
                container: container.to_string(),
                volume: volume.to_string(),
                name: spec.name.clone(),
                source,
            })?;
        debug!(id = %created.id, "created backup helper");

        self.runtime
            .start(&created.id, &StartOptions::default())
            .await
            .map_err(|source| BackupError::StartFailed {
                container: container.to_string(),
                volume: volume.to_string(),
                id: created.id.clone(),
                source,
            })?;

        info!(
            helper = %spec.name,
            id = %created.id,
            archive = %command.file_name(),
            "backup helper dispatched"
        );
        Ok(Dispatched {
            helper_id: created.id,
            helper_name: spec.name,
            archive_file: command.file_name(),
        })
    }
}
