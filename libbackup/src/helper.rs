use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::archive::{ArchiveCommand, BACKUP_DIR, Clock};
use crate::ownership::Identity;
use crate::runtime::{HostConfig, ProcessConfig};

/// Image the helper runs in. It only needs `sh` and `tar`.
pub const HELPER_IMAGE: &str = "busybox";

const HELPER_NAME_PREFIX: &str = "backup-";

/// One backup request, alive for a single orchestration call.
#[derive(Debug, Clone)]
pub struct BackupJob {
    pub source_container: String,
    pub volume_name: String,
    pub host_output_path: PathBuf,
    pub created_at: DateTime<Utc>,
}

impl BackupJob {
    pub fn new(
        source_container: &str,
        volume_name: &str,
        host_output_path: &Path,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            source_container: source_container.to_string(),
            volume_name: volume_name.to_string(),
            host_output_path: host_output_path.to_path_buf(),
            created_at: clock.now(),
        }
    }

    pub fn helper_name(&self) -> String {
        format!("{HELPER_NAME_PREFIX}{}", self.volume_name)
    }
}

/// Everything the engine needs to launch the helper container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperProcessSpec {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub user: String,
    pub volumes_from: Vec<String>,
    pub binds: Vec<String>,
    pub auto_remove: bool,
}

impl HelperProcessSpec {
    /// Pure; the mount must already be resolved and the host path already
    /// validated and absolute.
    pub fn build(job: &BackupJob, command: &ArchiveCommand, identity: &Identity) -> Self {
        Self {
            name: job.helper_name(),
            image: HELPER_IMAGE.to_string(),
            command: vec![
                "sh".to_string(),
                "-c".to_string(),
                command.command_line(),
            ],
            user: identity.to_string(),
            volumes_from: vec![job.source_container.clone()],
            binds: vec![format!(
                "{}:{BACKUP_DIR}:rw",
                job.host_output_path.display()
            )],
            auto_remove: true,
        }
    }

    pub fn process_config(&self) -> ProcessConfig {
        ProcessConfig {
            image: self.image.clone(),
            cmd: self.command.clone(),
            user: self.user.clone(),
            tty: false,
        }
    }

    pub fn host_config(&self) -> HostConfig {
        HostConfig {
            auto_remove: self.auto_remove,
            volumes_from: self.volumes_from.clone(),
            binds: self.binds.clone(),
        }
    }
}
