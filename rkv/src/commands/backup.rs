use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Args;
use libbackup::{BackupManager, ContainerRuntime, Dispatched};
use tracing::warn;

use crate::output_path;

#[derive(Args, Debug, Clone)]
pub struct BackupArgs {
    /// Container name (required)
    #[arg(short, long, value_name = "CONTAINER")]
    pub container: String,

    /// Volume name (required)
    #[arg(short, long, value_name = "VOLUME")]
    pub volume: String,

    /// Output directory, empty for the current directory
    #[arg(short, long, value_name = "OUTPUT", default_value = ".")]
    pub output: String,

    /// Give up on the engine after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// Resolves the output directory and hands the backup to `manager`.
pub async fn backup<R: ContainerRuntime>(
    manager: &BackupManager<R>,
    args: &BackupArgs,
) -> Result<Dispatched> {
    let output = output_path::resolve(&args.output)?;
    let task = manager.backup_volume(&args.container, &args.volume, &output);

    let result = match args.timeout {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), task)
            .await
            .map_err(|_| anyhow!("backup of volume {} timed out after {secs}s", args.volume))?,
        None => task.await,
    };

    result.map_err(|err| {
        warn!(stage = %err.stage(), "backup failed");
        anyhow::Error::from(err)
    })
}
