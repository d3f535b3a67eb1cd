use std::sync::Arc;

use libbackup::BackupManager;
use rkv::{BackupArgs, backup};
use serial_test::serial;

mod common;
use common::*;

fn args(container: &str, volume: &str, output: &str) -> BackupArgs {
    BackupArgs {
        container: container.to_string(),
        volume: volume.to_string(),
        output: output.to_string(),
        timeout: None,
    }
}

#[tokio::test]
#[serial]
async fn test_backup_binds_resolved_output_dir() {
    let out = tempfile::tempdir().unwrap();
    let engine = Arc::new(NginxEngine::default());
    let manager = BackupManager::new(engine.clone());

    let dispatched = backup(&manager, &args("nginx", "nginx", out.path().to_str().unwrap()))
        .await
        .unwrap();
    assert_eq!(dispatched.helper_name, "backup-nginx");
    assert_eq!(dispatched.helper_id, "backup-nginx-id");

    let binds = engine.binds.lock().unwrap().clone();
    assert_eq!(binds, vec![format!("{}:/backup:rw", out.path().display())]);
}

#[tokio::test]
#[serial]
async fn test_backup_defaults_to_current_dir() {
    let out = tempfile::tempdir().unwrap();
    let _guard = DirGuard::change_to(out.path()).unwrap();
    let cwd = std::env::current_dir().unwrap();
    let engine = Arc::new(NginxEngine::default());
    let manager = BackupManager::new(engine.clone());

    backup(&manager, &args("nginx", "nginx", "")).await.unwrap();
    backup(&manager, &args("nginx", "nginx", ".")).await.unwrap();

    let bind = format!("{}:/backup:rw", cwd.display());
    assert_eq!(*engine.binds.lock().unwrap(), vec![bind.clone(), bind]);
}

#[tokio::test]
#[serial]
async fn test_missing_output_dir_fails_before_engine() {
    let engine = Arc::new(NginxEngine::default());
    let manager = BackupManager::new(engine.clone());

    let err = backup(&manager, &args("nginx", "nginx", "/nonexistent/rkv-output"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "output path does not exist");
    assert!(engine.binds.lock().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_resolution_error_is_reported_with_context() {
    let out = tempfile::tempdir().unwrap();
    let manager = BackupManager::new(NginxEngine::default());

    let err = backup(&manager, &args("redis", "data", out.path().to_str().unwrap()))
        .await
        .unwrap_err();
    assert_eq!(
        format!("{err:#}"),
        "failed to resolve volume data in container redis: no mounts found for container"
    );
}

#[tokio::test]
#[serial]
async fn test_timeout_abandons_hanging_engine() {
    let out = tempfile::tempdir().unwrap();
    let manager = BackupManager::new(NginxEngine {
        hang: true,
        ..Default::default()
    });
    let mut args = args("nginx", "nginx", out.path().to_str().unwrap());
    args.timeout = Some(1);

    let err = backup(&manager, &args).await.unwrap_err();
    assert_eq!(err.to_string(), "backup of volume nginx timed out after 1s");
}
