use std::env;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use libbackup::runtime::{
    ContainerDescriptor, CreateResponse, Creator, HostConfig, Inspector, MountPoint,
    ProcessConfig, StartOptions, Starter,
};
use libbackup::RuntimeError;

/// Engine that knows a single `nginx` container. With `hang` set, inspect
/// never answers.
#[derive(Default)]
pub struct NginxEngine {
    pub hang: bool,
    pub binds: Mutex<Vec<String>>,
}

#[async_trait]
impl Inspector for NginxEngine {
    async fn inspect(&self, container_id: &str) -> Result<ContainerDescriptor, RuntimeError> {
        if self.hang {
            std::future::pending::<()>().await;
        }
        if container_id != "nginx" {
            return Ok(ContainerDescriptor::default());
        }
        Ok(ContainerDescriptor {
            mounts: vec![MountPoint::new("nginx", "/var/www/data")],
        })
    }
}

#[async_trait]
impl Creator for NginxEngine {
    async fn create(
        &self,
        _: &ProcessConfig,
        host_config: &HostConfig,
        name: &str,
    ) -> Result<CreateResponse, RuntimeError> {
        self.binds
            .lock()
            .unwrap()
            .extend(host_config.binds.iter().cloned());
        Ok(CreateResponse {
            id: format!("{name}-id"),
            warnings: vec![],
        })
    }
}

#[async_trait]
impl Starter for NginxEngine {
    async fn start(&self, _: &str, _: &StartOptions) -> Result<(), RuntimeError> {
        Ok(())
    }
}

pub struct DirGuard {
    pub original: PathBuf,
}

#[allow(dead_code)]
impl DirGuard {
    pub fn change_to<P: AsRef<Path>>(path: P) -> Result<Self> {
        let original = env::current_dir()?;
        env::set_current_dir(path)?;
        Ok(Self { original })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}
