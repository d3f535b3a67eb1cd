use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use libbackup::runtime::{
    ContainerDescriptor, CreateResponse, Creator, HostConfig, Inspector, MountPoint,
    ProcessConfig, StartOptions, Starter,
};
use libbackup::{IdentityError, OwnershipResolver, RuntimeError};

/// A create call as the engine would have received it.
#[derive(Debug, Clone)]
pub struct CreateCall {
    pub config: ProcessConfig,
    pub host_config: HostConfig,
    pub name: String,
}

/// In-memory engine: containers map to their mounts, create and start can be
/// told to fail, and every create/start is recorded.
#[derive(Default)]
pub struct StubRuntime {
    pub containers: HashMap<String, Vec<MountPoint>>,
    pub fail_create: Option<String>,
    pub fail_start: Option<String>,
    pub creates: Mutex<Vec<CreateCall>>,
    pub starts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubRuntime {
    pub fn with_container(mut self, name: &str, mounts: Vec<MountPoint>) -> Self {
        self.containers.insert(name.to_string(), mounts);
        self
    }

    pub fn failing_create(mut self, message: &str) -> Self {
        self.fail_create = Some(message.to_string());
        self
    }

    pub fn failing_start(mut self, message: &str) -> Self {
        self.fail_start = Some(message.to_string());
        self
    }

    pub fn creates(&self) -> Vec<CreateCall> {
        self.creates.lock().unwrap().clone()
    }

    pub fn starts(&self) -> Vec<String> {
        self.starts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Inspector for StubRuntime {
    async fn inspect(&self, container_id: &str) -> Result<ContainerDescriptor, RuntimeError> {
        match self.containers.get(container_id) {
            Some(mounts) => Ok(ContainerDescriptor {
                mounts: mounts.clone(),
            }),
            None => Err(RuntimeError::Api {
                status: 404,
                message: format!("No such container: {container_id}"),
            }),
        }
    }
}

#[async_trait]
impl Creator for StubRuntime {
    async fn create(
        &self,
        config: &ProcessConfig,
        host_config: &HostConfig,
        name: &str,
    ) -> Result<CreateResponse, RuntimeError> {
        self.creates.lock().unwrap().push(CreateCall {
            config: config.clone(),
            host_config: host_config.clone(),
            name: name.to_string(),
        });
        if let Some(message) = &self.fail_create {
            return Err(RuntimeError::Api {
                status: 409,
                message: message.clone(),
            });
        }
        Ok(CreateResponse {
            id: format!("id-{name}"),
            warnings: vec![],
        })
    }
}

#[async_trait]
impl Starter for StubRuntime {
    async fn start(&self, id: &str, _: &StartOptions) -> Result<(), RuntimeError> {
        self.starts.lock().unwrap().push(id.to_string());
        if let Some(message) = &self.fail_start {
            return Err(RuntimeError::Api {
                status: 500,
                message: message.clone(),
            });
        }
        Ok(())
    }
}

#[allow(dead_code)]
pub fn fixed_ownership(uid: u32, gid: u32) -> OwnershipResolver {
    OwnershipResolver::new(
        move || Ok::<u32, IdentityError>(uid),
        move || Ok::<u32, IdentityError>(gid),
    )
}

#[allow(dead_code)]
pub fn nginx_runtime() -> StubRuntime {
    StubRuntime::default().with_container("nginx", vec![MountPoint::new("nginx", "/var/www/data")])
}
