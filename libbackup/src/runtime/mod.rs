//! The container engine as seen by the backup core: three narrow roles, so a
//! test double only has to implement the calls it cares about.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RuntimeError;

pub mod engine;

/// The part of an inspect response the backup needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerDescriptor {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mounts: Vec<MountPoint>,
}

/// A volume as it appears inside a container. Bind mounts have no name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MountPoint {
    #[serde(default)]
    pub name: String,
    pub destination: String,
}

impl MountPoint {
    pub fn new(name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessConfig {
    pub image: String,
    pub cmd: Vec<String>,
    pub user: String,
    pub tty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostConfig {
    pub auto_remove: bool,
    pub volumes_from: Vec<String>,
    pub binds: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateResponse {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartOptions {
    pub detach_keys: Option<String>,
}

#[async_trait]
pub trait Inspector: Send + Sync {
    async fn inspect(&self, container_id: &str) -> Result<ContainerDescriptor, RuntimeError>;
}

#[async_trait]
pub trait Creator: Send + Sync {
    async fn create(
        &self,
        config: &ProcessConfig,
        host_config: &HostConfig,
        name: &str,
    ) -> Result<CreateResponse, RuntimeError>;
}

#[async_trait]
pub trait Starter: Send + Sync {
    async fn start(&self, id: &str, options: &StartOptions) -> Result<(), RuntimeError>;
}

/// Everything a backup needs from the engine.
pub trait ContainerRuntime: Inspector + Creator + Starter {}

impl<T: Inspector + Creator + Starter + ?Sized> ContainerRuntime for T {}

#[async_trait]
impl<T: Inspector + ?Sized> Inspector for Arc<T> {
    async fn inspect(&self, container_id: &str) -> Result<ContainerDescriptor, RuntimeError> {
        (**self).inspect(container_id).await
    }
}

#[async_trait]
impl<T: Creator + ?Sized> Creator for Arc<T> {
    async fn create(
        &self,
        config: &ProcessConfig,
        host_config: &HostConfig,
        name: &str,
    ) -> Result<CreateResponse, RuntimeError> {
        (**self).create(config, host_config, name).await
    }
}

#[async_trait]
impl<T: Starter + ?Sized> Starter for Arc<T> {
    async fn start(&self, id: &str, options: &StartOptions) -> Result<(), RuntimeError> {
        (**self).start(id, options).await
    }
}

// The engine sends `null` rather than `[]` for some empty lists.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
