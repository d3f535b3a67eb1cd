//! Docker Engine API client over the daemon's unix socket.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hyper::body::Bytes;
use hyper::client::conn;
use hyper::header::{CONTENT_TYPE, HOST};
use hyper::{Body, Method, Request, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::net::UnixStream;
use tracing::debug;

use super::{
    ContainerDescriptor, CreateResponse, Creator, HostConfig, Inspector, ProcessConfig,
    StartOptions, Starter,
};
use crate::error::RuntimeError;
use crate::sanitize::is_valid_reference;

pub const DEFAULT_SOCKET: &str = "/var/run/docker.sock";

#[derive(Debug, Clone)]
pub struct DockerEngine {
    socket: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CreateBody<'a> {
    #[serde(flatten)]
    config: &'a ProcessConfig,
    host_config: &'a HostConfig,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl DockerEngine {
    pub fn new(socket: impl Into<PathBuf>) -> Self {
        Self {
            socket: socket.into(),
        }
    }

    /// Builds a client from a `DOCKER_HOST` style value. `None` or an empty
    /// value selects the default socket.
    pub fn from_host(host: Option<&str>) -> Result<Self, RuntimeError> {
        match host {
            None | Some("") => Ok(Self::new(DEFAULT_SOCKET)),
            Some(host) => host
                .strip_prefix("unix://")
                .map(Self::new)
                .ok_or_else(|| RuntimeError::UnsupportedHost(host.to_string())),
        }
    }

    pub fn socket(&self) -> &Path {
        &self.socket
    }

    // One connection per request; the engine calls of a backup are few and
    // strictly sequential.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Bytes), RuntimeError> {
        let stream = UnixStream::connect(&self.socket).await?;
        let (mut sender, connection) = conn::handshake(stream).await?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                debug!("container engine connection closed with error: {err}");
            }
        });

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(path)
            .header(HOST, "docker");
        let body = match body {
            Some(bytes) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };
        let request = builder.body(body)?;

        debug!(%method, path, "sending container engine request");
        let response = sender.send_request(request).await?;
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await?;
        Ok((status, bytes))
    }
}

fn check_status(status: StatusCode, body: Bytes) -> Result<Bytes, RuntimeError> {
    if status.is_success() {
        return Ok(body);
    }
    let message = serde_json::from_slice::<ErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
    Err(RuntimeError::Api {
        status: status.as_u16(),
        message,
    })
}

fn checked_reference(reference: &str) -> Result<&str, RuntimeError> {
    if is_valid_reference(reference) {
        Ok(reference)
    } else {
        Err(RuntimeError::InvalidReference(reference.to_string()))
    }
}

#[async_trait]
impl Inspector for DockerEngine {
    async fn inspect(&self, container_id: &str) -> Result<ContainerDescriptor, RuntimeError> {
        let id = checked_reference(container_id)?;
        let (status, body) = self
            .send(Method::GET, &format!("/containers/{id}/json"), None)
            .await?;
        let body = check_status(status, body)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Creator for DockerEngine {
    async fn create(
        &self,
        config: &ProcessConfig,
        host_config: &HostConfig,
        name: &str,
    ) -> Result<CreateResponse, RuntimeError> {
        let name = checked_reference(name)?;
        let payload = serde_json::to_vec(&CreateBody {
            config,
            host_config,
        })?;
        let (status, body) = self
            .send(
                Method::POST,
                &format!("/containers/create?name={name}"),
                Some(payload),
            )
            .await?;
        let body = check_status(status, body)?;
        let response: CreateResponse = serde_json::from_slice(&body)?;
        for warning in &response.warnings {
            tracing::warn!(container = %response.id, "container engine warning: {warning}");
        }
        Ok(response)
    }
}

#[async_trait]
impl Starter for DockerEngine {
    async fn start(&self, id: &str, options: &StartOptions) -> Result<(), RuntimeError> {
        let id = checked_reference(id)?;
        let mut path = format!("/containers/{id}/start");
        if let Some(keys) = &options.detach_keys {
            path.push_str("?detachKeys=");
            path.push_str(keys);
        }
        let (status, body) = self.send(Method::POST, &path, None).await?;
        // 304: already started.
        if status == StatusCode::NOT_MODIFIED {
            return Ok(());
        }
        check_status(status, body).map(|_| ())
    }
}
