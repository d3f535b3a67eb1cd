use tracing::debug;

use crate::error::ResolveError;
use crate::runtime::{Inspector, MountPoint};

/// Finds where `volume_name` is mounted inside `container`.
///
/// Mounts are scanned in the order the engine reports them and the first
/// exact name match wins. That order is not guaranteed, so a container with
/// two mounts of the same name may resolve to either.
pub async fn resolve_mount<I>(
    inspector: &I,
    container: &str,
    volume_name: &str,
) -> Result<MountPoint, ResolveError>
where
    I: Inspector + ?Sized,
{
    let descriptor = inspector
        .inspect(container)
        .await
        .map_err(ResolveError::InspectFailed)?;
    debug!(
        container,
        mounts = descriptor.mounts.len(),
        "inspected container"
    );

    if descriptor.mounts.is_empty() {
        return Err(ResolveError::NoMountsFound);
    }

    descriptor
        .mounts
        .into_iter()
        .find(|m| m.name == volume_name)
        .ok_or(ResolveError::VolumeNotFound)
}
