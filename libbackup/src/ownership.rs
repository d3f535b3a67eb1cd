//! Picks the identity the helper runs as, so the archive on the host belongs
//! to whoever started the backup instead of root.

use std::fmt;

use nix::unistd::{getgid, getuid};

use crate::error::IdentityError;

/// One half of an identity lookup: either the user id or the group id.
pub trait IdSource: Send + Sync {
    fn id(&self) -> Result<u32, IdentityError>;
}

impl<F> IdSource for F
where
    F: Fn() -> Result<u32, IdentityError> + Send + Sync,
{
    fn id(&self) -> Result<u32, IdentityError> {
        self()
    }
}

/// Real user id of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessUid;

impl IdSource for ProcessUid {
    fn id(&self) -> Result<u32, IdentityError> {
        Ok(getuid().as_raw())
    }
}

/// Real group id of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessGid;

impl IdSource for ProcessGid {
    fn id(&self) -> Result<u32, IdentityError> {
        Ok(getgid().as_raw())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub gid: String,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.uid, self.gid)
    }
}

pub struct OwnershipResolver {
    uid: Box<dyn IdSource>,
    gid: Box<dyn IdSource>,
}

impl OwnershipResolver {
    pub fn new(uid: impl IdSource + 'static, gid: impl IdSource + 'static) -> Self {
        Self {
            uid: Box::new(uid),
            gid: Box::new(gid),
        }
    }

    pub fn process() -> Self {
        Self::new(ProcessUid, ProcessGid)
    }

    pub fn resolve(&self) -> Result<Identity, IdentityError> {
        Ok(Identity {
            uid: self.uid.id()?.to_string(),
            gid: self.gid.id()?.to_string(),
        })
    }
}

impl Default for OwnershipResolver {
    fn default() -> Self {
        Self::process()
    }
}
