use chrono::{DateTime, Utc};

/// Directory inside the helper container that the host output directory is
/// bound to.
pub const BACKUP_DIR: &str = "/backup";

/// Source of the timestamp that names an archive.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A fixed instant is a clock that never moves.
impl Clock for DateTime<Utc> {
    fn now(&self) -> DateTime<Utc> {
        *self
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// The `tar` invocation that packs a volume's mount point into the backup
/// directory.
///
/// Neither the volume name nor the source path is escaped here. Callers must
/// only pass values that are already known to be shell-safe; the orchestrator
/// checks both before building a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveCommand {
    archive_name: String,
    source: String,
    timestamp: i64,
}

impl ArchiveCommand {
    pub fn build(volume_name: &str, destination: &str, clock: &dyn Clock) -> Self {
        let timestamp = clock.now().timestamp();
        Self {
            archive_name: archive_name(volume_name, timestamp),
            source: destination.to_string(),
            timestamp,
        }
    }

    /// `<volume>-<unix seconds>`, without the `.tar` extension.
    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    pub fn file_name(&self) -> String {
        format!("{}.tar", self.archive_name)
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Where the archive lands inside the helper container.
    pub fn archive_path(&self) -> String {
        format!("{BACKUP_DIR}/{}", self.file_name())
    }

    pub fn command_line(&self) -> String {
        format!("tar cvf {} {}", self.archive_path(), self.source)
    }
}

pub fn archive_name(volume_name: &str, timestamp: i64) -> String {
    format!("{volume_name}-{timestamp}")
}
