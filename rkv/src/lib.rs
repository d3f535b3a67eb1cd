pub mod commands;
pub mod logging;
pub mod output_path;

pub use commands::backup::{BackupArgs, backup};
pub use commands::version::version;
