use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Resolves the directory the archive is written to. An empty path means the
/// current working directory; anything else must be an existing directory
/// and is returned absolute.
pub fn resolve(path: &str) -> Result<PathBuf> {
    if path.is_empty() {
        return current_dir();
    }
    validate(Path::new(path))
}

pub fn validate(path: &Path) -> Result<PathBuf> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            bail!("output path does not exist")
        }
        Err(err) => return Err(err).context("error getting output path info"),
    };
    if !meta.is_dir() {
        bail!("output path is not a directory");
    }
    std::path::absolute(path).context("error getting absolute path")
}

pub fn current_dir() -> Result<PathBuf> {
    env::current_dir().context("error getting current dir")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path() {
        let err = resolve("not-exists").unwrap_err();
        assert_eq!(err.to_string(), "output path does not exist");
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = resolve(file.path().to_str().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "output path is not a directory");
    }

    #[test]
    fn test_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(resolved, dir.path());
        assert!(resolved.is_absolute());
    }
}
