//! On-disk storage helpers.
//!
//! Resolves the data directory and provides atomic, permission-restricted
//! file writes for the vault and quota artifacts. A write goes to a
//! temporary sibling first and is renamed into place, so a crash mid-write
//! leaves either the previous artifact or nothing, never a truncated file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants;
use crate::error::Result;

/// Resolve the data directory.
///
/// `PALISADE_DIR` takes precedence; otherwise `~/.palisade`. Falls back to
/// a path relative to the working directory when no home directory can be
/// determined (containers, stripped-down service accounts).
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(constants::DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(constants::DATA_DIR),
        None => PathBuf::from(constants::DATA_DIR),
    }
}

/// Create `dir` if needed, restricted to the owning account (0700).
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }

    Ok(())
}

/// Atomically write `bytes` to `path` with owner-only permissions.
///
/// The temporary file lives in the same directory as the target so the
/// rename never crosses a filesystem boundary.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);

    fs::write(&tmp, bytes)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "artifact written");

    Ok(())
}

/// Remove a file, treating "already absent" as success.
pub fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");

        write_atomic(&path, b"{}").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"{}");
        assert!(!tmp.path().join("state.json.tmp").exists());
    }

    #[test]
    fn write_atomic_replaces_existing_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");

        write_atomic(&path, b"old").unwrap();
        write_atomic(&path, b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn written_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("secret.bin");

        write_atomic(&path, b"s3cr3t").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn remove_if_exists_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("gone");

        fs::write(&path, b"x").unwrap();
        remove_if_exists(&path).unwrap();
        remove_if_exists(&path).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn data_dir_honors_env_override() {
        // Read-only check against the resolution logic; the env var is
        // process-global so tests must not set it here.
        let dir = data_dir();
        assert!(dir.to_string_lossy().contains(".palisade") || std::env::var_os(constants::DATA_DIR_ENV).is_some());
    }
}
