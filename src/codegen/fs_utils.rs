//! Filesystem utilities for code generation

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Create the parent directories of `path` if they don't exist
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Replace the contents of `path` in one step.
///
/// Data goes to a temporary file in the destination directory which is then
/// renamed over the target, so readers never see a half-written file. An
/// existing target keeps its permissions; a new one is created `0644`.
pub fn write_file_atomic<C: AsRef<[u8]>>(path: &Path, contents: C) -> io::Result<()> {
    ensure_parent_dir(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_ref())?;
    temp.flush()?;
    if let Some(permissions) = target_permissions(path)? {
        temp.as_file().set_permissions(permissions)?;
    }
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Permissions the written file should end up with, if any need setting
fn target_permissions(path: &Path) -> io::Result<Option<fs::Permissions>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(default_permissions()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
