use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `text` to `path`, replacing any existing file.
///
/// The text goes to a temporary file in the destination directory first and
/// is renamed over the target only once fully flushed, so a failed write
/// leaves the previous contents (or no file) in place. An existing file keeps
/// its permissions; a new one gets the usual `0o666` minus umask. If `path`
/// is a symlink, the file it points to is replaced and the link is kept.
/// Returns the bytes written.
pub fn write_output(path: &Path, text: &str) -> std::io::Result<u64> {
    let target = resolve_target(path);
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".pagecut").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Applied through open(2), so the process umask still takes effect.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir)?;

    if let Ok(existing) = std::fs::metadata(&target) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }

    tmp.write_all(text.as_bytes())?;
    tmp.flush()?;
    tmp.persist(&target).map_err(|e| e.error)?;

    tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
    Ok(text.len() as u64)
}

/// Follow a symlinked output path to the file it names. Dangling or
/// unreadable links fall back to the path itself.
fn resolve_target(path: &Path) -> PathBuf {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}
