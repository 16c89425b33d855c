// output.rs
use crate::domain::PropertyRecord;
use crate::errors::FeedError;
use std::fs::{self, Permissions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes the records as pretty JSON (2-space indent) to `path`, replacing
/// whatever was there. The JSON goes to a temp file next to `path` first and
/// is renamed into place, so a failed run never leaves a truncated file.
pub fn write_records(path: &Path, records: &[PropertyRecord]) -> Result<(), FeedError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if dir.exists() && !dir.is_dir() {
        return Err(FeedError::Io(format!(
            "output directory is not a directory: {}",
            dir.display()
        )));
    }
    fs::create_dir_all(dir)?;

    let tmp = NamedTempFile::new_in(dir)?;

    // tempfile creates 0600; the page is served by someone else
    let perms = match fs::metadata(path) {
        Ok(existing) => Some(existing.permissions()),
        Err(_) => default_permissions(),
    };
    if let Some(perms) = perms {
        tmp.as_file().set_permissions(perms)?;
    }

    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    tmp.persist(path)
        .map_err(|e| FeedError::Io(format!("could not replace {}: {}", path.display(), e.error)))?;

    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}
