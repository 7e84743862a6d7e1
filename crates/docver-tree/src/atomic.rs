use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Write `data` next to `path` and move it into place once it is on disk.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    replace_with(path, |file| file.write_all(data))
}

/// Dropping the unpersisted temp file deletes it, so a failed `fill` or
/// rename leaves nothing behind in the output directory.
fn replace_with(path: &Path, fill: impl FnOnce(&mut File) -> io::Result<()>) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut staged: NamedTempFile = tempfile::Builder::new()
        .prefix(".docver-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    fill(staged.as_file_mut())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|error| error.error)?;
    Ok(())
}
