use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use shop_api::StoreError;
use tempfile::NamedTempFile;

fn parent_dir_or_dot(path: &Path) -> &Path {
    // `Path::parent` returns `Some("")` for bare file names like `sales.csv`.
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Replace `dest` with whatever `write_fn` writes:
/// - create the parent directory if needed
/// - write into a temp file in the same directory
/// - flush + `sync_all`
/// - rename over `dest`
///
/// If `write_fn` fails, `dest` is left untouched.
pub fn replace_file_atomic(
    dest: &Path,
    write_fn: impl FnOnce(&mut File) -> Result<(), StoreError>,
) -> Result<(), StoreError> {
    let dir = parent_dir_or_dot(dest);
    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_err = |source: std::io::Error| StoreError::Write {
        path: dest.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    write_fn(tmp.as_file_mut())?;

    tmp.as_file_mut().flush().map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    tmp.persist(dest).map_err(|e| write_err(e.error))?;
    Ok(())
}
