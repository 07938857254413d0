//! Static asset copy: `<input>/static/*` → `<output>/*`.
//!
//! Existing directories in the output are merged into; existing files of the
//! same name are overwritten. Copied files keep their access and modification
//! times.

use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::error::{io_err, BuildError};

/// Result of copying a `static/` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCopy {
    /// The `static/` directory that was copied.
    pub source: PathBuf,
    /// The output directory it was copied into.
    pub destination: PathBuf,
    /// Every file written, in copy order.
    pub files: Vec<PathBuf>,
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn copy_file(src: &Path, dest: &Path) -> Result<(), BuildError> {
    std::fs::copy(src, dest).map_err(|e| io_err(dest, e))?;
    let meta = std::fs::metadata(src).map_err(|e| io_err(src, e))?;
    filetime::set_file_times(
        dest,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )
    .map_err(|e| io_err(dest, e))
}

fn copy_tree(src: &Path, dest: &Path, files: &mut Vec<PathBuf>) -> Result<(), BuildError> {
    std::fs::create_dir_all(dest).map_err(|e| io_err(dest, e))?;
    for path in sorted_entries(src)? {
        let Some(name) = path.file_name() else { continue };
        let target = dest.join(name);
        if path.is_dir() {
            copy_tree(&path, &target, files)?;
        } else {
            copy_file(&path, &target)?;
            tracing::debug!(path = %target.display(), "copied static file");
            files.push(target);
        }
    }
    Ok(())
}

/// Copy every entry of `static_dir` into `output_dir`.
///
/// Returns `Ok(None)` without touching the filesystem when `static_dir` does
/// not exist.
pub fn copy_static(static_dir: &Path, output_dir: &Path) -> Result<Option<StaticCopy>, BuildError> {
    if !static_dir.is_dir() {
        tracing::debug!(dir = %static_dir.display(), "no static directory");
        return Ok(None);
    }
    let mut files = Vec::new();
    copy_tree(static_dir, output_dir, &mut files)?;
    Ok(Some(StaticCopy {
        source: static_dir.to_path_buf(),
        destination: output_dir.to_path_buf(),
        files,
    }))
}
