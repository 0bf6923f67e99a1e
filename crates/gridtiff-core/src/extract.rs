//! ZIP extraction into a destination directory.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Extracts the archive at `archive_path` into `dest_dir`. Returns the number of files written.
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<usize> {
    let file = File::open(archive_path)
        .with_context(|| format!("open {}", archive_path.display()))?;
    extract_zip_from(file, dest_dir)
        .with_context(|| format!("extract {}", archive_path.display()))
}

/// Extracts a ZIP archive read from `reader` into `dest_dir`.
///
/// Entries whose names would land outside `dest_dir` (absolute paths, `..`)
/// are skipped.
pub fn extract_zip_from<R: Read + Seek>(reader: R, dest_dir: &Path) -> Result<usize> {
    let mut archive = ZipArchive::new(reader).context("not a zip archive")?;
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("create {}", dest_dir.display()))?;

    let mut files = 0usize;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("read entry #{}", index))?;
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!(name = entry.name(), "skipping zip entry outside destination");
            continue;
        };
        let target = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("create {}", target.display()))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let mut out =
            File::create(&target).with_context(|| format!("create {}", target.display()))?;
        io::copy(&mut entry, &mut out).with_context(|| format!("write {}", target.display()))?;
        files += 1;
    }

    tracing::info!(files, dest = %dest_dir.display(), "archive extracted");
    Ok(files)
}
