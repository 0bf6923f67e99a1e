//! Enumeration step: group image files by the folder that contains them.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One folder's images, in grid order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGroup {
    pub folder: PathBuf,
    /// Base name of `folder`; becomes the output file stem.
    pub name: String,
    pub files: Vec<PathBuf>,
}

/// True if the lower-cased file name ends with one of `extensions`.
pub fn is_image_name(file_name: &str, extensions: &[String]) -> bool {
    let lower = file_name.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(ext.to_lowercase().as_str()))
}

/// Walks `root` (including `root` itself) and returns one group per directory
/// holding at least one image file.
///
/// Groups are ordered by path and files within a group by file name, so the
/// grid position of every image is reproducible across runs.
pub fn scan_groups(root: &Path, extensions: &[String]) -> Result<Vec<ImageGroup>> {
    let mut by_folder: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();

    for entry in WalkDir::new(root).min_depth(0).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        if entry.file_type().is_dir()
            || !is_image_name(&entry.file_name().to_string_lossy(), extensions)
        {
            continue;
        }
        let Some(folder) = entry.path().parent() else {
            continue;
        };
        by_folder
            .entry(folder.to_path_buf())
            .or_default()
            .push(entry.into_path());
    }

    let groups = by_folder
        .into_iter()
        .map(|(folder, files)| {
            tracing::debug!(folder = %folder.display(), images = files.len(), "found image group");
            ImageGroup {
                name: folder_name(&folder),
                folder,
                files,
            }
        })
        .collect();
    Ok(groups)
}

fn folder_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
