//! Orchestration: fetch, extract, enumerate, then compose and persist each group.
//!
//! Groups are processed one at a time; the decoded sources and the canvas of a
//! group are dropped before the next group is decoded.

use anyhow::{Context, Result};
use image::{DynamicImage, ImageReader};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::compose::compose;
use crate::config::GridConfig;
use crate::layout::LayoutParams;
use crate::persist::{output_path, save_tiff};
use crate::scan::{scan_groups, ImageGroup};
use crate::{extract, fetch, source};

/// Outcome of one written grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub name: String,
    pub output: PathBuf,
    pub image_count: usize,
    pub width: u32,
    pub height: u32,
}

fn decode(path: &Path) -> Result<DynamicImage> {
    // Format is sniffed from the content; the extension is only a hint.
    let image = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .with_context(|| format!("open {}", path.display()))?
        .decode()
        .with_context(|| format!("decode {}", path.display()))?;
    Ok(image)
}

fn decode_all(files: &[PathBuf]) -> Result<Vec<DynamicImage>> {
    files.iter().map(|path| decode(path)).collect()
}

/// Composes `files` (in order) into one TIFF at `output`.
///
/// Returns `Ok(None)` and writes nothing when `files` is empty.
pub fn compose_files(
    name: &str,
    files: &[PathBuf],
    output: &Path,
    params: LayoutParams,
) -> Result<Option<GroupReport>> {
    let images = decode_all(files)?;
    let Some(canvas) = compose(&images, params)? else {
        tracing::debug!(name, "nothing to compose");
        return Ok(None);
    };
    drop(images);

    save_tiff(&canvas, output)?;
    tracing::info!(
        name,
        images = files.len(),
        width = canvas.width(),
        height = canvas.height(),
        output = %output.display(),
        "grid written"
    );
    Ok(Some(GroupReport {
        name: name.to_string(),
        output: output.to_path_buf(),
        image_count: files.len(),
        width: canvas.width(),
        height: canvas.height(),
    }))
}

/// Composes one folder group into `output_dir/<name>.tif`.
pub fn compose_group(
    group: &ImageGroup,
    output_dir: &Path,
    params: LayoutParams,
) -> Result<Option<GroupReport>> {
    let output = output_path(output_dir, &group.name);
    compose_files(&group.name, &group.files, &output, params)
        .with_context(|| format!("compose folder {}", group.folder.display()))
}

/// Enumerates image groups under `root` and writes one grid per group.
pub fn compose_tree(
    root: &Path,
    output_dir: &Path,
    extensions: &[String],
    params: LayoutParams,
) -> Result<Vec<GroupReport>> {
    params.validate()?;
    let groups = scan_groups(root, extensions)?;
    tracing::info!(groups = groups.len(), root = %root.display(), "image groups found");

    let mut written: HashSet<PathBuf> = HashSet::new();
    let mut reports = Vec::with_capacity(groups.len());
    for group in &groups {
        if let Some(report) = compose_group(group, output_dir, params)? {
            if !written.insert(report.output.clone()) {
                tracing::warn!(
                    folder = %group.folder.display(),
                    output = %report.output.display(),
                    "output name collides with an earlier folder; overwritten"
                );
            }
            reports.push(report);
        }
    }
    Ok(reports)
}

/// Downloads the configured archive and unpacks it into `cfg.extract_dir`.
/// Returns the number of extracted files.
pub fn fetch_and_extract(cfg: &GridConfig) -> Result<usize> {
    let url = source::resolve_download_url(cfg)?;
    let temp = tempfile::NamedTempFile::new().context("create temp file for archive")?;
    let bytes = fetch::download_to_path(&url, temp.path(), &cfg.fetch_config())
        .context("archive download failed")?;
    tracing::info!(bytes, "archive downloaded");
    extract::extract_zip(temp.path(), &cfg.extract_dir)
}

/// Full run: fetch and extract the archive, then compose every folder.
pub fn run(cfg: &GridConfig) -> Result<Vec<GroupReport>> {
    cfg.layout.validate()?;
    fetch_and_extract(cfg)?;
    compose_tree(&cfg.extract_dir, &cfg.output_dir, &cfg.extensions, cfg.layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;

    fn write_png(path: &Path, w: u32, h: u32, rgb: [u8; 3]) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        RgbImage::from_pixel(w, h, Rgb(rgb)).save(path).unwrap();
    }

    fn exts() -> Vec<String> {
        vec!["png".to_string()]
    }

    #[test]
    fn compose_files_empty_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("x.tif");
        let report = compose_files("x", &[], &out, LayoutParams::default()).unwrap();
        assert!(report.is_none());
        assert!(!out.exists());
    }

    #[test]
    fn compose_files_reports_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        write_png(&a, 10, 10, [0, 0, 0]);
        write_png(&b, 20, 5, [0, 0, 0]);
        let out = dir.path().join("o/g.tif");
        let report = compose_files("g", &[a, b], &out, LayoutParams::new(4, 1).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(report.image_count, 2);
        assert_eq!((report.width, report.height), (20 * 2 + 3, 10 + 2));
        assert!(out.exists());
    }

    #[test]
    fn decode_failure_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.png");
        fs::write(&bad, b"not a png").unwrap();
        let err = compose_files("g", &[bad], &dir.path().join("g.tif"), LayoutParams::default())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("bad.png"));
    }

    #[test]
    fn compose_tree_one_grid_per_folder() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("content");
        for i in 0..6 {
            write_png(&root.join(format!("set1/{i}.png")), 8, 8, [255, 0, 0]);
        }
        write_png(&root.join("set2/only.png"), 4, 6, [0, 255, 0]);
        fs::write(root.join("set2/notes.txt"), b"skip").unwrap();
        let out = dir.path().join("tiff");

        let params = LayoutParams::new(4, 2).unwrap();
        let reports = compose_tree(&root, &out, &exts(), params).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].name, "set1");
        assert_eq!(reports[0].image_count, 6);
        assert_eq!((reports[0].width, reports[0].height), (8 * 4 + 2 * 5, 8 * 2 + 2 * 3));
        assert_eq!(reports[1].output, out.join("set2.tif"));
        assert_eq!((reports[1].width, reports[1].height), (4 + 4, 6 + 4));

        let grid = image::open(out.join("set1.tif")).unwrap().to_rgb8();
        // Last row has two cells: offset = (42 - (16 + 6)) / 2 = 10.
        assert_eq!(*grid.get_pixel(2 + 10, 12), Rgb([255, 0, 0]));
        assert_eq!(*grid.get_pixel(2 + 10 - 1, 12), Rgb([255, 255, 255]));
    }

    #[test]
    fn compose_tree_rejects_invalid_params() {
        let dir = tempfile::tempdir().unwrap();
        let params = LayoutParams {
            images_per_row: 0,
            padding: 1,
        };
        assert!(compose_tree(dir.path(), dir.path(), &exts(), params).is_err());
    }
}
