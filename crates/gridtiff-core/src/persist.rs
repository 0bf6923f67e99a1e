//! Writing composites as deflate-compressed TIFF.

use anyhow::{Context, Result};
use image::RgbImage;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tiff::encoder::{colortype, compression::Deflate, TiffEncoder};

use crate::naming::sanitize_file_stem;

pub const EXTENSION: &str = "tif";

/// `output_dir/<sanitized group name>.tif`
pub fn output_path(output_dir: &Path, group_name: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", sanitize_file_stem(group_name), EXTENSION))
}

/// Encodes `image` as a single-frame RGB TIFF at `path`, creating parent directories.
pub fn save_tiff(image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    {
        let mut encoder = TiffEncoder::new(&mut out).context("tiff encoder")?;
        encoder
            .write_image_with_compression::<colortype::RGB8, _>(
                image.width(),
                image.height(),
                Deflate::default(),
                image.as_raw(),
            )
            .with_context(|| format!("encode {}", path.display()))?;
    }
    out.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
