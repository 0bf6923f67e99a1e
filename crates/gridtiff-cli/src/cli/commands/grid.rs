//! `gridtiff grid <output> <images>...` – compose explicit files into one TIFF.

use anyhow::Result;
use gridtiff_core::layout::LayoutParams;
use gridtiff_core::pipeline;
use std::path::{Path, PathBuf};

use super::print_reports;

pub fn run_grid(output: &Path, images: &[PathBuf], params: LayoutParams) -> Result<()> {
    let name = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match pipeline::compose_files(&name, images, output, params)? {
        Some(report) => print_reports(&[report]),
        None => println!("Nothing to compose."),
    }
    Ok(())
}
