//! `gridtiff compose <root>` – compose an already extracted tree.

use anyhow::{Context, Result};
use gridtiff_core::layout::LayoutParams;
use gridtiff_core::pipeline;
use std::path::Path;

use super::print_reports;

pub fn run_compose(
    root: &Path,
    output_dir: &Path,
    extensions: &[String],
    params: LayoutParams,
) -> Result<()> {
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }
    let reports = pipeline::compose_tree(root, output_dir, extensions, params)
        .with_context(|| format!("compose {}", root.display()))?;
    print_reports(&reports);
    if reports.is_empty() {
        println!("No images found under {}.", root.display());
    }
    Ok(())
}
