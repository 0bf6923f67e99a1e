//! `gridtiff fetch` – download and extract the archive without composing.

use anyhow::Result;
use gridtiff_core::config::GridConfig;
use gridtiff_core::pipeline;

pub fn run_fetch(cfg: &GridConfig) -> Result<()> {
    let files = pipeline::fetch_and_extract(cfg)?;
    println!("Extracted {} file(s) into {}", files, cfg.extract_dir.display());
    Ok(())
}
