//! `gridtiff run` – fetch, extract and compose in one go.

use anyhow::Result;
use gridtiff_core::config::GridConfig;
use gridtiff_core::pipeline;

use super::print_reports;

pub fn run_pipeline(cfg: &GridConfig) -> Result<()> {
    let reports = pipeline::run(cfg)?;
    print_reports(&reports);
    if reports.is_empty() {
        println!("No images found under {}.", cfg.extract_dir.display());
    } else {
        tracing::info!("run wrote {} grid(s)", reports.len());
    }
    Ok(())
}
