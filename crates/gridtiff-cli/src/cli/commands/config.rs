//! `gridtiff config` – print where the config lives and what is in effect.

use anyhow::Result;
use gridtiff_core::config::{self, GridConfig};

pub fn run_config(cfg: &GridConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
