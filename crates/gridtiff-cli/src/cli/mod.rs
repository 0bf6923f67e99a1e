//! CLI for gridtiff.

mod commands;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use gridtiff_core::config::{self, GridConfig, SourceKind};
use gridtiff_core::layout::LayoutParams;
use std::path::PathBuf;

use commands::{run_compose, run_config, run_fetch, run_grid, run_pipeline};

/// Top-level CLI for gridtiff.
#[derive(Debug, Parser)]
#[command(name = "gridtiff")]
#[command(
    about = "gridtiff: download an image archive and compose one grid TIFF per folder",
    long_about = None
)]
pub struct Cli {
    /// More log detail: -v for debug, -vv for trace. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Where the archive comes from and where it is unpacked.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Public share link (or archive URL with --direct). Overrides `source_url`.
    #[arg(long)]
    pub url: Option<String>,
    /// Treat the URL as the archive itself instead of a public share link.
    #[arg(long)]
    pub direct: bool,
    /// Directory the archive is extracted into. Overrides `extract_dir`.
    #[arg(long, value_name = "DIR")]
    pub extract_dir: Option<PathBuf>,
}

impl SourceArgs {
    fn apply(&self, cfg: &mut GridConfig) {
        if let Some(url) = &self.url {
            cfg.source_url = url.clone();
        }
        if self.direct {
            cfg.source = SourceKind::Direct;
        }
        if let Some(dir) = &self.extract_dir {
            cfg.extract_dir = dir.clone();
        }
    }
}

/// Grid layout overrides.
#[derive(Debug, Clone, Default, Args)]
pub struct LayoutArgs {
    /// Images per row (>= 1). Overrides `layout.images_per_row`.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub per_row: Option<u32>,
    /// Padding in pixels between and around cells. Overrides `layout.padding`.
    #[arg(long, value_name = "PX")]
    pub padding: Option<u32>,
}

impl LayoutArgs {
    fn resolve(&self, base: LayoutParams) -> Result<LayoutParams> {
        let params = LayoutParams::new(
            self.per_row.unwrap_or(base.images_per_row),
            self.padding.unwrap_or(base.padding),
        )?;
        Ok(params)
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download and extract the archive, then write one grid TIFF per folder.
    Run {
        #[command(flatten)]
        source: SourceArgs,
        /// Directory for the `<folder>.tif` files. Overrides `output_dir`.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Download and extract the archive only.
    Fetch {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Compose grids for an already extracted directory tree.
    Compose {
        /// Root directory to scan (every folder with images becomes one grid).
        root: PathBuf,
        /// Directory for the `<folder>.tif` files. Overrides `output_dir`.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Compose the given image files, in order, into a single TIFF.
    Grid {
        /// Output TIFF path.
        output: PathBuf,
        /// Input images.
        #[arg(required = true)]
        images: Vec<PathBuf>,
        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show the config file path and the effective configuration.
    Config,
}

impl Cli {
    /// Loads the config file, applies this command's overrides and runs it.
    pub fn run(self) -> Result<()> {
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Run {
                source,
                output_dir,
                layout,
            } => {
                source.apply(&mut cfg);
                if let Some(dir) = output_dir {
                    cfg.output_dir = dir;
                }
                cfg.layout = layout.resolve(cfg.layout)?;
                run_pipeline(&cfg)?;
            }
            CliCommand::Fetch { source } => {
                source.apply(&mut cfg);
                run_fetch(&cfg)?;
            }
            CliCommand::Compose {
                root,
                output_dir,
                layout,
            } => {
                let output_dir = output_dir.unwrap_or_else(|| cfg.output_dir.clone());
                let params = layout.resolve(cfg.layout)?;
                run_compose(&root, &output_dir, &cfg.extensions, params)?;
            }
            CliCommand::Grid {
                output,
                images,
                layout,
            } => {
                let params = layout.resolve(cfg.layout)?;
                run_grid(&output, &images, params)?;
            }
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
