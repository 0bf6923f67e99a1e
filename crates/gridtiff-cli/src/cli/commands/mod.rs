//! CLI command handlers, one file per command.

mod compose;
mod config;
mod fetch;
mod grid;
mod run;

pub use compose::run_compose;
pub use config::run_config;
pub use fetch::run_fetch;
pub use grid::run_grid;
pub use run::run_pipeline;

use gridtiff_core::pipeline::GroupReport;

/// One line per written grid.
fn print_reports(reports: &[GroupReport]) {
    for r in reports {
        println!(
            "{}: {} image(s) -> {}",
            r.name,
            r.image_count,
            r.output.display()
        );
    }
}
