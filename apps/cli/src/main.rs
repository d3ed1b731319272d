//! docsmith CLI: maintenance tools for a static documentation site.
//!
//! Injects page titles, regenerates the navigation manifest, exports
//! notebooks to Markdown, and strips file-name prefixes.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
