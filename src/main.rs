//! CLI entry point for edge-matched tile generation

use clap::Parser;
use edgetile::io::cli::{Cli, Runner};

fn main() -> edgetile::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Runner::new(cli).run()
}
