//! CLI entry point for the density image batch runner

use clap::Parser;
use densebatch::io::cli::{Cli, FileProcessor};

fn main() -> densebatch::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    let processor = FileProcessor::new(cli);
    processor.process()
}
