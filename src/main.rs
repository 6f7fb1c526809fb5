//! CLI entry point for the photomosaic builder

use clap::Parser;
use greedymosaic::io::cli::{Cli, FileProcessor};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

fn main() -> greedymosaic::Result<()> {
    let cli = Cli::parse();

    let log_config = ConfigBuilder::new()
        .set_time_level(log::LevelFilter::Debug)
        .build();
    // Fails only if a logger is already installed
    let _ = TermLogger::init(
        cli.log_level(),
        log_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
