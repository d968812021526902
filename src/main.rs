use anyhow::Result;
use chunkscribe::cli::Cli;
use chunkscribe::defaults;
use clap::Parser;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    chunkscribe::logging::init(Path::new(defaults::LOG_FILE))?;

    let path = chunkscribe::app::run(&cli)?;
    if !cli.quiet {
        println!("{}", path.display());
    }
    Ok(())
}
