//! Nosograph CLI - Build endpoint metadata and relationship graphs.

use clap::Parser;
use nosograph_cli::pipeline;
use nosograph_cli::{Cli, Command, Formatter, RunConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let formatter = Formatter::new(!cli.no_color);

    if let Err(e) = run(cli, &formatter) {
        eprintln!("{}", formatter.error(&format!("Error: {}", e)));
        std::process::exit(1);
    }
}

fn run(cli: Cli, formatter: &Formatter) -> nosograph_cli::Result<()> {
    // Logs go to stderr so stdout only carries the summary
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = RunConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Build(args) => {
            config.apply_args(args);
            let summary = pipeline::run_build(&config)?;
            println!("{}", formatter.build_summary(&summary));
        }
    }

    Ok(())
}
