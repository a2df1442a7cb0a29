mod cmd;
mod config;
mod error;

use clap::Parser;
use config::{Cli, Effective};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match Effective::new(&cli.global) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cmd::run(cli.command, &settings) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
