mod cli;
mod commands;
mod completion;
mod config;
mod database;
mod error;
mod session;
mod statement;

use cli::Cli;
use config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::try_parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::new(&config)?;
    cli.run()?;

    Ok(())
}
