mod cli;
mod command;
mod config;
mod error;
mod render;

use error::WrapErr;

use clap::CommandFactory;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG 优先于 -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> error::Result<()> {
    color_eyre::install()?;
    let command_line = cli::Cli::parse();
    init_tracing(command_line.verbose);

    let config_path = config::Config::path(command_line.config.as_deref())
        .context("Locate configuration error")?;
    let cfg = config::Config::load(&config_path).context("Load configuration error")?;

    if let Some(command) = command_line.command {
        let cmd: Box<dyn command::Command> = match command {
            cli::Commands::Search {
                query,
                root,
                limit,
                json,
            } => Box::new(command::SearchCommand::new(cfg, query, root, limit, json)),
            cli::Commands::Watch { root } => Box::new(command::WatchCommand::new(cfg, root)),
            cli::Commands::Config { action } => {
                Box::new(command::ConfigCommand::new(cfg, config_path, action))
            }
        };
        cmd.execute().await?;
    } else {
        cli::Cli::command().print_help()?;
    }

    Ok(())
}
