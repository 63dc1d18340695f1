use anyhow::Result;
use clap::Parser;
use log::error;

use trivia_oracle::cli::commands::version_info;
use trivia_oracle::{Cli, CommandHandler, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the environment may already be populated
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let command = cli.command.unwrap_or_default();

    // Handle version early
    if matches!(command, Commands::Version) {
        println!("{}", version_info());
        return Ok(());
    }

    let mut handler = match CommandHandler::new() {
        Ok(h) => h,
        Err(e) => {
            error!("Failed to load configuration: {e:#}");
            eprintln!("Error: Failed to load configuration: {e:#}");
            eprintln!("Check ~/.trivia-oracle/config.toml or run 'trivia-oracle config --init'.");
            std::process::exit(1);
        }
    };

    match handler.handle_command(command).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            error!("Command failed: {e:#}");
            eprintln!("{}", handler.format_error(&format!("{e:#}")));
            std::process::exit(1);
        }
    }

    Ok(())
}
