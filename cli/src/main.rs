use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use permafrust_api::{ApiConfig, PermafrustApi, DEFAULT_BASE_URL};

/// Query a running permafrust web server.
#[derive(Debug, Parser)]
#[command(name = "permafrust-api", version, about)]
struct Cli {
    /// Base URL of the server's REST API.
    #[arg(long, env = "PERMAFRUST_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the watched root directories.
    RootDirectories,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    let api = PermafrustApi::new(ApiConfig::new(&cli.base_url));

    match cli.command {
        Command::RootDirectories => {
            // Failures were already logged by the client.
            let Some(directories) = api.list_root_directories().await else {
                return Ok(ExitCode::FAILURE);
            };
            let rendered = serde_json::to_string_pretty(&directories)
                .context("rendering root directories")?;
            println!("{rendered}");
        }
    }
    Ok(ExitCode::SUCCESS)
}
