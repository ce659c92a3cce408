use clap::{Parser, Subcommand};
use colored::*;
use std::process;

mod cli;

use cli::agents::AgentsCommands;
use cli::campaigns::CampaignsCommands;
use cli::engines::EnginesCommands;
use persona_cli::Config;
use persona_config::{DEFAULT_CLI_LOG_FILTER, DEFAULT_LOG_FILTER};

#[derive(Parser)]
#[command(name = "persona")]
#[command(about = "Persona CLI - marketing campaign simulation front end")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the proxy server
    Serve {
        #[arg(
            long,
            value_parser = clap::value_parser!(u16).range(1..),
            help = "Port to listen on (overrides PORT)"
        )]
        port: Option<u16>,
        #[arg(long, help = "Backend base URL (overrides PERSONA_BACKEND_URL)")]
        backend_url: Option<String>,
    },
    /// Browse and create simulated consumer agents
    #[command(subcommand)]
    Agents(AgentsCommands),
    /// Browse and create marketing campaigns
    #[command(subcommand)]
    Campaigns(CampaignsCommands),
    /// Browse and register ML engines
    #[command(subcommand)]
    Engines(EnginesCommands),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve { .. } => DEFAULT_LOG_FILTER,
        _ => DEFAULT_CLI_LOG_FILTER,
    };
    persona_cli::init_tracing(default_filter);

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve { port, backend_url } => {
            let mut config = Config::from_env()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(url) = backend_url {
                config = config.with_backend_url(&url)?;
            }

            println!("{}", "🚀 Starting Persona server...".green().bold());
            println!("📡 Listening on http://{}", config.bind_address());
            println!("🔗 Backend: {}", config.backend_url);

            persona_cli::run_server(config).await
        }
        Commands::Agents(cmd) => cli::agents::handle_agents_command(cmd).await,
        Commands::Campaigns(cmd) => cli::campaigns::handle_campaigns_command(cmd).await,
        Commands::Engines(cmd) => cli::engines::handle_engines_command(cmd).await,
    }
}
