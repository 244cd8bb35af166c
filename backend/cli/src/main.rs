mod chat_cmd;
mod config_cmd;
mod status_cmd;
mod terminal_output;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use plchat_agent::ChatService;
use plchat_config::Config;
use plchat_core::ChatProvider;
use plchat_gateway::AppState;
use plchat_providers::GeminiProvider;

#[derive(Parser)]
#[command(name = "plchat")]
#[command(about = "PL Chat: product safety and liability assistant relay for Google Gemini")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP relay and serve the browser client
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Chat in the terminal, calling Gemini directly
    Chat,
    /// Query a running relay's health endpoint
    Status,
    /// Print the effective configuration with secrets masked
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let cli = Cli::parse();

    // The REPL shares stdout with the log, so keep it quiet there.
    let level = match cli.command {
        Commands::Chat => "warn",
        _ => config.logging.level.as_str(),
    };
    plchat_logging::init_logger(
        level,
        config.logging.json,
        config.logging.dir.as_deref().map(Path::new),
    );

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Chat => chat_cmd::run(&config).await?,
        Commands::Status => status_cmd::run(&config).await?,
        Commands::Config => config_cmd::run(&config)?,
    }

    Ok(())
}

/// Wire a chat service from config. `None` leaves it unconfigured.
pub(crate) fn build_service(config: &Config, api_key: Option<String>) -> ChatService {
    let provider = api_key.map(|key| {
        Arc::new(
            GeminiProvider::new(key, config.gemini.model.clone())
                .with_base_url(config.gemini.base_url.clone()),
        ) as Arc<dyn ChatProvider>
    });
    ChatService::new(provider)
        .with_generation(config.gemini.generation)
        .with_history_limit(config.history_limit)
}

async fn run_server(config: Config) -> Result<()> {
    let report = plchat_config::validate_and_log(&config);
    if !report.is_valid() {
        anyhow::bail!("Invalid configuration, refusing to start");
    }

    info!(
        port = config.port,
        bind = %config.bind_address,
        model = %config.gemini.model,
        environment = ?config.environment,
        "Starting PL chat relay"
    );
    let service = build_service(&config, config.gemini.api_key.clone());
    let state = Arc::new(AppState::new(
        service,
        config.public_dir.clone(),
        config.environment.is_production(),
    ));

    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.listen_addr()))?;

    plchat_gateway::start_server(addr, state).await
}
