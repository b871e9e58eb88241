use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dash_atendimentos::config::AppConfig;
use dash_atendimentos::report::GroqClient;
use dash_atendimentos::server::start_server;
use dash_atendimentos::AppState;

/// Dashboard de atendimentos — agregação de chamados e relatório por robô.
#[derive(Debug, Parser)]
#[command(name = "dash-atendimentos", version)]
struct Args {
    /// Caminho do arquivo de configuração.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Sobrescreve o caminho do CSV de atendimentos.
    #[arg(long)]
    csv: Option<String>,

    /// Sobrescreve a porta HTTP.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(csv) = args.csv {
        config.csv_path = csv;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    info!(csv_path = %config.csv_path, modelo = %config.groq.model, "iniciando serviço");

    let summarizer = GroqClient::new(&config.groq)?;
    let state = Arc::new(AppState {
        config,
        summarizer: Box::new(summarizer),
    });

    start_server(state).await
}
