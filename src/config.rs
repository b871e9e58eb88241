use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;

const DEFAULT_CSV_PATH: &str = "./atendimentos.csv";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4310;
/// Identity always excluded from every aggregate and chart grouping.
const DEFAULT_RESPONSAVEL_EXCLUIDO: &str = "Leonardo Barros";

const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com";
const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_GROQ_TIMEOUT_SECS: u64 = 30;

/// Summarizer-service settings (`[groq]` in config.toml).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GroqConfig {
    /// API key — usually supplied via the GROQ_API_KEY env var instead.
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            timeout_secs: DEFAULT_GROQ_TIMEOUT_SECS,
        }
    }
}

/// Service configuration, read from an optional `config.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the ticket export read on every render.
    pub csv_path: String,
    pub bind_address: String,
    pub port: u16,
    /// Responsável cujos chamados nunca entram nas agregações.
    pub responsavel_excluido: String,
    pub groq: GroqConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: DEFAULT_CSV_PATH.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            responsavel_excluido: DEFAULT_RESPONSAVEL_EXCLUIDO.to_string(),
            groq: GroqConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path` when it exists, falling back to defaults otherwise.
    /// GROQ_API_KEY in the environment always wins over the file value.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            info!(path = %path.display(), "configuração carregada");
            toml::from_str(&raw).map_err(|e| AppError::Config(e.to_string()))?
        } else {
            info!(path = %path.display(), "config.toml ausente, usando padrões");
            AppConfig::default()
        };

        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            if !key.is_empty() {
                config.groq.api_key = key;
            }
        }

        Ok(config)
    }
}
