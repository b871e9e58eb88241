pub mod analyzer;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;
pub mod server;

use config::AppConfig;
use report::Summarizer;

/// Shared, read-only service state. The summarizer client is built once at
/// startup and injected — the pipeline never reaches for global state.
pub struct AppState {
    pub config: AppConfig,
    pub summarizer: Box<dyn Summarizer>,
}
