//! One parameterized render pipeline: load → window → aggregate → charts +
//! report. Each call loads its own copy of the export; nothing is shared or
//! cached across renders.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::analyzer::aggregate::{aggregate, filter_tickets};
use crate::analyzer::charts::{build_charts, ChartData};
use crate::analyzer::stats::format_duration;
use crate::analyzer::window::{dataset_bounds, resolve_window};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::parser::load_tickets;
use crate::report::{build_robot_analysis_prompt, Summarizer, SYSTEM_ROLE};

const ISO_DATE_FMT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Serialize)]
pub struct DashboardMeta {
    pub period: String,
    pub start_date: String,
    pub end_date: String,
    /// Dataset bounds — the date pickers use them as min/max.
    pub min_date: String,
    pub max_date: String,
    pub total_rows: usize,
    pub load_duration_ms: u64,
}

/// Everything the dashboard page consumes for one render.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub meta: DashboardMeta,
    pub total_atendimentos: u64,
    pub media_atendimentos: f64,
    /// "D dias HH:MM:SS"; "00:00:00" when no ticket in the window closed.
    pub tempo_medio: String,
    pub total_atendimentos_no_prazo: u64,
    pub total_atendimentos_fora_do_prazo: u64,
    pub graficos: ChartData,
    /// Report text from the summarizer, or an inline error string when the
    /// call failed — a broken summarizer never breaks the render.
    pub analise: String,
}

pub async fn render_dashboard(
    config: &AppConfig,
    summarizer: &dyn Summarizer,
    period: &str,
    start_date: Option<&str>,
    end_date: Option<&str>,
    today: NaiveDate,
) -> Result<DashboardData, AppError> {
    let load = load_tickets(&config.csv_path)?;
    let (min_date, max_date) = dataset_bounds(&load.tickets);
    let window = resolve_window(period, start_date, end_date, min_date, max_date, today);

    let filtered = filter_tickets(&load.tickets, &window, &config.responsavel_excluido);
    let agg = aggregate(&filtered);
    info!(
        period,
        start = %window.start,
        end = %window.end,
        total = agg.total_atendimentos,
        "janela resolvida e chamados agregados"
    );

    let prompt = build_robot_analysis_prompt(&filtered);
    let analise = match summarizer.summarize(SYSTEM_ROLE, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "falha no serviço de análise, exibindo erro inline");
            format!("Erro ao processar análise: {e}")
        }
    };

    let graficos = build_charts(&agg);

    Ok(DashboardData {
        meta: DashboardMeta {
            period: period.to_string(),
            start_date: window.start.format(ISO_DATE_FMT).to_string(),
            end_date: window.end.format(ISO_DATE_FMT).to_string(),
            min_date: min_date.format(ISO_DATE_FMT).to_string(),
            max_date: max_date.format(ISO_DATE_FMT).to_string(),
            total_rows: load.total_rows,
            load_duration_ms: load.load_duration_ms,
        },
        total_atendimentos: agg.total_atendimentos,
        media_atendimentos: agg.media_por_responsavel,
        tempo_medio: format_duration(agg.tempo_medio),
        total_atendimentos_no_prazo: agg.no_prazo,
        total_atendimentos_fora_do_prazo: agg.fora_do_prazo,
        graficos,
        analise,
    })
}
