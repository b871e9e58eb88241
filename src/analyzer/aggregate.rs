use std::collections::{HashMap, HashSet};

use chrono::Duration;
use serde::Serialize;

use crate::analyzer::stats::{mean_duration, round2};
use crate::analyzer::window::DateWindow;
use crate::parser::Ticket;

/// Chart-worthy breakdown sizes, matching the rendered dashboard.
pub const TOP_ROBOS: usize = 5;
pub const TOP_MOTIVOS: usize = 10;
pub const TOP_CLIENTES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: u64,
}

/// Summary metrics over the filtered window.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    pub total_atendimentos: u64,
    /// total / distinct responsáveis, 2 decimals; 0 when the set is empty.
    pub media_por_responsavel: f64,
    pub no_prazo: u64,
    pub fora_do_prazo: u64,
    /// Mean over tickets with both timestamps; None when none qualify.
    #[serde(skip)]
    pub tempo_medio: Option<Duration>,
    /// All responsáveis, descending count.
    pub por_responsavel: Vec<CountEntry>,
    pub top_robos: Vec<CountEntry>,
    pub top_motivos: Vec<CountEntry>,
    pub top_clientes: Vec<CountEntry>,
}

/// Occurrence counts in descending order. Ties keep first-encountered order
/// (stable sort over insertion order), so output is deterministic for a
/// given ticket sequence. Grouping is exact string equality — no case or
/// whitespace normalization, by design.
pub fn value_counts<'a, I>(labels: I) -> Vec<CountEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<CountEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for label in labels {
        match index.get(label) {
            Some(&i) => order[i].count += 1,
            None => {
                index.insert(label.to_string(), order.len());
                order.push(CountEntry {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order
}

fn top_n(mut counts: Vec<CountEntry>, n: usize) -> Vec<CountEntry> {
    counts.truncate(n);
    counts
}

/// Keep tickets created inside the window (inclusive on both ends) whose
/// responsável is not the excluded identity. A window with start > end
/// matches nothing.
pub fn filter_tickets(
    tickets: &[Ticket],
    window: &DateWindow,
    responsavel_excluido: &str,
) -> Vec<Ticket> {
    tickets
        .iter()
        .filter(|t| {
            let d = t.criado_date();
            d >= window.start && d <= window.end && t.responsavel != responsavel_excluido
        })
        .cloned()
        .collect()
}

/// Compute all summary metrics and grouped counts over the filtered set.
/// Every aggregate degrades to zero/empty for an empty input.
pub fn aggregate(filtered: &[Ticket]) -> AggregateResult {
    let total = filtered.len() as u64;

    let responsaveis_distintos: HashSet<&str> =
        filtered.iter().map(|t| t.responsavel.as_str()).collect();
    let media_por_responsavel = if responsaveis_distintos.is_empty() {
        0.0
    } else {
        round2(total as f64 / responsaveis_distintos.len() as f64)
    };

    let no_prazo = filtered.iter().filter(|t| t.encerrado_no_prazo).count() as u64;

    let duracoes: Vec<Duration> = filtered.iter().filter_map(|t| t.tempo_resolucao).collect();

    AggregateResult {
        total_atendimentos: total,
        media_por_responsavel,
        no_prazo,
        fora_do_prazo: total - no_prazo,
        tempo_medio: mean_duration(&duracoes),
        por_responsavel: value_counts(filtered.iter().map(|t| t.responsavel.as_str())),
        top_robos: top_n(value_counts(filtered.iter().map(|t| t.robo.as_str())), TOP_ROBOS),
        top_motivos: top_n(
            value_counts(filtered.iter().filter_map(|t| t.motivo_contato.as_deref())),
            TOP_MOTIVOS,
        ),
        top_clientes: top_n(
            value_counts(filtered.iter().map(|t| t.contato.as_str())),
            TOP_CLIENTES,
        ),
    }
}
