use serde::Serialize;

use crate::analyzer::aggregate::{AggregateResult, CountEntry};

/// Shape consumed by the charting widget: parallel label/value arrays.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartSeries {
    fn from_counts(counts: &[CountEntry]) -> Self {
        ChartSeries {
            labels: counts.iter().map(|e| e.label.clone()).collect(),
            values: counts.iter().map(|e| e.count).collect(),
        }
    }
}

/// The four chart payloads the dashboard page renders.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    /// Bar chart — atendimentos por responsável (full breakdown).
    pub responsaveis: ChartSeries,
    /// Pie — top 5 robôs.
    pub robos: ChartSeries,
    /// Pie — top 10 motivos de contato.
    pub motivos: ChartSeries,
    /// Pie — top 5 clientes.
    pub clientes: ChartSeries,
}

pub fn build_charts(agg: &AggregateResult) -> ChartData {
    ChartData {
        responsaveis: ChartSeries::from_counts(&agg.por_responsavel),
        robos: ChartSeries::from_counts(&agg.top_robos),
        motivos: ChartSeries::from_counts(&agg.top_motivos),
        clientes: ChartSeries::from_counts(&agg.top_clientes),
    }
}
