use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de entrada/saída: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Colunas obrigatórias ausentes: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Arquivo vazio ou sem dados")]
    EmptyFile,

    #[error("Data inválida na coluna {column:?}, linha {line}: {value:?}")]
    InvalidDate {
        column: &'static str,
        line: usize,
        value: String,
    },

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Erro do serviço de análise: {0}")]
    Summarizer(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Load and config failures abort the render; there is no partial dashboard.
/// Summarizer failures never reach this impl — the pipeline folds them into
/// the report text instead.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingColumns(_) | AppError::EmptyFile | AppError::InvalidDate { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
