use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// One CSV row as read, before any parsing. All fields are raw strings;
/// `None` means the column was absent from the file.
#[derive(Debug, Clone, Default)]
pub struct TicketRaw {
    pub robo: Option<String>,
    pub responsavel: Option<String>,
    pub contato: Option<String>,
    pub motivo_contato: Option<String>,
    pub comentarios: Option<String>,
    pub criado: Option<String>,
    pub encerramento: Option<String>,
    pub prazo: Option<String>,
}

/// One support ticket with parsed timestamps and derived fields.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub robo: String,
    pub responsavel: String,
    pub contato: String,
    /// "Motivo do contato" — blank cell becomes `None`; the report prompt
    /// skips the line entirely in that case.
    pub motivo_contato: Option<String>,
    /// "Comentários do que foi realizado" — same blank handling.
    pub comentarios: Option<String>,
    pub criado: NaiveDateTime,
    pub encerramento: Option<NaiveDateTime>,
    pub prazo: Option<NaiveDateTime>,
    /// encerramento <= prazo. False when either timestamp is missing,
    /// matching the source export's semantics for open tickets.
    pub encerrado_no_prazo: bool,
    /// encerramento - criado; `None` while the ticket is still open.
    #[serde(skip)]
    pub tempo_resolucao: Option<Duration>,
}

impl Ticket {
    pub fn criado_date(&self) -> chrono::NaiveDate {
        self.criado.date()
    }
}
