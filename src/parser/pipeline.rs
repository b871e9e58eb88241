use std::io::Read;
use std::time::Instant;

use chrono::NaiveDateTime;

use crate::error::AppError;
use crate::parser::columns::{
    validate_columns, ColumnMap, COL_COMENTARIOS, COL_CONTATO, COL_CRIADO, COL_ENCERRAMENTO,
    COL_MOTIVO, COL_PRAZO, COL_RESPONSAVEL, COL_ROBO,
};
use crate::parser::deserializers::{is_blank, opt_text, parse_export_datetime, req_text};
use crate::parser::types::{Ticket, TicketRaw};

/// Output of `load_tickets` — the ordered ticket set plus load metadata.
#[derive(Debug)]
pub struct LoadOutput {
    pub tickets: Vec<Ticket>,
    pub total_rows: usize,
    pub detected_columns: Vec<String>,
    pub missing_optional_columns: Vec<String>,
    pub load_duration_ms: u64,
}

/// Load the ticket export from `path`.
pub fn load_tickets(path: &str) -> Result<LoadOutput, AppError> {
    let file = std::fs::File::open(path)?;
    load_tickets_reader(std::io::BufReader::new(file))
}

/// Core loading logic — accepts any `Read` source, useful for tests.
///
/// Unlike a skip-and-warn importer, a required date that fails to parse
/// aborts the whole load: the dashboard never renders over a partial set.
pub fn load_tickets_reader<R: Read>(reader: R) -> Result<LoadOutput, AppError> {
    let start = Instant::now();

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .double_quote(true)
        .quoting(true)
        .from_reader(reader);

    // Phase 1: validate columns
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(AppError::EmptyFile);
    }
    let col_map = ColumnMap::from_headers(&headers);
    let col_validation = validate_columns(&col_map)?;

    // Phase 2: parse rows, fail fast on any bad required field
    let mut tickets: Vec<Ticket> = Vec::new();
    let mut row_idx = 0usize;

    for result in rdr.records() {
        row_idx += 1;
        let record = result?;
        let raw = record_to_raw(&col_map, &record);
        // +1 for the header row
        tickets.push(parse_ticket(&raw, row_idx + 1)?);
    }

    if row_idx == 0 {
        return Err(AppError::EmptyFile);
    }

    Ok(LoadOutput {
        tickets,
        total_rows: row_idx,
        detected_columns: col_validation.present,
        missing_optional_columns: col_validation.missing_optional,
        load_duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn record_to_raw(col_map: &ColumnMap, record: &csv::StringRecord) -> TicketRaw {
    TicketRaw {
        robo: col_map.get(record, COL_ROBO).map(str::to_string),
        responsavel: col_map.get(record, COL_RESPONSAVEL).map(str::to_string),
        contato: col_map.get(record, COL_CONTATO).map(str::to_string),
        motivo_contato: col_map.get(record, COL_MOTIVO).map(str::to_string),
        comentarios: col_map.get(record, COL_COMENTARIOS).map(str::to_string),
        criado: col_map.get(record, COL_CRIADO).map(str::to_string),
        encerramento: col_map.get(record, COL_ENCERRAMENTO).map(str::to_string),
        prazo: col_map.get(record, COL_PRAZO).map(str::to_string),
    }
}

/// Datetime cell that may legitimately be empty (ticket still open), but
/// must parse when present.
fn parse_opt_datetime(
    cell: Option<&str>,
    column: &'static str,
    line: usize,
) -> Result<Option<NaiveDateTime>, AppError> {
    let s = cell.unwrap_or("");
    if is_blank(s) {
        return Ok(None);
    }
    parse_export_datetime(s)
        .map(Some)
        .ok_or_else(|| AppError::InvalidDate {
            column,
            line,
            value: s.trim().to_string(),
        })
}

fn parse_ticket(raw: &TicketRaw, line: usize) -> Result<Ticket, AppError> {
    // Criado (required)
    let criado_str = raw.criado.as_deref().unwrap_or("");
    let criado = parse_export_datetime(criado_str).ok_or_else(|| AppError::InvalidDate {
        column: COL_CRIADO,
        line,
        value: criado_str.trim().to_string(),
    })?;

    let encerramento = parse_opt_datetime(raw.encerramento.as_deref(), COL_ENCERRAMENTO, line)?;
    let prazo = parse_opt_datetime(raw.prazo.as_deref(), COL_PRAZO, line)?;

    // Derived fields. A missing timestamp on either side makes the
    // comparison false, never undefined — no_prazo + fora_do_prazo must
    // always cover the whole set.
    let encerrado_no_prazo = match (encerramento, prazo) {
        (Some(enc), Some(pz)) => enc <= pz,
        _ => false,
    };
    let tempo_resolucao = encerramento.map(|enc| enc - criado);

    Ok(Ticket {
        robo: req_text(raw.robo.as_deref()),
        responsavel: req_text(raw.responsavel.as_deref()),
        contato: req_text(raw.contato.as_deref()),
        motivo_contato: opt_text(raw.motivo_contato.as_deref()),
        comentarios: opt_text(raw.comentarios.as_deref()),
        criado,
        encerramento,
        prazo,
        encerrado_no_prazo,
        tempo_resolucao,
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    /// Full header line for inline test CSV, export column order.
    const HDR: &str = concat!(
        "Nome do robô;Responsável;Contato;Motivo do contato;",
        "Comentários do que foi realizado;Criado;",
        "Data Encerramento (Automático);Prazo de Resolução"
    );

    fn load(csv: &str) -> LoadOutput {
        load_tickets_reader(csv.as_bytes()).unwrap()
    }

    fn load_err(csv: &str) -> AppError {
        load_tickets_reader(csv.as_bytes()).unwrap_err()
    }

    #[test]
    fn test_happy_path_row() {
        let csv = format!(
            "{HDR}\nDCTFWeb;Ana;Cliente A;Erro na importação;Reprocessado;01/03/2025 08:00:00;01/03/2025 10:30:00;02/03/2025 08:00:00"
        );
        let out = load(&csv);
        assert_eq!(out.tickets.len(), 1);
        let t = &out.tickets[0];
        assert_eq!(t.robo, "DCTFWeb");
        assert_eq!(t.responsavel, "Ana");
        assert_eq!(t.contato, "Cliente A");
        assert_eq!(t.motivo_contato.as_deref(), Some("Erro na importação"));
        assert_eq!(t.comentarios.as_deref(), Some("Reprocessado"));
        assert!(t.encerrado_no_prazo);
        assert_eq!(t.tempo_resolucao, Some(Duration::minutes(150)));
    }

    #[test]
    fn test_blank_free_text_becomes_none() {
        let csv = format!(
            "{HDR}\nDCTFWeb;Ana;Cliente A;;  ;01/03/2025 08:00:00;01/03/2025 10:30:00;02/03/2025 08:00:00"
        );
        let t = &load(&csv).tickets[0];
        assert!(t.motivo_contato.is_none());
        assert!(t.comentarios.is_none());
    }

    #[test]
    fn test_free_text_columns_absent() {
        let hdr = "Nome do robô;Responsável;Contato;Criado;Data Encerramento (Automático);Prazo de Resolução";
        let csv = format!(
            "{hdr}\nDCTFWeb;Ana;Cliente A;01/03/2025 08:00:00;;"
        );
        let out = load(&csv);
        assert!(out.tickets[0].motivo_contato.is_none());
        assert_eq!(out.missing_optional_columns.len(), 2);
    }

    #[test]
    fn test_open_ticket_has_no_derived_duration() {
        let csv = format!("{HDR}\nDCTFWeb;Ana;Cliente A;Motivo;;01/03/2025 08:00:00;;02/03/2025 08:00:00");
        let t = &load(&csv).tickets[0];
        assert!(t.encerramento.is_none());
        assert!(t.tempo_resolucao.is_none());
        // Missing encerramento compares as "not on time".
        assert!(!t.encerrado_no_prazo);
    }

    #[test]
    fn test_late_ticket() {
        let csv = format!(
            "{HDR}\nDCTFWeb;Ana;Cliente A;;;01/03/2025 08:00:00;03/03/2025 09:00:00;02/03/2025 08:00:00"
        );
        assert!(!load(&csv).tickets[0].encerrado_no_prazo);
    }

    #[test]
    fn test_bad_required_date_is_fatal() {
        // Second row is malformed — the whole load must fail, not skip.
        let csv = format!(
            "{HDR}\n\
             A;Ana;C1;;;01/03/2025 08:00:00;;\n\
             B;Ana;C2;;;not-a-date;;"
        );
        match load_err(&csv) {
            AppError::InvalidDate { column, line, value } => {
                assert_eq!(column, "Criado");
                assert_eq!(line, 3);
                assert_eq!(value, "not-a-date");
            }
            e => panic!("Expected InvalidDate, got {:?}", e),
        }
    }

    #[test]
    fn test_bad_optional_date_is_fatal_when_present() {
        let csv = format!("{HDR}\nA;Ana;C1;;;01/03/2025 08:00:00;31/02/2025 08:00:00;");
        match load_err(&csv) {
            AppError::InvalidDate { column, .. } => {
                assert_eq!(column, "Data Encerramento (Automático)");
            }
            e => panic!("Expected InvalidDate, got {:?}", e),
        }
    }

    #[test]
    fn test_missing_required_column_error() {
        let csv = "Nome do robô;Contato\nA;C";
        match load_err(csv) {
            AppError::MissingColumns(cols) => {
                assert!(cols.contains(&"Responsável".to_string()));
                assert!(cols.contains(&"Criado".to_string()));
            }
            e => panic!("Expected MissingColumns, got {:?}", e),
        }
    }

    #[test]
    fn test_header_only_file_error() {
        match load_err(&format!("{HDR}\n")) {
            AppError::EmptyFile => {}
            e => panic!("Expected EmptyFile, got {:?}", e),
        }
    }

    #[test]
    fn test_empty_file_error() {
        match load_err("") {
            AppError::EmptyFile | AppError::MissingColumns(_) | AppError::Csv(_) => {}
            e => panic!("Expected EmptyFile or related error, got {:?}", e),
        }
    }

    #[test]
    fn test_quoted_multiline_comment() {
        let csv = format!(
            "{HDR}\nA;Ana;C1;Motivo;\"linha 1\nlinha 2\";01/03/2025 08:00:00;;"
        );
        let t = &load(&csv).tickets[0];
        assert_eq!(t.comentarios.as_deref(), Some("linha 1\nlinha 2"));
    }

    #[test]
    fn test_load_from_path() {
        use std::io::Write;
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "{HDR}").unwrap();
        writeln!(tmp, "A;Ana;C1;;;01/03/2025 08:00:00;;").unwrap();
        let out = load_tickets(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(out.tickets.len(), 1);
        assert_eq!(out.total_rows, 1);
    }
}
