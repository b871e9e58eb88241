use chrono::NaiveDateTime;

/// Formato de data do export: "04/03/2025 14:35:00".
const EXPORT_DT_FMT: &str = "%d/%m/%Y %H:%M:%S";

/// Parse an export datetime string (DD/MM/YYYY HH:MM:SS) into NaiveDateTime.
/// Returns None for empty or unparseable strings.
pub fn parse_export_datetime(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(trimmed, EXPORT_DT_FMT).ok()
}

/// Returns true when the cell holds a value at all (non-blank after trim).
/// Blank cells and absent columns both count as "no value" — the export
/// writes nothing for untouched free-text fields.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Blank/absent free-text cell → None, anything else → the trimmed value.
pub fn opt_text(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Required string cell — trimmed, empty kept as empty (exact-match grouping
/// downstream must not invent values).
pub fn req_text(s: Option<&str>) -> String {
    s.unwrap_or("").trim().to_string()
}
