use std::collections::HashMap;

use crate::error::AppError;

/// Colunas obrigatórias — a carga falha se alguma estiver ausente.
pub const COL_ROBO: &str = "Nome do robô";
pub const COL_RESPONSAVEL: &str = "Responsável";
pub const COL_CONTATO: &str = "Contato";
pub const COL_CRIADO: &str = "Criado";
pub const COL_ENCERRAMENTO: &str = "Data Encerramento (Automático)";
pub const COL_PRAZO: &str = "Prazo de Resolução";

/// Colunas de texto livre — ausentes = `None`, sinalizadas no resultado.
pub const COL_MOTIVO: &str = "Motivo do contato";
pub const COL_COMENTARIOS: &str = "Comentários do que foi realizado";

const REQUIRED: &[&str] = &[
    COL_ROBO,
    COL_RESPONSAVEL,
    COL_CONTATO,
    COL_CRIADO,
    COL_ENCERRAMENTO,
    COL_PRAZO,
];

const OPTIONAL: &[&str] = &[COL_MOTIVO, COL_COMENTARIOS];

/// Maps column names to their index in a CSV record.
pub struct ColumnMap {
    indices: HashMap<String, usize>,
    headers: Vec<String>,
}

impl ColumnMap {
    /// Build a ColumnMap from the CSV header record.
    /// Header fields are trimmed of surrounding whitespace.
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut indices = HashMap::new();
        let mut header_list = Vec::new();
        for (i, field) in headers.iter().enumerate() {
            let name = field.trim().to_string();
            indices.insert(name.clone(), i);
            header_list.push(name);
        }
        ColumnMap {
            indices,
            headers: header_list,
        }
    }

    /// Get the value of a named column from a record.
    pub fn get<'a>(&self, record: &'a csv::StringRecord, col: &str) -> Option<&'a str> {
        self.indices.get(col).and_then(|&i| record.get(i))
    }

    /// Returns true if the column is present in the CSV headers.
    pub fn has(&self, col: &str) -> bool {
        self.indices.contains_key(col)
    }

    /// All header names in order.
    pub fn all_headers(&self) -> &[String] {
        &self.headers
    }
}

/// Result of column validation.
#[derive(Debug)]
pub struct ColumnValidation {
    /// All column names present in the CSV.
    pub present: Vec<String>,
    /// Optional free-text columns absent from the CSV.
    pub missing_optional: Vec<String>,
}

/// Validate that all required columns are present.
/// Returns `AppError::MissingColumns` if any required column is absent.
pub fn validate_columns(col_map: &ColumnMap) -> Result<ColumnValidation, AppError> {
    let missing_required: Vec<String> = REQUIRED
        .iter()
        .filter(|&&c| !col_map.has(c))
        .map(|c| c.to_string())
        .collect();

    if !missing_required.is_empty() {
        return Err(AppError::MissingColumns(missing_required));
    }

    let missing_optional = OPTIONAL
        .iter()
        .filter(|&&c| !col_map.has(c))
        .map(|c| c.to_string())
        .collect();

    Ok(ColumnValidation {
        present: col_map.all_headers().to_vec(),
        missing_optional,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_headers(cols: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(cols.to_vec())
    }

    fn all_required() -> Vec<&'static str> {
        vec![
            COL_ROBO,
            COL_RESPONSAVEL,
            COL_CONTATO,
            COL_CRIADO,
            COL_ENCERRAMENTO,
            COL_PRAZO,
        ]
    }

    #[test]
    fn test_column_map_basic() {
        let headers = make_headers(&[COL_ROBO, COL_RESPONSAVEL]);
        let cm = ColumnMap::from_headers(&headers);
        assert!(cm.has(COL_ROBO));
        assert!(cm.has(COL_RESPONSAVEL));
        assert!(!cm.has("Inexistente"));
    }

    #[test]
    fn test_column_map_get() {
        let headers = make_headers(&[COL_ROBO, COL_CONTATO]);
        let cm = ColumnMap::from_headers(&headers);
        let record = csv::StringRecord::from(vec!["DCTFWeb", "Cliente A"]);
        assert_eq!(cm.get(&record, COL_ROBO), Some("DCTFWeb"));
        assert_eq!(cm.get(&record, COL_CONTATO), Some("Cliente A"));
        assert_eq!(cm.get(&record, "Inexistente"), None);
    }

    #[test]
    fn test_validate_columns_ok() {
        let mut cols = all_required();
        cols.push(COL_MOTIVO);
        cols.push(COL_COMENTARIOS);
        let cm = ColumnMap::from_headers(&make_headers(&cols));
        let val = validate_columns(&cm).unwrap();
        assert!(val.missing_optional.is_empty());
        assert_eq!(val.present.len(), 8);
    }

    #[test]
    fn test_validate_columns_missing_required() {
        let cm = ColumnMap::from_headers(&make_headers(&[COL_ROBO, COL_CONTATO]));
        let err = validate_columns(&cm).unwrap_err();
        match err {
            AppError::MissingColumns(cols) => {
                assert!(cols.contains(&COL_RESPONSAVEL.to_string()));
                assert!(cols.contains(&COL_CRIADO.to_string()));
                assert!(cols.contains(&COL_PRAZO.to_string()));
            }
            _ => panic!("Expected MissingColumns error"),
        }
    }

    #[test]
    fn test_validate_columns_missing_optional() {
        let cm = ColumnMap::from_headers(&make_headers(&all_required()));
        let val = validate_columns(&cm).unwrap();
        assert!(val.missing_optional.contains(&COL_MOTIVO.to_string()));
        assert!(val.missing_optional.contains(&COL_COMENTARIOS.to_string()));
    }

    #[test]
    fn test_column_map_trim_whitespace() {
        let cm = ColumnMap::from_headers(&make_headers(&[" Criado ", " Contato "]));
        assert!(cm.has(COL_CRIADO));
        assert!(cm.has(COL_CONTATO));
    }
}
