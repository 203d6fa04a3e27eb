use crate::core::Record;
use crate::utils::error::{Result, SisaguaError};
use std::collections::HashSet;

/// Upstream field names shown to the analyst, in display order.
pub const DISPLAY_COLUMNS: &[&str] = &[
    "regional_de_saude",
    "municipio",
    "numero_da_amostra",
    "motivo_da_coleta",
    "tipo_da_forma_de_abastecimento",
    "codigo_forma_de_abastecimento",
    "nome_da_forma_de_abastecimento",
    "ano",
    "mes",
    "data_da_coleta",
    "procedencia_da_coleta",
    "ponto_de_coleta",
    "descricao_do_local",
    "zona",
    "area",
    "local",
    "latitude",
    "longitude",
    "parametro",
    "resultado",
    "providencia",
];

/// Rows narrowed to a column subset, plus the columns that had to be dropped
/// because no fetched record carried them.
#[derive(Debug, Clone)]
pub struct Projection {
    pub columns: Vec<String>,
    pub dropped: Vec<String>,
    pub rows: Vec<Record>,
}

/// Columns absent from every record. Presence is judged against the union of
/// keys so a field that only some records carry still counts as present.
pub fn missing_columns(records: &[Record], columns: &[&str]) -> Vec<String> {
    if records.is_empty() {
        return Vec::new();
    }

    let present: HashSet<&str> = records
        .iter()
        .flat_map(|r| r.data.keys().map(String::as_str))
        .collect();

    columns
        .iter()
        .filter(|c| !present.contains(**c))
        .map(|c| c.to_string())
        .collect()
}

/// Keeps only the columns actually present in the data, reporting the rest as
/// dropped. Never fails on a schema drift upstream.
pub fn project_lenient(records: &[Record], columns: &[&str]) -> Projection {
    let dropped = missing_columns(records, columns);
    let kept: Vec<String> = columns
        .iter()
        .filter(|c| !dropped.iter().any(|d| d == *c))
        .map(|c| c.to_string())
        .collect();
    let rows = apply(records, &kept);

    Projection {
        columns: kept,
        dropped,
        rows,
    }
}

/// Strict variant: any column absent from the fetched records is an error.
pub fn project_strict(records: &[Record], columns: &[&str]) -> Result<Projection> {
    let missing = missing_columns(records, columns);
    if !missing.is_empty() {
        return Err(SisaguaError::MissingColumns { columns: missing });
    }

    let kept: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let rows = apply(records, &kept);

    Ok(Projection {
        columns: kept,
        dropped: Vec::new(),
        rows,
    })
}

fn apply(records: &[Record], columns: &[String]) -> Vec<Record> {
    records
        .iter()
        .map(|record| Record {
            data: columns
                .iter()
                .map(|column| {
                    (
                        column.clone(),
                        record
                            .data
                            .get(column)
                            .cloned()
                            .unwrap_or(serde_json::Value::Null),
                    )
                })
                .collect(),
        })
        .collect()
}
