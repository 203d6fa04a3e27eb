use crate::core::Record;
use crate::utils::error::{Result, SisaguaError};

/// Serializes projected rows as CSV: header row first, then one line per
/// record in arrival order. Quoting and escaping are left to the csv crate.
pub fn to_csv(columns: &[String], rows: &[Record]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| cell_text(row.data.get(column)))
            .collect();
        writer.write_record(&cells)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SisaguaError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| SisaguaError::Processing {
        message: format!("CSV output was not valid UTF-8: {}", e),
    })
}

fn cell_text(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
