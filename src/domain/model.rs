use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::error::SisaguaError;

/// One surveillance sample as returned by the upstream API. The field set is
/// whatever the server sends; nothing is validated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

/// User-selected constraints for one fetch. `uf` and `limit` are mandatory;
/// every other field is omitted from the outbound query when `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSet {
    pub uf: String,
    pub limit: usize,
    pub codigo_ibge: Option<String>,
    pub tipo_da_forma_de_abastecimento: Option<String>,
    pub ano: Option<u16>,
    pub mes: Option<u8>,
    pub parametro: Option<String>,
}

impl FilterSet {
    pub const DEFAULT_LIMIT: usize = 1000;

    pub fn new(uf: impl Into<String>) -> Self {
        Self {
            uf: uf.into(),
            limit: Self::DEFAULT_LIMIT,
            codigo_ibge: None,
            tipo_da_forma_de_abastecimento: None,
            ano: None,
            mes: None,
            parametro: None,
        }
    }

    /// Query pairs for the page starting at `offset`. Unset optional filters
    /// never appear as keys, not even with an empty value.
    pub fn query_pairs(&self, offset: usize) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("uf".to_string(), self.uf.clone()),
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), offset.to_string()),
        ];

        if let Some(codigo_ibge) = &self.codigo_ibge {
            pairs.push(("codigo_ibge".to_string(), codigo_ibge.clone()));
        }
        if let Some(tipo) = &self.tipo_da_forma_de_abastecimento {
            pairs.push(("tipo_da_forma_de_abastecimento".to_string(), tipo.clone()));
        }
        if let Some(ano) = self.ano {
            pairs.push(("ano".to_string(), ano.to_string()));
        }
        if let Some(mes) = self.mes {
            pairs.push(("mes".to_string(), mes.to_string()));
        }
        if let Some(parametro) = &self.parametro {
            pairs.push(("parametro".to_string(), parametro.clone()));
        }

        pairs
    }
}

/// Result of one paginated fetch. A terminal error does not discard what was
/// accumulated before it: callers get the partial collection plus the error.
#[derive(Debug)]
pub struct FetchOutcome {
    pub records: Vec<Record>,
    pub requests: usize,
    pub error: Option<SisaguaError>,
}

/// Projected, render-ready table.
#[derive(Debug, Clone)]
pub struct TableResult {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
    pub dropped_columns: Vec<String>,
    pub csv_output: String,
}
