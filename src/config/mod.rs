pub mod cli;

use crate::core::{ConfigProvider, FilterSet};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const SISAGUA_ENDPOINT: &str =
    "https://apidadosabertos.saude.gov.br/sisagua/vigilancia-parametros-basicos";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "sisagua-fetch")]
#[command(about = "Fetch SISAGUA basic water-quality parameters and export them as CSV")]
pub struct CliConfig {
    /// Two-letter state code, e.g. RS
    #[arg(long)]
    pub uf: String,

    /// IBGE municipality code
    #[arg(long)]
    pub codigo_ibge: Option<String>,

    /// Supply-type code
    #[arg(long)]
    pub tipo_da_forma_de_abastecimento: Option<String>,

    /// Reference year
    #[arg(long)]
    pub ano: Option<u16>,

    /// Reference month (1-12)
    #[arg(long)]
    pub mes: Option<u8>,

    /// Basic parameter name, e.g. "Turbidez (uT)"
    #[arg(long)]
    pub parametro: Option<String>,

    /// Records per page request
    #[arg(long, default_value = "1000")]
    pub limit: usize,

    #[arg(long, default_value = SISAGUA_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    /// Upper bound on page requests per fetch
    #[arg(long, default_value = "10000")]
    pub max_pages: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn filter_set(&self) -> FilterSet {
        FilterSet {
            uf: self.uf.clone(),
            limit: self.limit,
            codigo_ibge: self.codigo_ibge.clone(),
            tipo_da_forma_de_abastecimento: self.tipo_da_forma_de_abastecimento.clone(),
            ano: self.ano,
            mes: self.mes,
            parametro: self.parametro.clone(),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn max_pages(&self) -> usize {
        self.max_pages
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_uf("uf", &self.uf)?;
        validation::validate_positive_number("limit", self.limit, 1)?;
        validation::validate_positive_number("max_pages", self.max_pages, 1)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;

        // Bounds match the upstream portal's own input widgets.
        if let Some(ano) = self.ano {
            validation::validate_range("ano", ano, 2000, 2030)?;
        }
        if let Some(mes) = self.mes {
            validation::validate_range("mes", mes, 1, 12)?;
        }

        Ok(())
    }
}
