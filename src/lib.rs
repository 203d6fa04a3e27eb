pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{engine::FetchEngine, fetcher::ParameterFetcher, pipeline::SisaguaPipeline};
pub use domain::model::{FetchOutcome, FilterSet, Record, TableResult};
pub use utils::error::{Result, SisaguaError};
