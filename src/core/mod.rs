pub mod engine;
pub mod export;
pub mod fetcher;
pub mod pipeline;
pub mod projection;

pub use crate::domain::model::{FetchOutcome, FilterSet, Record, TableResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
