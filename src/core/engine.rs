use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives a pipeline end to end. A fetch that ended early still flows on with
/// whatever was accumulated; only an empty result stops short of writing
/// output.
pub struct FetchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> FetchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Returns the output path, or `None` when no records matched the filters.
    pub async fn run(&self) -> Result<Option<String>> {
        tracing::info!("Fetching surveillance records...");
        let outcome = self.pipeline.extract().await?;

        if let Some(error) = &outcome.error {
            tracing::error!(
                "❌ Fetch stopped early: {} ({} records collected before the failure)",
                error,
                outcome.records.len()
            );
        }

        if outcome.records.is_empty() {
            tracing::warn!("⚠️ No records found for the selected filters");
            return Ok(None);
        }

        tracing::info!(
            "📊 {} records fetched over {} requests",
            outcome.records.len(),
            outcome.requests
        );

        let table = self.pipeline.transform(outcome.records).await?;
        tracing::info!(
            "Projected {} rows onto {} columns",
            table.rows.len(),
            table.columns.len()
        );

        let output_path = self.pipeline.load(table).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(Some(output_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FetchOutcome, Record, TableResult};
    use crate::utils::error::SisaguaError;
    use std::collections::HashMap;

    struct StubPipeline {
        records: Vec<Record>,
        error: Option<SisaguaError>,
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<FetchOutcome> {
            Ok(FetchOutcome {
                records: self.records.clone(),
                requests: 1,
                error: match &self.error {
                    Some(SisaguaError::RemoteRequest { status }) => {
                        Some(SisaguaError::RemoteRequest { status: *status })
                    }
                    _ => None,
                },
            })
        }

        async fn transform(&self, data: Vec<Record>) -> Result<TableResult> {
            Ok(TableResult {
                columns: vec!["municipio".to_string()],
                rows: data,
                dropped_columns: vec![],
                csv_output: "municipio\n".to_string(),
            })
        }

        async fn load(&self, _result: TableResult) -> Result<String> {
            Ok("out/dados_sisagua.csv".to_string())
        }
    }

    fn one_record() -> Record {
        let mut data = HashMap::new();
        data.insert(
            "municipio".to_string(),
            serde_json::Value::String("Gramado".to_string()),
        );
        Record { data }
    }

    #[tokio::test]
    async fn empty_fetch_produces_no_output() {
        let engine = FetchEngine::new(StubPipeline {
            records: vec![],
            error: None,
        });

        assert!(engine.run().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn records_flow_through_to_the_output_path() {
        let engine = FetchEngine::new(StubPipeline {
            records: vec![one_record()],
            error: None,
        });

        let path = engine.run().await.unwrap();
        assert_eq!(path.as_deref(), Some("out/dados_sisagua.csv"));
    }

    #[tokio::test]
    async fn partial_result_with_error_is_still_written() {
        let engine = FetchEngine::new(StubPipeline {
            records: vec![one_record()],
            error: Some(SisaguaError::RemoteRequest { status: 500 }),
        });

        let path = engine.run().await.unwrap();
        assert!(path.is_some());
    }
}
