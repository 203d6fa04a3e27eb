use crate::core::fetcher::ParameterFetcher;
use crate::core::{
    export, projection, ConfigProvider, FetchOutcome, FilterSet, Pipeline, Record, Result, Storage,
    TableResult,
};

pub const OUTPUT_FILE: &str = "dados_sisagua.csv";

/// Extract = paginated fetch, transform = column projection + CSV
/// serialization, load = write the CSV through the storage port.
pub struct SisaguaPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    filter: FilterSet,
    fetcher: ParameterFetcher,
}

impl<S: Storage, C: ConfigProvider> SisaguaPipeline<S, C> {
    pub fn new(storage: S, config: C, filter: FilterSet) -> Self {
        let fetcher = ParameterFetcher::from_config(&config);
        Self {
            storage,
            config,
            filter,
            fetcher,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SisaguaPipeline<S, C> {
    async fn extract(&self) -> Result<FetchOutcome> {
        tracing::debug!("fetching from: {}", self.config.api_endpoint());
        let outcome = self.fetcher.fetch_all(&self.filter).await;
        tracing::debug!(
            "fetch finished: {} records over {} requests",
            outcome.records.len(),
            outcome.requests
        );
        Ok(outcome)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TableResult> {
        let projection = projection::project_lenient(&data, projection::DISPLAY_COLUMNS);
        if !projection.dropped.is_empty() {
            tracing::warn!(
                "⚠️ Columns absent from the API response were dropped: {}",
                projection.dropped.join(", ")
            );
        }

        let csv_output = export::to_csv(&projection.columns, &projection.rows)?;

        Ok(TableResult {
            columns: projection.columns,
            rows: projection.rows,
            dropped_columns: projection.dropped,
            csv_output,
        })
    }

    async fn load(&self, result: TableResult) -> Result<String> {
        tracing::debug!(
            "writing {} bytes of CSV to storage",
            result.csv_output.len()
        );
        self.storage
            .write_file(OUTPUT_FILE, result.csv_output.as_bytes())
            .await?;

        Ok(format!("{}/{}", self.config.output_path(), OUTPUT_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_endpoint: String,
        output_path: String,
    }

    impl MockConfig {
        fn new(api_endpoint: String) -> Self {
            Self {
                api_endpoint,
                output_path: "test_output".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(5)
        }

        fn max_pages(&self) -> usize {
            100
        }
    }

    fn sample(id: i64) -> serde_json::Value {
        serde_json::json!({
            "municipio": format!("Municipio {}", id),
            "parametro": "pH",
            "resultado": "7.0",
        })
    }

    #[tokio::test]
    async fn extract_accumulates_all_pages() {
        let server = MockServer::start();
        let page0 = server.mock(|when, then| {
            when.method(GET).path("/v1").query_param("offset", "0");
            then.status(200)
                .json_body(serde_json::json!({"parametros": [sample(1), sample(2)]}));
        });
        let page1 = server.mock(|when, then| {
            when.method(GET).path("/v1").query_param("offset", "2");
            then.status(200)
                .json_body(serde_json::json!({"parametros": []}));
        });

        let mut filter = FilterSet::new("RS");
        filter.limit = 2;
        let pipeline =
            SisaguaPipeline::new(MockStorage::new(), MockConfig::new(server.url("/v1")), filter);

        let outcome = pipeline.extract().await.unwrap();

        page0.assert();
        page1.assert();
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn transform_projects_present_columns_and_serializes_csv() {
        let records = vec![Record {
            data: sample(1)
                .as_object()
                .unwrap()
                .clone()
                .into_iter()
                .collect(),
        }];

        let pipeline = SisaguaPipeline::new(
            MockStorage::new(),
            MockConfig::new("http://localhost".to_string()),
            FilterSet::new("RS"),
        );

        let result = pipeline.transform(records).await.unwrap();

        // Only the three fields present in the sample survive projection.
        assert_eq!(result.columns, vec!["municipio", "parametro", "resultado"]);
        assert_eq!(result.dropped_columns.len(), 18);
        assert!(result.csv_output.starts_with("municipio,parametro,resultado"));
        assert!(result.csv_output.contains("Municipio 1,pH,7.0"));
    }

    #[tokio::test]
    async fn load_writes_the_csv_file() {
        let storage = MockStorage::new();
        let pipeline = SisaguaPipeline::new(
            storage.clone(),
            MockConfig::new("http://localhost".to_string()),
            FilterSet::new("RS"),
        );

        let table = TableResult {
            columns: vec!["municipio".to_string()],
            rows: vec![],
            dropped_columns: vec![],
            csv_output: "municipio\nEsteio\n".to_string(),
        };

        let path = pipeline.load(table).await.unwrap();

        assert_eq!(path, "test_output/dados_sisagua.csv");
        let written = storage.get_file(OUTPUT_FILE).await.unwrap();
        assert_eq!(written, b"municipio\nEsteio\n");
    }
}
