use crate::core::{ConfigProvider, FetchOutcome, FilterSet, Record};
use crate::utils::error::SisaguaError;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;

/// Paginated client for the SISAGUA basic-parameters endpoint. Pages are
/// requested one at a time; the next request goes out only after the previous
/// response has been consumed.
pub struct ParameterFetcher {
    endpoint: String,
    timeout: Duration,
    max_pages: usize,
    client: Client,
}

impl ParameterFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, max_pages: usize) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            max_pages,
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.api_endpoint(),
            config.request_timeout(),
            config.max_pages(),
        )
    }

    /// Walks the endpoint page by page until the server returns an empty
    /// `parametros` array. Any failure (non-2xx status, transport error,
    /// undecodable body) halts pagination immediately but keeps everything
    /// accumulated so far: the caller gets the partial collection plus the
    /// error that ended it.
    pub async fn fetch_all(&self, filter: &FilterSet) -> FetchOutcome {
        let mut accumulated: Vec<Record> = Vec::new();
        let mut offset = 0usize;
        let mut requests = 0usize;
        let mut error = None;

        loop {
            // Cap on total requests so a server that never sends an empty
            // page cannot keep us looping forever.
            if requests >= self.max_pages {
                tracing::warn!(
                    "stopping after {} requests without an end-of-data signal",
                    requests
                );
                error = Some(SisaguaError::PageCapReached { requests });
                break;
            }

            tracing::debug!("requesting page at offset {}", offset);
            let result = self
                .client
                .get(&self.endpoint)
                .header(ACCEPT, "application/json")
                .query(&filter.query_pairs(offset))
                .timeout(self.timeout)
                .send()
                .await;
            requests += 1;

            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    error = Some(e.into());
                    break;
                }
            };

            let status = response.status();
            tracing::debug!("page at offset {} answered with {}", offset, status);
            if !status.is_success() {
                error = Some(SisaguaError::RemoteRequest {
                    status: status.as_u16(),
                });
                break;
            }

            let mut body: serde_json::Value = match response.json().await {
                Ok(body) => body,
                Err(e) => {
                    error = Some(e.into());
                    break;
                }
            };

            // A missing or non-array `parametros` key counts as an empty page.
            let batch = match body.get_mut("parametros").map(serde_json::Value::take) {
                Some(serde_json::Value::Array(items)) if !items.is_empty() => items,
                _ => break,
            };

            for item in batch {
                if let serde_json::Value::Object(fields) = item {
                    accumulated.push(Record {
                        data: fields.into_iter().collect(),
                    });
                }
            }

            // Offset advances by the full page size even when the server sent
            // a short page; only an empty page ends the walk.
            offset += filter.limit;
        }

        FetchOutcome {
            records: accumulated,
            requests,
            error,
        }
    }
}
