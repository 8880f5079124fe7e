//! Record store over the backend's REST endpoint
//!
//! Speaks the PostgREST dialect: filters travel as `field=op.value` query
//! parameters and writes ask for `return=minimal`.

use crate::query::{Filter, Query, SortDirection, Table};
use crate::store::{Record, RecordStore};
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// REST-backed [`RecordStore`]
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    config: ClientConfig,
}

/// Error body returned by the backend
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

impl RestStore {
    /// Create a new REST store from configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Attach the key headers
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request
                .header("apikey", key)
                .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", key)),
            None => request,
        }
    }

    fn id_filter(id: &str) -> [(String, String); 1] {
        [("id".to_string(), format!("eq.{}", id))]
    }

    /// Query parameters for a select
    fn select_params(query: &Query) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        for filter in &query.filters {
            let value = match filter {
                Filter::Eq(_, Value::String(s)) => format!("eq.{}", s),
                Filter::Eq(_, other) => format!("eq.{}", other),
                Filter::ILike(_, pattern) => format!("ilike.{}", pattern),
            };
            params.push((filter.field().to_string(), value));
        }
        if let Some((field, direction)) = &query.order_by {
            let dir = match direction {
                SortDirection::Ascending => "asc",
                SortDirection::Descending => "desc",
            };
            params.push(("order".to_string(), format!("{}.{}", field, dir)));
        }
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    /// Map non-success statuses to [`ClientError`]
    async fn handle_response(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        tracing::warn!(status = status.as_u16(), "Backend request failed");
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => Err(ClientError::Api {
                code: err.code.unwrap_or_else(|| status.as_u16().to_string()),
                message: err.message,
            }),
            Err(_) => Err(ClientError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn select(&self, table: Table, query: &Query) -> ClientResult<Vec<Record>> {
        let request = self
            .client
            .get(self.config.table_url(table.name()))
            .query(&Self::select_params(query));
        let response = Self::handle_response(self.authorize(request).send().await?).await?;

        match response.json::<Value>().await? {
            Value::Array(records) => {
                tracing::debug!(table = %table, count = records.len(), "Selected records");
                Ok(records)
            }
            other => Err(ClientError::InvalidResponse(format!(
                "expected an array from {}, got {}",
                table, other
            ))),
        }
    }

    async fn insert(&self, table: Table, record: Record) -> ClientResult<()> {
        let request = self
            .client
            .post(self.config.table_url(table.name()))
            .header("Prefer", "return=minimal")
            .json(&[record]);
        Self::handle_response(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn update(&self, table: Table, id: &str, patch: Record) -> ClientResult<()> {
        // A PATCH matching no row still succeeds; ask for the ids back to tell
        let request = self
            .client
            .patch(self.config.table_url(table.name()))
            .query(&Self::id_filter(id))
            .query(&[("select", "id")])
            .header("Prefer", "return=representation")
            .json(&patch);
        let response = Self::handle_response(self.authorize(request).send().await?).await?;

        match response.json::<Value>().await? {
            Value::Array(rows) if rows.is_empty() => {
                Err(ClientError::NotFound(format!("{}/{}", table, id)))
            }
            Value::Array(_) => Ok(()),
            other => Err(ClientError::InvalidResponse(format!(
                "expected an array from {}, got {}",
                table, other
            ))),
        }
    }

    async fn delete(&self, table: Table, id: &str) -> ClientResult<()> {
        let request = self
            .client
            .delete(self.config.table_url(table.name()))
            .query(&Self::id_filter(id));
        Self::handle_response(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn upsert(&self, table: Table, record: Record) -> ClientResult<()> {
        let request = self
            .client
            .post(self.config.table_url(table.name()))
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[record]);
        Self::handle_response(self.authorize(request).send().await?).await?;
        Ok(())
    }
}
