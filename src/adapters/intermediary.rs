use crate::adapters::{endpoint, http_client, parse_base_url, read_json};
use crate::core::normalize::{normalize_item, sort_items};
use crate::domain::model::{ContentItem, HealthResponse, Section};
use crate::domain::ports::ContentSource;
use crate::utils::error::{ContentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// Content source reached through the backend proxy, which holds the
/// Notion credentials and already flattens records.
pub struct IntermediarySource {
    client: Client,
    base_url: Url,
    database_id: String,
}

impl IntermediarySource {
    pub fn new(base_url: &str, database_id: &str) -> Result<Self> {
        Self::with_client(http_client()?, base_url, database_id)
    }

    pub fn with_client(client: Client, base_url: &str, database_id: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url("intermediary.base_url", base_url)?,
            database_id: database_id.to_string(),
        })
    }

    async fn get(&self, segments: &[&str]) -> Result<Value> {
        let url = endpoint(&self.base_url, segments);
        tracing::debug!("Making backend request to: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("Backend response status: {}", response.status());
        read_json(response, "error").await
    }
}

#[async_trait]
impl ContentSource for IntermediarySource {
    fn name(&self) -> &str {
        "backend"
    }

    async fn check_health(&self) -> Result<bool> {
        let body = self.get(&["health"]).await?;
        let health: HealthResponse = serde_json::from_value(body)?;
        match health.timestamp {
            Some(at) => tracing::debug!("Backend health: {} at {}", health.status, at),
            None => tracing::debug!("Backend health: {}", health.status),
        }
        Ok(health.is_ok())
    }

    async fn fetch_items(&self, section: Option<Section>) -> Result<Vec<ContentItem>> {
        let body = match section {
            Some(s) => self.get(&["api", "portfolio", s.as_str()]).await?,
            None => self.get(&["api", "portfolio"]).await?,
        };

        let Value::Array(entries) = body else {
            return Err(ContentError::ResponseShapeError {
                endpoint: "/api/portfolio".to_string(),
                message: "expected a JSON array of items".to_string(),
            });
        };

        let mut items: Vec<ContentItem> = entries.iter().filter_map(normalize_item).collect();
        if items.len() < entries.len() {
            tracing::warn!(
                "Dropped {} malformed entries from backend response",
                entries.len() - items.len()
            );
        }
        sort_items(&mut items);

        tracing::debug!("Fetched {} items from backend", items.len());
        Ok(items)
    }

    async fn verify_connection(&self) -> Result<()> {
        let body = self.get(&["api", "database", self.database_id.as_str()]).await?;
        let title = body
            .pointer("/title/0/plain_text")
            .and_then(Value::as_str)
            .unwrap_or("Untitled");
        tracing::debug!("Database verified through backend: {}", title);
        Ok(())
    }
}
