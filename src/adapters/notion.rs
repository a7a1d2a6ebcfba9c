use crate::adapters::{endpoint, http_client, parse_base_url, read_json};
use crate::config::NotionConfig;
use crate::core::normalize::{normalize_record, sort_items};
use crate::domain::model::{ContentItem, QueryRequest, QueryResponse, Section};
use crate::domain::ports::ContentSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

/// Content source that queries the Notion database directly.
pub struct NotionSource {
    client: Client,
    api_base: Url,
    token: String,
    version: String,
    database_id: String,
    page_size: u32,
    max_pages: u32,
}

impl NotionSource {
    pub fn new(config: &NotionConfig) -> Result<Self> {
        Self::with_client(http_client()?, config)
    }

    pub fn with_client(client: Client, config: &NotionConfig) -> Result<Self> {
        Ok(Self {
            client,
            api_base: parse_base_url("notion.api_base", &config.api_base)?,
            token: config.token.clone(),
            version: config.version.clone(),
            database_id: config.database_id.clone(),
            page_size: config.page_size,
            max_pages: config.max_pages.max(1),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header("Notion-Version", self.version.as_str())
    }

    /// One page of a database query.
    pub async fn query_database(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let url = endpoint(&self.api_base, &["databases", self.database_id.as_str(), "query"]);
        tracing::debug!(
            "Querying database {} (filter: {:?}, cursor: {:?})",
            self.database_id,
            request.filter.as_ref().map(|f| f.select.equals.as_str()),
            request.start_cursor
        );

        let response = self
            .authorized(self.client.post(url))
            .json(request)
            .send()
            .await?;
        let body = read_json(response, "message").await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[async_trait]
impl ContentSource for NotionSource {
    fn name(&self) -> &str {
        "notion"
    }

    /// Nothing sits between us and the API, so there is no service to probe.
    async fn check_health(&self) -> Result<bool> {
        Ok(true)
    }

    async fn fetch_items(&self, section: Option<Section>) -> Result<Vec<ContentItem>> {
        let mut request = QueryRequest::for_section(section, self.page_size);
        let mut items = Vec::new();

        for page in 1..=self.max_pages {
            let response = self.query_database(&request).await?;
            items.extend(response.results.iter().map(normalize_record));

            match response.next_cursor {
                Some(cursor) if response.has_more => {
                    if page == self.max_pages {
                        tracing::warn!(
                            "Stopped after {} pages, database has more results",
                            self.max_pages
                        );
                    }
                    request.start_cursor = Some(cursor);
                }
                _ => break,
            }
        }

        sort_items(&mut items);
        tracing::debug!("Fetched {} items from Notion", items.len());
        Ok(items)
    }

    async fn verify_connection(&self) -> Result<()> {
        let url = endpoint(&self.api_base, &["databases", self.database_id.as_str()]);
        let response = self.authorized(self.client.get(url)).send().await?;
        let body = read_json(response, "message").await?;
        let title = body
            .pointer("/title/0/plain_text")
            .and_then(Value::as_str)
            .unwrap_or("Untitled");
        tracing::debug!("Notion database verified: {}", title);
        Ok(())
    }
}
