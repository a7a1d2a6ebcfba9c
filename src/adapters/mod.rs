// Adapters layer: concrete content sources over HTTP.

pub mod intermediary;
pub mod notion;

pub use intermediary::IntermediarySource;
pub use notion::NotionSource;

use crate::config::{AppConfig, SourceKind};
use crate::domain::ports::ContentSource;
use crate::utils::error::{ContentError, Result};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the source selected by `config.source.kind`.
pub fn build_source(config: &AppConfig) -> Result<Box<dyn ContentSource>> {
    let client = http_client()?;
    match config.source.kind {
        SourceKind::Intermediary => {
            let settings = config.intermediary()?;
            Ok(Box::new(IntermediarySource::with_client(
                client,
                &settings.base_url,
                &settings.database_id,
            )?))
        }
        SourceKind::Notion => Ok(Box::new(NotionSource::with_client(
            client,
            config.notion()?,
        )?)),
    }
}

pub(crate) fn http_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("folio-content/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?;
    Ok(client)
}

pub(crate) fn parse_base_url(field: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| ContentError::InvalidConfigValueError {
        field: field.to_string(),
        value: raw.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;
    if url.cannot_be_a_base() {
        return Err(ContentError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }
    Ok(url)
}

/// `base` with `segments` appended as percent-encoded path segments.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Reads a JSON body, turning non-2xx answers into [`ContentError::ApiError`].
///
/// `error_field` names the body field the upstream uses for its message.
pub(crate) async fn read_json(response: Response, error_field: &str) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get(error_field)?.as_str().map(str::to_string))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        return Err(ContentError::ApiError {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json().await?)
}
