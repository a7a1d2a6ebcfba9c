use crate::domain::model::{ContentItem, Section};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A remote tier the fallback resolver can draw items from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &str;

    /// `Ok(false)` means the service answered but reported itself unhealthy.
    async fn check_health(&self) -> Result<bool>;

    async fn fetch_items(&self, section: Option<Section>) -> Result<Vec<ContentItem>>;

    async fn verify_connection(&self) -> Result<()>;
}

#[async_trait]
impl<T: ContentSource + ?Sized> ContentSource for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn check_health(&self) -> Result<bool> {
        (**self).check_health().await
    }

    async fn fetch_items(&self, section: Option<Section>) -> Result<Vec<ContentItem>> {
        (**self).fetch_items(section).await
    }

    async fn verify_connection(&self) -> Result<()> {
        (**self).verify_connection().await
    }
}

#[async_trait]
impl<T: ContentSource + ?Sized> ContentSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn check_health(&self) -> Result<bool> {
        (**self).check_health().await
    }

    async fn fetch_items(&self, section: Option<Section>) -> Result<Vec<ContentItem>> {
        (**self).fetch_items(section).await
    }

    async fn verify_connection(&self) -> Result<()> {
        (**self).verify_connection().await
    }
}
