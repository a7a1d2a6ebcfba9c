use crate::core::mock_data::mock_items;
use crate::core::normalize::sort_items;
use crate::domain::model::{ContentItem, Section};
use crate::domain::ports::ContentSource;
use crate::utils::error::{ContentError, Result};
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Upper bound for each network step (health, fetch, verify).
    pub step_timeout: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            step_timeout: DEFAULT_STEP_TIMEOUT,
        }
    }
}

/// Which tier produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// The remote source returned items.
    Remote,
    /// The remote source returned nothing and the connection check passed.
    RemoteEmpty,
    /// The built-in dataset.
    Mock,
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub items: Vec<ContentItem>,
    pub tier: Tier,
}

impl Resolution {
    fn mock(section: Option<Section>) -> Self {
        Self {
            items: mock_items(section),
            tier: Tier::Mock,
        }
    }
}

/// Resolves portfolio items from a remote source, degrading to the built-in
/// dataset. Never returns an error.
pub struct FallbackResolver<S: ContentSource> {
    source: S,
    settings: ResolverSettings,
}

impl<S: ContentSource> FallbackResolver<S> {
    pub fn new(source: S) -> Self {
        Self::with_settings(source, ResolverSettings::default())
    }

    pub fn with_settings(source: S, settings: ResolverSettings) -> Self {
        Self { source, settings }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn resolve(&self, section: Option<Section>) -> Vec<ContentItem> {
        self.resolve_detailed(section, &CancellationToken::new())
            .await
            .items
    }

    /// Runs health check, fetch and (for an empty fetch) connection check,
    /// falling back to the built-in dataset on any failure.
    ///
    /// A failed fetch goes straight to the built-in dataset and does not run
    /// the connection check. Only an empty successful fetch is verified, so a
    /// fetch error can never surface as an empty [`Tier::RemoteEmpty`] result.
    pub async fn resolve_detailed(
        &self,
        section: Option<Section>,
        cancel: &CancellationToken,
    ) -> Resolution {
        let label = section.map(|s| s.as_str()).unwrap_or("all");
        let name = self.source.name();

        tracing::debug!("Resolving section {} via {}", label, name);

        match self
            .run_step("health check", cancel, self.source.check_health())
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!("{} reported unhealthy, using mock data for {}", name, label);
                return Resolution::mock(section);
            }
            Err(e) => {
                tracing::warn!(
                    retryable = e.is_retryable(),
                    "Health check against {} failed: {}, using mock data",
                    name,
                    e
                );
                return Resolution::mock(section);
            }
        }

        let mut items = match self
            .run_step("fetch", cancel, self.source.fetch_items(section))
            .await
        {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(
                    retryable = e.is_retryable(),
                    "Fetching {} from {} failed: {}, using mock data",
                    label,
                    name,
                    e
                );
                return Resolution::mock(section);
            }
        };

        if let Some(wanted) = section {
            items.retain(|item| item.section == wanted);
        }

        if !items.is_empty() {
            sort_items(&mut items);
            tracing::info!("Resolved {} items for {} from {}", items.len(), label, name);
            return Resolution {
                items,
                tier: Tier::Remote,
            };
        }

        tracing::debug!("No items for {} from {}, verifying connection", label, name);

        match self
            .run_step("verify connection", cancel, self.source.verify_connection())
            .await
        {
            Ok(()) => {
                tracing::info!("{} is reachable and has no items for {}", name, label);
                Resolution {
                    items: Vec::new(),
                    tier: Tier::RemoteEmpty,
                }
            }
            Err(e) => {
                tracing::warn!(
                    retryable = e.is_retryable(),
                    "Connection check against {} failed: {}, using mock data",
                    name,
                    e
                );
                Resolution::mock(section)
            }
        }
    }

    /// Resolves every section in display order, one after another. A
    /// cancelled token makes the remaining sections use the built-in dataset.
    pub async fn resolve_all_sections(
        &self,
        cancel: &CancellationToken,
    ) -> BTreeMap<Section, Vec<ContentItem>> {
        let mut results = BTreeMap::new();
        for section in Section::ALL {
            let items = self.resolve_detailed(Some(section), cancel).await.items;
            tracing::debug!("{}: {} items", section, items.len());
            results.insert(section, items);
        }
        results
    }

    async fn run_step<T, F>(&self, step: &str, cancel: &CancellationToken, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let timeout = self.settings.step_timeout;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ContentError::CancelledError {
                step: step.to_string(),
            }),
            outcome = tokio::time::timeout(timeout, fut) => match outcome {
                Ok(result) => result,
                Err(_) => Err(ContentError::TimeoutError {
                    step: step.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                }),
            },
        }
    }
}
