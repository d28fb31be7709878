//! Registry fetcher: races every mirror of a category and keeps the first
//! response that parses.
//!
//! ```text
//! load_module_data("plugin")
//!        |
//!        v
//!   Category::from_str ── invalid? ──► InvalidCategory (no I/O)
//!        |
//!        v
//!   MemoCache ── hit? ──► cached records
//!        |
//!        v  miss
//!   JoinSet: GET mirror 1 | GET mirror 2 | GET mirror 3
//!        |
//!        v  join_next() in completion order
//!   first parsed Ok ──► return (stragglers aborted)
//!   all failed      ──► AllMirrorsFailed { causes }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;

use crate::cache::MemoCache;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::{Category, ModuleInfo, ModuleRecord};

/// Network seam for fetching one mirror body.
#[async_trait]
pub trait MirrorTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<String, StoreError>;
}

/// Plain HTTP GET with a fresh client per request and the transport's
/// default timeouts.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpTransport;

#[async_trait]
impl MirrorTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, StoreError> {
        let response = reqwest::get(url)
            .await
            .map_err(|e| StoreError::MirrorRequestFailed {
                url: url.to_string(),
                reason: format!("request failed: {e}"),
            })?;

        let response = response
            .error_for_status()
            .map_err(|e| StoreError::MirrorRequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        response
            .text()
            .await
            .map_err(|e| StoreError::MirrorRequestFailed {
                url: url.to_string(),
                reason: format!("failed to read body: {e}"),
            })
    }
}

/// Parse a mirror body into records of `category`.
///
/// A single malformed element rejects the whole body.
///
/// # Errors
///
/// Returns `MirrorParseFailed` if the body is not a JSON array of module objects.
pub fn parse_records(
    category: Category,
    url: &str,
    body: &str,
) -> Result<Vec<ModuleRecord>, StoreError> {
    let items: Vec<ModuleInfo> =
        serde_json::from_str(body).map_err(|e| StoreError::MirrorParseFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    Ok(items.into_iter().map(|info| category.wrap(info)).collect())
}

// RegistryStore fetches and caches module lists per category
pub struct RegistryStore {
    config: StoreConfig,
    transport: Arc<dyn MirrorTransport>,
    cache: MemoCache<Category, Vec<ModuleRecord>>,
}

impl RegistryStore {
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport))
    }

    #[must_use]
    pub fn with_transport(config: StoreConfig, transport: Arc<dyn MirrorTransport>) -> Self {
        Self {
            config,
            transport,
            cache: MemoCache::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Load the module list for a category key (`adapter`, `plugin` or `driver`).
    ///
    /// # Errors
    ///
    /// Returns `InvalidCategory` without touching the network for an unknown
    /// key, or `AllMirrorsFailed` when no mirror produced a usable response.
    pub async fn load_module_data(&self, module_type: &str) -> Result<Vec<ModuleRecord>, StoreError> {
        let category: Category = module_type.parse()?;
        self.load_category(category).await
    }

    /// Cached variant of [`RegistryStore::fetch_category`].
    ///
    /// # Errors
    ///
    /// Returns `AllMirrorsFailed` on a cache miss where every mirror fails.
    pub async fn load_category(&self, category: Category) -> Result<Vec<ModuleRecord>, StoreError> {
        if let Some(records) = self.cache.get(&category).await {
            tracing::debug!(%category, "module list cache hit");
            return Ok(records);
        }

        tracing::debug!(%category, "module list cache miss");
        self.cache
            .get_or_compute(category, || self.fetch_category(category))
            .await
    }

    // Forget the cached list for one category
    pub async fn invalidate(&self, category: Category) -> bool {
        self.cache.invalidate(&category).await
    }

    /// Race all mirrors for `category`, bypassing the cache.
    ///
    /// Responses are considered in completion order. The first one that parses
    /// wins and the remaining requests are aborted.
    ///
    /// # Errors
    ///
    /// Returns `AllMirrorsFailed` carrying one cause per mirror when none succeeds.
    pub async fn fetch_category(&self, category: Category) -> Result<Vec<ModuleRecord>, StoreError> {
        let mut requests = JoinSet::new();

        for url in self.config.mirror_urls(category) {
            let transport = Arc::clone(&self.transport);
            requests.spawn(async move {
                tracing::debug!(%url, "requesting module list");
                let parsed = transport
                    .get(&url)
                    .await
                    .and_then(|body| parse_records(category, &url, &body));
                parsed.map(|records| (url, records))
            });
        }

        let mut causes = Vec::new();
        while let Some(joined) = requests.join_next().await {
            match joined {
                Ok(Ok((url, records))) => {
                    tracing::debug!(%url, count = records.len(), "module list loaded");
                    return Ok(records);
                }
                Ok(Err(e)) => {
                    tracing::debug!("mirror failed: {e}");
                    causes.push(e);
                }
                Err(e) => {
                    tracing::debug!("mirror task did not finish: {e}");
                    causes.push(StoreError::MirrorRequestFailed {
                        url: String::from("<unknown>"),
                        reason: format!("task did not finish: {e}"),
                    });
                }
            }
        }

        Err(StoreError::AllMirrorsFailed { category, causes })
    }
}
