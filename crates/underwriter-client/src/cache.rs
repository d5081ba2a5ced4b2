use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use underwriter_core::{ProtocolCatalogEntry, ProtocolDetail, WalletAnalysisPayload};

use crate::config::CacheConfig;
use crate::error::Result;
use crate::remote::RemoteAnalysisClient;

/// Cache key types for the cacheable calls
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum CacheKey {
    Catalog,
    ProtocolDetail { protocol_id: String },
}

/// Cached value wrapper
#[derive(Debug, Clone)]
pub enum CacheValue {
    Catalog(Arc<Vec<ProtocolCatalogEntry>>),
    ProtocolDetail(Arc<ProtocolDetail>),
}

/// Caching layer in front of another analysis client.
///
/// Catalog and deep-analysis results are kept for the configured TTL. Wallet
/// analysis always goes to the inner client. Failures are never cached.
pub struct CachingAnalysisClient<C: RemoteAnalysisClient + ?Sized> {
    inner: Arc<C>,
    cache: Cache<CacheKey, CacheValue>,
}

impl<C: RemoteAnalysisClient + ?Sized> CachingAnalysisClient<C> {
    pub fn new(inner: Arc<C>, config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.ttl_seconds))
            .build();

        Self { inner, cache }
    }

    /// Drop the cached deep analysis for one protocol
    pub async fn invalidate_protocol(&self, protocol_id: &str) {
        self.cache
            .invalidate(&CacheKey::ProtocolDetail {
                protocol_id: protocol_id.to_string(),
            })
            .await;
    }

    pub async fn invalidate_catalog(&self) {
        self.cache.invalidate(&CacheKey::Catalog).await;
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Get cache statistics for monitoring
    pub async fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks().await;
        CacheStats {
            entry_count: self.cache.entry_count(),
            weighted_size: self.cache.weighted_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub entry_count: u64,
    pub weighted_size: u64,
}

#[async_trait]
impl<C: RemoteAnalysisClient + ?Sized> RemoteAnalysisClient for CachingAnalysisClient<C> {
    async fn analyze_wallet(&self, wallet_address: &str) -> Result<WalletAnalysisPayload> {
        self.inner.analyze_wallet(wallet_address).await
    }

    async fn list_protocols(&self) -> Result<Vec<ProtocolCatalogEntry>> {
        if let Some(CacheValue::Catalog(catalog)) = self.cache.get(&CacheKey::Catalog).await {
            tracing::debug!(count = catalog.len(), "Catalog served from cache");
            return Ok(catalog.as_ref().clone());
        }

        let catalog = self.inner.list_protocols().await?;
        self.cache
            .insert(CacheKey::Catalog, CacheValue::Catalog(Arc::new(catalog.clone())))
            .await;
        Ok(catalog)
    }

    async fn analyze_protocol(&self, protocol_id: &str) -> Result<ProtocolDetail> {
        let key = CacheKey::ProtocolDetail {
            protocol_id: protocol_id.to_string(),
        };
        if let Some(CacheValue::ProtocolDetail(detail)) = self.cache.get(&key).await {
            tracing::debug!(protocol_id = %protocol_id, "Deep analysis served from cache");
            return Ok(detail.as_ref().clone());
        }

        let detail = self.inner.analyze_protocol(protocol_id).await?;
        self.cache
            .insert(key, CacheValue::ProtocolDetail(Arc::new(detail.clone())))
            .await;
        Ok(detail)
    }
}
