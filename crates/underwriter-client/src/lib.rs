//! # Underwriter Client
//!
//! Request and state orchestration for the ERC-8004 Risk Underwriter analyzers.
//! The view layer drives two controllers and renders from their snapshots:
//!
//! - **WalletAnalysisController**: one wallet address at a time, the latest
//!   submit wins, failures become a short user-facing message.
//! - **ProtocolListController**: catalog loaded once, client-side category
//!   filter, at most one protocol expanded with its deep analysis.
//!
//! Both talk to the analysis service through [`RemoteAnalysisClient`]. Responses
//! that settle after a newer action are discarded rather than applied.

pub mod cache;
pub mod config;
pub mod error;
pub mod protocols;
pub mod remote;
pub mod state;
pub mod telemetry;
pub mod wallet;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

pub use crate::cache::CachingAnalysisClient;
pub use crate::config::{ApiConfig, CacheConfig, ClientConfig, ErrorPolicy};
pub use crate::error::{ClientError, Result};
pub use crate::protocols::{CategoryFilter, ProtocolListController, ProtocolSnapshot};
pub use crate::remote::{HealthStatus, HttpAnalysisClient, RemoteAnalysisClient};
pub use crate::state::{Dispatch, RequestState};
pub use crate::wallet::{WalletAnalysisController, WalletSnapshot, EXAMPLE_WALLETS};

/// Build the analysis client described by `config`, with caching if enabled.
pub fn build_client(config: &ClientConfig) -> Result<Arc<dyn RemoteAnalysisClient>> {
    let http = Arc::new(HttpAnalysisClient::new(&config.api)?);

    tracing::info!(
        base_url = %config.api.base_url,
        cache_enabled = config.cache.enabled,
        "Analysis client configured"
    );

    if config.cache.enabled {
        Ok(Arc::new(CachingAnalysisClient::new(http, &config.cache)))
    } else {
        Ok(http)
    }
}

/// Both analyzers wired to one shared client. The protocol catalog is loaded before returning.
pub struct Analyzers {
    pub wallet: WalletAnalysisController<dyn RemoteAnalysisClient>,
    pub protocols: ProtocolListController<dyn RemoteAnalysisClient>,
}

impl Analyzers {
    pub async fn mount(config: &ClientConfig) -> Result<Self> {
        let client = build_client(config)?;
        let protocols = ProtocolListController::mount(Arc::clone(&client), config.errors).await;
        Ok(Self {
            wallet: WalletAnalysisController::new(client),
            protocols,
        })
    }
}
