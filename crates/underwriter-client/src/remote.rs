//! Remote analysis service client
//!
//! The scoring itself happens in the analysis service. This module only moves
//! requests and JSON payloads over HTTP and classifies failures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use underwriter_core::{
    CatalogResponse, ProtocolAnalysisRequest, ProtocolCatalogEntry, ProtocolDetail,
    WalletAnalysisPayload, WalletAnalysisRequest,
};

use crate::config::ApiConfig;
use crate::error::{ClientError, Result};

/// The remote collaborator both controllers talk to.
#[async_trait]
pub trait RemoteAnalysisClient: Send + Sync {
    /// POST /analyze-wallet
    async fn analyze_wallet(&self, wallet_address: &str) -> Result<WalletAnalysisPayload>;

    /// GET /protocols, in the order the service returned them
    async fn list_protocols(&self) -> Result<Vec<ProtocolCatalogEntry>>;

    /// POST /analyze-protocol
    async fn analyze_protocol(&self, protocol_id: &str) -> Result<ProtocolDetail>;
}

/// GET /health response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub mock_mode: bool,
}

/// HTTP client for the analysis service
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    api: ApiConfig,
}

impl HttpAnalysisClient {
    /// Create a new client. No authentication headers are sent.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(ClientError::from_reqwest)?;

        Ok(Self {
            client,
            api: config.clone(),
        })
    }

    /// Health check
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get("/health").await
    }

    // HTTP helper methods

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.api.endpoint(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        Self::decode(response).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.api.endpoint(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(ClientError::from_reqwest)?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RemoteAnalysisClient for HttpAnalysisClient {
    async fn analyze_wallet(&self, wallet_address: &str) -> Result<WalletAnalysisPayload> {
        let request = WalletAnalysisRequest {
            wallet_address: wallet_address.to_string(),
        };
        let payload: WalletAnalysisPayload = self.post("/analyze-wallet", &request).await?;
        payload.validate()?;
        Ok(payload)
    }

    async fn list_protocols(&self) -> Result<Vec<ProtocolCatalogEntry>> {
        let catalog: CatalogResponse = self.get("/protocols").await?;
        catalog.validate()?;
        Ok(catalog.protocols)
    }

    async fn analyze_protocol(&self, protocol_id: &str) -> Result<ProtocolDetail> {
        let request = ProtocolAnalysisRequest {
            protocol_id: protocol_id.to_string(),
        };
        let detail: ProtocolDetail = self.post("/analyze-protocol", &request).await?;
        detail.validate()?;
        Ok(detail)
    }
}
