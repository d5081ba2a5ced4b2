//! In-memory analysis service for controller tests.
//!
//! Calls answer immediately with canned payloads unless a gate is registered
//! for the identifier (or for the catalog), in which case the call waits until
//! the test releases it.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;
use underwriter_core::*;

use crate::error::{ClientError, Result};
use crate::remote::RemoteAnalysisClient;

type Gate<T> = oneshot::Receiver<Result<T>>;
pub(crate) type Release<T> = oneshot::Sender<Result<T>>;

pub(crate) fn wallet_payload(address: &str) -> WalletAnalysisPayload {
    WalletAnalysisPayload {
        wallet: address.to_string(),
        chain: "Ethereum".to_string(),
        total_value_usd: 10_000.0,
        positions: vec![Position {
            protocol: "Aave V3".to_string(),
            protocol_id: "aave-v3".to_string(),
            category: Category::Lending,
            value_usd: 10_000.0,
            apy: 3.1,
            risk_score: 18.0,
            chain: "Ethereum".to_string(),
        }],
        position_count: 1,
        analysis: WalletAnalysis {
            overall_risk_level: RiskLevel::Low,
            overall_risk_score: 18.0,
            summary: format!("Analysis for {}", address),
            key_risks: vec![],
            recommendations: vec![],
            diversification_score: 20.0,
            liquidation_risk: "Low".to_string(),
        },
        analyzed_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

pub(crate) fn catalog_entry(id: &str, category: &str, risk_score: f64) -> ProtocolCatalogEntry {
    ProtocolCatalogEntry {
        id: id.to_string(),
        name: id.to_uppercase(),
        category: Category::from(category),
        chain: "Ethereum".to_string(),
        tvl_usd: 1_000_000_000.0,
        risk_score,
        audit_count: 4,
        exploits: 0,
        age_days: 500,
        description: format!("{} protocol", id),
        last_audit: None,
    }
}

pub(crate) fn detail_for(id: &str) -> ProtocolDetail {
    ProtocolDetail {
        protocol: catalog_entry(id, "Lending", 20.0),
        deep_analysis: ProtocolDeepAnalysis {
            risk_breakdown: RiskBreakdown {
                smart_contract: 20.0,
                liquidity: 25.0,
                governance: 30.0,
                oracle: 15.0,
                economic: 40.0,
            },
            threat_vectors: vec![format!("{} threat", id)],
            historical_incidents: vec![],
            audit_assessment: format!("{} audits", id),
            recommendation: Recommendation::AcceptableRisk,
            confidence: "High".to_string(),
        },
        analyzed_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

#[derive(Default)]
pub(crate) struct FakeClient {
    wallet_calls: Mutex<Vec<String>>,
    detail_calls: Mutex<Vec<String>>,
    catalog_calls: AtomicUsize,
    catalog: Mutex<Vec<ProtocolCatalogEntry>>,
    catalog_status: Mutex<Option<u16>>,
    catalog_gates: Mutex<VecDeque<Gate<Vec<ProtocolCatalogEntry>>>>,
    wallet_gates: Mutex<HashMap<String, VecDeque<Gate<WalletAnalysisPayload>>>>,
    detail_gates: Mutex<HashMap<String, VecDeque<Gate<ProtocolDetail>>>>,
}

impl FakeClient {
    pub(crate) fn with_catalog(entries: Vec<ProtocolCatalogEntry>) -> Self {
        let client = Self::default();
        *client.catalog.lock().unwrap() = entries;
        client
    }

    pub(crate) fn fail_catalog(&self, status: u16) {
        *self.catalog_status.lock().unwrap() = Some(status);
    }

    /// Gates apply to catalog calls in the order they are made.
    pub(crate) fn gate_catalog(&self) -> Release<Vec<ProtocolCatalogEntry>> {
        let (tx, rx) = oneshot::channel();
        self.catalog_gates.lock().unwrap().push_back(rx);
        tx
    }

    pub(crate) fn gate_wallet(&self, address: &str) -> Release<WalletAnalysisPayload> {
        let (tx, rx) = oneshot::channel();
        self.wallet_gates
            .lock()
            .unwrap()
            .entry(address.to_string())
            .or_default()
            .push_back(rx);
        tx
    }

    pub(crate) fn gate_detail(&self, protocol_id: &str) -> Release<ProtocolDetail> {
        let (tx, rx) = oneshot::channel();
        self.detail_gates
            .lock()
            .unwrap()
            .entry(protocol_id.to_string())
            .or_default()
            .push_back(rx);
        tx
    }

    pub(crate) fn wallet_calls(&self) -> Vec<String> {
        self.wallet_calls.lock().unwrap().clone()
    }

    pub(crate) fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }

    pub(crate) fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }
}

async fn wait<T>(gate: Gate<T>) -> Result<T> {
    gate.await
        .unwrap_or_else(|_| Err(ClientError::Transport("gate dropped".into())))
}

#[async_trait]
impl RemoteAnalysisClient for FakeClient {
    async fn analyze_wallet(&self, wallet_address: &str) -> Result<WalletAnalysisPayload> {
        self.wallet_calls.lock().unwrap().push(wallet_address.to_string());
        let gate = self
            .wallet_gates
            .lock()
            .unwrap()
            .get_mut(wallet_address)
            .and_then(|queue| queue.pop_front());
        match gate {
            Some(gate) => wait(gate).await,
            None => Ok(wallet_payload(wallet_address)),
        }
    }

    async fn list_protocols(&self) -> Result<Vec<ProtocolCatalogEntry>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.catalog_gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            return wait(gate).await;
        }
        let status = *self.catalog_status.lock().unwrap();
        match status {
            Some(code) => Err(ClientError::Status(code)),
            None => Ok(self.catalog.lock().unwrap().clone()),
        }
    }

    async fn analyze_protocol(&self, protocol_id: &str) -> Result<ProtocolDetail> {
        self.detail_calls.lock().unwrap().push(protocol_id.to_string());
        let gate = self
            .detail_gates
            .lock()
            .unwrap()
            .get_mut(protocol_id)
            .and_then(|queue| queue.pop_front());
        match gate {
            Some(gate) => wait(gate).await,
            None => Ok(detail_for(protocol_id)),
        }
    }
}
