//! Wire models returned by the remote analysis service
//!
//! Every type here is created from a successful response and held only in
//! transient controller state. Open enums (`Category`, `RiskLevel`, `Recommendation`) keep
//! unknown labels verbatim instead of failing the whole payload.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{check_score, UnderwriterError, UnderwriterResult};

// =============================================================================
// Shared enums
// =============================================================================

/// Protocol category. Catalog data is free-form, so unknown labels are kept in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Lending,
    Dex,
    LiquidStaking,
    Stablecoin,
    Restaking,
    YieldTrading,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Lending => "Lending",
            Category::Dex => "DEX",
            Category::LiquidStaking => "Liquid Staking",
            Category::Stablecoin => "Stablecoin",
            Category::Restaking => "Restaking",
            Category::YieldTrading => "Yield Trading",
            Category::Other(label) => label,
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        match label {
            "Lending" => Category::Lending,
            "DEX" => Category::Dex,
            "Liquid Staking" => Category::LiquidStaking,
            "Stablecoin" => Category::Stablecoin,
            "Restaking" => Category::Restaking,
            "Yield Trading" => Category::YieldTrading,
            other => Category::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from(label.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall wallet risk level. Known levels match case-insensitively; anything
/// else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    Other(String),
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
            RiskLevel::Other(label) => label,
        }
    }
}

impl From<&str> for RiskLevel {
    fn from(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            "critical" => RiskLevel::Critical,
            _ => RiskLevel::Other(label.to_string()),
        }
    }
}

impl From<String> for RiskLevel {
    fn from(label: String) -> Self {
        RiskLevel::from(label.as_str())
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict attached to a protocol deep analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recommendation {
    LowRisk,
    AcceptableRisk,
    UseWithCaution,
    Avoid,
    Other(String),
}

impl Recommendation {
    pub fn as_str(&self) -> &str {
        match self {
            Recommendation::LowRisk => "Low Risk",
            Recommendation::AcceptableRisk => "Acceptable Risk",
            Recommendation::UseWithCaution => "Use with Caution",
            Recommendation::Avoid => "Avoid",
            Recommendation::Other(label) => label,
        }
    }
}

impl From<&str> for Recommendation {
    fn from(label: &str) -> Self {
        match label {
            "Low Risk" => Recommendation::LowRisk,
            "Acceptable Risk" => Recommendation::AcceptableRisk,
            "Use with Caution" => Recommendation::UseWithCaution,
            "Avoid" => Recommendation::Avoid,
            other => Recommendation::Other(other.to_string()),
        }
    }
}

impl From<String> for Recommendation {
    fn from(label: String) -> Self {
        Recommendation::from(label.as_str())
    }
}

impl From<Recommendation> for String {
    fn from(rec: Recommendation) -> Self {
        rec.as_str().to_string()
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Wallet Analysis
// =============================================================================

/// POST /analyze-wallet request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletAnalysisRequest {
    pub wallet_address: String,
}

/// POST /analyze-wallet response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletAnalysisPayload {
    /// Analyzed wallet address, as echoed by the service
    pub wallet: String,

    pub chain: String,

    /// Aggregated value of all positions in USD
    pub total_value_usd: f64,

    /// Positions in the order the service returned them
    pub positions: Vec<Position>,

    #[serde(default)]
    pub position_count: usize,

    pub analysis: WalletAnalysis,

    #[serde(default)]
    pub analyzed_at: String,
}

impl WalletAnalysisPayload {
    /// Check score ranges and that `protocol_id` is usable as a render key.
    pub fn validate(&self) -> UnderwriterResult<()> {
        check_score("overall_risk_score", self.analysis.overall_risk_score)?;
        check_score("diversification_score", self.analysis.diversification_score)?;

        let mut seen = HashSet::with_capacity(self.positions.len());
        for position in &self.positions {
            check_score(&format!("{}.risk_score", position.protocol_id), position.risk_score)?;
            if !seen.insert(position.protocol_id.as_str()) {
                return Err(UnderwriterError::DuplicatePosition(position.protocol_id.clone()));
            }
        }
        Ok(())
    }
}

/// A single DeFi position held by the wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Display name, e.g. "Aave V3"
    pub protocol: String,
    pub protocol_id: String,
    pub category: Category,
    pub value_usd: f64,
    /// Percentage, e.g. 4.2 for 4.2%
    pub apy: f64,
    /// 0-100, may be fractional
    pub risk_score: f64,
    pub chain: String,
}

/// Risk summary computed by the service for a wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletAnalysis {
    pub overall_risk_level: RiskLevel,
    pub overall_risk_score: f64,
    pub summary: String,
    #[serde(default)]
    pub key_risks: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub diversification_score: f64,
    pub liquidation_risk: String,
}

// =============================================================================
// Protocol Catalog
// =============================================================================

/// GET /protocols response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub protocols: Vec<ProtocolCatalogEntry>,
}

impl CatalogResponse {
    /// Catalog ids are render keys and must be unique.
    pub fn validate(&self) -> UnderwriterResult<()> {
        let mut seen = HashSet::with_capacity(self.protocols.len());
        for entry in &self.protocols {
            check_score(&format!("{}.risk_score", entry.id), entry.risk_score)?;
            if !seen.insert(entry.id.as_str()) {
                return Err(UnderwriterError::InvalidPayload(format!(
                    "duplicate catalog id '{}'",
                    entry.id
                )));
            }
        }
        Ok(())
    }
}

/// Summary risk metrics for one known protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolCatalogEntry {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub chain: String,
    pub tvl_usd: f64,
    pub risk_score: f64,
    pub audit_count: u32,
    pub exploits: u32,
    pub age_days: u32,
    pub description: String,
    #[serde(default)]
    pub last_audit: Option<String>,
}

// =============================================================================
// Protocol Deep Analysis
// =============================================================================

/// POST /analyze-protocol request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolAnalysisRequest {
    pub protocol_id: String,
}

/// POST /analyze-protocol response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolDetail {
    pub protocol: ProtocolCatalogEntry,
    pub deep_analysis: ProtocolDeepAnalysis,
    #[serde(default)]
    pub analyzed_at: String,
}

impl ProtocolDetail {
    pub fn validate(&self) -> UnderwriterResult<()> {
        check_score("protocol.risk_score", self.protocol.risk_score)?;
        for (dimension, score) in self.deep_analysis.risk_breakdown.dimensions() {
            check_score(dimension.key(), score)?;
        }
        Ok(())
    }
}

/// Multi-dimensional risk breakdown for one protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolDeepAnalysis {
    pub risk_breakdown: RiskBreakdown,
    #[serde(default)]
    pub threat_vectors: Vec<String>,
    #[serde(default)]
    pub historical_incidents: Vec<String>,
    pub audit_assessment: String,
    pub recommendation: Recommendation,
    pub confidence: String,
}

/// The five fixed risk dimensions scored by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskDimension {
    SmartContract,
    Liquidity,
    Governance,
    Oracle,
    Economic,
}

impl RiskDimension {
    /// Render order
    pub const ALL: [RiskDimension; 5] = [
        RiskDimension::SmartContract,
        RiskDimension::Liquidity,
        RiskDimension::Governance,
        RiskDimension::Oracle,
        RiskDimension::Economic,
    ];

    /// Wire key
    pub fn key(&self) -> &'static str {
        match self {
            RiskDimension::SmartContract => "smart_contract",
            RiskDimension::Liquidity => "liquidity",
            RiskDimension::Governance => "governance",
            RiskDimension::Oracle => "oracle",
            RiskDimension::Economic => "economic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub smart_contract: f64,
    pub liquidity: f64,
    pub governance: f64,
    pub oracle: f64,
    pub economic: f64,
}

impl RiskBreakdown {
    pub fn score(&self, dimension: RiskDimension) -> f64 {
        match dimension {
            RiskDimension::SmartContract => self.smart_contract,
            RiskDimension::Liquidity => self.liquidity,
            RiskDimension::Governance => self.governance,
            RiskDimension::Oracle => self.oracle,
            RiskDimension::Economic => self.economic,
        }
    }

    /// All five scores in render order.
    pub fn dimensions(&self) -> [(RiskDimension, f64); 5] {
        RiskDimension::ALL.map(|d| (d, self.score(d)))
    }
}
