//! Render models
//!
//! Flattened, pre-formatted views of the wire models. A view layer draws these
//! directly; list order and keys are fixed so rendering is deterministic.

use crate::models::{
    ProtocolCatalogEntry, ProtocolDeepAnalysis, WalletAnalysisPayload,
};
use crate::presentation::{
    category_icon, dimension_label, format_currency_compact, format_usd_full, position_icon,
    recommendation_band, risk_band, risk_level_badge, RiskBand, SeverityClass,
};

/// One labelled figure in the wallet stats row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatTile {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow {
    /// Render key
    pub key: String,
    pub icon: &'static str,
    pub protocol: String,
    pub subtitle: String,
    pub value: String,
    pub apy: String,
    pub risk_score: f64,
    pub band: RiskBand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalletOverview {
    pub wallet: String,
    pub total_value: String,
    pub subtitle: String,
    pub badge: SeverityClass,
    pub badge_label: String,
    pub score: f64,
    pub band: RiskBand,
    pub summary: String,
    /// Positions, Diversification, Liquidation Risk, Risk Score
    pub stats: [StatTile; 4],
    pub positions: Vec<PositionRow>,
    pub key_risks: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Build the wallet result view. Scores are shown exactly as returned.
pub fn wallet_overview(payload: &WalletAnalysisPayload) -> WalletOverview {
    let analysis = &payload.analysis;
    let position_count = if payload.position_count == 0 {
        payload.positions.len()
    } else {
        payload.position_count
    };

    WalletOverview {
        wallet: payload.wallet.clone(),
        total_value: format_usd_full(payload.total_value_usd),
        subtitle: format!("{} active positions · {}", position_count, payload.chain),
        badge: risk_level_badge(analysis.overall_risk_level.as_str()),
        badge_label: format!("{} Risk", analysis.overall_risk_level),
        score: analysis.overall_risk_score,
        band: risk_band(analysis.overall_risk_score),
        summary: analysis.summary.clone(),
        stats: [
            StatTile {
                label: "Positions",
                value: position_count.to_string(),
            },
            StatTile {
                label: "Diversification",
                value: format!("{}/100", analysis.diversification_score),
            },
            StatTile {
                label: "Liquidation Risk",
                value: analysis.liquidation_risk.clone(),
            },
            StatTile {
                label: "Risk Score",
                value: format!("{}/100", analysis.overall_risk_score),
            },
        ],
        positions: payload
            .positions
            .iter()
            .map(|p| PositionRow {
                key: p.protocol_id.clone(),
                icon: position_icon(p.category.as_str()),
                protocol: p.protocol.clone(),
                subtitle: format!("{} · {}", p.category, p.chain),
                value: format_usd_full(p.value_usd),
                apy: format!("{}% APY", p.apy),
                risk_score: p.risk_score,
                band: risk_band(p.risk_score),
            })
            .collect(),
        key_risks: analysis.key_risks.clone(),
        recommendations: analysis.recommendations.clone(),
    }
}

/// Catalog card for one protocol
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolCard {
    pub key: String,
    pub icon: &'static str,
    pub name: String,
    pub subtitle: String,
    pub score_label: String,
    pub band: RiskBand,
    pub tvl: String,
    pub description: String,
    pub audits: String,
    pub exploits: String,
    pub age: String,
    /// Width of the risk bar in percent, clamped to 0-100
    pub bar_width: f64,
}

pub fn protocol_card(entry: &ProtocolCatalogEntry) -> ProtocolCard {
    ProtocolCard {
        key: entry.id.clone(),
        icon: category_icon(entry.category.as_str()),
        name: entry.name.clone(),
        subtitle: format!("{} · {}", entry.category, entry.chain),
        score_label: format!("{}/100", entry.risk_score),
        band: risk_band(entry.risk_score),
        tvl: format!("{} TVL", format_currency_compact(entry.tvl_usd)),
        description: entry.description.clone(),
        audits: format!("{} audits", entry.audit_count),
        exploits: format!("{} exploits", entry.exploits),
        age: format!("{}d old", entry.age_days),
        bar_width: entry.risk_score.clamp(0.0, 100.0),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub label: String,
    pub score: f64,
    pub band: RiskBand,
}

/// Expanded analysis panel under a catalog card
#[derive(Debug, Clone, PartialEq)]
pub struct DeepAnalysisPanel {
    pub recommendation: String,
    pub badge: SeverityClass,
    pub breakdown: Vec<BreakdownRow>,
    pub threat_vectors: Vec<String>,
    pub historical_incidents: Vec<String>,
    pub audit_assessment: String,
    pub confidence: String,
}

pub fn deep_analysis_panel(analysis: &ProtocolDeepAnalysis) -> DeepAnalysisPanel {
    DeepAnalysisPanel {
        recommendation: analysis.recommendation.to_string(),
        badge: recommendation_band(analysis.recommendation.as_str()),
        breakdown: analysis
            .risk_breakdown
            .dimensions()
            .iter()
            .map(|&(dimension, score)| BreakdownRow {
                label: dimension_label(dimension),
                score,
                band: risk_band(score),
            })
            .collect(),
        threat_vectors: analysis.threat_vectors.clone(),
        historical_incidents: analysis.historical_incidents.clone(),
        audit_assessment: analysis.audit_assessment.clone(),
        confidence: analysis.confidence.clone(),
    }
}
