//! Presentation mapping
//!
//! Pure functions from scores and labels to the bands, glyphs and strings a
//! view renders. Everything here is total: unknown input maps to a default.

use std::fmt;

use crate::models::{Category, Recommendation, RiskDimension};

/// Severity bucket derived from a 0-100 score. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskBand {
    Low,
    Medium,
    Elevated,
    Critical,
}

impl RiskBand {
    /// Fixed colour token for the band.
    pub fn color(&self) -> &'static str {
        match self {
            RiskBand::Low => "#22c55e",
            RiskBand::Medium => "#eab308",
            RiskBand::Elevated => "#f97316",
            RiskBand::Critical => "#ef4444",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::Elevated => "elevated",
            RiskBand::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a risk score to its band.
///
/// Scores are clamped to 0-100 first, so the mapping is total. NaN is treated
/// as the most severe band.
pub fn risk_band(score: f64) -> RiskBand {
    if score.is_nan() {
        return RiskBand::Critical;
    }
    let score = score.clamp(0.0, 100.0);
    if score < 25.0 {
        RiskBand::Low
    } else if score < 50.0 {
        RiskBand::Medium
    } else if score < 75.0 {
        RiskBand::Elevated
    } else {
        RiskBand::Critical
    }
}

/// Colour token for a score.
pub fn risk_color(score: f64) -> &'static str {
    risk_band(score).color()
}

/// Badge class shared by wallet risk levels and protocol recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeverityClass {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            SeverityClass::Low => "badge-low",
            SeverityClass::Medium => "badge-medium",
            SeverityClass::High => "badge-high",
            SeverityClass::Critical => "badge-critical",
        }
    }
}

/// Map a recommendation label to a badge. Unknown labels are medium severity.
pub fn recommendation_band(recommendation: &str) -> SeverityClass {
    match Recommendation::from(recommendation) {
        Recommendation::LowRisk => SeverityClass::Low,
        Recommendation::AcceptableRisk => SeverityClass::Medium,
        Recommendation::UseWithCaution => SeverityClass::High,
        Recommendation::Avoid => SeverityClass::Critical,
        Recommendation::Other(_) => SeverityClass::Medium,
    }
}

/// Map a wallet risk level label (any case) to a badge. Unknown labels are medium severity.
pub fn risk_level_badge(level: &str) -> SeverityClass {
    match level.trim().to_lowercase().as_str() {
        "low" => SeverityClass::Low,
        "medium" => SeverityClass::Medium,
        "high" => SeverityClass::High,
        "critical" => SeverityClass::Critical,
        _ => SeverityClass::Medium,
    }
}

const DEFAULT_CATEGORY_ICON: &str = "⚙️";

/// Glyph for a category label. Never fails; unknown categories get a gear.
pub fn category_icon(category: &str) -> &'static str {
    match Category::from(category) {
        Category::Lending => "🏦",
        Category::Dex => "🔄",
        Category::LiquidStaking => "💎",
        Category::Stablecoin => "💵",
        Category::Restaking => "🔁",
        Category::YieldTrading => "📈",
        Category::Other(_) => DEFAULT_CATEGORY_ICON,
    }
}

/// Glyph for a wallet position. Positions use a shorter table than catalog
/// cards and fall back to a chart, so Restaking shows 📈 here.
pub fn position_icon(category: &str) -> &'static str {
    match Category::from(category) {
        Category::Lending => "🏦",
        Category::Dex => "🔄",
        Category::LiquidStaking => "💎",
        Category::Stablecoin => "💵",
        _ => "📈",
    }
}

/// Compact USD amount for TVL figures.
///
/// - `>= 1e9`: `$X.YB` with one decimal
/// - `>= 1e6`: `$XM` rounded to an integer
/// - otherwise a grouped whole-dollar amount (`$12,345`)
///
/// Halves round away from zero.
pub fn format_currency_compact(n: f64) -> String {
    if n >= 1_000_000_000.0 {
        let tenths = (n / 100_000_000.0).round();
        format!("${:.1}B", tenths / 10.0)
    } else if n >= 1_000_000.0 {
        format!("${:.0}M", (n / 1_000_000.0).round())
    } else {
        format!("${}", group_thousands(&format!("{:.0}", n.round())))
    }
}

/// Full USD amount with grouping and two decimals (`$1,234.56`).
pub fn format_usd_full(n: f64) -> String {
    let fixed = format!("{:.2}", (n * 100.0).round() / 100.0);
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("${}.{}", group_thousands(whole), cents)
}

/// Insert `,` every three digits of an integer string, keeping a leading sign.
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

/// Shortened address for example buttons: first ten characters and an ellipsis.
pub fn short_address(address: &str) -> String {
    match address.char_indices().nth(10) {
        Some((idx, _)) => format!("{}…", &address[..idx]),
        None => address.to_string(),
    }
}

/// Human label for a breakdown dimension (`smart contract`).
pub fn dimension_label(dimension: RiskDimension) -> String {
    dimension.key().replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_band_boundaries() {
        assert_eq!(risk_band(24.0), RiskBand::Low);
        assert_eq!(risk_band(25.0), RiskBand::Medium);
        assert_eq!(risk_band(49.0), RiskBand::Medium);
        assert_eq!(risk_band(50.0), RiskBand::Elevated);
        assert_eq!(risk_band(74.0), RiskBand::Elevated);
        assert_eq!(risk_band(75.0), RiskBand::Critical);
        assert_eq!(risk_band(100.0), RiskBand::Critical);
    }

    #[test]
    fn test_risk_band_is_monotonic() {
        let mut previous = risk_band(0.0);
        for score in 0..=100u8 {
            let band = risk_band(f64::from(score));
            assert!(band >= previous, "band dropped at {}", score);
            previous = band;
        }
    }

    #[test]
    fn test_risk_band_clamps_out_of_range() {
        assert_eq!(risk_band(-5.0), RiskBand::Low);
        assert_eq!(risk_band(250.0), RiskBand::Critical);
        assert_eq!(risk_band(f64::NAN), RiskBand::Critical);
    }

    #[test]
    fn test_risk_color_tokens() {
        assert_eq!(risk_color(10.0), "#22c55e");
        assert_eq!(risk_color(60.0), "#f97316");
    }

    #[test]
    fn test_format_currency_compact() {
        assert_eq!(format_currency_compact(1_500_000_000.0), "$1.5B");
        assert_eq!(format_currency_compact(24_100_000_000.0), "$24.1B");
        assert_eq!(format_currency_compact(2_300_000.0), "$2M");
        assert_eq!(format_currency_compact(680_000_000.0), "$680M");
        assert_eq!(format_currency_compact(999.0), "$999");
        assert_eq!(format_currency_compact(12_345.0), "$12,345");
        assert_eq!(format_currency_compact(0.0), "$0");
    }

    #[test]
    fn test_format_currency_compact_rounds_half_up() {
        assert_eq!(format_currency_compact(2_500_000.0), "$3M");
        assert_eq!(format_currency_compact(1_250_000_000.0), "$1.3B");
    }

    #[test]
    fn test_format_usd_full() {
        assert_eq!(format_usd_full(125430.5), "$125,430.50");
        assert_eq!(format_usd_full(0.0), "$0.00");
        assert_eq!(format_usd_full(999.999), "$1,000.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("-1000"), "-1,000");
    }

    #[test]
    fn test_category_icon_defaults() {
        assert_eq!(category_icon("Lending"), "🏦");
        assert_eq!(category_icon("Yield Trading"), "📈");
        assert_eq!(category_icon("Perp DEX"), "⚙️");
        assert_eq!(category_icon(""), "⚙️");
    }

    #[test]
    fn test_position_icon_falls_back_to_chart() {
        assert_eq!(position_icon("Stablecoin"), "💵");
        assert_eq!(position_icon("Restaking"), "📈");
        assert_eq!(position_icon("Perp DEX"), "📈");
        assert_eq!(category_icon("Restaking"), "🔁");
    }

    #[test]
    fn test_recommendation_band() {
        assert_eq!(recommendation_band("Low Risk"), SeverityClass::Low);
        assert_eq!(recommendation_band("Acceptable Risk"), SeverityClass::Medium);
        assert_eq!(recommendation_band("Use with Caution"), SeverityClass::High);
        assert_eq!(recommendation_band("Avoid"), SeverityClass::Critical);
        assert_eq!(recommendation_band("Maybe"), SeverityClass::Medium);
    }

    #[test]
    fn test_risk_level_badge_is_case_insensitive() {
        assert_eq!(risk_level_badge("HIGH"), SeverityClass::High);
        assert_eq!(risk_level_badge("critical").css_class(), "badge-critical");
        assert_eq!(risk_level_badge("unknown"), SeverityClass::Medium);
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            "0xd8dA6BF2…"
        );
        assert_eq!(short_address("0x12"), "0x12");
    }

    #[test]
    fn test_dimension_label() {
        assert_eq!(dimension_label(RiskDimension::SmartContract), "smart contract");
        assert_eq!(dimension_label(RiskDimension::Oracle), "oracle");
    }
}
