//! Plain-text report for the recommendations response, plus the small cell
//! formatters the positions table shares with it.
//!
//! Everything here is pure: `Recommendations` in, `String` out.

use std::fmt::Display;

use serde_json::Value;

use crate::config::API;
use crate::domain::position::{PositionRecord, Recommendations, ResponseShape};
use crate::domain::requests::pretty_json;
use crate::domain::units::{Unit, UnitConvention};

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN: &str = "Unknown";
pub const ERROR_PREFIX: &str = "ERROR: ";
/// Invalid JSON input, and transport failures on the general analysis panel
pub const INPUT_ERROR_PREFIX: &str = "Error: ";

const RULE_WIDTH: usize = 80;

pub fn format_recommendations(rec: &Recommendations) -> String {
    if let Some(error) = &rec.error {
        return format!("{}{}\n{}", ERROR_PREFIX, error, pretty_json(&rec.raw));
    }

    let convention = rec.convention();
    let mut out = String::new();

    out.push_str(&format!("FOUND {} UNISWAP POSITIONS\n", rec.total_positions));
    out.push_str(&format!("NETWORK: {}\n", upper_or_unknown(rec.network.as_deref())));
    out.push_str(&format!("POOL: {}\n", upper_or_unknown(rec.exchange.as_deref())));

    if let Some(weights) = &rec.scoring_weights {
        let weight = |w: Option<f64>| cell_ratio(w, convention.weights, 0);
        out.push_str("SCORING WEIGHTS:\n");
        out.push_str(&format!("  - APR: {}\n", weight(weights.apr)));
        out.push_str(&format!("  - ROI: {}\n", weight(weights.roi)));
        out.push_str(&format!("  - Volume: {}\n\n", weight(weights.volume)));
    }

    if let Some(market) = rec.market_data.as_ref().and_then(Value::as_object) {
        let scalars: Vec<_> = market
            .iter()
            .filter(|(_, v)| !v.is_object() && !v.is_array())
            .collect();
        if !scalars.is_empty() {
            out.push_str("MARKET DATA:\n");
            for (key, value) in scalars {
                out.push_str(&format!("  - {}: {}\n", key, scalar_text(value)));
            }
            out.push('\n');
        }
    }

    match rec.shape {
        ResponseShape::Flat => {
            if rec.positions.is_empty() {
                write_empty(&mut out, "NO POSITIONS FOUND", &rec.raw);
            } else {
                out.push_str("TOP UNISWAP POSITIONS:\n");
                write_rule(&mut out);
                write_positions(&mut out, &rec.positions, &convention);
            }
        }
        ResponseShape::Ranked => {
            if !rec.has_any_position() {
                write_empty(&mut out, "NO MATCHING POSITIONS FOUND", &rec.raw);
            }
            for ranking in rec.rankings.iter().filter(|r| !r.positions.is_empty()) {
                out.push_str(&format!("RANKING: {}", ranking.name.to_uppercase()));
                if let Some(description) = &ranking.description {
                    out.push_str(&format!(" ({})", description));
                }
                out.push('\n');
                write_rule(&mut out);
                write_positions(&mut out, &ranking.positions, &convention);
            }
        }
    }

    out
}

fn write_empty(out: &mut String, banner: &str, raw: &Value) {
    out.push_str(&format!("\n{}\n", banner));
    out.push_str(&format!("Response: {}\n", pretty_json(raw)));
}

fn write_rule(out: &mut String) {
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\n");
}

fn write_positions(out: &mut String, positions: &[PositionRecord], convention: &UnitConvention) {
    for (index, pos) in positions
        .iter()
        .take(API.recommendations.max_rows)
        .enumerate()
    {
        out.push_str(&format!("{}. {}\n", index + 1, pos.report_label(index)));

        if let Some(score) = pos.weighted_score {
            out.push_str(&format!("   Score: {}\n", convention.score.tag(score).format(2)));
        }
        if let Some(apr) = pos.apr {
            out.push_str(&format!("   APR: {}\n", convention.apr.tag(apr).format(2)));
        }
        if let Some(roi) = pos.roi {
            out.push_str(&format!("   ROI: {}\n", convention.roi.tag(roi).format(2)));
        }
        if let Some(fee_tier) = &pos.fee_tier {
            out.push_str(&format!("   Fee Tier: {}\n", fee_tier));
        }
        if let (Some(lower), Some(upper)) = (pos.tick_lower, pos.tick_upper) {
            out.push_str(&format!("   Ticks: {} to {}\n", lower, upper));
        }
        if let Some(in_range) = pos.in_range {
            out.push_str(&format!("   In Range: {}\n", if in_range { "Yes" } else { "No" }));
        }
        if let Some(age) = pos.age_days {
            out.push_str(&format!("   Age: {:.1} days\n", age));
        }
        if let Some(tvl) = pos.tvl {
            out.push_str(&format!("   TVL: ${}\n", format_locale(tvl)));
        }
        let sub_scores: Vec<String> = pos
            .sub_scores
            .iter()
            .map(|(name, v)| format!("{} {}", name, convention.score.tag(v).format(2)))
            .collect();
        if !sub_scores.is_empty() {
            out.push_str(&format!("   Sub-scores: {}\n", sub_scores.join(" | ")));
        }
        out.push('\n');
    }
}

fn upper_or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN).to_uppercase()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(format_locale).unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

/// en-US style number: thousands separators, at most three decimals.
pub fn format_locale(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Transport failure on the recommendations query, with the usual suspects.
pub fn transport_error_report(err: &impl Display) -> String {
    format!(
        "{}{}\n\nThis might be due to:\n1. Backend not running\n2. Invalid API response\n3. Network error",
        ERROR_PREFIX, err
    )
}

/// Text of a buffered `{result}` / `{error}` analysis response.
pub fn analysis_result_text(value: &Value, error_prefix: &str) -> Result<String, String> {
    match (value.get("error"), value.get("result")) {
        (Some(Value::String(error)), _) if !error.is_empty() => {
            Err(format!("{}{}", error_prefix, error))
        }
        (_, Some(Value::String(result))) => Ok(result.clone()),
        (_, Some(result)) if !result.is_null() => Ok(pretty_json(result)),
        _ => Ok(pretty_json(value)),
    }
}

/// One-word backend status for the top bar
pub fn health_label(value: &Value) -> String {
    value
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("ok")
        .to_string()
}

// Table cells

pub fn cell_ratio(value: Option<f64>, unit: Unit, decimals: usize) -> String {
    value
        .map(|v| unit.tag(v).format(decimals))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn cell_tick(value: Option<i64>) -> String {
    value
        .map(|t| t.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn cell_text(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

pub fn cell_tvl(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format!("${}", format_locale(v)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Only shown when the backend reports it
pub fn cell_pnl(value: Option<f64>) -> Option<String> {
    value.map(|v| format!("${}", format_locale(v)))
}

pub fn cell_age(value: Option<f64>) -> String {
    value
        .map(|age| format!("{:.1} days", age))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn cell_in_range(value: Option<bool>) -> String {
    match value {
        Some(true) => "Yes ✓".to_string(),
        Some(false) => "No ✗".to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pnl_cell_only_when_present() {
        assert_eq!(cell_pnl(Some(31.709389)), Some("$31.709".to_string()));
        assert_eq!(cell_pnl(Some(-1250.0)), Some("$-1,250".to_string()));
        assert_eq!(cell_pnl(None), None);
    }

    #[test]
    fn locale_formatting() {
        assert_eq!(format_locale(1234.5), "1,234.5");
        assert_eq!(format_locale(1_000_000.0), "1,000,000");
        assert_eq!(format_locale(0.12345), "0.123");
        assert_eq!(format_locale(999.9996), "1,000");
        assert_eq!(format_locale(-98765.4321), "-98,765.432");
        assert_eq!(format_locale(-0.0001), "0");
        assert_eq!(format_locale(12.0), "12");
    }

    #[test]
    fn flat_report_layout() {
        let rec = Recommendations::from_value(json!({
            "total_positions": 25,
            "network": "arbitrum",
            "exchange": "uniswapv3",
            "scoring_weights": { "apr": 0.4, "roi": 0.4, "volume": 0.2 },
            "positions": [{
                "nft_id": 123,
                "weighted_score": 0.8766,
                "apr": 45.678,
                "roi": 3.2,
                "fee_tier": "500",
                "tick_lower": -200,
                "tick_upper": 200,
                "in_range": true,
                "age": 0.57,
                "underlying_value": 15234.5
            }]
        }));
        let report = format_recommendations(&rec);

        assert!(report.starts_with(
            "FOUND 25 UNISWAP POSITIONS\nNETWORK: ARBITRUM\nPOOL: UNISWAPV3\n"
        ));
        assert!(report.contains("SCORING WEIGHTS:\n  - APR: 40%\n  - ROI: 40%\n  - Volume: 20%\n\n"));
        assert!(report.contains(&format!("TOP UNISWAP POSITIONS:\n{}\n\n", "=".repeat(80))));
        assert!(report.contains("1. Position ID: 123\n   Score: 87.66%\n   APR: 45.68%\n   ROI: 3.20%\n"));
        assert!(report.contains("   Fee Tier: 500\n   Ticks: -200 to 200\n   In Range: Yes\n"));
        assert!(report.contains("   Age: 0.6 days\n   TVL: $15,234.5\n\n"));
    }

    #[test]
    fn missing_metadata_uses_placeholders() {
        let rec = Recommendations::from_value(json!({ "positions": [] }));
        let report = format_recommendations(&rec);
        assert!(report.starts_with("FOUND 0 UNISWAP POSITIONS\nNETWORK: UNKNOWN\nPOOL: UNKNOWN\n"));
        assert!(report.contains("NO POSITIONS FOUND"));
        assert!(report.contains("Response: {\n  \"positions\": []\n}"));
    }

    #[test]
    fn ranked_report_uses_fraction_convention() {
        let rec = Recommendations::from_value(json!({
            "rankings": {
                "apr": { "description": "Highest APR", "positions": [{ "id": "x", "apr": 0.1234 }] }
            }
        }));
        let report = format_recommendations(&rec);
        assert!(report.contains("RANKING: APR (Highest APR)\n"));
        assert!(report.contains("1. ID: x\n   APR: 12.34%\n"));
        assert!(!report.contains("NO MATCHING POSITIONS FOUND"));
    }

    #[test]
    fn ranked_empty_report() {
        let rec = Recommendations::from_value(json!({
            "rankings": { "overall": { "positions": [] } }
        }));
        assert!(format_recommendations(&rec).contains("NO MATCHING POSITIONS FOUND"));
    }

    #[test]
    fn error_report_has_pretty_payload() {
        let rec = Recommendations::from_value(json!({ "error": "no pool" }));
        assert_eq!(
            format_recommendations(&rec),
            "ERROR: no pool\n{\n  \"error\": \"no pool\"\n}"
        );
    }

    #[test]
    fn only_first_ten_positions_are_listed() {
        let positions: Vec<_> = (0..15).map(|i| json!({ "id": i })).collect();
        let rec = Recommendations::from_value(json!({ "positions": positions }));
        let report = format_recommendations(&rec);
        assert!(report.contains("10. ID: 9\n"));
        assert!(!report.contains("11. ID: 10\n"));
    }

    #[test]
    fn buffered_analysis_results() {
        assert_eq!(
            analysis_result_text(&json!({ "result": "fine" }), ERROR_PREFIX),
            Ok("fine".to_string())
        );
        assert_eq!(
            analysis_result_text(&json!({ "error": "quota" }), ERROR_PREFIX),
            Err("ERROR: quota".to_string())
        );
    }

    #[test]
    fn transport_report_lists_causes() {
        let report = transport_error_report(&"connection refused");
        assert!(report.starts_with("ERROR: connection refused\n\nThis might be due to:\n1. "));
        assert!(report.ends_with("3. Network error"));
    }

    #[test]
    fn table_cells() {
        assert_eq!(cell_tick(None), "N/A");
        assert_eq!(cell_tvl(Some(0.0)), "N/A");
        assert_eq!(cell_tvl(Some(2500.0)), "$2,500");
        assert_eq!(cell_in_range(Some(false)), "No ✗");
        assert_eq!(cell_ratio(Some(0.1234), Unit::Fraction, 2), "12.34%");
        assert_eq!(cell_age(Some(1.04)), "1.0 days");
    }
}
