//! Position records and the normalized recommendations response.
//!
//! The recommendations endpoint has shipped three shapes for "the list of
//! candidate positions": `positions`, `position_recommendations`, and
//! `rankings.<name>.positions`. Everything is normalized here, once, right
//! after the JSON arrives; the formatter and the table only see
//! [`Recommendations`].

use serde_json::{Map, Value, json};

use crate::domain::units::{FLAT_RECOMMENDATIONS, RANKED_RECOMMENDATIONS, UnitConvention};

/// Ranking name used when the response has no `rankings` mapping
pub const DEFAULT_RANKING: &str = "top";

/// Ranking names preferred as the canonical list when only `rankings` is present
const AGGREGATE_RANKING_NAMES: &[&str] = &["aggregated", "overall", "combined", "weighted"];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubScores {
    pub apr: Option<f64>,
    pub roi: Option<f64>,
    pub volume: Option<f64>,
    pub age: Option<f64>,
}

impl SubScores {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        [
            ("APR", self.apr),
            ("ROI", self.roi),
            ("Volume", self.volume),
            ("Age", self.age),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionRecord {
    pub nft_id: Option<String>,
    pub id: Option<String>,
    pub pool: Option<String>,
    pub network: Option<String>,
    pub exchange: Option<String>,
    pub apr: Option<f64>,
    pub roi: Option<f64>,
    pub age_days: Option<f64>,
    pub tick_lower: Option<i64>,
    pub tick_upper: Option<i64>,
    pub fee_tier: Option<String>,
    pub in_range: Option<bool>,
    /// `underlying_value` on the wire
    pub tvl: Option<f64>,
    pub pnl: Option<f64>,
    pub weighted_score: Option<f64>,
    pub sub_scores: SubScores,
    /// Untouched source object, sent back as-is for AI analysis
    pub raw: Value,
}

impl PositionRecord {
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);

        Self {
            nft_id: text_field(obj, "nft_id"),
            id: text_field(obj, "id"),
            pool: text_field(obj, "pool"),
            network: text_field(obj, "network"),
            exchange: text_field(obj, "exchange"),
            apr: number_field(obj, "apr"),
            roi: number_field(obj, "roi"),
            age_days: number_field(obj, "age"),
            tick_lower: tick_field(obj, "tick_lower"),
            tick_upper: tick_field(obj, "tick_upper"),
            fee_tier: text_field(obj, "fee_tier").filter(|t| t != "0"),
            in_range: obj.get("in_range").and_then(Value::as_bool),
            tvl: number_field(obj, "underlying_value"),
            pnl: number_field(obj, "pnl"),
            weighted_score: number_field(obj, "weighted_score"),
            sub_scores: SubScores {
                apr: number_field(obj, "apr_score"),
                roi: number_field(obj, "roi_score"),
                volume: number_field(obj, "volume_score"),
                age: number_field(obj, "age_score"),
            },
            raw: value.clone(),
        }
    }

    /// NFT id, falling back to the generic id
    pub fn identifier(&self) -> Option<&str> {
        self.nft_id.as_deref().or(self.id.as_deref())
    }

    /// Heading used in the text report; `index` is zero-based.
    pub fn report_label(&self, index: usize) -> String {
        if let Some(nft_id) = &self.nft_id {
            format!("Position ID: {}", nft_id)
        } else if let Some(id) = &self.id {
            format!("ID: {}", id)
        } else {
            format!("Position #{}", index + 1)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoringWeights {
    pub apr: Option<f64>,
    pub roi: Option<f64>,
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingTable {
    pub name: String,
    pub description: Option<String>,
    pub positions: Vec<PositionRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `positions` or `position_recommendations`
    Flat,
    /// `rankings.<name>.positions`
    Ranked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub shape: ResponseShape,
    /// Canonical candidate list
    pub positions: Vec<PositionRecord>,
    /// Named rankings; a flat response gets a single [`DEFAULT_RANKING`] entry
    pub rankings: Vec<RankingTable>,
    pub total_positions: u64,
    pub network: Option<String>,
    pub exchange: Option<String>,
    pub token0: Option<String>,
    pub token1: Option<String>,
    pub scoring_weights: Option<ScoringWeights>,
    pub market_data: Option<Value>,
    pub error: Option<String>,
    pub raw: Value,
}

impl Recommendations {
    pub fn from_value(raw: Value) -> Self {
        let empty = Map::new();
        let obj = raw.as_object().unwrap_or(&empty);

        let flat_list = obj
            .get("positions")
            .or_else(|| obj.get("position_recommendations"))
            .and_then(Value::as_array)
            .map(|list| list.iter().map(PositionRecord::from_value).collect::<Vec<_>>());

        let ranked = obj.get("rankings").and_then(Value::as_object).map(|rankings| {
            rankings
                .iter()
                .map(|(name, entry)| RankingTable {
                    name: name.clone(),
                    description: entry
                        .get("description")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    positions: entry
                        .get("positions")
                        .and_then(Value::as_array)
                        .map(|list| list.iter().map(PositionRecord::from_value).collect())
                        .unwrap_or_default(),
                })
                .collect::<Vec<_>>()
        });

        let (shape, positions, rankings) = match (flat_list, ranked) {
            (flat, Some(rankings)) => {
                let positions = flat.unwrap_or_else(|| canonical_from_rankings(&rankings));
                (ResponseShape::Ranked, positions, rankings)
            }
            (flat, None) => {
                let positions = flat.unwrap_or_default();
                let rankings = vec![RankingTable {
                    name: DEFAULT_RANKING.to_string(),
                    description: None,
                    positions: positions.clone(),
                }];
                (ResponseShape::Flat, positions, rankings)
            }
        };

        let total_positions = obj
            .get("total_positions")
            .and_then(Value::as_u64)
            .filter(|n| *n > 0)
            .unwrap_or(positions.len() as u64);

        let scoring_weights = obj
            .get("scoring_weights")
            .and_then(Value::as_object)
            .map(|w| ScoringWeights {
                apr: number_field(w, "apr"),
                roi: number_field(w, "roi"),
                volume: number_field(w, "volume"),
            });

        Self {
            shape,
            positions,
            rankings,
            total_positions,
            network: text_field(obj, "network"),
            exchange: text_field(obj, "exchange"),
            token0: text_field(obj, "token0"),
            token1: text_field(obj, "token1"),
            scoring_weights,
            market_data: obj.get("market_data").filter(|v| !v.is_null()).cloned(),
            error: obj.get("error").and_then(error_text),
            raw,
        }
    }

    pub fn convention(&self) -> UnitConvention {
        match self.shape {
            ResponseShape::Flat => FLAT_RECOMMENDATIONS,
            ResponseShape::Ranked => RANKED_RECOMMENDATIONS,
        }
    }

    pub fn ranking(&self, name: &str) -> Option<&RankingTable> {
        self.rankings.iter().find(|r| r.name == name)
    }

    pub fn has_any_position(&self) -> bool {
        !self.positions.is_empty() || self.rankings.iter().any(|r| !r.positions.is_empty())
    }

    /// Body for `/positions/recommendations/analyze`. Response-level
    /// metadata wins over the values the user submitted.
    pub fn analysis_payload(&self, target: AnalysisTarget<'_>, fallback: &QueryContext) -> Value {
        let network = self.network.clone().unwrap_or_else(|| fallback.network.clone());
        let exchange = self.exchange.clone().unwrap_or_else(|| fallback.exchange.clone());
        let token0 = self.token0.clone().unwrap_or_else(|| fallback.token0.clone());
        let token1 = self.token1.clone().unwrap_or_else(|| fallback.token1.clone());

        match target {
            AnalysisTarget::Single(position) => json!({
                "position": position.raw,
                "network": network,
                "exchange": exchange,
                "token0": token0,
                "token1": token1,
            }),
            AnalysisTarget::All(positions) => json!({
                "positions": positions.iter().map(|p| p.raw.clone()).collect::<Vec<_>>(),
                "network": network,
                "exchange": exchange,
                "token0": token0,
                "token1": token1,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum AnalysisTarget<'a> {
    Single(&'a PositionRecord),
    All(&'a [PositionRecord]),
}

/// What the user asked for, used when the response omits its own metadata
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryContext {
    pub network: String,
    pub exchange: String,
    pub token0: String,
    pub token1: String,
}

fn canonical_from_rankings(rankings: &[RankingTable]) -> Vec<PositionRecord> {
    AGGREGATE_RANKING_NAMES
        .iter()
        .find_map(|preferred| rankings.iter().find(|r| r.name == *preferred))
        .or_else(|| rankings.first())
        .map(|r| r.positions.clone())
        .unwrap_or_default()
}

fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Numbers arrive either as JSON numbers or as decimal strings.
fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn tick_field(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_field_extraction() {
        let record = PositionRecord::from_value(&json!({
            "nft_id": 4242,
            "apr": "194610.5770",
            "roi": 12.5,
            "age": 0.5724537037,
            "tick_lower": -193500,
            "tick_upper": "-193080",
            "fee_tier": 3000,
            "in_range": true,
            "underlying_value": "1234.5",
            "weighted_score": 0.81,
            "volume_score": 0.3
        }));

        assert_eq!(record.identifier(), Some("4242"));
        assert_eq!(record.apr, Some(194610.577));
        assert_eq!(record.tick_upper, Some(-193080));
        assert_eq!(record.fee_tier.as_deref(), Some("3000"));
        assert_eq!(record.tvl, Some(1234.5));
        assert_eq!(record.sub_scores.volume, Some(0.3));
        assert_eq!(record.sub_scores.iter().count(), 1);
    }

    #[test]
    fn identifier_fallbacks() {
        let with_id = PositionRecord::from_value(&json!({ "id": "abc" }));
        assert_eq!(with_id.report_label(0), "ID: abc");

        let anonymous = PositionRecord::from_value(&json!({ "apr": 1.0 }));
        assert_eq!(anonymous.identifier(), None);
        assert_eq!(anonymous.report_label(4), "Position #5");

        let not_an_object = PositionRecord::from_value(&json!("garbage"));
        assert_eq!(not_an_object.apr, None);
    }

    #[test]
    fn flat_shapes_normalize_to_default_ranking() {
        let legacy = Recommendations::from_value(json!({
            "position_recommendations": [{ "id": 1 }, { "id": 2 }],
            "network": "arbitrum"
        }));
        assert_eq!(legacy.shape, ResponseShape::Flat);
        assert_eq!(legacy.positions.len(), 2);
        assert_eq!(legacy.total_positions, 2);
        assert_eq!(legacy.rankings.len(), 1);
        assert_eq!(legacy.rankings[0].name, DEFAULT_RANKING);
        assert_eq!(legacy.convention(), FLAT_RECOMMENDATIONS);
    }

    #[test]
    fn ranked_shape_prefers_aggregate_list() {
        let ranked = Recommendations::from_value(json!({
            "rankings": {
                "apr": { "description": "By APR", "positions": [{ "id": "a1" }] },
                "overall": { "description": "Weighted", "positions": [{ "id": "o1" }, { "id": "o2" }] }
            },
            "total_positions": 40
        }));
        assert_eq!(ranked.shape, ResponseShape::Ranked);
        assert_eq!(ranked.rankings.len(), 2);
        assert_eq!(ranked.positions.len(), 2);
        assert_eq!(ranked.positions[0].identifier(), Some("o1"));
        assert_eq!(ranked.total_positions, 40);
        assert_eq!(
            ranked.ranking("apr").and_then(|r| r.description.as_deref()),
            Some("By APR")
        );
    }

    #[test]
    fn error_field_is_captured() {
        let failed = Recommendations::from_value(json!({ "error": "pool not indexed" }));
        assert_eq!(failed.error.as_deref(), Some("pool not indexed"));
        assert!(!failed.has_any_position());
    }

    #[test]
    fn analysis_payload_prefers_response_metadata() {
        let rec = Recommendations::from_value(json!({
            "positions": [{ "nft_id": 7, "apr": 10.0 }],
            "network": "base"
        }));
        let fallback = QueryContext {
            network: "arbitrum".into(),
            exchange: "uniswapv3".into(),
            token0: "0xaaa".into(),
            token1: "0xbbb".into(),
        };

        let single = rec.analysis_payload(AnalysisTarget::Single(&rec.positions[0]), &fallback);
        assert_eq!(single["position"]["nft_id"], json!(7));
        assert_eq!(single["network"], json!("base"));
        assert_eq!(single["exchange"], json!("uniswapv3"));
        assert!(single.get("positions").is_none());

        let all = rec.analysis_payload(AnalysisTarget::All(&rec.positions), &fallback);
        assert_eq!(all["positions"].as_array().map(Vec::len), Some(1));
        assert_eq!(all["token1"], json!("0xbbb"));
    }
}
