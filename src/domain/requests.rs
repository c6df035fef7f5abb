//! Outbound request models: analysis kinds, the free-form JSON input, the
//! recommendations query form and the chat message.

use serde::Serialize;
use serde_json::{Value, json};
use strum_macros::EnumIter;

use crate::config::API;
use crate::domain::position::QueryContext;
use crate::domain::tokens::{Chain, Exchange, token_address};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum AnalysisKind {
    #[default]
    General,
    Position,
    PositionPlans,
    TopEarning,
}

impl AnalysisKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            AnalysisKind::General => API.endpoints.analyze,
            AnalysisKind::Position => API.endpoints.analyze_position,
            AnalysisKind::PositionPlans => API.endpoints.analyze_position_plans,
            AnalysisKind::TopEarning => API.endpoints.analyze_top_earning,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnalysisKind::General => "General Analysis",
            AnalysisKind::Position => "Position Analysis",
            AnalysisKind::PositionPlans => "Position Plans",
            AnalysisKind::TopEarning => "Top Earning Analysis",
        }
    }

    /// Pre-filled example body for the "use test data" button
    pub fn sample_payload(self) -> Value {
        match self {
            AnalysisKind::General => json!({
                "company": "TechCorp",
                "revenue": 1_000_000,
                "expenses": 750_000,
                "profit": 250_000,
                "growth_rate": 15.5
            }),
            AnalysisKind::Position | AnalysisKind::PositionPlans => json!({
                "poolAddress": "0xc473e2aee3441bf9240be85eb122abb059a3b57c",
                "token0": "0x82af49447d8a07e3bd95bd0d56f35241523fbab1",
                "token1": "0xaf88d065e77c8cc2239327c5edb3a432268e5831",
                "fee": 3000,
                "symbols": { "token0": "WETH", "token1": "USDC" },
                "ticks": { "current": -193256, "lower": -193500, "upper": -193080 },
                "prices": {
                    "currentToken1PerToken0": 4.049656458807099e-21,
                    "lowerToken1PerToken0": 3.952045418888768e-21,
                    "upperToken1PerToken0": 4.121557692428058e-21
                }
            }),
            AnalysisKind::TopEarning => json!({
                "success": true,
                "total_count": 169685,
                "data": [{
                    "in_range": true,
                    "pool": "0x73b14a78a0d396c521f954532d43fd5ffe385216",
                    "age": 0.5724537037,
                    "has_withdrawn": false,
                    "performance": {
                        "hodl": {
                            "pnl": "31.70938926133217745890233504237",
                            "roi": "0.4937452806",
                            "apr": "194610.5770",
                            "pool_pnl": "31.723435257372472881964744",
                            "pool_roi": "0.4939639901",
                            "pool_apr": "194808.0124",
                            "il": "-0.000437873613122719574911",
                            "fee_apr": "194699.4691"
                        }
                    }
                }]
            }),
        }
    }

    pub fn sample_text(self) -> String {
        pretty_json(&self.sample_payload())
    }
}

/// Parse the text area of an analysis panel.
///
/// The error carries the parser message only; panels add their own prefix.
pub fn parse_json_input(input: &str) -> Result<Value, String> {
    serde_json::from_str::<Value>(input.trim()).map_err(|e| e.to_string())
}

pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    /// `None` for blank input
    pub fn new(message: &str) -> Option<Self> {
        let message = message.trim();
        (!message.is_empty()).then(|| Self {
            message: message.to_string(),
        })
    }

    pub fn to_value(&self) -> Value {
        json!({ "message": self.message })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    MissingToken,
    SameToken,
    /// A token has no deployment on the selected chain
    UnknownAddress,
}

impl QueryError {
    pub fn message(self) -> &'static str {
        match self {
            QueryError::MissingToken => "Please select both tokens",
            QueryError::SameToken => "Please select different tokens",
            QueryError::UnknownAddress => "Selected token is not available on this network",
        }
    }
}

/// State of the recommendations query form
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub token1: Option<String>,
    pub token2: Option<String>,
    pub network: Chain,
    pub exchange: Exchange,
    pub weight_apr: f64,
    pub weight_roi: f64,
    pub weight_volume: f64,
    pub age_from_days: f64,
    pub age_to_days: f64,
}

impl Default for RecommendationQuery {
    fn default() -> Self {
        Self {
            token1: None,
            token2: None,
            network: Chain::default(),
            exchange: Exchange::default(),
            weight_apr: API.recommendations.weight_apr,
            weight_roi: API.recommendations.weight_roi,
            weight_volume: API.recommendations.weight_volume,
            age_from_days: API.recommendations.age_from_days,
            age_to_days: API.recommendations.age_to_days,
        }
    }
}

impl RecommendationQuery {
    pub fn sample() -> Self {
        Self {
            token1: Some(API.recommendations.token1.to_string()),
            token2: Some(API.recommendations.token2.to_string()),
            ..Self::default()
        }
    }

    pub fn reset_to_sample(&mut self) {
        *self = Self::sample();
    }

    /// Token selections are only meaningful per chain.
    pub fn set_network(&mut self, network: Chain) {
        if network != self.network {
            self.network = network;
            self.token1 = None;
            self.token2 = None;
        }
    }

    pub fn swap_tokens(&mut self) {
        std::mem::swap(&mut self.token1, &mut self.token2);
    }

    pub fn select_pair(&mut self, a: &str, b: &str) {
        self.token1 = Some(a.to_string());
        self.token2 = Some(b.to_string());
    }

    /// Contract addresses of both tokens on the selected chain
    pub fn validate(&self) -> Result<(&'static str, &'static str), QueryError> {
        let (Some(a), Some(b)) = (self.token1.as_deref(), self.token2.as_deref()) else {
            return Err(QueryError::MissingToken);
        };
        if a == b {
            return Err(QueryError::SameToken);
        }
        let address_a = token_address(a, self.network).ok_or(QueryError::UnknownAddress)?;
        let address_b = token_address(b, self.network).ok_or(QueryError::UnknownAddress)?;
        Ok((address_a, address_b))
    }

    /// Query string for `GET /positions/recommendations`
    pub fn query_params(&self) -> Result<Vec<(&'static str, String)>, QueryError> {
        let (address_a, address_b) = self.validate()?;
        Ok(vec![
            ("token1", address_a.to_string()),
            ("token2", address_b.to_string()),
            ("network", self.network.value().to_string()),
            ("exchange", self.exchange.value().to_string()),
            ("limit", API.recommendations.limit.to_string()),
            ("weight_apr", self.weight_apr.to_string()),
            ("weight_roi", self.weight_roi.to_string()),
            ("weight_volume", self.weight_volume.to_string()),
            ("age_from", self.age_from_days.to_string()),
            ("age_to", self.age_to_days.to_string()),
        ])
    }

    /// What to send for AI analysis when the response lacks its own metadata
    pub fn context(&self) -> QueryContext {
        let address = |symbol: &Option<String>| {
            symbol
                .as_deref()
                .and_then(|s| token_address(s, self.network))
                .unwrap_or_default()
                .to_string()
        };
        QueryContext {
            network: self.network.value().to_string(),
            exchange: self.exchange.value().to_string(),
            token0: address(&self.token1),
            token1: address(&self.token2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn invalid_json_reports_parser_message() {
        let err = parse_json_input("{ not json").unwrap_err();
        assert!(!err.is_empty());
        assert!(parse_json_input("  {\"a\": 1}  ").is_ok());
    }

    #[test]
    fn every_sample_parses_back() {
        for kind in AnalysisKind::iter() {
            let parsed = parse_json_input(&kind.sample_text()).unwrap();
            assert_eq!(parsed, kind.sample_payload(), "{:?}", kind);
        }
    }

    #[test]
    fn blank_chat_is_ignored() {
        assert_eq!(ChatRequest::new("   \n"), None);
        let req = ChatRequest::new(" hi ").unwrap();
        assert_eq!(req.to_value(), json!({ "message": "hi" }));
    }

    #[test]
    fn validation_messages() {
        let mut query = RecommendationQuery::default();
        assert_eq!(query.validate(), Err(QueryError::MissingToken));

        query.select_pair("WETH", "WETH");
        assert_eq!(query.validate(), Err(QueryError::SameToken));

        query.select_pair("WETH", "OP");
        assert_eq!(query.validate(), Err(QueryError::UnknownAddress));

        query.select_pair("WETH", "USDC");
        assert!(query.validate().is_ok());
    }

    #[test]
    fn network_change_clears_tokens() {
        let mut query = RecommendationQuery::sample();
        query.set_network(Chain::Arbitrum);
        assert!(query.token1.is_some());

        query.set_network(Chain::Base);
        assert_eq!(query.token1, None);
        assert_eq!(query.token2, None);
    }

    #[test]
    fn query_params_carry_fixed_limit_and_addresses() {
        let mut query = RecommendationQuery::sample();
        query.swap_tokens();
        let params = query.query_params().unwrap();

        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("limit"), Some("10"));
        assert_eq!(get("network"), Some("arbitrum"));
        assert_eq!(get("token1"), token_address("USDC", Chain::Arbitrum));
        assert_eq!(get("weight_volume"), Some("0.2"));
    }
}
