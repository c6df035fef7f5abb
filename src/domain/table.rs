//! Display state for the ranked positions table: how it is sorted and which
//! row is expanded.
//!
//! Scores are never recomputed here. Sorting only changes display order; rows
//! keep the index they have in the server's ranking. Per-row state is always
//! scoped by ranking name so the same record in two rankings is two rows.

use std::cmp::Ordering;
use std::collections::HashMap;

use itertools::Itertools;
use strum_macros::EnumIter;

use crate::domain::position::PositionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum SortKey {
    /// Server rank
    Rank,
    TickLower,
    TickUpper,
    FeeTier,
    Apr,
    Roi,
    Tvl,
}

impl SortKey {
    pub fn header(self) -> &'static str {
        match self {
            SortKey::Rank => "#",
            SortKey::TickLower => "Lower Tick",
            SortKey::TickUpper => "Upper Tick",
            SortKey::FeeTier => "Fee Tier",
            SortKey::Apr => "APR",
            SortKey::Roi => "ROI",
            SortKey::Tvl => "TVL",
        }
    }

    fn value(self, index: usize, position: &PositionRecord) -> Option<f64> {
        match self {
            SortKey::Rank => Some(index as f64),
            SortKey::TickLower => position.tick_lower.map(|t| t as f64),
            SortKey::TickUpper => position.tick_upper.map(|t| t as f64),
            SortKey::FeeTier => position.fee_tier.as_deref().and_then(|f| f.parse().ok()),
            SortKey::Apr => position.apr,
            SortKey::Roi => position.roi,
            SortKey::Tvl => position.tvl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub descending: bool,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            key: SortKey::Rank,
            descending: false,
        }
    }
}

impl SortOrder {
    /// Clicking the active column flips direction, another column starts descending
    /// (except rank, which starts ascending).
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.descending = !self.descending;
        } else {
            self.key = key;
            self.descending = key != SortKey::Rank;
        }
    }

    /// Row indices in display order. Missing values always sort last.
    pub fn apply(&self, positions: &[PositionRecord]) -> Vec<usize> {
        positions
            .iter()
            .enumerate()
            .sorted_by(|(ia, a), (ib, b)| {
                let va = self.key.value(*ia, a);
                let vb = self.key.value(*ib, b);
                let ordering = match (va, vb) {
                    (Some(x), Some(y)) => {
                        let o = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
                        if self.descending { o.reverse() } else { o }
                    }
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
                ordering.then(ia.cmp(ib))
            })
            .map(|(index, _)| index)
            .collect()
    }
}

/// Expansion key: ranking name plus the record id, or `#index` without one
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub ranking: String,
    pub row: String,
}

impl RowKey {
    pub fn new(ranking: &str, index: usize, position: &PositionRecord) -> Self {
        let row = match position.identifier() {
            Some(id) => id.to_string(),
            None => format!("#{}", index),
        };
        Self {
            ranking: ranking.to_string(),
            row,
        }
    }
}

/// Per-row analysis results live under the row's index within its ranking.
pub type AnalysisKey = (String, usize);

/// At most one expanded row per ranking table
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashMap<String, String>,
}

impl ExpansionState {
    pub fn toggle(&mut self, key: &RowKey) {
        if self.is_expanded(key) {
            self.expanded.remove(&key.ranking);
        } else {
            self.expanded.insert(key.ranking.clone(), key.row.clone());
        }
    }

    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.expanded.get(&key.ranking) == Some(&key.row)
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<PositionRecord> {
        [
            json!({ "apr": 5.0, "underlying_value": 100.0 }),
            json!({ "apr": 50.0 }),
            json!({ "apr": 20.0, "underlying_value": 900.0 }),
        ]
        .iter()
        .map(PositionRecord::from_value)
        .collect()
    }

    #[test]
    fn rank_order_is_server_order() {
        assert_eq!(SortOrder::default().apply(&rows()), vec![0, 1, 2]);
    }

    #[test]
    fn sorting_by_column_and_toggling() {
        let mut order = SortOrder::default();
        order.toggle(SortKey::Apr);
        assert_eq!(order.apply(&rows()), vec![1, 2, 0]);

        order.toggle(SortKey::Apr);
        assert_eq!(order.apply(&rows()), vec![0, 2, 1]);
    }

    #[test]
    fn missing_values_sort_last() {
        let mut order = SortOrder::default();
        order.toggle(SortKey::Tvl);
        assert_eq!(order.apply(&rows()), vec![2, 0, 1]);
        order.toggle(SortKey::Tvl);
        assert_eq!(order.apply(&rows()), vec![0, 2, 1]);
    }

    #[test]
    fn expansion_is_per_ranking() {
        let positions = rows();
        let mut state = ExpansionState::default();
        let a0 = RowKey::new("A", 0, &positions[0]);
        let b0 = RowKey::new("B", 0, &positions[0]);

        state.toggle(&a0);
        assert!(state.is_expanded(&a0));
        assert!(!state.is_expanded(&b0));

        let a2 = RowKey::new("A", 2, &positions[2]);
        state.toggle(&a2);
        assert!(!state.is_expanded(&a0));
        assert!(state.is_expanded(&a2));

        state.toggle(&a2);
        assert!(!state.is_expanded(&a2));
    }

    #[test]
    fn row_key_prefers_record_id() {
        let with_id = PositionRecord::from_value(&json!({ "nft_id": 991 }));
        assert_eq!(RowKey::new("apr", 4, &with_id).row, "991");
        assert_eq!(RowKey::new("apr", 4, &rows()[0]).row, "#4");
    }
}
