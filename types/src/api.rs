use serde::{Deserialize, Serialize};

use super::CellKind;

/// Result of a resolved play, as returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub start_position: u32,
    pub end_position: u32,
    pub cell: CellKind,
    pub score: u64,
    pub dice: Vec<u8>,
    pub week: u32,
}

/// Result of a chance purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseResult {
    pub total_cost: u64,
    /// Weekly purchase allowance remaining after this purchase.
    pub remaining_quota: u32,
}

/// A player's record with live-derived fields, as returned by queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: u32,
    /// Daily plays remaining, after any boundary reset.
    pub plays_remaining: u32,
    pub purchased_chances: u32,
    pub weekly_purchases_remaining: u32,
    pub sum_scores: u64,
    /// Locked total with maturity recognized as of the query time.
    pub locked_total: u64,
    pub week: u32,
    /// Whether the address holds the pass entitlement.
    pub has_pass: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_result_json_roundtrip() {
        let result = RoundResult {
            start_position: 0,
            end_position: 7,
            cell: CellKind::FixedHigh,
            score: 5,
            dice: vec![3, 4],
            week: 1,
        };
        let json = serde_json::to_string(&result).expect("serialize RoundResult");
        let decoded: RoundResult = serde_json::from_str(&json).expect("deserialize RoundResult");
        assert_eq!(decoded, result);
    }
}
