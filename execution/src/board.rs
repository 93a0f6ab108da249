//! Board resolution: movement, landing cell, and score.
//!
//! Pure functions of round entropy, dice, and configuration. Persisting the
//! resulting record is the caller's responsibility.

use burrow_types::{
    Board, CellKind, ScoreRules, FALLBACK_VARIABLE_MAX, FALLBACK_VARIABLE_MIN, FIXED_HIGH_SCORE,
    FIXED_LOW_SCORE,
};
use commonware_cryptography::sha256::Digest;

use crate::entropy::entropy_as_i64;

/// Outcome of resolving one round against the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRound {
    pub start_position: u32,
    pub end_position: u32,
    pub movement: u32,
    pub cell: CellKind,
    pub score: u64,
}

/// Resolve a round: apply dice movement from `position` and score the landing
/// cell. The variable-cell bounds come from `rules` only while `now` falls
/// inside the configured window; otherwise the fallback range applies.
pub fn resolve(
    entropy: &Digest,
    dice: &[u8],
    position: u32,
    board: &Board,
    rules: Option<&ScoreRules>,
    now: u64,
) -> ResolvedRound {
    let movement: u32 = dice.iter().map(|&d| d as u32).sum();
    let end_position = (position + movement) % board.size();
    let cell = board.cell(end_position);
    let score = match cell {
        CellKind::FixedLow => FIXED_LOW_SCORE,
        CellKind::FixedHigh => FIXED_HIGH_SCORE,
        CellKind::Variable => {
            let (min, max) = match rules {
                Some(rules) if rules.is_active(now) => (rules.min, rules.max),
                _ => (FALLBACK_VARIABLE_MIN, FALLBACK_VARIABLE_MAX),
            };
            variable_score(entropy, min, max)
        }
    };

    ResolvedRound {
        start_position: position,
        end_position,
        movement,
        cell,
        score,
    }
}

/// Pseudorandom score in `[min, max]`:
/// `abs(entropy_as_i64 % (max - min + 1)) + min`.
///
/// For truncated division, `abs(v % s) == abs(v) % s`, so the modulus runs
/// in `u64` where neither a span above `i64::MAX` nor `v == i64::MIN` can
/// wrap or panic.
fn variable_score(entropy: &Digest, min: u64, max: u64) -> u64 {
    let span = max - min + 1;
    let value = entropy_as_i64(entropy);
    value.unsigned_abs() % span + min
}
