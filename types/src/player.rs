use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use thiserror::Error as ThisError;

use super::{DAILY_MAX_PLAY_COUNT, WEEKLY_PURCHASE_COUNT};

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum PlayerInvariantError {
    #[error("position out of range (got={got}, board={board})")]
    PositionOutOfRange { got: u32, board: u32 },
}

/// Per-address game state.
///
/// Created lazily with defaults on first access, mutated on every play or
/// purchase, never deleted. The locked-reward ledger itself lives in a
/// separate per-address collection; `locked_total` only caches the amounts
/// already recognized as matured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    /// Current board position.
    pub position: u32,
    /// Daily plays remaining.
    pub daily_plays: u32,
    /// Purchased extra chances available.
    pub purchased_chances: u32,
    /// Weekly purchased-chance allowance remaining.
    pub weekly_purchases_remaining: u32,
    pub last_play_ts: Option<u64>,
    pub last_purchase_ts: Option<u64>,
    /// Cumulative raw score across all rounds.
    pub sum_scores: u64,
    /// Matured-and-recognized locked reward total.
    pub locked_total: u64,
    /// Height at which the last round resolved.
    pub last_height: u64,
}

impl Player {
    pub fn new(daily_plays: u32, weekly_purchases: u32) -> Self {
        Self {
            position: 0,
            daily_plays,
            purchased_chances: 0,
            weekly_purchases_remaining: weekly_purchases,
            last_play_ts: None,
            last_purchase_ts: None,
            sum_scores: 0,
            locked_total: 0,
            last_height: 0,
        }
    }

    pub fn validate_invariants(&self, board_size: u32) -> Result<(), PlayerInvariantError> {
        if self.position >= board_size {
            return Err(PlayerInvariantError::PositionOutOfRange {
                got: self.position,
                board: board_size,
            });
        }
        Ok(())
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DAILY_MAX_PLAY_COUNT, WEEKLY_PURCHASE_COUNT)
    }
}

impl Write for Player {
    fn write(&self, writer: &mut impl BufMut) {
        self.position.write(writer);
        self.daily_plays.write(writer);
        self.purchased_chances.write(writer);
        self.weekly_purchases_remaining.write(writer);
        self.last_play_ts.write(writer);
        self.last_purchase_ts.write(writer);
        self.sum_scores.write(writer);
        self.locked_total.write(writer);
        self.last_height.write(writer);
    }
}

impl Read for Player {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            position: u32::read(reader)?,
            daily_plays: u32::read(reader)?,
            purchased_chances: u32::read(reader)?,
            weekly_purchases_remaining: u32::read(reader)?,
            last_play_ts: Option::<u64>::read(reader)?,
            last_purchase_ts: Option::<u64>::read(reader)?,
            sum_scores: u64::read(reader)?,
            locked_total: u64::read(reader)?,
            last_height: u64::read(reader)?,
        })
    }
}

impl EncodeSize for Player {
    fn encode_size(&self) -> usize {
        u32::SIZE * 4
            + self.last_play_ts.encode_size()
            + self.last_purchase_ts.encode_size()
            + u64::SIZE * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use commonware_codec::DecodeExt as _;

    #[test]
    fn new_player_defaults() {
        let player = Player::default();
        assert_eq!(player.position, 0);
        assert_eq!(player.daily_plays, DAILY_MAX_PLAY_COUNT);
        assert_eq!(player.weekly_purchases_remaining, WEEKLY_PURCHASE_COUNT);
        assert_eq!(player.last_play_ts, None);
        assert!(player.validate_invariants(18).is_ok());
    }

    #[test]
    fn position_invariant() {
        let player = Player {
            position: 18,
            ..Player::default()
        };
        assert_eq!(
            player.validate_invariants(18),
            Err(PlayerInvariantError::PositionOutOfRange { got: 18, board: 18 })
        );
    }

    #[test]
    fn player_roundtrip() {
        let player = Player {
            position: 7,
            daily_plays: 2,
            purchased_chances: 4,
            weekly_purchases_remaining: 16,
            last_play_ts: Some(1_700_000_000),
            last_purchase_ts: None,
            sum_scores: 123,
            locked_total: 88,
            last_height: 42,
        };
        let mut buf = BytesMut::new();
        player.write(&mut buf);
        assert_eq!(buf.len(), player.encode_size());
        let decoded = Player::decode(buf.as_ref()).expect("decode Player");
        assert_eq!(decoded, player);
    }
}
