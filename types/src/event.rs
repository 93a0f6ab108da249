use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use commonware_cryptography::ed25519::PublicKey;
use commonware_cryptography::sha256::Digest;

use super::{dice_encode_size, read_dice, write_dice, CellKind};

/// Outward events emitted by the engine; the transport is external.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A play resolved into a round result.
    RoundResolved {
        round_id: Digest,
        player: PublicKey,
        dice: Vec<u8>,
        start_position: u32,
        end_position: u32,
        cell: CellKind,
        score: u64,
        week: u32,
        /// Player's accrual for the current week after this round.
        weekly_accrued: u64,
        /// Player's recognized locked total after this round.
        locked_total: u64,
        /// Purchased chances remaining after this round.
        purchased_chances: u32,
        height: u64,
    },
    /// Extra chances were bought.
    ChancePurchased {
        player: PublicKey,
        count: u32,
        total_cost: u64,
        purchased_chances: u32,
        remaining_quota: u32,
    },
    /// A week's locked reward was released to its owner.
    RewardUnlocked {
        player: PublicKey,
        week: u32,
        amount: u64,
    },
}

impl Write for Event {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Event::RoundResolved {
                round_id,
                player,
                dice,
                start_position,
                end_position,
                cell,
                score,
                week,
                weekly_accrued,
                locked_total,
                purchased_chances,
                height,
            } => {
                0u8.write(writer);
                round_id.write(writer);
                player.write(writer);
                write_dice(dice, writer);
                start_position.write(writer);
                end_position.write(writer);
                cell.write(writer);
                score.write(writer);
                week.write(writer);
                weekly_accrued.write(writer);
                locked_total.write(writer);
                purchased_chances.write(writer);
                height.write(writer);
            }
            Event::ChancePurchased {
                player,
                count,
                total_cost,
                purchased_chances,
                remaining_quota,
            } => {
                1u8.write(writer);
                player.write(writer);
                count.write(writer);
                total_cost.write(writer);
                purchased_chances.write(writer);
                remaining_quota.write(writer);
            }
            Event::RewardUnlocked {
                player,
                week,
                amount,
            } => {
                2u8.write(writer);
                player.write(writer);
                week.write(writer);
                amount.write(writer);
            }
        }
    }
}

impl Read for Event {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let tag = u8::read(reader)?;
        match tag {
            0 => Ok(Event::RoundResolved {
                round_id: Digest::read(reader)?,
                player: PublicKey::read(reader)?,
                dice: read_dice(reader)?,
                start_position: u32::read(reader)?,
                end_position: u32::read(reader)?,
                cell: CellKind::read(reader)?,
                score: u64::read(reader)?,
                week: u32::read(reader)?,
                weekly_accrued: u64::read(reader)?,
                locked_total: u64::read(reader)?,
                purchased_chances: u32::read(reader)?,
                height: u64::read(reader)?,
            }),
            1 => Ok(Event::ChancePurchased {
                player: PublicKey::read(reader)?,
                count: u32::read(reader)?,
                total_cost: u64::read(reader)?,
                purchased_chances: u32::read(reader)?,
                remaining_quota: u32::read(reader)?,
            }),
            2 => Ok(Event::RewardUnlocked {
                player: PublicKey::read(reader)?,
                week: u32::read(reader)?,
                amount: u64::read(reader)?,
            }),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl EncodeSize for Event {
    fn encode_size(&self) -> usize {
        1 + match self {
            Event::RoundResolved { dice, .. } => {
                Digest::SIZE
                    + PublicKey::SIZE
                    + dice_encode_size(dice)
                    + u32::SIZE * 2
                    + CellKind::SIZE
                    + u64::SIZE
                    + u32::SIZE
                    + u64::SIZE * 2
                    + u32::SIZE
                    + u64::SIZE
            }
            Event::ChancePurchased { .. } => PublicKey::SIZE + u32::SIZE + u64::SIZE + u32::SIZE * 2,
            Event::RewardUnlocked { .. } => PublicKey::SIZE + u32::SIZE + u64::SIZE,
        }
    }
}
