use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use commonware_cryptography::ed25519::PublicKey;

use super::{dice_encode_size, read_dice, write_dice, CellKind};

/// One resolved round, keyed externally by its [`crate::RoundId`].
///
/// Written once at resolution, retained for later lookup, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundRecord {
    pub player: PublicKey,
    /// Time the play was requested.
    pub requested_at: u64,
    pub dice: Vec<u8>,
    pub start_position: u32,
    pub end_position: u32,
    pub cell: CellKind,
    pub score: u64,
    /// Block height at which the round resolved.
    pub height: u64,
}

impl RoundRecord {
    /// Total movement applied this round.
    pub fn movement(&self) -> u32 {
        self.dice.iter().map(|&d| d as u32).sum()
    }

    pub fn dice_count(&self) -> u8 {
        self.dice.len() as u8
    }
}

impl Write for RoundRecord {
    fn write(&self, writer: &mut impl BufMut) {
        self.player.write(writer);
        self.requested_at.write(writer);
        write_dice(&self.dice, writer);
        self.start_position.write(writer);
        self.end_position.write(writer);
        self.cell.write(writer);
        self.score.write(writer);
        self.height.write(writer);
    }
}

impl Read for RoundRecord {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            player: PublicKey::read(reader)?,
            requested_at: u64::read(reader)?,
            dice: read_dice(reader)?,
            start_position: u32::read(reader)?,
            end_position: u32::read(reader)?,
            cell: CellKind::read(reader)?,
            score: u64::read(reader)?,
            height: u64::read(reader)?,
        })
    }
}

impl EncodeSize for RoundRecord {
    fn encode_size(&self) -> usize {
        PublicKey::SIZE
            + u64::SIZE
            + dice_encode_size(&self.dice)
            + u32::SIZE * 2
            + CellKind::SIZE
            + u64::SIZE * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use commonware_codec::DecodeExt as _;
    use commonware_cryptography::{ed25519::PrivateKey, Signer};

    #[test]
    fn round_record_roundtrip() {
        let record = RoundRecord {
            player: PrivateKey::from_seed(7).public_key(),
            requested_at: 1_700_000_000,
            dice: vec![3, 4],
            start_position: 0,
            end_position: 7,
            cell: CellKind::FixedHigh,
            score: 5,
            height: 99,
        };
        assert_eq!(record.movement(), 7);
        assert_eq!(record.dice_count(), 2);

        let mut buf = BytesMut::new();
        record.write(&mut buf);
        assert_eq!(buf.len(), record.encode_size());
        let decoded = RoundRecord::decode(buf.as_ref()).expect("decode RoundRecord");
        assert_eq!(decoded, record);
    }
}
