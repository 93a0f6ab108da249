use std::collections::BTreeMap;

use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};

use super::MAX_LOCKED_WEEKS;

/// One week's locked reward for a player.
///
/// Lifecycle: Pending (created) -> Matured (`recognized` set once the
/// maturity time has passed and a read observed it) -> Released (terminal,
/// funds paid out). Release never requires recognition to have happened
/// first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockedReward {
    pub week: u32,
    pub amount: u64,
    /// Time at which the amount matures into the player's locked total.
    pub maturity: u64,
    /// Amount has been counted toward the player's locked total.
    pub recognized: bool,
    /// Funds transferred; terminal.
    pub released: bool,
}

impl LockedReward {
    pub fn new(week: u32, amount: u64, maturity: u64) -> Self {
        Self {
            week,
            amount,
            maturity,
            recognized: false,
            released: false,
        }
    }

    pub fn is_matured(&self, now: u64) -> bool {
        now > self.maturity
    }
}

impl Write for LockedReward {
    fn write(&self, writer: &mut impl BufMut) {
        self.week.write(writer);
        self.amount.write(writer);
        self.maturity.write(writer);
        self.recognized.write(writer);
        self.released.write(writer);
    }
}

impl Read for LockedReward {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            week: u32::read(reader)?,
            amount: u64::read(reader)?,
            maturity: u64::read(reader)?,
            recognized: bool::read(reader)?,
            released: bool::read(reader)?,
        })
    }
}

impl EncodeSize for LockedReward {
    fn encode_size(&self) -> usize {
        u32::SIZE + u64::SIZE * 2 + bool::SIZE * 2
    }
}

/// A player's vesting ledger, keyed by week number.
///
/// At most one entry per week: accruing into an existing week updates its
/// amount in place.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LockedRewards {
    entries: BTreeMap<u32, LockedReward>,
}

impl LockedRewards {
    /// Accrue `amount` into `week`, creating the entry with `maturity` if it
    /// does not exist yet.
    pub fn accrue(&mut self, week: u32, amount: u64, maturity: u64) {
        self.entries
            .entry(week)
            .and_modify(|entry| entry.amount = entry.amount.saturating_add(amount))
            .or_insert_with(|| LockedReward::new(week, amount, maturity));
    }

    pub fn get(&self, week: u32) -> Option<&LockedReward> {
        self.entries.get(&week)
    }

    pub fn get_mut(&mut self, week: u32) -> Option<&mut LockedReward> {
        self.entries.get_mut(&week)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LockedReward> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut LockedReward> {
        self.entries.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all amounts, regardless of maturity or release state.
    pub fn total_accrued(&self) -> u64 {
        self.entries
            .values()
            .fold(0u64, |acc, e| acc.saturating_add(e.amount))
    }
}

impl Write for LockedRewards {
    fn write(&self, writer: &mut impl BufMut) {
        (self.entries.len() as u32).write(writer);
        for entry in self.entries.values() {
            entry.write(writer);
        }
    }
}

impl Read for LockedRewards {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let len = u32::read(reader)? as usize;
        if len > MAX_LOCKED_WEEKS {
            return Err(Error::Invalid("LockedRewards", "too many entries"));
        }
        let mut entries = BTreeMap::new();
        for _ in 0..len {
            let entry = LockedReward::read(reader)?;
            if entries.insert(entry.week, entry).is_some() {
                return Err(Error::Invalid("LockedRewards", "duplicate week"));
            }
        }
        Ok(Self { entries })
    }
}

impl EncodeSize for LockedRewards {
    fn encode_size(&self) -> usize {
        u32::SIZE
            + self
                .entries
                .values()
                .map(|e| e.encode_size())
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use commonware_codec::DecodeExt as _;

    #[test]
    fn accrue_merges_same_week() {
        let mut ledger = LockedRewards::default();
        ledger.accrue(1, 5, 1_000);
        ledger.accrue(1, 3, 9_999); // maturity of the existing entry is kept
        ledger.accrue(2, 7, 2_000);

        assert_eq!(ledger.len(), 2);
        let week1 = ledger.get(1).unwrap();
        assert_eq!(week1.amount, 8);
        assert_eq!(week1.maturity, 1_000);
        assert_eq!(ledger.total_accrued(), 15);
    }

    #[test]
    fn entry_state_flags_start_clear() {
        let entry = LockedReward::new(3, 10, 500);
        assert!(!entry.recognized);
        assert!(!entry.released);
        assert!(!entry.is_matured(500));
        assert!(entry.is_matured(501));
    }

    #[test]
    fn ledger_roundtrip() {
        let mut ledger = LockedRewards::default();
        ledger.accrue(1, 5, 1_000);
        ledger.accrue(3, 11, 3_000);
        ledger.get_mut(1).unwrap().recognized = true;

        let mut buf = BytesMut::new();
        ledger.write(&mut buf);
        assert_eq!(buf.len(), ledger.encode_size());
        let decoded = LockedRewards::decode(buf.as_ref()).expect("decode LockedRewards");
        assert_eq!(decoded, ledger);
    }

    #[test]
    fn ledger_decode_rejects_duplicate_weeks() {
        let mut buf = BytesMut::new();
        2u32.write(&mut buf);
        LockedReward::new(1, 5, 100).write(&mut buf);
        LockedReward::new(1, 6, 200).write(&mut buf);
        assert!(LockedRewards::decode(buf.as_ref()).is_err());
    }
}
