use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};

/// Token kinds the engine's external ledger distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// The reward/utility token scores pay out in.
    Reward = 0,
    /// The pass entitlement gating daily play.
    Pass = 1,
}

impl Write for TokenKind {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for TokenKind {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        match value {
            0 => Ok(Self::Reward),
            1 => Ok(Self::Pass),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for TokenKind {
    const SIZE: usize = 1;
}
