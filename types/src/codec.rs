use bytes::{Buf, BufMut};
use commonware_codec::{Error, ReadExt, Write};

use super::MAX_DICE_COUNT;

/// Helper to write a dice vector as a length-prefixed byte list.
pub fn write_dice(dice: &[u8], writer: &mut impl BufMut) {
    (dice.len() as u8).write(writer);
    writer.put_slice(dice);
}

/// Helper to read a dice vector, rejecting counts outside `1..=MAX_DICE_COUNT`
/// and face values outside `1..=6`.
pub fn read_dice(reader: &mut impl Buf) -> Result<Vec<u8>, Error> {
    let len = u8::read(reader)?;
    if len == 0 || len > MAX_DICE_COUNT {
        return Err(Error::Invalid("Dice", "count out of range"));
    }
    let mut dice = Vec::with_capacity(len as usize);
    for _ in 0..len {
        let face = u8::read(reader)?;
        if !(1..=6).contains(&face) {
            return Err(Error::Invalid("Dice", "face out of range"));
        }
        dice.push(face);
    }
    Ok(dice)
}

/// Helper to get encode size of a dice vector.
pub fn dice_encode_size(dice: &[u8]) -> usize {
    1 + dice.len()
}
