//! Round entropy derivation for provably fair outcomes.
//!
//! Each round combines an externally supplied unpredictable seed (one per
//! block height) with the round's unique identifier, so entropy stays unique
//! per round even when the same seed covers several rounds, and cannot be
//! predicted before the seed is revealed.
//!
//! ## Derivation
//!
//! ```text
//! entropy = sha256(seed XOR round_id)
//! ```
//!
//! ## Determinism
//!
//! Dice faces are read from fixed chunks of the entropy: die `i` takes hex
//! digits `[8i, 8i+8)` (bytes `[4i, 4i+4)` big-endian) as an unsigned 32-bit
//! value `v` and maps it via `((v % 6) + 5) % 6 + 1`. The double modulus
//! keeps the result in `[1, 6]` whatever sign convention a host's modulus
//! uses, and must not be simplified: replays across implementations depend
//! on it bit for bit.

use burrow_types::{EngineError, MAX_DICE_COUNT};
use commonware_cryptography::sha256::{Digest, Sha256};
use commonware_cryptography::Hasher;

/// Length of the per-height random seed in bytes.
pub const SEED_LEN: usize = 32;

/// Derive round-local entropy from the height seed and the round identifier.
pub fn mix_entropy(seed: &[u8; SEED_LEN], round_id: &Digest) -> Digest {
    let mut mixed = [0u8; SEED_LEN];
    for (i, byte) in mixed.iter_mut().enumerate() {
        *byte = seed[i] ^ round_id.0[i];
    }
    let mut hasher = Sha256::new();
    hasher.update(&mixed);
    hasher.finalize()
}

/// Derive `dice_count` face values in `[1, 6]` from round entropy.
///
/// Fails with `InvalidArgument` for a count of zero or above
/// [`MAX_DICE_COUNT`]; callers normalize a zero request to one die before
/// invoking.
pub fn derive_dice(entropy: &Digest, dice_count: u8) -> Result<Vec<u8>, EngineError> {
    if dice_count == 0 || dice_count > MAX_DICE_COUNT {
        return Err(EngineError::InvalidArgument(format!(
            "dice count must be in 1..={} (got {})",
            MAX_DICE_COUNT, dice_count
        )));
    }

    let mut dice = Vec::with_capacity(dice_count as usize);
    for i in 0..dice_count as usize {
        let chunk: [u8; 4] = entropy.0[i * 4..i * 4 + 4]
            .try_into()
            .expect("entropy digest is 32 bytes");
        let value = u32::from_be_bytes(chunk);
        let face = ((value % 6) + 5) % 6 + 1;
        dice.push(face as u8);
    }
    Ok(dice)
}

/// The entropy reinterpreted as a signed 64-bit value (first 8 bytes,
/// big-endian), used by variable-score cells.
pub fn entropy_as_i64(entropy: &Digest) -> i64 {
    let chunk: [u8; 8] = entropy.0[0..8]
        .try_into()
        .expect("entropy digest is 32 bytes");
    i64::from_be_bytes(chunk)
}
