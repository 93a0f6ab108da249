//! Locked-reward accrual, recognition, and release.
//!
//! Each entry moves Pending -> Matured -> Released. Maturity is recognized
//! lazily: whenever a locked total is read, entries past their maturity are
//! folded into the player's cached total and flagged, so no background sweep
//! is needed. Release is driven by an authorized unlock and is idempotent.

use burrow_types::{EngineError, LockedRewards, MAX_UNLOCK_BATCH, START_WEEK};

/// Result of an unlock attempt against one (player, week) entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// Entry released; `amount` is owed to the player.
    Released { amount: u64 },
    /// Entry absent or already released; nothing to pay.
    Noop,
}

/// Accrue `amount` into the week's entry, creating it with
/// `maturity = settle_begin + lock_secs` if absent.
pub fn accrue(
    ledger: &mut LockedRewards,
    week: u32,
    amount: u64,
    settle_begin: u64,
    lock_secs: u64,
) {
    ledger.accrue(week, amount, settle_begin.saturating_add(lock_secs));
}

/// Recognize every matured, unrecognized, unreleased entry and return the
/// newly recognized total. Monotone: a second call at the same `now` adds
/// zero.
pub fn recognize_matured(ledger: &mut LockedRewards, now: u64) -> u64 {
    let mut newly_recognized = 0u64;
    for entry in ledger.iter_mut() {
        if !entry.recognized && !entry.released && entry.is_matured(now) {
            entry.recognized = true;
            newly_recognized = newly_recognized.saturating_add(entry.amount);
        }
    }
    newly_recognized
}

/// Release one week's entry. Absent or already-released entries are a
/// silent no-op; release does not require recognition to have happened.
pub fn unlock(ledger: &mut LockedRewards, week: u32) -> UnlockOutcome {
    match ledger.get_mut(week) {
        Some(entry) if !entry.released => {
            entry.released = true;
            UnlockOutcome::Released {
                amount: entry.amount,
            }
        }
        _ => UnlockOutcome::Noop,
    }
}

/// Only settled weeks may be unlocked: `START_WEEK <= week < current_week`.
pub fn validate_unlock_week(week: u32, current_week: u32) -> Result<(), EngineError> {
    if week < START_WEEK || week >= current_week {
        return Err(EngineError::InvalidArgument(format!(
            "week {} is not a settled week (current week {})",
            week, current_week
        )));
    }
    Ok(())
}

/// Batch unlock accepts between one and [`MAX_UNLOCK_BATCH`] addresses.
pub fn validate_unlock_batch(addresses: usize) -> Result<(), EngineError> {
    if addresses == 0 || addresses > MAX_UNLOCK_BATCH {
        return Err(EngineError::InvalidArgument(format!(
            "batch size must be in 1..={} (got {})",
            MAX_UNLOCK_BATCH, addresses
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accrue_sets_maturity_from_settle_begin() {
        let mut ledger = LockedRewards::default();
        accrue(&mut ledger, 1, 5, 1_000, 600);
        let entry = ledger.get(1).unwrap();
        assert_eq!(entry.maturity, 1_600);
        assert_eq!(entry.amount, 5);
    }

    #[test]
    fn recognition_is_monotone() {
        let mut ledger = LockedRewards::default();
        accrue(&mut ledger, 1, 5, 100, 0);
        accrue(&mut ledger, 2, 7, 900, 0);

        // Only week 1 has matured.
        assert_eq!(recognize_matured(&mut ledger, 500), 5);
        assert_eq!(recognize_matured(&mut ledger, 500), 0);
        assert!(ledger.get(1).unwrap().recognized);
        assert!(!ledger.get(2).unwrap().recognized);

        // Week 2 matures later.
        assert_eq!(recognize_matured(&mut ledger, 1_000), 7);
        assert_eq!(recognize_matured(&mut ledger, 1_000), 0);
    }

    #[test]
    fn released_entries_are_not_recognized() {
        let mut ledger = LockedRewards::default();
        accrue(&mut ledger, 1, 5, 100, 0);
        assert_eq!(unlock(&mut ledger, 1), UnlockOutcome::Released { amount: 5 });
        assert_eq!(recognize_matured(&mut ledger, 1_000), 0);
    }

    #[test]
    fn unlock_pays_exactly_once() {
        let mut ledger = LockedRewards::default();
        accrue(&mut ledger, 1, 5, 100, 0);

        assert_eq!(unlock(&mut ledger, 1), UnlockOutcome::Released { amount: 5 });
        assert_eq!(unlock(&mut ledger, 1), UnlockOutcome::Noop);
        assert_eq!(unlock(&mut ledger, 9), UnlockOutcome::Noop);
    }

    #[test]
    fn unlock_does_not_require_recognition() {
        let mut ledger = LockedRewards::default();
        accrue(&mut ledger, 1, 5, u64::MAX - 1, 0); // far future maturity
        assert_eq!(unlock(&mut ledger, 1), UnlockOutcome::Released { amount: 5 });
    }

    #[test]
    fn unlock_week_bounds() {
        assert!(validate_unlock_week(0, 3).is_err());
        assert!(validate_unlock_week(3, 3).is_err());
        assert!(validate_unlock_week(4, 3).is_err());
        assert!(validate_unlock_week(1, 3).is_ok());
        assert!(validate_unlock_week(2, 3).is_ok());
    }

    #[test]
    fn batch_bounds() {
        assert!(validate_unlock_batch(0).is_err());
        assert!(validate_unlock_batch(1).is_ok());
        assert!(validate_unlock_batch(MAX_UNLOCK_BATCH).is_ok());
        assert!(validate_unlock_batch(MAX_UNLOCK_BATCH + 1).is_err());
    }
}
