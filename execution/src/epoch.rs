//! Week/window scheduler for the rolling race epoch.
//!
//! The whole economy is keyed on this state machine: weekly quotas and the
//! vesting ledger both read the week number and window bounds it maintains.
//!
//! ## Rollover
//!
//! A window of `game_hours` rolls forward whenever the current time passes
//! its end; settlement opens at the new end and closes a fixed grace period
//! later. Catch-up after long idle gaps is computed in closed form (number of
//! missed windows by integer division) instead of stepping window by window,
//! so the cost of a touch is constant no matter how far behind the state is.

use burrow_types::{EpochState, RaceConfig, SETTLE_GRACE_SECS, START_WEEK};

/// Pure rollover logic over [`EpochState`].
///
/// Holds only the window length; all mutable state is passed in and returned,
/// keeping every transition unit-testable without a simulated environment.
#[derive(Clone, Copy, Debug)]
pub struct EpochScheduler {
    game_secs: u64,
}

impl EpochScheduler {
    pub fn new(config: &RaceConfig) -> Self {
        Self {
            game_secs: config.game_secs(),
        }
    }

    /// Advance `state` so that `now <= window_end`, crediting one week per
    /// missed window, and promote an uninitialized week to [`START_WEEK`].
    ///
    /// Touching is idempotent for a fixed `now` and never moves the week
    /// backwards.
    pub fn touch(&self, state: &EpochState, now: u64) -> EpochState {
        let mut next = *state;
        if now > next.window_end && self.game_secs > 0 {
            let elapsed = now - next.window_end;
            // Smallest k with now <= window_end + k * game_secs.
            let missed = elapsed.div_ceil(self.game_secs);
            next.window_begin = next
                .window_end
                .saturating_add(self.game_secs.saturating_mul(missed - 1));
            next.window_end = next
                .window_end
                .saturating_add(self.game_secs.saturating_mul(missed));
            next.settle_begin = next.window_end;
            next.settle_end = next.window_end.saturating_add(SETTLE_GRACE_SECS);
            next.week = next
                .week
                .saturating_add(u32::try_from(missed).unwrap_or(u32::MAX));
        }
        if next.week == 0 {
            next.week = START_WEEK;
        }
        next
    }

    /// Rebase an existing epoch onto a freshly configured race window,
    /// keeping the week counter.
    pub fn rebase(&self, state: &EpochState, config: &RaceConfig) -> EpochState {
        let mut next = EpochState::seed(config);
        next.week = state.week;
        next
    }
}
