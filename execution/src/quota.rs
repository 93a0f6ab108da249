//! Periodically-resetting allowances.
//!
//! Both quota facets (daily plays, weekly purchased chances) are the same
//! shape: a counter with a last-touch timestamp, refilled to its limit the
//! first time it is touched after crossing a boundary. The boundary rule is
//! the only difference, so it is factored out here instead of duplicating the
//! arithmetic.

use burrow_types::{EngineError, LimitConfig, Player, PurchaseConfig, SECS_PER_DAY, SECS_PER_HOUR};

/// When a counter refills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetBoundary {
    /// Refill the first time a touch happens after `hour:00 UTC` of the
    /// current day, or once a full day has passed since the last touch.
    DailyAtHour(u32),
    /// Refill when the last touch predates the current race window.
    WindowBegin(u64),
}

impl ResetBoundary {
    /// Whether a counter last touched at `last_touch` has crossed this
    /// boundary by `now`. A counter never touched always refills.
    pub fn crossed(&self, last_touch: Option<u64>, now: u64) -> bool {
        let last = match last_touch {
            None => return true,
            Some(last) => last,
        };
        match self {
            ResetBoundary::DailyAtHour(hour) => {
                if now >= last.saturating_add(SECS_PER_DAY) {
                    return true;
                }
                let day_start = now - (now % SECS_PER_DAY);
                let boundary = day_start + *hour as u64 * SECS_PER_HOUR;
                last < boundary && now >= boundary
            }
            ResetBoundary::WindowBegin(begin) => last < *begin,
        }
    }

    /// Counter value after applying this boundary.
    pub fn refill(&self, remaining: u32, limit: u32, last_touch: Option<u64>, now: u64) -> u32 {
        if self.crossed(last_touch, now) {
            limit
        } else {
            remaining
        }
    }
}

/// Daily plays available right now. A player without the pass entitlement
/// has no daily allowance at all.
pub fn refreshed_daily_plays(
    player: &Player,
    limits: &LimitConfig,
    now: u64,
    has_pass: bool,
) -> u32 {
    if !has_pass {
        return 0;
    }
    ResetBoundary::DailyAtHour(limits.reset_hour).refill(
        player.daily_plays,
        limits.daily_max_plays,
        player.last_play_ts,
        now,
    )
}

/// Weekly purchase allowance available right now, keyed to the race window.
pub fn refreshed_weekly_purchases(
    player: &Player,
    purchase: &PurchaseConfig,
    window_begin: u64,
) -> u32 {
    ResetBoundary::WindowBegin(window_begin).refill(
        player.weekly_purchases_remaining,
        purchase.weekly_count,
        player.last_purchase_ts,
        // WindowBegin ignores `now`; the window itself is the clock.
        window_begin,
    )
}

/// Consume one play: daily allowance first, purchased chances as fallback.
pub fn consume_play(player: &mut Player) -> Result<(), EngineError> {
    if player.daily_plays > 0 {
        player.daily_plays -= 1;
        Ok(())
    } else if player.purchased_chances > 0 {
        player.purchased_chances -= 1;
        Ok(())
    } else {
        Err(EngineError::QuotaExceeded(
            "no plays or purchased chances remaining".into(),
        ))
    }
}
