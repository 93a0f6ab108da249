/// Maximum dice per round.
pub const MAX_DICE_COUNT: u8 = 3;

/// Score for landing on a low fixed-score cell.
pub const FIXED_LOW_SCORE: u64 = 1;

/// Score for landing on a high fixed-score cell.
pub const FIXED_HIGH_SCORE: u64 = 5;

/// Variable-cell score bounds used when no score rules are active.
pub const FALLBACK_VARIABLE_MIN: u64 = 30;
pub const FALLBACK_VARIABLE_MAX: u64 = 50;

/// Default daily play allowance.
pub const DAILY_MAX_PLAY_COUNT: u32 = 5;

/// Hour (UTC) at which the daily play allowance resets.
pub const DAILY_PLAY_RESET_HOUR: u32 = 0;

/// Default weekly purchased-chance allowance.
pub const WEEKLY_PURCHASE_COUNT: u32 = 20;

/// Default price of one purchased chance, in reward tokens.
pub const PURCHASE_UNIT_PRICE: u64 = 25;

/// Hour (UTC) at which the purchase allowance resets (daily-variant policy).
pub const PURCHASE_RESET_HOUR: u32 = 0;

/// First week number assigned once a race window is configured.
pub const START_WEEK: u32 = 1;

/// Settlement grace period appended to each window's end.
pub const SETTLE_GRACE_SECS: u64 = 24 * 60 * 60;

/// Default vesting lock applied to each week's accrued rewards.
pub const DEFAULT_LOCK_SECS: u64 = 7 * 24 * 60 * 60;

/// Maximum addresses per batch unlock.
pub const MAX_UNLOCK_BATCH: usize = 20;

/// Maximum board size accepted when decoding a board layout.
pub const MAX_BOARD_SIZE: usize = 256;

/// Maximum locked-reward entries accepted when decoding a player's ledger.
pub const MAX_LOCKED_WEEKS: usize = 1024;

pub const SECS_PER_HOUR: u64 = 60 * 60;
pub const SECS_PER_DAY: u64 = 24 * 60 * 60;
