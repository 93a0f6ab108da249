use super::{
    DAILY_MAX_PLAY_COUNT, DAILY_PLAY_RESET_HOUR, DEFAULT_LOCK_SECS, PURCHASE_RESET_HOUR,
    PURCHASE_UNIT_PRICE, WEEKLY_PURCHASE_COUNT,
};

/// Variable-cell score rules, active only inside their time window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreRules {
    pub min: u64,
    pub max: u64,
    /// Window in which these bounds apply; the fallback range is used outside.
    pub begin: u64,
    pub end: u64,
}

impl ScoreRules {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.begin >= self.end {
            return Err("begin must be before end");
        }
        if self.min == 0 {
            return Err("min must be greater than zero");
        }
        if self.max < self.min {
            return Err("max must be at least min");
        }
        Ok(())
    }

    pub fn is_active(&self, now: u64) -> bool {
        now >= self.begin && now <= self.end
    }
}

/// Daily play allowance settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimitConfig {
    pub daily_max_plays: u32,
    /// Hour (UTC) at which the allowance resets.
    pub reset_hour: u32,
}

impl LimitConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.reset_hour >= 24 {
            return Err("reset_hour must be below 24");
        }
        Ok(())
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            daily_max_plays: DAILY_MAX_PLAY_COUNT,
            reset_hour: DAILY_PLAY_RESET_HOUR,
        }
    }
}

/// Purchased-chance settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurchaseConfig {
    /// Price of one chance in reward tokens. Zero disables purchasing.
    pub unit_price: u64,
    /// Allowance per race window.
    pub weekly_count: u32,
    /// Hour (UTC) for the daily-variant reset policy.
    pub reset_hour: u32,
}

impl PurchaseConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.unit_price == 0 {
            return Err("unit_price must be greater than zero");
        }
        if self.weekly_count == 0 {
            return Err("weekly_count must be greater than zero");
        }
        if self.reset_hour >= 24 {
            return Err("reset_hour must be below 24");
        }
        Ok(())
    }
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        Self {
            unit_price: PURCHASE_UNIT_PRICE,
            weekly_count: WEEKLY_PURCHASE_COUNT,
            reset_hour: PURCHASE_RESET_HOUR,
        }
    }
}

/// Vesting settings for weekly locked rewards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VestingConfig {
    /// Lock duration added to each window's settlement begin.
    pub lock_secs: u64,
}

impl VestingConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.lock_secs == 0 {
            return Err("lock_secs must be greater than zero");
        }
        Ok(())
    }
}

impl Default for VestingConfig {
    fn default() -> Self {
        Self {
            lock_secs: DEFAULT_LOCK_SECS,
        }
    }
}
