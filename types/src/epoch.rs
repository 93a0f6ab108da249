use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};

use super::{SECS_PER_HOUR, SETTLE_GRACE_SECS};

/// Admin-configured race window definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaceConfig {
    /// First window's begin time.
    pub begin: u64,
    /// Calibration time from which the first window's end is derived.
    pub calibration: u64,
    /// Window length in hours.
    pub game_hours: u32,
}

impl RaceConfig {
    pub fn game_secs(&self) -> u64 {
        self.game_hours as u64 * SECS_PER_HOUR
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.game_hours == 0 {
            return Err("game_hours must be greater than zero");
        }
        Ok(())
    }
}

/// The scheduler's rolling accounting period.
///
/// Mutated only by the scheduler's rollover; read by everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochState {
    /// Current week number; monotonically non-decreasing.
    pub week: u32,
    pub window_begin: u64,
    pub window_end: u64,
    /// Settlement opens when the window closes.
    pub settle_begin: u64,
    /// Settlement close (`settle_begin` plus a fixed grace period).
    pub settle_end: u64,
}

impl EpochState {
    /// Seed the epoch from a freshly configured race window.
    pub fn seed(config: &RaceConfig) -> Self {
        let window_end = config.calibration.saturating_add(config.game_secs());
        Self {
            week: 0,
            window_begin: config.begin,
            window_end,
            settle_begin: window_end,
            settle_end: window_end.saturating_add(SETTLE_GRACE_SECS),
        }
    }
}

impl Write for EpochState {
    fn write(&self, writer: &mut impl BufMut) {
        self.week.write(writer);
        self.window_begin.write(writer);
        self.window_end.write(writer);
        self.settle_begin.write(writer);
        self.settle_end.write(writer);
    }
}

impl Read for EpochState {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            week: u32::read(reader)?,
            window_begin: u64::read(reader)?,
            window_end: u64::read(reader)?,
            settle_begin: u64::read(reader)?,
            settle_end: u64::read(reader)?,
        })
    }
}

impl EncodeSize for EpochState {
    fn encode_size(&self) -> usize {
        u32::SIZE + u64::SIZE * 4
    }
}
