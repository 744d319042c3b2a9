//! Time keeping for the watch face

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use embassy_time::Instant;

/// Source of local wall-clock time
pub trait ClockSource {
    /// Local wall-clock time at the monotonic instant `at`
    fn local_time(&self, at: Instant) -> NaiveDateTime;
}

/// UTC clock time paired with the system time it was taken at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeReference {
    /// Clock time (UTC)
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Create new time reference from NaiveDateTime
    pub fn from_datetime(time: NaiveDateTime, instant: Instant) -> Self {
        Self { time, instant }
    }

    /// Create new time reference from a UNIX timestamp in seconds
    pub fn from_timestamp(secs: i64, instant: Instant) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(|utc| Self {
            time: utc.naive_utc(),
            instant,
        })
    }
}

/// Wall clock derived from a time reference and the monotonic system time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    reference: TimeReference,
    offset: FixedOffset,
}

impl WallClock {
    pub fn new(reference: TimeReference, offset: FixedOffset) -> Self {
        Self { reference, offset }
    }

    /// UTC time at `at`
    ///
    /// Saturates at the reference time if the result does not fit.
    pub fn utc_time(&self, at: Instant) -> NaiveDateTime {
        let elapsed = at.as_micros() as i64 - self.reference.instant.as_micros() as i64;
        self.reference
            .time
            .checked_add_signed(TimeDelta::microseconds(elapsed))
            .unwrap_or(self.reference.time)
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        self.reference = reference;
    }

    /// Current timezone
    pub fn utc_offset(&self) -> FixedOffset {
        self.offset
    }

    /// Change the timezone
    pub fn set_utc_offset(&mut self, offset: FixedOffset) {
        self.offset = offset;
    }
}

impl ClockSource for WallClock {
    fn local_time(&self, at: Instant) -> NaiveDateTime {
        let utc = self.utc_time(at);
        utc.checked_add_signed(TimeDelta::seconds(self.offset.local_minus_utc() as i64))
            .unwrap_or(utc)
    }
}
