//! Date label scheduling
//!
//! Each refresh arms the next one: right after midnight when the day just
//! changed, or after a short retry delay when no change was detected (forced
//! refresh, early timer or clock skew). Once a rollover is seen the chain
//! settles on one refresh per calendar day.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use embassy_time::{Duration, Instant};

use crate::config::FaceConfig;

/// Day-of-week seen by the previous date refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousDay {
    /// Render unconditionally, then retry like an unchanged day
    Force,
    /// Day-of-week observed when the refresh was armed
    Observed(Weekday),
}

/// The single pending date refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDateRefresh {
    pub deadline: Instant,
    /// Day-of-week to compare against when it fires
    pub previous: Weekday,
}

/// Milliseconds from `time` to the following midnight, in `1..=86_400_000`.
pub fn millis_until_midnight(time: &NaiveDateTime) -> u64 {
    // Leap seconds report 1000 ms and up
    let millis = (time.nanosecond() / 1_000_000).min(999) as u64;
    (23 - time.hour() as u64) * 3_600_000
        + (59 - time.minute() as u64) * 60_000
        + (59 - time.second().min(59) as u64) * 1_000
        + (1_000 - millis)
}

/// Delay until the next date refresh after one that ran at `time`.
pub fn next_delay(previous: PreviousDay, time: &NaiveDateTime, config: &FaceConfig) -> Duration {
    match previous {
        PreviousDay::Force => config.date_retry_delay,
        PreviousDay::Observed(day) if day == time.weekday() => config.date_retry_delay,
        PreviousDay::Observed(_) => {
            Duration::from_millis(millis_until_midnight(time)) + config.midnight_margin
        }
    }
}
