//! Capabilities the watch face consumes from the host

pub mod battery;
pub mod time;

pub use battery::{BatteryEvent, BatteryInfo, BatterySource};
pub use time::{ClockSource, WallClock};
