//! Watch face configuration

use embassy_time::Duration;

use crate::ui::locale::MonthStyle;

/// Tunable timings and scales of the watch face
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceConfig {
    /// Period of the hour/minute refresh while active
    pub time_refresh_interval: Duration,
    /// Re-check delay when a date refresh found the day unchanged
    pub date_retry_delay: Duration,
    /// Margin added past midnight so the refresh lands on the new day
    pub midnight_margin: Duration,
    /// Gauge value at full charge
    pub gauge_scale: f32,
    /// Month label style
    pub month_style: MonthStyle,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            time_refresh_interval: Duration::from_millis(500),
            date_retry_delay: Duration::from_millis(1_000),
            midnight_margin: Duration::from_millis(1),
            gauge_scale: 25.0,
            month_style: MonthStyle::Full,
        }
    }
}
