//! General system configuration

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::Priority,
};
use embassy_time::Duration;
use pinetime_watchface::FaceConfig;

/// Local timezone, seconds east of UTC
pub const TIMEZONE: i32 = 3_600;

/// No button activity for this long dims the watch into ambient mode
pub const AMBIENT_TIMEOUT: Duration = Duration::from_secs(15);

/// Backlight level (0–7) while active
pub const ACTIVE_BRIGHTNESS: u8 = 5;
/// Backlight level (0–7) while ambient
pub const AMBIENT_BRIGHTNESS: u8 = 1;

/// Battery ADC polling period
pub const BATTERY_POLL_PERIOD: Duration = Duration::from_secs(1);

pub struct SystemConfig {}

impl SystemConfig {
    /// Create new system configuration
    pub fn new() -> Config {
        // Generate default config, required because Config is set as
        // `non_exhaustive`
        let mut config = Config::default();

        // Set high-frequency and low-frequency clock sources to external
        config.hfclk_source = HfclkSource::ExternalXtal;
        config.lfclk_source = LfclkSource::ExternalXtal;

        // Enable DC/DC regulator to massively reduce runtime current consumption
        config.dcdc.reg1 = true;

        // Keep the RTC time driver and GPIOTE below the SPI and SAADC
        // interrupts at the default priority
        config.gpiote_interrupt_priority = Priority::P2;
        config.time_interrupt_priority = Priority::P2;

        // Allow debugging
        config.debug = Debug::Allowed;

        config
    }

    /// Watch face timings
    pub fn face() -> FaceConfig {
        FaceConfig::default()
    }
}
