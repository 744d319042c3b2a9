//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};
use pinetime_watchface::system::battery::{
    millivolts_from_adc, percent_from_millivolts, BatteryInfo, Error,
};

/// What changed during a battery update
#[derive(Debug, Default, Clone, Copy, defmt::Format)]
pub struct BatteryChanges {
    pub charging: bool,
    pub level: bool,
}

impl BatteryChanges {
    pub fn any(&self) -> bool {
        self.charging || self.level
    }
}

pub struct BatteryStatus {
    /// Pin P0.12: High = battery, Low = charging
    pin_charge_indication: Input<'static, P0_12>,

    /// ADC instance for battery voltage measurement
    saadc: Saadc<'static, 1>,

    /// Last reported state
    info: BatteryInfo,
}

impl BatteryStatus {
    /// Initialize battery status
    pub async fn init(
        pin_charge_indication: Input<'static, P0_12>,
        saadc: Saadc<'static, 1>,
    ) -> Result<Self, Error> {
        let mut battery = Self {
            pin_charge_indication,
            saadc,
            info: BatteryInfo::default(),
        };
        battery.update().await?;
        Ok(battery)
    }

    /// Return the current state of the battery.
    ///
    /// This returns the stored value. To fetch current data, call `update()` first.
    pub fn info(&self) -> BatteryInfo {
        self.info
    }

    /// Update the current battery status by reading information from the
    /// hardware. Return which values changed.
    pub async fn update(&mut self) -> Result<BatteryChanges, Error> {
        let mut changes = BatteryChanges::default();

        // Check charging status
        let charging = self.pin_charge_indication.is_low();
        if charging != self.info.charging {
            self.info.charging = charging;
            changes.charging = true;
        }

        // Check voltage
        let mut buf = [0; 1];
        self.saadc.sample(&mut buf).await;
        let percent = percent_from_millivolts(millivolts_from_adc(buf[0])?);
        if percent != self.info.percent {
            self.info.percent = percent;
            changes.level = true;
        }

        Ok(changes)
    }
}
