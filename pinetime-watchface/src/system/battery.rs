//! Battery state as seen by the watch face
//!
//! Voltage conversion based upon https://wiki.pine64.org/wiki/PineTime.

/// Source of the battery charge level
pub trait BatterySource {
    /// Charge level between 0.0 (empty) and 1.0 (full)
    fn level(&self) -> f32;
}

/// Battery change notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryEvent {
    /// Charger plugged in or removed
    ChargingChange,
    /// Estimated time to full charge changed
    ChargingTimeChange,
    /// Estimated time to empty changed
    DischargingTimeChange,
    /// Charge level changed
    LevelChange,
}

/// Snapshot of the battery state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryInfo {
    /// Charging state
    pub charging: bool,
    /// Battery capacity in percent (0–100)
    pub percent: u8,
}

impl BatterySource for BatteryInfo {
    fn level(&self) -> f32 {
        f32::from(self.percent.min(100)) / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    InvalidMeasurement,
}

/// Convert a 12 bit ADC measurement into the battery voltage in millivolts.
pub fn millivolts_from_adc(raw_measurement: i16) -> Result<u16, Error> {
    match raw_measurement {
        0..=4095 => {
            // Multiply by 2 * 1000 for mV and divide by (2^12 / 3.3V reference),
            // in 32 bit to prevent overflow
            Ok((raw_measurement as u32 * 2000 / 1241) as u16)
        }
        _ => Err(Error::InvalidMeasurement),
    }
}

/// Estimate the battery capacity in percent from its voltage.
///
/// Uses fixed data points and linear interpolation in between.
pub fn percent_from_millivolts(voltage: u16) -> u8 {
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adc_conversion() {
        assert_eq!(millivolts_from_adc(0), Ok(0));
        assert_eq!(millivolts_from_adc(2482), Ok(4000));
        assert_eq!(millivolts_from_adc(4095), Ok(6599));
        assert_eq!(millivolts_from_adc(-1), Err(Error::InvalidMeasurement));
        assert_eq!(millivolts_from_adc(4096), Err(Error::InvalidMeasurement));
    }

    #[test]
    fn test_percent_interpolation() {
        assert_eq!(percent_from_millivolts(3000), 0);
        assert_eq!(percent_from_millivolts(3449), 0);
        assert_eq!(percent_from_millivolts(3450), 0);
        assert_eq!(percent_from_millivolts(3575), 25);
        assert_eq!(percent_from_millivolts(3700), 50);
        assert_eq!(percent_from_millivolts(3950), 75);
        assert_eq!(percent_from_millivolts(4199), 99);
        assert_eq!(percent_from_millivolts(4200), 100);
        assert_eq!(percent_from_millivolts(5000), 100);
    }

    #[test]
    fn test_percent_is_monotonic() {
        let mut last = 0;
        for mv in 3000..4400 {
            let percent = percent_from_millivolts(mv);
            assert!(percent >= last);
            last = percent;
        }
    }

    #[test]
    fn test_level_from_info() {
        let info = BatteryInfo { charging: true, percent: 50 };
        assert_eq!(info.level(), 0.5);

        let info = BatteryInfo { charging: false, percent: 150 };
        assert_eq!(info.level(), 1.0);
    }
}
