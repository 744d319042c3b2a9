//! UI definitions module

pub mod canvas;
pub mod format;
pub mod locale;

pub use canvas::FaceCanvas;

/// Display surface of the watch face
///
/// Every region is addressed separately so a render only touches what it
/// changes.
pub trait Surface {
    type Error;

    /// Day of the month, two digits
    fn set_day(&mut self, day: &str) -> Result<(), Self::Error>;

    /// Month name
    fn set_month(&mut self, month: &str) -> Result<(), Self::Error>;

    /// Hour, two digits
    fn set_hours(&mut self, hours: &str) -> Result<(), Self::Error>;

    /// Minute, two digits
    fn set_minutes(&mut self, minutes: &str) -> Result<(), Self::Error>;

    /// Battery gauge, between 0 and the configured gauge scale
    fn set_battery_gauge(&mut self, gauge: f32) -> Result<(), Self::Error>;

    /// Show or hide the background imagery
    fn set_background(&mut self, visible: bool) -> Result<(), Self::Error>;
}
