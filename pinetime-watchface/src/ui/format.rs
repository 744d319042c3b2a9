//! Text and gauge formatting

/// Write `value` as two zero padded digits into `buf`.
///
/// Only the last two digits are kept.
pub fn zero_pad(value: u32, buf: &mut [u8; 2]) -> &str {
    format_no_std::show(buf, format_args!("{:02}", value % 100)).unwrap_or("00")
}

/// Convert a 24 hour value to the face's 12 hour form.
///
/// 13–23 map to 1–11. Midnight stays 0 and noon stays 12.
pub fn twelve_hour(hour: u32) -> u32 {
    if hour > 12 {
        hour - 12
    } else {
        hour
    }
}

/// Battery gauge for a charge level, linear from 0 to `scale`.
pub fn battery_gauge(level: f32, scale: f32) -> f32 {
    scale * (level.clamp(0.0, 1.0) * 100.0) / 100.0
}
