//! Day and month names

use chrono::Weekday;

pub const SHORT_DAY: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const SHORT_MONTH: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const FULL_MONTH: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// How the month label is spelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MonthStyle {
    #[default]
    Full,
    Short,
}

/// Name of the zero based month `month0`, `None` past December.
pub fn month_name(month0: u32, style: MonthStyle) -> Option<&'static str> {
    let table = match style {
        MonthStyle::Full => &FULL_MONTH,
        MonthStyle::Short => &SHORT_MONTH,
    };
    table.get(month0 as usize).copied()
}

pub fn short_day(weekday: Weekday) -> &'static str {
    SHORT_DAY[weekday.num_days_from_sunday() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(0, MonthStyle::Full), Some("January"));
        assert_eq!(month_name(8, MonthStyle::Full), Some("September"));
        assert_eq!(month_name(11, MonthStyle::Short), Some("Dec"));
        assert_eq!(month_name(12, MonthStyle::Full), None);
    }

    #[test]
    fn test_short_day_starts_on_sunday() {
        assert_eq!(short_day(Weekday::Sun), "Sun");
        assert_eq!(short_day(Weekday::Mon), "Mon");
        assert_eq!(short_day(Weekday::Sat), "Sat");
    }
}
