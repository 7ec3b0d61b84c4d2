use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Rounds half away from zero to one decimal place.
#[must_use]
pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[must_use]
pub fn format_play_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

#[must_use]
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%d.%m.%Y %H:%M UTC").to_string()
}
