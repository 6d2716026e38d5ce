//! Calendar rules and timestamp formatting.

use chrono::{Datelike, Duration, NaiveDateTime};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const ORDER_WINDOW_DAYS: i64 = 365;

/// Peak retail dates in Mexico: Hot Sale (May), Buen Fin (November),
/// the Christmas season, Día del Niño (April 30) and Valentine's Day.
pub fn is_peak_season(ts: &NaiveDateTime) -> bool {
    match ts.month() {
        5 | 11 | 12 => true,
        4 => ts.day() == 30,
        2 => ts.day() == 14,
        _ => false,
    }
}

/// Start of the trailing order window that ends at `anchor`.
pub fn window_start(anchor: &NaiveDateTime) -> NaiveDateTime {
    *anchor - Duration::days(ORDER_WINDOW_DAYS)
}

pub fn whole_days_between(from: &NaiveDateTime, to: &NaiveDateTime) -> i64 {
    (*to - *from).num_days()
}

/// serde adapter writing timestamps as `%Y-%m-%d %H:%M:%S`.
pub mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}
