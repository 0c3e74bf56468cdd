//! Device-local calendar arithmetic.
//!
//! Everything here is derived from an injected clock value; nothing reads the
//! system clock, so day and week rollover can be tested deterministically.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate};

/// Calendar date of `now` in its own offset.
pub fn today(now: &DateTime<FixedOffset>) -> NaiveDate {
    now.date_naive()
}

/// The day before `date`.
pub fn yesterday(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// Most recent Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date - Duration::days(i64::from(offset))
}

/// Serde adapter for dates persisted as `YYYY-MM-DD`, with `""` meaning never.
pub(crate) mod date_or_empty {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
