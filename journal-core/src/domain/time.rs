//! Time-of-day handling for trade entry/exit stamps.
//!
//! Input accepts `HH:MM` or `HH:MM:SS`; everything is stored as a
//! `NaiveTime` and written back as `HH:MM:SS`.

use chrono::{Duration, NaiveTime};

const HMS: &str = "%H:%M:%S";
const HM: &str = "%H:%M";

/// Parse `HH:MM:SS` or `HH:MM`. Surrounding whitespace is ignored.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, HMS)
        .or_else(|_| NaiveTime::parse_from_str(raw, HM))
        .ok()
}

/// Normalize a time-of-day string to `HH:MM:SS`.
pub fn normalize_time(raw: &str) -> Option<String> {
    parse_time_of_day(raw).map(|t| t.format(HMS).to_string())
}

/// Render a holding duration as `"{h}h {m}m {s}s"`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Serde adapter for `Option<NaiveTime>` stored as `HH:MM:SS`.
///
/// Empty strings and `null` read as `None`; anything else that does not
/// parse is an error.
pub mod hms {
    use super::{parse_time_of_day, HMS};
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => serializer.serialize_some(&t.format(HMS).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_time_of_day(s).map(Some).ok_or_else(|| {
                de::Error::custom(format!(
                    "invalid time of day '{s}' (expected HH:MM or HH:MM:SS)"
                ))
            }),
        }
    }
}
