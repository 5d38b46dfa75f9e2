//! Lenient money amounts.
//!
//! Amounts reach the journal from hand-typed forms and spreadsheet exports,
//! so a value may be a JSON number, a locale-formatted string ("1 250,50"),
//! or missing entirely. Anything unreadable becomes `None`; the accounting
//! rules later treat `None` as a zero contribution.

/// Parse a hand-typed amount.
///
/// All whitespace is stripped and the first comma is read as the decimal
/// separator. Returns `None` when the remainder is not a finite number.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let cleaned = cleaned.replacen(',', ".", 1);
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Serde adapter for `Option<f64>` amount fields.
///
/// Use with `#[serde(default, with = "amount::lenient")]`.
pub mod lenient {
    use super::parse_amount;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) if v.is_finite() => serializer.serialize_some(v),
            _ => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawAmount>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawAmount::Number(v)) => Some(v),
            Some(RawAmount::Text(s)) => parse_amount(&s),
            None => None,
        })
    }
}
