//! Serde helpers for records coming out of the schemaless backend
//!
//! The store hands back whatever JSON was written, so numbers sometimes
//! arrive as strings, optionals as `null` and old order dates as bare
//! calendar days. These helpers coerce them into the typed fields.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

fn parse_number<E: de::Error>(raw: NumberOrString) -> Result<f64, E> {
    match raw {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a number, got {:?}", s)))
        }
    }
}

/// `f64` that also accepts numeric strings and `null` (as 0)
pub mod lenient_f64 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(raw) => parse_number(raw),
            None => Ok(0.0),
        }
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*value)
    }
}

/// `Option<f64>` that also accepts numeric strings; empty strings become `None`
pub mod lenient_option_f64 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
            Some(raw) => parse_number(raw).map(Some),
            None => Ok(None),
        }
    }

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(v),
            None => serializer.serialize_none(),
        }
    }
}

/// Non-negative counter stored as a JSON number (possibly fractional or a string)
pub mod lenient_u32 {
    use super::*;
    use serde::de::Error as _;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(raw) => parse_number(raw)?,
            None => 0.0,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(D::Error::custom(format!(
                "expected a non-negative count, got {}",
                value
            )));
        }
        Ok(value.floor() as u32)
    }

    pub fn serialize<S>(value: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(*value)
    }
}

/// Timestamp accepting RFC 3339 or a bare `YYYY-MM-DD` (midnight UTC)
pub mod flexible_datetime {
    use super::*;
    use serde::de::Error as _;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {:?}", raw)))
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// String that treats `null` as empty
pub mod null_as_empty {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde::Serialize;

    #[derive(Debug, Deserialize, Serialize)]
    struct Sample {
        #[serde(default, with = "lenient_f64")]
        price: f64,
        #[serde(default, with = "lenient_option_f64")]
        min: Option<f64>,
        #[serde(default, with = "lenient_u32")]
        count: u32,
    }

    #[test]
    fn test_numbers_and_strings_both_parse() {
        let s: Sample =
            serde_json::from_str(r#"{"price": "790", "min": 2500, "count": "2"}"#).unwrap();
        assert_eq!(s.price, 790.0);
        assert_eq!(s.min, Some(2500.0));
        assert_eq!(s.count, 2);
    }

    #[test]
    fn test_nulls_and_missing_fields() {
        let s: Sample = serde_json::from_str(r#"{"price": null, "min": ""}"#).unwrap();
        assert_eq!(s.price, 0.0);
        assert_eq!(s.min, None);
        assert_eq!(s.count, 0);
    }

    #[test]
    fn test_garbage_number_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"price": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"price": 1, "count": -3}"#).is_err());
    }

    #[test]
    fn test_flexible_datetime_accepts_both_shapes() {
        let full = flexible_datetime::parse("2024-05-20T14:30:00.000Z").unwrap();
        assert_eq!(full.hour(), 14);

        let day = flexible_datetime::parse("2024-05-15").unwrap();
        assert_eq!((day.year(), day.month(), day.day()), (2024, 5, 15));
        assert_eq!(day.hour(), 0);

        assert!(flexible_datetime::parse("yesterday").is_none());
    }
}
