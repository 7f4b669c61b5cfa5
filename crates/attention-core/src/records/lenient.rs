//! Forgiving field decoders for source records.
//!
//! Source records come from an external store that does not validate its
//! optional fields. A date or token that cannot be understood decodes as
//! absent instead of failing the whole snapshot.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Text(String),
    Other(IgnoredAny),
}

/// Decode an optional string, treating empty strings and non-string values as absent.
pub fn optional_token<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Raw::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Fallible<T> {
    Value(T),
    Other(IgnoredAny),
}

/// Decode a defaulted field, treating `null` and values of the wrong shape
/// as the field's default.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let raw: Option<Fallible<T>> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Fallible::Value(value)) => value,
        _ => T::default(),
    })
}

/// Decode a defaulted collection, treating `null` as empty.
///
/// Unlike [`or_default`] a malformed element still fails, so one bad child
/// cannot silently drop its valid siblings.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a free-form marker. Any value other than `null`, `false`, a blank
/// string or an empty array/object counts as present and is kept verbatim.
pub fn marker<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|value| match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(text) => !text.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Bool(true) | Value::Number(_) => true,
    }))
}

/// Parse a date in any of the accepted shapes.
///
/// Date-only values resolve to local midnight. RFC 3339 values are converted
/// to local wall-clock time so that calendar-day comparisons use the user's day.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Serde adapter for `Option<NaiveDateTime>` fields.
pub mod date {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(optional_token(deserializer)?.as_deref().and_then(parse_date))
    }

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) if dt.time() == NaiveTime::MIN => {
                serializer.serialize_str(&dt.format("%Y-%m-%d").to_string())
            }
            Some(dt) => serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, with = "date")]
        due: Option<NaiveDateTime>,
        #[serde(default, deserialize_with = "optional_token")]
        label: Option<String>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn date_only_is_midnight() {
        let p = probe(r#"{"due": "2024-06-10"}"#);
        let expected = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap().and_time(NaiveTime::MIN);
        assert_eq!(p.due, Some(expected));
    }

    #[test]
    fn naive_datetime_keeps_time() {
        let p = probe(r#"{"due": "2024-06-10T23:00:00"}"#);
        assert_eq!(p.due.unwrap().format("%H:%M").to_string(), "23:00");
    }

    #[test]
    fn garbage_date_is_absent() {
        assert_eq!(probe(r#"{"due": "next tuesday"}"#).due, None);
        assert_eq!(probe(r#"{"due": ""}"#).due, None);
        assert_eq!(probe(r#"{"due": 42}"#).due, None);
        assert_eq!(probe(r#"{"due": null}"#).due, None);
        assert_eq!(probe(r#"{}"#).due, None);
    }

    #[derive(Deserialize)]
    struct Defaults {
        #[serde(default, deserialize_with = "or_default")]
        flag: bool,
        #[serde(default, deserialize_with = "or_default")]
        ratio: f64,
        #[serde(default, deserialize_with = "null_as_default")]
        children: Vec<u32>,
        #[serde(default, deserialize_with = "marker")]
        marker: Option<Value>,
    }

    fn defaults(json: &str) -> Defaults {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn null_fields_take_their_default() {
        let d = defaults(r#"{"flag": null, "ratio": null, "children": null, "marker": null}"#);
        assert!(!d.flag);
        assert_eq!(d.ratio, 0.0);
        assert!(d.children.is_empty());
        assert!(d.marker.is_none());
    }

    #[test]
    fn wrong_shaped_scalars_take_their_default() {
        let d = defaults(r#"{"flag": "yes", "ratio": "half"}"#);
        assert!(!d.flag);
        assert_eq!(d.ratio, 0.0);
        assert!(defaults(r#"{"flag": true, "ratio": 42.5}"#).flag);
        assert_eq!(defaults(r#"{"ratio": 42.5}"#).ratio, 42.5);
    }

    #[test]
    fn malformed_child_still_fails() {
        assert!(serde_json::from_str::<Defaults>(r#"{"children": ["x"]}"#).is_err());
        assert_eq!(defaults(r#"{"children": [1, 2]}"#).children, vec![1, 2]);
    }

    #[test]
    fn marker_presence() {
        assert!(defaults(r#"{"marker": true}"#).marker.is_some());
        assert!(defaults(r#"{"marker": "tonight"}"#).marker.is_some());
        assert!(defaults(r#"{"marker": 1718000000}"#).marker.is_some());
        assert!(defaults(r#"{"marker": {"at": "09:00"}}"#).marker.is_some());
        assert!(defaults(r#"{"marker": false}"#).marker.is_none());
        assert!(defaults(r#"{"marker": null}"#).marker.is_none());
        assert!(defaults(r#"{"marker": "  "}"#).marker.is_none());
        assert!(defaults(r#"{"marker": {}}"#).marker.is_none());
        assert!(defaults(r#"{}"#).marker.is_none());
    }

    #[test]
    fn blank_token_is_absent() {
        assert_eq!(probe(r#"{"label": "   "}"#).label, None);
        assert_eq!(probe(r#"{"label": true}"#).label, None);
        assert_eq!(probe(r#"{"label": " x "}"#).label.as_deref(), Some("x"));
    }
}
