//! Scalar values extracted from records for sorting and filtering.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// A comparable value read from a record field or produced by a predicate.
///
/// Serialized untagged so persisted filter values stay plain JSON scalars:
/// `null`, booleans, numbers, RFC 3339 strings (read back as dates), other
/// strings, arrays, and objects kept opaque.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Missing field, missing value, or unresolvable key.
    #[default]
    Absent,
    Bool(bool),
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
    List(Vec<FieldValue>),
    /// JSON object; stored as-is and never equal to a record value.
    Object(serde_json::Map<String, serde_json::Value>),
}

impl FieldValue {
    fn type_rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::Text(_) => 3,
            Self::List(_) => 4,
            Self::Object(_) => 5,
            Self::Absent => 6,
        }
    }

    /// Total order used by the sort engine.
    ///
    /// Values of the same kind compare naturally (text is case-sensitive).
    /// Mixed kinds order by kind, and `Absent` ranks after everything else.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Absent, Self::Absent) => Ordering::Equal,
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Number(left), Self::Number(right)) => left.total_cmp(right),
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            (Self::List(left), Self::List(right)) => {
                for (left_item, right_item) in left.iter().zip(right.iter()) {
                    let ordering = left_item.sort_cmp(right_item);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                left.len().cmp(&right.len())
            }
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Numeric view of the value; text is parsed, other kinds have none.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Date view of the value; text is parsed and numbers are epoch seconds.
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(text) => parse_date(text),
            Self::Number(seconds) if seconds.is_finite() => {
                Utc.timestamp_opt(*seconds as i64, 0).single()
            }
            _ => None,
        }
    }
}

/// Parses an ISO-8601 date or date-time. Plain dates resolve to UTC midnight.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(date_time.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Absent)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use chrono::{TimeZone, Utc};

    use super::{parse_date, FieldValue};

    #[test]
    fn test_absent_sorts_after_every_present_kind() {
        let present = [
            FieldValue::Bool(true),
            FieldValue::Number(f64::MAX),
            FieldValue::Text("zzz".to_string()),
            FieldValue::List(vec![]),
        ];
        for value in &present {
            assert_eq!(value.sort_cmp(&FieldValue::Absent), Ordering::Less);
            assert_eq!(FieldValue::Absent.sort_cmp(value), Ordering::Greater);
        }
        assert_eq!(
            FieldValue::Absent.sort_cmp(&FieldValue::Absent),
            Ordering::Equal
        );
    }

    #[test]
    fn test_text_comparison_is_case_sensitive() {
        let upper = FieldValue::from("FOX");
        let lower = FieldValue::from("abc");
        assert_eq!(upper.sort_cmp(&lower), Ordering::Less);
    }

    #[test]
    fn test_parse_date_accepts_plain_dates_and_rfc3339() {
        assert_eq!(
            parse_date("2024-01-01"),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single()
        );
        assert_eq!(
            parse_date("2024-01-01T05:30:00Z"),
            Utc.with_ymd_and_hms(2024, 1, 1, 5, 30, 0).single()
        );
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("  "), None);
    }

    #[test]
    fn test_untagged_json_values_map_to_expected_kinds() {
        let parsed: Vec<FieldValue> =
            serde_json::from_str(r#"[null, true, 3, "2024-01-01T00:00:00Z", "abc", [1]]"#)
                .expect("values should parse");
        assert_eq!(parsed[0], FieldValue::Absent);
        assert_eq!(parsed[1], FieldValue::Bool(true));
        assert_eq!(parsed[2], FieldValue::Number(3.0));
        assert!(matches!(parsed[3], FieldValue::Date(_)));
        assert_eq!(parsed[4], FieldValue::Text("abc".to_string()));
        assert_eq!(parsed[5], FieldValue::List(vec![FieldValue::Number(1.0)]));

        let parsed: FieldValue =
            serde_json::from_str(r#"{"min": 1}"#).expect("objects should parse");
        assert!(matches!(parsed, FieldValue::Object(ref map) if map.contains_key("min")));
    }

    #[test]
    fn test_numeric_and_date_coercions() {
        assert_eq!(FieldValue::from(" 42 ").as_number(), Some(42.0));
        assert_eq!(FieldValue::Bool(true).as_number(), None);
        assert_eq!(
            FieldValue::Number(0.0).as_date(),
            Utc.timestamp_opt(0, 0).single()
        );
        assert_eq!(FieldValue::Absent.as_date(), None);
    }
}
