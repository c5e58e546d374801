//! Filter settings and the generic comparison table.

use std::cmp::Ordering;

use super::{predicate::PredicateRegistry, record::CollectionRecord, value::FieldValue};

/// Comparison operators shared with the filter UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterType {
    #[default]
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Contains,
    NotContains,
}

/// Active filter. A `None` key disables filtering entirely.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub filter_key: Option<String>,
    #[serde(default)]
    pub filter_value: FieldValue,
    #[serde(default)]
    pub filter_type: FilterType,
}

impl FilterSpec {
    pub fn new(
        filter_key: impl Into<String>,
        filter_value: impl Into<FieldValue>,
        filter_type: FilterType,
    ) -> Self {
        Self {
            filter_key: Some(filter_key.into()),
            filter_value: filter_value.into(),
            filter_type,
        }
    }

    pub fn is_active(&self) -> bool {
        self.filter_key.is_some()
    }
}

fn ordering(value: &FieldValue, filter_value: &FieldValue) -> Option<Ordering> {
    match (value, filter_value) {
        (FieldValue::Number(left), _) => filter_value
            .as_number()
            .filter(|right| !right.is_nan())
            .map(|right| left.total_cmp(&right)),
        (FieldValue::Date(left), _) => filter_value.as_date().map(|right| left.cmp(&right)),
        (FieldValue::Text(left), FieldValue::Text(right)) => Some(left.as_str().cmp(right)),
        (FieldValue::Text(_), FieldValue::Number(right)) => value
            .as_number()
            .map(|left| left.total_cmp(right)),
        _ => None,
    }
}

fn values_equal(value: &FieldValue, filter_value: &FieldValue) -> bool {
    match (value, filter_value) {
        (FieldValue::Absent, FieldValue::Absent) => true,
        (FieldValue::Absent, _) | (_, FieldValue::Absent) => false,
        (FieldValue::Bool(left), FieldValue::Bool(right)) => left == right,
        (FieldValue::Text(left), FieldValue::Text(right)) => left == right,
        (FieldValue::List(left), FieldValue::List(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right.iter())
                    .all(|(left_item, right_item)| values_equal(left_item, right_item))
        }
        _ => ordering(value, filter_value) == Some(Ordering::Equal),
    }
}

fn contains(value: &FieldValue, filter_value: &FieldValue) -> Option<bool> {
    match (value, filter_value) {
        (FieldValue::Text(haystack), FieldValue::Text(needle)) => Some(
            haystack
                .to_lowercase()
                .contains(needle.to_lowercase().as_str()),
        ),
        (FieldValue::List(items), _) => {
            Some(items.iter().any(|item| values_equal(item, filter_value)))
        }
        _ => None,
    }
}

/// Applies one operator to a record value and the filter value.
///
/// | operator | behaviour |
/// |---|---|
/// | `equal` | same-kind equality; numbers and dates coerce the filter value; `null` only equals an absent value |
/// | `notEqual` | negation of `equal` |
/// | ordering operators | number, date or text pairs; absent or mismatched kinds never match |
/// | `contains` | case-insensitive substring for text, element equality for lists |
/// | `notContains` | negation of `contains` for text and lists; other kinds never match |
///
/// An object filter value matches nothing under any operator.
pub fn compare_values(value: &FieldValue, filter_type: FilterType, filter_value: &FieldValue) -> bool {
    if matches!(filter_value, FieldValue::Object(_)) {
        return false;
    }
    match filter_type {
        FilterType::Equal => values_equal(value, filter_value),
        FilterType::NotEqual => !values_equal(value, filter_value),
        FilterType::GreaterThan => ordering(value, filter_value) == Some(Ordering::Greater),
        FilterType::GreaterThanOrEqual => {
            matches!(ordering(value, filter_value), Some(Ordering::Greater | Ordering::Equal))
        }
        FilterType::LessThan => ordering(value, filter_value) == Some(Ordering::Less),
        FilterType::LessThanOrEqual => {
            matches!(ordering(value, filter_value), Some(Ordering::Less | Ordering::Equal))
        }
        FilterType::Contains => contains(value, filter_value) == Some(true),
        FilterType::NotContains => contains(value, filter_value) == Some(false),
    }
}

/// Returns `true` when `record` passes `spec`.
///
/// A named filter predicate takes precedence and ignores the type and value.
/// Keys that are neither registered nor a known field match nothing.
pub fn matches_filter<R: CollectionRecord>(
    record: &R,
    spec: &FilterSpec,
    registry: &PredicateRegistry<R>,
) -> bool {
    let Some(filter_key) = spec.filter_key.as_deref() else {
        return true;
    };
    if let Some(predicate) = registry.filter_predicate(filter_key) {
        return predicate(record);
    }
    let Some(field) = R::parse_field(filter_key) else {
        return false;
    };
    compare_values(&record.field_value(field), spec.filter_type, &spec.filter_value)
}

/// Keeps the records that pass `spec`, in input order.
pub fn filter_collection<'a, R, I>(
    records: I,
    spec: &FilterSpec,
    registry: &PredicateRegistry<R>,
) -> Vec<&'a R>
where
    R: CollectionRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .filter(|record| matches_filter(*record, spec, registry))
        .collect()
}
