//! Stable two-key ordering over a record collection.

use std::cmp::Ordering;

use log::debug;

use super::{predicate::PredicateRegistry, record::CollectionRecord, value::FieldValue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Orients an ascending comparison result for this direction.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Primary and tie-breaking sort keys with their directions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub sort_key: String,
    #[serde(default)]
    pub sort_direction: SortDirection,
    pub secondary_sort_key: String,
    #[serde(default)]
    pub secondary_sort_direction: SortDirection,
}

/// Resolves the value a record contributes for `key`.
///
/// Registered predicates win; otherwise the record's typed accessor is used.
/// Keys known to neither yield `Absent`, so every record ties on that key.
pub fn resolve_sort_value<R: CollectionRecord>(
    record: &R,
    key: &str,
    direction: SortDirection,
    registry: &PredicateRegistry<R>,
) -> FieldValue {
    match registry.sort_predicate(key) {
        Some(predicate) => predicate(record, direction),
        None => record.value_for_key(key),
    }
}

fn is_resolvable<R: CollectionRecord>(key: &str, registry: &PredicateRegistry<R>) -> bool {
    registry.has_sort_predicate(key) || R::parse_field(key).is_some()
}

/// Orders `records` by the primary key, then the secondary key on ties.
///
/// Values are computed once per record. The sort is stable, so records that
/// tie on both keys keep their input order.
pub fn sort_collection<'a, R, I>(
    records: I,
    spec: &SortSpec,
    registry: &PredicateRegistry<R>,
) -> Vec<&'a R>
where
    R: CollectionRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    for key in [&spec.sort_key, &spec.secondary_sort_key] {
        if !is_resolvable(key, registry) {
            debug!("Sort key '{}' is unresolvable; records tie on it", key);
        }
    }

    let mut keyed: Vec<(FieldValue, FieldValue, &'a R)> = records
        .into_iter()
        .map(|record| {
            (
                resolve_sort_value(record, &spec.sort_key, spec.sort_direction, registry),
                resolve_sort_value(
                    record,
                    &spec.secondary_sort_key,
                    spec.secondary_sort_direction,
                    registry,
                ),
                record,
            )
        })
        .collect();

    keyed.sort_by(|left, right| {
        spec.sort_direction
            .apply(left.0.sort_cmp(&right.0))
            .then_with(|| {
                spec.secondary_sort_direction
                    .apply(left.1.sort_cmp(&right.1))
            })
    });

    keyed.into_iter().map(|(_, _, record)| record).collect()
}
