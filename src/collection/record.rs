//! Typed field access for records held in a client-side collection.

use super::value::FieldValue;

/// A record whose fields can be addressed by a persisted string key.
///
/// Keys arrive as strings from settings and actions. `parse_field` maps a key
/// onto the record's closed set of fields, and `field_value` is the default
/// accessor used whenever no named predicate is registered for that key.
/// Keys that do not parse are unresolvable and behave as [`FieldValue::Absent`].
pub trait CollectionRecord {
    type Field: Copy + Eq + std::fmt::Debug;

    fn parse_field(key: &str) -> Option<Self::Field>;

    fn field_value(&self, field: Self::Field) -> FieldValue;

    /// Reads a field by key, or `Absent` when the key is unknown.
    fn value_for_key(&self, key: &str) -> FieldValue {
        Self::parse_field(key)
            .map(|field| self.field_value(field))
            .unwrap_or(FieldValue::Absent)
    }
}
