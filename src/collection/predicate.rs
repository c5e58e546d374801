//! Named sort and filter predicates keyed by field name.

use std::collections::HashMap;

use super::{sort::SortDirection, value::FieldValue};

/// Extracts a sortable value; receives the active direction so sentinels can
/// depend on it.
pub type SortPredicate<R> = Box<dyn Fn(&R, SortDirection) -> FieldValue + Send + Sync>;

/// Fixed-semantics filter verdict; ignores the filter type and value.
pub type FilterPredicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

/// Registration table built once at startup and shared read-only afterwards.
pub struct PredicateRegistry<R> {
    sort_predicates: HashMap<String, SortPredicate<R>>,
    filter_predicates: HashMap<String, FilterPredicate<R>>,
}

impl<R> Default for PredicateRegistry<R> {
    fn default() -> Self {
        Self {
            sort_predicates: HashMap::new(),
            filter_predicates: HashMap::new(),
        }
    }
}

impl<R> std::fmt::Debug for PredicateRegistry<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sort_names: Vec<&str> = self.sort_predicates.keys().map(String::as_str).collect();
        let mut filter_names: Vec<&str> =
            self.filter_predicates.keys().map(String::as_str).collect();
        sort_names.sort_unstable();
        filter_names.sort_unstable();
        f.debug_struct("PredicateRegistry")
            .field("sort_predicates", &sort_names)
            .field("filter_predicates", &filter_names)
            .finish()
    }
}

impl<R> PredicateRegistry<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sort predicate, replacing any previous one with the same name.
    pub fn register_sort_predicate<F>(&mut self, field_name: impl Into<String>, predicate: F)
    where
        F: Fn(&R, SortDirection) -> FieldValue + Send + Sync + 'static,
    {
        self.sort_predicates
            .insert(field_name.into(), Box::new(predicate));
    }

    /// Registers a filter predicate, replacing any previous one with the same name.
    pub fn register_filter_predicate<F>(&mut self, field_name: impl Into<String>, predicate: F)
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.filter_predicates
            .insert(field_name.into(), Box::new(predicate));
    }

    pub fn with_sort_predicate<F>(mut self, field_name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&R, SortDirection) -> FieldValue + Send + Sync + 'static,
    {
        self.register_sort_predicate(field_name, predicate);
        self
    }

    pub fn with_filter_predicate<F>(mut self, field_name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.register_filter_predicate(field_name, predicate);
        self
    }

    pub fn sort_predicate(&self, field_name: &str) -> Option<&SortPredicate<R>> {
        self.sort_predicates.get(field_name)
    }

    pub fn filter_predicate(&self, field_name: &str) -> Option<&FilterPredicate<R>> {
        self.filter_predicates.get(field_name)
    }

    pub fn has_sort_predicate(&self, field_name: &str) -> bool {
        self.sort_predicates.contains_key(field_name)
    }

    pub fn has_filter_predicate(&self, field_name: &str) -> bool {
        self.filter_predicates.contains_key(field_name)
    }
}
