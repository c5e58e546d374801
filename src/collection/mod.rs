//! Generic client-side collection engine: predicates, sorting and filtering.

pub mod filter;
pub mod predicate;
pub mod record;
pub mod sort;
pub mod value;

pub use filter::{compare_values, filter_collection, matches_filter, FilterSpec, FilterType};
pub use predicate::{FilterPredicate, PredicateRegistry, SortPredicate};
pub use record::CollectionRecord;
pub use sort::{resolve_sort_value, sort_collection, SortDirection, SortSpec};
pub use value::{parse_date, FieldValue};
