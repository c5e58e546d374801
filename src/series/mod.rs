//! Series index domain: records, derived-field predicates and filter presets.

pub mod filters;
pub mod predicates;
pub mod record;

pub use filters::{find_filter_preset, series_filter_presets, FilterPreset};
pub use predicates::series_predicates;
pub use record::{SeriesField, SeriesRecord};
