//! Named filters offered by the series index filter menu.

use crate::collection::{FilterSpec, FilterType};

/// A filter menu entry and the filter it applies.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPreset {
    pub key: &'static str,
    pub label: &'static str,
    pub spec: FilterSpec,
}

pub fn series_filter_presets() -> Vec<FilterPreset> {
    vec![
        FilterPreset {
            key: "all",
            label: "All",
            spec: FilterSpec::default(),
        },
        FilterPreset {
            key: "monitored",
            label: "Monitored Only",
            spec: FilterSpec::new("monitored", true, FilterType::Equal),
        },
        FilterPreset {
            key: "unmonitored",
            label: "Unmonitored Only",
            spec: FilterSpec::new("monitored", false, FilterType::Equal),
        },
        FilterPreset {
            key: "continuing",
            label: "Continuing Only",
            spec: FilterSpec::new("status", "continuing", FilterType::Equal),
        },
        FilterPreset {
            key: "ended",
            label: "Ended Only",
            spec: FilterSpec::new("status", "ended", FilterType::Equal),
        },
        FilterPreset {
            key: "missing",
            label: "Missing Episodes",
            spec: FilterSpec::new("missing", true, FilterType::Equal),
        },
    ]
}

pub fn find_filter_preset(key: &str) -> Option<FilterPreset> {
    series_filter_presets()
        .into_iter()
        .find(|preset| preset.key == key)
}
