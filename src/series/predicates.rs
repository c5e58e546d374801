//! Sort and filter predicates for derived series fields.

use crate::collection::{parse_date, FieldValue, PredicateRegistry, SortDirection};

use super::record::SeriesRecord;

/// Lowercased network name; series without a network sort as the empty string.
pub fn network_sort_value(series: &SeriesRecord, _direction: SortDirection) -> FieldValue {
    FieldValue::Text(
        series
            .network
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default(),
    )
}

/// Next airing as epoch seconds.
///
/// Missing dates take the sentinel that lands them after every dated series
/// for the active direction: `0` when descending, `f64::MAX` when ascending.
pub fn next_airing_sort_value(series: &SeriesRecord, direction: SortDirection) -> FieldValue {
    match series.next_airing.as_deref().and_then(parse_date) {
        Some(next_airing) => FieldValue::Number(next_airing.timestamp() as f64),
        None if direction == SortDirection::Descending => FieldValue::Number(0.0),
        None => FieldValue::Number(f64::MAX),
    }
}

/// Percentage of episodes on disk plus a size term so equal percentages order
/// by total episode count.
pub fn episode_progress_sort_value(series: &SeriesRecord, _direction: SortDirection) -> FieldValue {
    let episode_count = f64::from(series.episode_count);
    let progress = if series.episode_count > 0 {
        f64::from(series.episode_file_count) / episode_count * 100.0
    } else {
        100.0
    };
    FieldValue::Number(progress + episode_count / 1_000_000.0)
}

/// Series with at least one episode not yet on disk.
pub fn has_missing_episodes(series: &SeriesRecord) -> bool {
    i64::from(series.episode_count) - i64::from(series.episode_file_count) > 0
}

/// Builds the predicate table used by the series index.
pub fn series_predicates() -> PredicateRegistry<SeriesRecord> {
    PredicateRegistry::new()
        .with_sort_predicate("network", network_sort_value)
        .with_sort_predicate("nextAiring", next_airing_sort_value)
        .with_sort_predicate("episodeProgress", episode_progress_sort_value)
        .with_filter_predicate("missing", has_missing_episodes)
}
