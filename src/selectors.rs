//! Render-ready projections of the state tree.

use serde::Serialize;

use crate::{
    collection::{
        filter_collection, sort_collection, CollectionRecord, FieldValue, FilterType,
        PredicateRegistry, SortDirection,
    },
    sections::{CalendarSettings, SeriesIndexSettings, SeriesView},
    view::{visible_columns, ColumnDescriptor, OverviewOptions, PosterOptions},
};

/// Cross-cutting UI flags not owned by any section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSettings {
    pub enable_color_impaired_mode: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesIndexView<'a, R> {
    /// Filtered, then sorted, records.
    pub items: Vec<&'a R>,
    pub columns: Vec<&'a ColumnDescriptor>,
    pub view: &'a SeriesView,
    pub poster_options: &'a PosterOptions,
    pub overview_options: &'a OverviewOptions,
    pub sort_key: &'a str,
    pub sort_direction: SortDirection,
    pub filter_key: Option<&'a str>,
    pub filter_value: &'a FieldValue,
    pub filter_type: FilterType,
    pub is_color_impaired_mode: bool,
    pub has_series: bool,
    pub total_count: usize,
}

pub fn select_series_index<'a, R: CollectionRecord>(
    settings: &'a SeriesIndexSettings,
    records: &'a [R],
    registry: &PredicateRegistry<R>,
    ui: UiSettings,
) -> SeriesIndexView<'a, R> {
    let filtered = filter_collection(records, &settings.filter_spec(), registry);
    let items = sort_collection(filtered, &settings.sort_spec(), registry);
    SeriesIndexView {
        items,
        columns: visible_columns(&settings.columns),
        view: &settings.view,
        poster_options: &settings.poster_options,
        overview_options: &settings.overview_options,
        sort_key: &settings.sort_key,
        sort_direction: settings.sort_direction,
        filter_key: settings.filter_key.as_deref(),
        filter_value: &settings.filter_value,
        filter_type: settings.filter_type,
        is_color_impaired_mode: ui.enable_color_impaired_mode,
        has_series: !records.is_empty(),
        total_count: records.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPageProps {
    pub day_count: u32,
    pub unmonitored: bool,
    pub show_upcoming: bool,
    pub color_impaired_mode: bool,
    pub has_series: bool,
}

pub fn select_calendar_page(
    calendar: &CalendarSettings,
    series_count: usize,
    ui: UiSettings,
) -> CalendarPageProps {
    CalendarPageProps {
        day_count: calendar.day_count,
        unmonitored: calendar.unmonitored,
        show_upcoming: calendar.show_upcoming,
        color_impaired_mode: ui.enable_color_impaired_mode,
        has_series: series_count > 0,
    }
}
