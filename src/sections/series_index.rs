//! Series index settings, their defaults, and the transition function.

use crate::{
    collection::{FieldValue, FilterSpec, FilterType, SortDirection, SortSpec},
    protocol::SeriesIndexAction,
    view::{
        reorder_columns, sanitize_columns, set_column_visible, ColumnDescriptor, OverviewOptions,
        PosterOptions, PresetName, PresetOptionValue,
    },
};

use super::SectionState;

/// Layout used to present the collection.
///
/// Unrecognized modes are kept verbatim so they round-trip through storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(from = "String", into = "String")]
pub enum SeriesView {
    #[default]
    Posters,
    Overview,
    Table,
    Unrecognized(String),
}

impl SeriesView {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Posters => "posters",
            Self::Overview => "overview",
            Self::Table => "table",
            Self::Unrecognized(mode) => mode,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for SeriesView {
    fn from(mode: String) -> Self {
        match mode.as_str() {
            "posters" => Self::Posters,
            "overview" => Self::Overview,
            "table" => Self::Table,
            _ => Self::Unrecognized(mode),
        }
    }
}

impl From<&str> for SeriesView {
    fn from(mode: &str) -> Self {
        Self::from(mode.to_string())
    }
}

impl From<SeriesView> for String {
    fn from(view: SeriesView) -> Self {
        view.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeriesIndexSettings {
    pub sort_key: String,
    pub sort_direction: SortDirection,
    pub secondary_sort_key: String,
    pub secondary_sort_direction: SortDirection,
    pub filter_key: Option<String>,
    pub filter_value: FieldValue,
    pub filter_type: FilterType,
    pub view: SeriesView,
    pub poster_options: PosterOptions,
    pub overview_options: OverviewOptions,
    pub columns: Vec<ColumnDescriptor>,
}

impl Default for SeriesIndexSettings {
    fn default() -> Self {
        Self {
            sort_key: "sortTitle".to_string(),
            sort_direction: SortDirection::Ascending,
            secondary_sort_key: "sortTitle".to_string(),
            secondary_sort_direction: SortDirection::Ascending,
            filter_key: None,
            filter_value: FieldValue::Absent,
            filter_type: FilterType::Equal,
            view: SeriesView::Posters,
            poster_options: PosterOptions::default(),
            overview_options: OverviewOptions::default(),
            columns: default_series_columns(),
        }
    }
}

/// Table columns in their default order.
pub fn default_series_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::fixed("status", "Status"),
        ColumnDescriptor::sortable("sortTitle", "Series Title").not_modifiable(),
        ColumnDescriptor::sortable("network", "Network"),
        ColumnDescriptor::sortable("qualityProfileId", "Quality Profile"),
        ColumnDescriptor::sortable("languageProfileId", "Language Profile").hidden(),
        ColumnDescriptor::sortable("nextAiring", "Next Airing"),
        ColumnDescriptor::sortable("previousAiring", "Previous Airing").hidden(),
        ColumnDescriptor::sortable("added", "Added").hidden(),
        ColumnDescriptor::sortable("seasonCount", "Seasons"),
        ColumnDescriptor::sortable("episodeProgress", "Episodes"),
        ColumnDescriptor::sortable("episodeCount", "Episode Count").hidden(),
        ColumnDescriptor::sortable("latestSeason", "Latest Season").hidden(),
        ColumnDescriptor::sortable("path", "Path").hidden(),
        ColumnDescriptor::sortable("sizeOnDisk", "Size on Disk").hidden(),
        ColumnDescriptor::sortable("tags", "Tags")
            .hidden()
            .not_sortable(),
        ColumnDescriptor::sortable("useSceneNumbering", "Scene Numbering").hidden(),
        ColumnDescriptor::fixed("actions", "Actions"),
    ]
}

impl SectionState for SeriesIndexSettings {
    const SECTION: &'static str = "seriesIndex";
    const PERSISTED_PATHS: &'static [&'static str] = &[
        "seriesIndex.sortKey",
        "seriesIndex.sortDirection",
        "seriesIndex.filterKey",
        "seriesIndex.filterValue",
        "seriesIndex.filterType",
        "seriesIndex.view",
        "seriesIndex.columns",
        "seriesIndex.posterOptions",
        "seriesIndex.overviewOptions",
    ];

    fn sanitize(mut self) -> Self {
        self.columns = sanitize_columns(&self.columns, &default_series_columns());
        self
    }
}

impl SeriesIndexSettings {
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec {
            sort_key: self.sort_key.clone(),
            sort_direction: self.sort_direction,
            secondary_sort_key: self.secondary_sort_key.clone(),
            secondary_sort_direction: self.secondary_sort_direction,
        }
    }

    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            filter_key: self.filter_key.clone(),
            filter_value: self.filter_value.clone(),
            filter_type: self.filter_type,
        }
    }

    /// Applies a single named preset option.
    ///
    /// Unknown option names and values of the wrong type leave the settings unchanged.
    pub fn with_preset_option(
        &self,
        preset: PresetName,
        option: &str,
        value: PresetOptionValue,
    ) -> Self {
        match SeriesIndexAction::preset_option(preset, option, value) {
            Some(action) => reduce(self, &action),
            None => self.clone(),
        }
    }
}

/// Computes the settings that follow `action`. Never mutates `state`.
pub fn reduce(state: &SeriesIndexSettings, action: &SeriesIndexAction) -> SeriesIndexSettings {
    match action {
        SeriesIndexAction::SetSort(payload) => {
            let sort_direction = match payload.sort_direction {
                Some(direction) => direction,
                None if payload.sort_key == state.sort_key => state.sort_direction.toggled(),
                None => SortDirection::Ascending,
            };
            SeriesIndexSettings {
                sort_key: payload.sort_key.clone(),
                sort_direction,
                ..state.clone()
            }
        }
        SeriesIndexAction::SetFilter(filter) => SeriesIndexSettings {
            filter_key: filter.filter_key.clone(),
            filter_value: filter.filter_value.clone(),
            filter_type: filter.filter_type,
            ..state.clone()
        },
        SeriesIndexAction::SetView(payload) => SeriesIndexSettings {
            view: payload.view.clone(),
            ..state.clone()
        },
        SeriesIndexAction::SetTableOption(payload) => SeriesIndexSettings {
            columns: set_column_visible(&state.columns, &payload.column_name, payload.value),
            ..state.clone()
        },
        SeriesIndexAction::SetTableColumnOrder(payload) => SeriesIndexSettings {
            columns: reorder_columns(&state.columns, payload.from, payload.to),
            ..state.clone()
        },
        SeriesIndexAction::SetPosterOption(patch) => SeriesIndexSettings {
            poster_options: state.poster_options.merged(patch),
            ..state.clone()
        },
        SeriesIndexAction::SetOverviewOption(patch) => SeriesIndexSettings {
            overview_options: state.overview_options.merged(patch),
            ..state.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{default_series_columns, reduce, SeriesIndexSettings, SeriesView};
    use crate::{
        collection::{FieldValue, FilterSpec, FilterType, SortDirection},
        protocol::{
            ColumnOrderPayload, SeriesIndexAction, SetSortPayload, SetViewPayload,
            TableOptionPayload,
        },
        sections::SectionState,
        view::{PosterOptionsPatch, PresetName, PresetOptionValue, PresetSize},
    };

    fn set_sort(sort_key: &str, sort_direction: Option<SortDirection>) -> SeriesIndexAction {
        SeriesIndexAction::SetSort(SetSortPayload {
            sort_key: sort_key.to_string(),
            sort_direction,
        })
    }

    #[test]
    fn test_defaults_match_initial_index_layout() {
        let settings = SeriesIndexSettings::default();
        assert_eq!(settings.sort_key, "sortTitle");
        assert_eq!(settings.secondary_sort_key, "sortTitle");
        assert_eq!(settings.view, SeriesView::Posters);
        assert_eq!(settings.filter_key, None);
        assert!(!settings.filter_spec().is_active());

        let columns = default_series_columns();
        assert_eq!(columns.len(), 17);
        assert_eq!(columns[0].name, "status");
        assert_eq!(columns[16].name, "actions");
        assert!(!columns[1].is_modifiable);
        let tags = columns
            .iter()
            .find(|column| column.name == "tags")
            .expect("tags column should exist");
        assert!(!tags.is_sortable);
        assert!(!tags.is_visible);
    }

    #[test]
    fn test_set_sort_same_key_toggles_direction() {
        let state = SeriesIndexSettings::default();
        let next = reduce(&state, &set_sort("sortTitle", None));
        assert_eq!(next.sort_direction, SortDirection::Descending);
        let next = reduce(&next, &set_sort("sortTitle", None));
        assert_eq!(next.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_set_sort_new_key_resets_to_ascending() {
        let state = SeriesIndexSettings {
            sort_direction: SortDirection::Descending,
            ..SeriesIndexSettings::default()
        };
        let next = reduce(&state, &set_sort("network", None));
        assert_eq!(next.sort_key, "network");
        assert_eq!(next.sort_direction, SortDirection::Ascending);
        assert_eq!(next.secondary_sort_key, "sortTitle");
    }

    #[test]
    fn test_set_sort_explicit_direction_wins() {
        let state = SeriesIndexSettings::default();
        let next = reduce(&state, &set_sort("sortTitle", Some(SortDirection::Ascending)));
        assert_eq!(next.sort_direction, SortDirection::Ascending);
        let next = reduce(&state, &set_sort("network", Some(SortDirection::Descending)));
        assert_eq!(next.sort_direction, SortDirection::Descending);
    }

    #[test]
    fn test_set_filter_replaces_all_filter_fields() {
        let state = reduce(
            &SeriesIndexSettings::default(),
            &SeriesIndexAction::SetFilter(FilterSpec::new(
                "monitored",
                true,
                FilterType::NotEqual,
            )),
        );
        let next = reduce(&state, &SeriesIndexAction::SetFilter(FilterSpec::default()));
        assert_eq!(next.filter_key, None);
        assert_eq!(next.filter_value, FieldValue::Absent);
        assert_eq!(next.filter_type, FilterType::Equal);
    }

    #[test]
    fn test_set_view_keeps_unrecognized_modes() {
        let next = reduce(
            &SeriesIndexSettings::default(),
            &SeriesIndexAction::SetView(SetViewPayload {
                view: SeriesView::from("mosaic"),
            }),
        );
        assert_eq!(next.view, SeriesView::Unrecognized("mosaic".to_string()));
        assert!(!next.view.is_recognized());
        let json = serde_json::to_value(&next).expect("settings should serialize");
        assert_eq!(json["view"], "mosaic");
    }

    #[test]
    fn test_table_option_ignores_unmodifiable_and_unknown_columns() {
        let state = SeriesIndexSettings::default();
        for column_name in ["sortTitle", "actions", "bogus"] {
            let next = reduce(
                &state,
                &SeriesIndexAction::SetTableOption(TableOptionPayload {
                    column_name: column_name.to_string(),
                    value: false,
                }),
            );
            assert_eq!(next.columns, state.columns);
        }

        let next = reduce(
            &state,
            &SeriesIndexAction::SetTableOption(TableOptionPayload {
                column_name: "path".to_string(),
                value: true,
            }),
        );
        let path = next
            .columns
            .iter()
            .find(|column| column.name == "path")
            .expect("path column should exist");
        assert!(path.is_visible);
    }

    #[test]
    fn test_column_order_moves_columns() {
        let next = reduce(
            &SeriesIndexSettings::default(),
            &SeriesIndexAction::SetTableColumnOrder(ColumnOrderPayload { from: 2, to: 0 }),
        );
        assert_eq!(next.columns[0].name, "network");
        assert_eq!(next.columns[1].name, "status");
    }

    #[test]
    fn test_poster_option_touches_only_named_field() {
        let state = SeriesIndexSettings::default();
        let next = reduce(
            &state,
            &SeriesIndexAction::SetPosterOption(PosterOptionsPatch {
                show_title: Some(true),
                ..PosterOptionsPatch::default()
            }),
        );
        assert!(next.poster_options.show_title);
        assert_eq!(next.poster_options.size, state.poster_options.size);
        assert_eq!(next.overview_options, state.overview_options);
        assert!(!state.poster_options.show_title);
    }

    #[test]
    fn test_with_preset_option_routes_to_named_preset() {
        let state = SeriesIndexSettings::default();
        let next = state.with_preset_option(
            PresetName::Overview,
            "size",
            PresetOptionValue::Size(PresetSize::Small),
        );
        assert_eq!(next.overview_options.size, PresetSize::Small);
        assert_eq!(next.poster_options, state.poster_options);

        let unchanged =
            state.with_preset_option(PresetName::Poster, "showNetwork", PresetOptionValue::Bool(true));
        assert_eq!(unchanged, state);
    }

    #[test]
    fn test_sanitize_restores_missing_columns() {
        let mut settings = SeriesIndexSettings::default();
        settings.columns.truncate(3);
        let repaired = settings.sanitize();
        assert_eq!(repaired.columns, default_series_columns());
    }
}
