//! Dotted-path selection of durable settings and field-by-field rehydration.

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::sections::SectionState;

/// Looks up a dotted path such as `seriesIndex.sortKey`.
pub fn lookup_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(root, |node, segment| node.as_object()?.get(segment))
}

/// Writes `value` at a dotted path, creating intermediate objects and
/// replacing any non-object found on the way.
pub fn set_path(root: &mut Value, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut node = root;
    while let Some(segment) = segments.next() {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let Some(map) = node.as_object_mut() else {
            return;
        };
        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return;
        }
        node = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}

/// Copies only the listed paths out of `root`. Missing paths are skipped.
pub fn pick_paths(root: &Value, paths: &[&str]) -> Value {
    let mut picked = Value::Object(Map::new());
    for path in paths {
        if let Some(value) = lookup_path(root, path) {
            set_path(&mut picked, path, value.clone());
        }
    }
    picked
}

/// Overlays every top-level key of `source` onto `target`, merging one level
/// deeper so sections from several snapshots can share one document.
pub fn merge_documents(target: &mut Value, source: Value) {
    let Value::Object(source_map) = source else {
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Some(target_map) = target.as_object_mut() else {
        return;
    };
    for (section, value) in source_map {
        let replacement = match (target_map.get_mut(&section), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                existing.extend(incoming);
                None
            }
            (_, value) => Some(value),
        };
        if let Some(value) = replacement {
            target_map.insert(section, value);
        }
    }
}

/// Durable subset of one section, nested under its section id.
pub fn section_snapshot<S: SectionState>(state: &S) -> Result<Value, serde_json::Error> {
    let mut full = Value::Object(Map::new());
    set_path(&mut full, S::SECTION, serde_json::to_value(state)?);
    Ok(pick_paths(&full, S::PERSISTED_PATHS))
}

/// Rebuilds a section from a persisted document.
///
/// Starts from the defaults and applies each persisted path on its own. A
/// value that no longer fits the section's shape is dropped in favour of the
/// default, and paths outside the persisted list are never read.
pub fn rehydrate<S: SectionState>(document: &Value) -> S {
    let mut section = match serde_json::to_value(S::default()) {
        Ok(section) => section,
        Err(err) => {
            warn!("Failed to encode default {} settings: {}", S::SECTION, err);
            return S::default();
        }
    };
    let prefix = format!("{}.", S::SECTION);

    for path in S::PERSISTED_PATHS {
        let Some(persisted) = lookup_path(document, path) else {
            continue;
        };
        let Some(field_path) = path.strip_prefix(&prefix) else {
            continue;
        };
        let mut candidate = section.clone();
        set_path(&mut candidate, field_path, persisted.clone());
        match serde_json::from_value::<S>(candidate.clone()) {
            Ok(_) => section = candidate,
            Err(err) => warn!("Ignoring persisted value at {}: {}", path, err),
        }
    }

    match serde_json::from_value::<S>(section) {
        Ok(state) => state.sanitize(),
        Err(err) => {
            debug!("Falling back to default {} settings: {}", S::SECTION, err);
            S::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{lookup_path, merge_documents, pick_paths, rehydrate, section_snapshot, set_path};
    use crate::{
        collection::{FieldValue, FilterType, SortDirection},
        sections::{CalendarSettings, SeriesIndexSettings, SeriesView},
        view::PresetSize,
    };

    #[test]
    fn test_lookup_and_set_dotted_paths() {
        let mut root = json!({"a": {"b": 1}, "c": 2});
        assert_eq!(lookup_path(&root, "a.b"), Some(&json!(1)));
        assert_eq!(lookup_path(&root, "c.d"), None);

        set_path(&mut root, "a.e.f", json!(true));
        set_path(&mut root, "c.d", json!("x"));
        assert_eq!(root, json!({"a": {"b": 1, "e": {"f": true}}, "c": {"d": "x"}}));
    }

    #[test]
    fn test_pick_paths_skips_missing_entries() {
        let root = json!({"section": {"kept": 1, "dropped": 2}});
        assert_eq!(
            pick_paths(&root, &["section.kept", "section.missing"]),
            json!({"section": {"kept": 1}})
        );
    }

    #[test]
    fn test_snapshot_contains_only_persisted_paths() {
        let calendar = CalendarSettings {
            day_count: 3,
            unmonitored: true,
            show_upcoming: false,
        };
        let snapshot = section_snapshot(&calendar).expect("snapshot should encode");
        assert_eq!(snapshot, json!({"calendar": {"dayCount": 3, "unmonitored": true}}));

        let series = section_snapshot(&SeriesIndexSettings::default()).expect("snapshot should encode");
        let keys: Vec<&String> = series["seriesIndex"]
            .as_object()
            .expect("section should be an object")
            .keys()
            .collect();
        assert_eq!(keys.len(), 9);
        assert!(series["seriesIndex"].get("secondarySortKey").is_none());
    }

    #[test]
    fn test_rehydrate_falls_back_per_field() {
        let document = json!({
            "seriesIndex": {
                "sortKey": "network",
                "sortDirection": "sideways",
                "filterKey": "monitored",
                "filterValue": true,
                "filterType": "equal",
                "view": "table",
                "posterOptions": {"size": "small"},
                "secondarySortKey": "title"
            }
        });
        let settings: SeriesIndexSettings = rehydrate(&document);

        assert_eq!(settings.sort_key, "network");
        assert_eq!(settings.sort_direction, SortDirection::Ascending);
        assert_eq!(settings.filter_key.as_deref(), Some("monitored"));
        assert_eq!(settings.filter_value, FieldValue::Bool(true));
        assert_eq!(settings.filter_type, FilterType::Equal);
        assert_eq!(settings.view, SeriesView::Table);
        assert_eq!(settings.poster_options.size, PresetSize::Small);
        assert!(settings.poster_options.show_quality_profile);
        assert_eq!(settings.secondary_sort_key, "sortTitle");
        assert_eq!(settings.columns, SeriesIndexSettings::default().columns);
    }

    #[test]
    fn test_rehydrate_keeps_unknown_preset_sizes_with_their_siblings() {
        let document = json!({
            "seriesIndex": {"posterOptions": {"size": "huge", "showTitle": true}}
        });
        let settings: SeriesIndexSettings = rehydrate(&document);

        assert!(settings.poster_options.show_title);
        assert_eq!(
            settings.poster_options.size,
            PresetSize::Unrecognized("huge".to_string())
        );
    }

    #[test]
    fn test_rehydrate_tolerates_foreign_documents() {
        let settings: CalendarSettings = rehydrate(&json!(["not", "an", "object"]));
        assert_eq!(settings, CalendarSettings::default());

        let settings: CalendarSettings =
            rehydrate(&json!({"calendar": {"dayCount": 3, "showUpcoming": false}}));
        assert_eq!(settings.day_count, 3);
        assert!(settings.show_upcoming);
    }

    #[test]
    fn test_rehydrate_repairs_persisted_columns() {
        let document = json!({
            "seriesIndex": {
                "columns": [
                    {"name": "network", "isVisible": false},
                    {"name": "retired", "isVisible": true},
                    {"name": "actions", "isVisible": false}
                ]
            }
        });
        let settings: SeriesIndexSettings = rehydrate(&document);
        assert_eq!(settings.columns.len(), 17);
        assert_eq!(settings.columns[0].name, "network");
        assert!(!settings.columns[0].is_visible);
        assert_eq!(settings.columns[1].name, "actions");
        assert!(settings.columns[1].is_visible);
    }

    #[test]
    fn test_merge_documents_combines_sections() {
        let mut document = json!({"calendar": {"dayCount": 3}});
        merge_documents(
            &mut document,
            json!({"calendar": {"unmonitored": true}, "seriesIndex": {"view": "table"}}),
        );
        assert_eq!(
            document,
            json!({
                "calendar": {"dayCount": 3, "unmonitored": true},
                "seriesIndex": {"view": "table"}
            })
        );
    }
}
