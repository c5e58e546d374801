//! Table column descriptors, visibility toggles, and persisted-column repair.

use std::collections::{HashMap, HashSet};

/// Declarative table column definition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Stable identity; unique within a column list.
    pub name: String,
    /// Header label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Label used in compact contexts; overrides `label` there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_label: Option<String>,
    #[serde(default)]
    pub is_sortable: bool,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    /// Whether the user may toggle visibility.
    #[serde(default = "default_true")]
    pub is_modifiable: bool,
}

fn default_true() -> bool {
    true
}

impl ColumnDescriptor {
    /// A visible, modifiable, sortable column with a header label.
    pub fn sortable(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: Some(label.to_string()),
            column_label: None,
            is_sortable: true,
            is_visible: true,
            is_modifiable: true,
        }
    }

    /// A visible column the user cannot hide, labelled only in compact contexts.
    pub fn fixed(name: &str, column_label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            column_label: Some(column_label.to_string()),
            is_sortable: false,
            is_visible: true,
            is_modifiable: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.is_sortable = false;
        self
    }

    pub fn not_modifiable(mut self) -> Self {
        self.is_modifiable = false;
        self
    }

    /// Resolves the header text, preferring `column_label` when `compact`.
    pub fn header_label(&self, compact: bool) -> &str {
        let preferred = if compact {
            self.column_label.as_deref().or(self.label.as_deref())
        } else {
            self.label.as_deref().or(self.column_label.as_deref())
        };
        preferred.unwrap_or(&self.name)
    }
}

/// Returns the columns currently shown, in display order.
pub fn visible_columns(columns: &[ColumnDescriptor]) -> Vec<&ColumnDescriptor> {
    columns.iter().filter(|column| column.is_visible).collect()
}

/// Returns `true` when `name` exists and the user may toggle it.
pub fn is_column_modifiable(columns: &[ColumnDescriptor], name: &str) -> bool {
    columns
        .iter()
        .any(|column| column.name == name && column.is_modifiable)
}

/// Sets visibility for the named column.
///
/// Unknown names and unmodifiable columns leave the list unchanged.
pub fn set_column_visible(
    columns: &[ColumnDescriptor],
    name: &str,
    visible: bool,
) -> Vec<ColumnDescriptor> {
    if !is_column_modifiable(columns, name) {
        return columns.to_vec();
    }
    columns
        .iter()
        .map(|column| {
            if column.name == name {
                ColumnDescriptor {
                    is_visible: visible,
                    ..column.clone()
                }
            } else {
                column.clone()
            }
        })
        .collect()
}

/// Moves the column at `from_index` to `to_index` in the full column list.
pub fn reorder_columns(
    columns: &[ColumnDescriptor],
    from_index: usize,
    to_index: usize,
) -> Vec<ColumnDescriptor> {
    if from_index >= columns.len() || to_index >= columns.len() || from_index == to_index {
        return columns.to_vec();
    }
    let mut reordered = columns.to_vec();
    let moved_column = reordered.remove(from_index);
    reordered.insert(to_index, moved_column);
    reordered
}

/// Merges persisted columns against the defaults.
///
/// Persisted entries contribute only order and visibility. Unknown and
/// duplicate names are dropped, defaults missing from storage are appended in
/// default order, descriptor metadata always comes from the defaults, and
/// unmodifiable columns stay visible.
pub fn sanitize_columns(
    persisted: &[ColumnDescriptor],
    defaults: &[ColumnDescriptor],
) -> Vec<ColumnDescriptor> {
    let default_by_name: HashMap<&str, &ColumnDescriptor> = defaults
        .iter()
        .map(|column| (column.name.as_str(), column))
        .collect();
    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut merged_columns: Vec<ColumnDescriptor> = Vec::with_capacity(defaults.len());

    for column in persisted {
        let name = column.name.trim();
        let Some(default_column) = default_by_name.get(name) else {
            continue;
        };
        if !seen_names.insert(default_column.name.as_str()) {
            continue;
        }
        merged_columns.push(ColumnDescriptor {
            is_visible: column.is_visible || !default_column.is_modifiable,
            ..(*default_column).clone()
        });
    }

    for default_column in defaults {
        if !seen_names.contains(default_column.name.as_str()) {
            merged_columns.push(default_column.clone());
        }
    }

    merged_columns
}
