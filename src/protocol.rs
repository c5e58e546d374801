//! Action objects accepted by the state container.
//!
//! Actions travel as `{"type": ..., "payload": ...}` JSON documents. The
//! `type` strings are the durable contract shared with the UI layer.

use crate::{
    collection::{FilterSpec, SortDirection},
    sections::SeriesView,
    view::{OverviewOptionsPatch, PosterOptionsPatch, PresetName, PresetOptionValue},
};

/// Top-level envelope for every inbound action.
///
/// Deserialization routes on the section prefix of `type`, so payload errors
/// are reported against the section's own action set.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Action {
    SeriesIndex(SeriesIndexAction),
    Calendar(CalendarAction),
}

impl<'de> serde::Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let wire = serde_json::Value::deserialize(deserializer)?;
        let action_type = wire
            .get("type")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| D::Error::missing_field("type"))?;
        let section = action_type
            .split_once('/')
            .map_or(action_type.as_str(), |(section, _)| section);
        match section {
            "seriesIndex" => serde_json::from_value(wire)
                .map(Self::SeriesIndex)
                .map_err(D::Error::custom),
            "calendar" => serde_json::from_value(wire)
                .map(Self::Calendar)
                .map_err(D::Error::custom),
            _ => Err(D::Error::custom(format!(
                "unknown action type '{}'",
                action_type
            ))),
        }
    }
}

/// Series index transitions.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum SeriesIndexAction {
    /// Repeating the current key without a direction reverses the sort.
    #[serde(rename = "seriesIndex/setSeriesSort")]
    SetSort(SetSortPayload),
    #[serde(rename = "seriesIndex/setSeriesFilter")]
    SetFilter(FilterSpec),
    #[serde(rename = "seriesIndex/setSeriesView")]
    SetView(SetViewPayload),
    #[serde(rename = "seriesIndex/setSeriesTableOption")]
    SetTableOption(TableOptionPayload),
    #[serde(rename = "seriesIndex/setSeriesTableColumnOrder")]
    SetTableColumnOrder(ColumnOrderPayload),
    #[serde(rename = "seriesIndex/setSeriesPosterOption")]
    SetPosterOption(PosterOptionsPatch),
    #[serde(rename = "seriesIndex/setSeriesOverviewOption")]
    SetOverviewOption(OverviewOptionsPatch),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSortPayload {
    pub sort_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SetViewPayload {
    pub view: SeriesView,
}

/// Column visibility toggle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptionPayload {
    pub column_name: String,
    pub value: bool,
}

/// Indices into the full column list, hidden columns included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ColumnOrderPayload {
    pub from: usize,
    pub to: usize,
}

/// Calendar page transitions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum CalendarAction {
    #[serde(rename = "calendar/setCalendarDaysCount")]
    SetDaysCount(DaysCountPayload),
    #[serde(rename = "calendar/setCalendarIncludeUnmonitored")]
    SetIncludeUnmonitored(IncludeUnmonitoredPayload),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaysCountPayload {
    pub day_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct IncludeUnmonitoredPayload {
    pub unmonitored: bool,
}

impl SeriesIndexAction {
    /// Single-option preset update, or `None` when the option does not exist
    /// on `preset` or `value` has the wrong type.
    pub fn preset_option(preset: PresetName, option: &str, value: PresetOptionValue) -> Option<Self> {
        match preset {
            PresetName::Poster => PosterOptionsPatch::single(option, value).map(Self::SetPosterOption),
            PresetName::Overview => {
                OverviewOptionsPatch::single(option, value).map(Self::SetOverviewOption)
            }
        }
    }
}

impl Action {
    /// Identifier of the section this action targets.
    pub fn section(&self) -> &'static str {
        match self {
            Self::SeriesIndex(_) => "seriesIndex",
            Self::Calendar(_) => "calendar",
        }
    }
}

impl From<SeriesIndexAction> for Action {
    fn from(action: SeriesIndexAction) -> Self {
        Self::SeriesIndex(action)
    }
}

impl From<CalendarAction> for Action {
    fn from(action: CalendarAction) -> Self {
        Self::Calendar(action)
    }
}

/// Parses one JSON action document.
pub fn parse_action(text: &str) -> Result<Action, serde_json::Error> {
    serde_json::from_str(text)
}
