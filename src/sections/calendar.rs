//! Calendar page settings.

use crate::protocol::CalendarAction;

use super::SectionState;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSettings {
    #[serde(default = "default_day_count")]
    pub day_count: u32,
    #[serde(default)]
    pub unmonitored: bool,
    /// Session-only; not persisted.
    #[serde(default = "default_show_upcoming")]
    pub show_upcoming: bool,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            day_count: default_day_count(),
            unmonitored: false,
            show_upcoming: default_show_upcoming(),
        }
    }
}

fn default_day_count() -> u32 {
    7
}

fn default_show_upcoming() -> bool {
    true
}

impl SectionState for CalendarSettings {
    const SECTION: &'static str = "calendar";
    const PERSISTED_PATHS: &'static [&'static str] = &["calendar.dayCount", "calendar.unmonitored"];
}

pub fn reduce(state: &CalendarSettings, action: &CalendarAction) -> CalendarSettings {
    match action {
        CalendarAction::SetDaysCount(payload) => CalendarSettings {
            day_count: payload.day_count,
            ..state.clone()
        },
        CalendarAction::SetIncludeUnmonitored(payload) => CalendarSettings {
            unmonitored: payload.unmonitored,
            ..state.clone()
        },
    }
}
