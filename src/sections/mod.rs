//! Independently configured sections and the registry describing them.

pub mod calendar;
pub mod series_index;

use serde::{de::DeserializeOwned, Serialize};

pub use calendar::CalendarSettings;
pub use series_index::{SeriesIndexSettings, SeriesView};

/// Settings aggregate owned by one section of the state container.
pub trait SectionState: Clone + Default + Serialize + DeserializeOwned {
    /// Namespace under which the section is stored.
    const SECTION: &'static str;
    /// Dotted paths, prefixed with `SECTION`, that survive a session boundary.
    const PERSISTED_PATHS: &'static [&'static str];

    /// Repairs freshly rehydrated state against the defaults.
    fn sanitize(self) -> Self {
        self
    }
}

/// Static description of a registered section.
#[derive(Debug, Clone, Copy)]
pub struct SectionDescriptor {
    pub id: &'static str,
    pub persisted_paths: &'static [&'static str],
    default_state: fn() -> serde_json::Value,
}

impl SectionDescriptor {
    /// Serialized default state for this section.
    pub fn default_state(&self) -> serde_json::Value {
        (self.default_state)()
    }
}

fn default_state_value<S: SectionState>() -> serde_json::Value {
    serde_json::to_value(S::default()).unwrap_or(serde_json::Value::Null)
}

/// Maps section identifiers to their defaults and persisted paths.
#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    sections: Vec<SectionDescriptor>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `S`, replacing an earlier registration with the same id.
    pub fn register<S: SectionState>(mut self) -> Self {
        self.sections.retain(|section| section.id != S::SECTION);
        self.sections.push(SectionDescriptor {
            id: S::SECTION,
            persisted_paths: S::PERSISTED_PATHS,
            default_state: default_state_value::<S>,
        });
        self
    }

    pub fn descriptor(&self, id: &str) -> Option<&SectionDescriptor> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionDescriptor> {
        self.sections.iter()
    }

    /// Every persisted path across all sections, in registration order.
    pub fn persisted_paths(&self) -> Vec<&'static str> {
        self.sections
            .iter()
            .flat_map(|section| section.persisted_paths.iter().copied())
            .collect()
    }
}

/// Registry of the sections shipped with the dashboard.
pub fn default_section_registry() -> SectionRegistry {
    SectionRegistry::new()
        .register::<SeriesIndexSettings>()
        .register::<CalendarSettings>()
}
