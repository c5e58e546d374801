//! State container: immutable snapshots, action dispatch and persistence.

use std::{path::PathBuf, sync::Arc};

use log::{debug, error, warn};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    persistence::{merge_documents, rehydrate, section_snapshot},
    protocol::Action,
    sections::{calendar, series_index, CalendarSettings, SeriesIndexSettings},
};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("state file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode persisted state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable storage for the persisted subset of the state tree.
pub trait StatePersister {
    /// Returns `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Value>, PersistError>;
    fn save(&self, document: &Value) -> Result<(), PersistError>;
}

/// One immutable snapshot of every section.
///
/// Sections untouched by a transition are shared with the previous snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub series_index: Arc<SeriesIndexSettings>,
    pub calendar: Arc<CalendarSettings>,
}

impl AppState {
    pub fn from_persisted(document: &Value) -> Self {
        Self {
            series_index: Arc::new(rehydrate(document)),
            calendar: Arc::new(rehydrate(document)),
        }
    }

    /// Returns the snapshot that follows `action`.
    pub fn reduce(&self, action: &Action) -> Self {
        match action {
            Action::SeriesIndex(action) => {
                let next = series_index::reduce(&self.series_index, action);
                if next == *self.series_index {
                    return self.clone();
                }
                Self {
                    series_index: Arc::new(next),
                    calendar: Arc::clone(&self.calendar),
                }
            }
            Action::Calendar(action) => {
                let next = calendar::reduce(&self.calendar, action);
                if next == *self.calendar {
                    return self.clone();
                }
                Self {
                    series_index: Arc::clone(&self.series_index),
                    calendar: Arc::new(next),
                }
            }
        }
    }

    /// The document written to durable storage.
    pub fn persisted_document(&self) -> Result<Value, serde_json::Error> {
        let mut document = Value::Object(Map::new());
        merge_documents(&mut document, section_snapshot(&*self.series_index)?);
        merge_documents(&mut document, section_snapshot(&*self.calendar)?);
        Ok(document)
    }
}

pub struct Store<P> {
    state: Arc<AppState>,
    persister: P,
}

impl<P: StatePersister> Store<P> {
    /// Loads the persisted subset, falling back to defaults on any failure.
    pub fn rehydrate(persister: P) -> Self {
        let state = match persister.load() {
            Ok(Some(document)) => AppState::from_persisted(&document),
            Ok(None) => {
                debug!("No persisted state found; starting from defaults");
                AppState::default()
            }
            Err(err) => {
                warn!("Failed to load persisted state, using defaults: {}", err);
                AppState::default()
            }
        };
        Self {
            state: Arc::new(state),
            persister,
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn persister(&self) -> &P {
        &self.persister
    }

    /// Applies `action` and persists the result when anything changed.
    ///
    /// Write failures are logged; the in-memory state still advances.
    pub fn dispatch(&mut self, action: Action) -> Arc<AppState> {
        debug!("Dispatching {:?}", action);
        let next = self.state.reduce(&action);
        if next == *self.state {
            return self.state();
        }
        self.state = Arc::new(next);
        self.persist();
        self.state()
    }

    fn persist(&self) {
        let document = match self.state.persisted_document() {
            Ok(document) => document,
            Err(err) => {
                error!("Failed to encode persisted state: {}", err);
                return;
            }
        };
        if let Err(err) = self.persister.save(&document) {
            error!("Failed to persist state: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        path::PathBuf,
        sync::Arc,
    };

    use serde_json::{json, Value};

    use super::{AppState, PersistError, StatePersister, Store};
    use crate::{
        collection::SortDirection,
        protocol::{
            Action, CalendarAction, DaysCountPayload, SeriesIndexAction, SetSortPayload,
            TableOptionPayload,
        },
    };

    #[derive(Default)]
    struct MemoryPersister {
        stored: RefCell<Option<Value>>,
        saves: Cell<usize>,
        fail_saves: bool,
    }

    impl StatePersister for MemoryPersister {
        fn load(&self) -> Result<Option<Value>, PersistError> {
            Ok(self.stored.borrow().clone())
        }

        fn save(&self, document: &Value) -> Result<(), PersistError> {
            self.saves.set(self.saves.get() + 1);
            if self.fail_saves {
                return Err(PersistError::Io {
                    path: PathBuf::from("state.json"),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            *self.stored.borrow_mut() = Some(document.clone());
            Ok(())
        }
    }

    struct BrokenPersister;

    impl StatePersister for BrokenPersister {
        fn load(&self) -> Result<Option<Value>, PersistError> {
            Err(PersistError::Encode(
                serde_json::from_str::<Value>("{").expect_err("input should be invalid"),
            ))
        }

        fn save(&self, _document: &Value) -> Result<(), PersistError> {
            Ok(())
        }
    }

    fn sort_by(key: &str) -> Action {
        Action::SeriesIndex(SeriesIndexAction::SetSort(SetSortPayload {
            sort_key: key.to_string(),
            sort_direction: None,
        }))
    }

    #[test]
    fn test_dispatch_persists_changes_and_shares_untouched_sections() {
        let mut store = Store::rehydrate(MemoryPersister::default());
        let before = store.state();

        let after = store.dispatch(sort_by("network"));
        assert_eq!(after.series_index.sort_key, "network");
        assert!(Arc::ptr_eq(&before.calendar, &after.calendar));
        assert_eq!(before.series_index.sort_key, "sortTitle");

        let stored = store
            .persister()
            .stored
            .borrow()
            .clone()
            .expect("state should be saved");
        assert_eq!(stored["seriesIndex"]["sortKey"], "network");
        assert_eq!(stored["calendar"], json!({"dayCount": 7, "unmonitored": false}));
    }

    #[test]
    fn test_no_op_actions_skip_persistence() {
        let mut store = Store::rehydrate(MemoryPersister::default());
        let before = store.state();
        let after = store.dispatch(Action::SeriesIndex(SeriesIndexAction::SetTableOption(
            TableOptionPayload {
                column_name: "actions".to_string(),
                value: false,
            },
        )));
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(store.persister().saves.get(), 0);
    }

    #[test]
    fn test_state_survives_a_session_boundary() {
        let mut first = Store::rehydrate(MemoryPersister::default());
        first.dispatch(sort_by("network"));
        first.dispatch(sort_by("network"));
        first.dispatch(Action::Calendar(CalendarAction::SetDaysCount(
            DaysCountPayload { day_count: 3 },
        )));
        let persister = MemoryPersister {
            stored: RefCell::new(first.persister().stored.borrow().clone()),
            ..MemoryPersister::default()
        };

        let second = Store::rehydrate(persister);
        let state = second.state();
        assert_eq!(state.series_index.sort_key, "network");
        assert_eq!(state.series_index.sort_direction, SortDirection::Descending);
        assert_eq!(state.calendar.day_count, 3);
        assert!(state.calendar.show_upcoming);
    }

    #[test]
    fn test_failed_save_keeps_new_state() {
        let mut store = Store::rehydrate(MemoryPersister {
            fail_saves: true,
            ..MemoryPersister::default()
        });
        let after = store.dispatch(sort_by("network"));
        assert_eq!(after.series_index.sort_key, "network");
        assert_eq!(store.state().series_index.sort_key, "network");
        assert_eq!(store.persister().saves.get(), 1);
    }

    #[test]
    fn test_failed_load_starts_from_defaults() {
        let store = Store::rehydrate(BrokenPersister);
        assert_eq!(*store.state(), AppState::default());
    }
}
