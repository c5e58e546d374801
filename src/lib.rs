//! Client-side collection engine for a series library dashboard.
//!
//! Settings for each section live in an immutable [`store::AppState`]
//! snapshot. Actions from [`protocol`] pass through the section reducers, a
//! declared subset of every section is written to durable storage, and
//! [`selectors`] combine the settings with the raw collection into
//! render-ready data.

pub mod collection;
pub mod config;
pub mod config_persistence;
pub mod persistence;
pub mod protocol;
pub mod sections;
pub mod selectors;
pub mod series;
pub mod store;
pub mod view;
