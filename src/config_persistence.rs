use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::Value;
use thiserror::Error;
use toml_edit::{value, DocumentMut, Item, Table};

use crate::{
    config::AppConfig,
    store::{PersistError, StatePersister},
};

const APP_DIR_NAME: &str = "seriesview";

const SYSTEM_CONFIG_TEMPLATE: &str = r#"# seriesview configuration

[ui]
# Use a status palette readable with color vision deficiencies.
enable_color_impaired_mode = false

[storage]
# Uncomment to keep persisted sort, filter and view settings elsewhere.
# state_file = "/path/to/state.json"

[logging]
# One of: off, error, warn, info, debug, trace.
level = "warn"
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse existing config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to parse existing config as TOML document: {0}")]
    Document(#[from] toml_edit::TomlError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn set_table_value_preserving_decor(table: &mut Table, key: &str, item: Item) {
    let existing_value_decor = table
        .get(key)
        .and_then(|current| current.as_value().map(|value| value.decor().clone()));
    table[key] = item;
    if let Some(existing_value_decor) = existing_value_decor {
        if let Some(next_value) = table[key].as_value_mut() {
            *next_value.decor_mut() = existing_value_decor;
        }
    }
}

fn set_table_scalar_if_changed<T, F>(
    table: &mut Table,
    key: &str,
    previous_value: T,
    next_value: T,
    to_item: F,
) where
    T: PartialEq + Copy,
    F: FnOnce(T) -> Item,
{
    if table.contains_key(key) && previous_value == next_value {
        return;
    }
    set_table_value_preserving_decor(table, key, to_item(next_value));
}

fn section_table<'a>(document: &'a mut DocumentMut, key: &str) -> Option<&'a mut Table> {
    let root = document.as_table_mut();
    let should_replace = !matches!(root.get(key), Some(item) if item.is_table());
    if should_replace {
        root.insert(key, Item::Table(Table::new()));
    }
    root.get_mut(key).and_then(Item::as_table_mut)
}

fn write_config_to_document(document: &mut DocumentMut, previous: &AppConfig, config: &AppConfig) {
    if let Some(ui) = section_table(document, "ui") {
        set_table_scalar_if_changed(
            ui,
            "enable_color_impaired_mode",
            previous.ui.enable_color_impaired_mode,
            config.ui.enable_color_impaired_mode,
            value,
        );
    }

    if let Some(storage) = section_table(document, "storage") {
        match config.storage.state_file.as_deref() {
            Some(state_file) => {
                if !storage.contains_key("state_file")
                    || previous.storage.state_file != config.storage.state_file
                {
                    set_table_value_preserving_decor(storage, "state_file", value(state_file));
                }
            }
            None => {
                storage.remove("state_file");
            }
        }
    }

    if let Some(logging) = section_table(document, "logging") {
        set_table_scalar_if_changed(
            logging,
            "level",
            previous.logging.level,
            config.logging.level,
            |level| value(level.as_str()),
        );
    }
}

pub fn serialize_config_with_preserved_comments(
    existing_text: &str,
    config: &AppConfig,
) -> Result<String, ConfigError> {
    let previous = toml::from_str::<AppConfig>(existing_text)?;
    let mut document = existing_text.parse::<DocumentMut>()?;
    write_config_to_document(&mut document, &previous, config);
    Ok(document.to_string())
}

pub fn system_config_template_text() -> &'static str {
    SYSTEM_CONFIG_TEMPLATE
}

pub fn persist_config_file(config: &AppConfig, path: &Path) {
    let existing_text = std::fs::read_to_string(path)
        .ok()
        .unwrap_or_else(|| SYSTEM_CONFIG_TEMPLATE.to_string());
    let config_text = match serialize_config_with_preserved_comments(&existing_text, config) {
        Ok(updated_text) => Some(updated_text),
        Err(err) => {
            warn!(
                "Failed to preserve config comments for {} ({}). Falling back to plain serialization.",
                path.display(),
                err
            );
            toml::to_string(config).ok()
        }
    };

    let Some(config_text) = config_text else {
        log::error!("Failed to serialize config for {}", path.display());
        return;
    };

    if let Some(parent) = path.parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config directory {}: {}", parent.display(), err);
            return;
        }
    }
    if let Err(err) = std::fs::write(path, config_text) {
        log::error!("Failed to persist config to {}: {}", path.display(), err);
    }
}

/// Reads `config.toml`, writing the commented template first when it is missing.
pub fn load_config_file(path: &Path) -> AppConfig {
    if !path.exists() {
        info!(
            "Config file not found. Creating default config. path={}",
            path.display()
        );
        persist_config_file(&AppConfig::default(), path);
        return AppConfig::default();
    }

    let config_content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!(
                "Failed to read config file {}. Using defaults. error={}",
                path.display(),
                err
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&config_content) {
        Ok(config) => config,
        Err(err) => {
            warn!(
                "Failed to parse config file {}. Using defaults. error={}",
                path.display(),
                err
            );
            AppConfig::default()
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}

pub fn default_state_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join("state.json"))
}

/// Picks the state file: explicit override, then config, then the data directory.
pub fn resolve_state_path(config: &AppConfig, override_path: Option<&Path>) -> Option<PathBuf> {
    override_path
        .map(Path::to_path_buf)
        .or_else(|| config.storage.state_file.as_ref().map(PathBuf::from))
        .or_else(default_state_path)
}

/// Stores the persisted state document as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonFileStatePersister {
    path: PathBuf,
}

impl JsonFileStatePersister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatePersister for JsonFileStatePersister {
    fn load(&self) -> Result<Option<Value>, PersistError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("State file {} does not exist yet", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(PersistError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| PersistError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, document: &Value) -> Result<(), PersistError> {
        let text = serde_json::to_string_pretty(document)?;
        let io_error = |source| PersistError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(&self.path, text).map_err(io_error)
    }
}
