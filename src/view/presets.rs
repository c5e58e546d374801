//! Poster and overview display presets with field-by-field patch merging.

/// Card size shared by both presets.
///
/// Sizes outside the known set are kept verbatim so they round-trip through
/// storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(from = "String", into = "String")]
pub enum PresetSize {
    Small,
    #[default]
    Medium,
    Large,
    Unrecognized(String),
}

impl PresetSize {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Unrecognized(size) => size,
        }
    }
}

impl From<String> for PresetSize {
    fn from(size: String) -> Self {
        match size.as_str() {
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            _ => Self::Unrecognized(size),
        }
    }
}

impl From<&str> for PresetSize {
    fn from(size: &str) -> Self {
        Self::from(size.to_string())
    }
}

impl From<PresetSize> for String {
    fn from(size: PresetSize) -> Self {
        size.as_str().to_string()
    }
}

/// Names the preset targeted by a single-option update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PresetName {
    Poster,
    Overview,
}

/// Value for a single preset option; must match the option's declared type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum PresetOptionValue {
    Bool(bool),
    Size(PresetSize),
}

impl PresetOptionValue {
    /// Reads a command-line value: `true`/`false` are booleans, anything
    /// else is a size.
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            other => Self::Size(PresetSize::from(other)),
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Size(_) => None,
        }
    }

    fn as_size(&self) -> Option<PresetSize> {
        match self {
            Self::Size(size) => Some(size.clone()),
            Self::Bool(_) => None,
        }
    }
}

/// Poster grid display options.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterOptions {
    #[serde(default)]
    pub detailed_progress_bar: bool,
    #[serde(default = "default_poster_size")]
    pub size: PresetSize,
    #[serde(default)]
    pub show_title: bool,
    #[serde(default = "default_true")]
    pub show_quality_profile: bool,
}

/// Partial poster options; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterOptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_progress_bar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<PresetSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_title: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_quality_profile: Option<bool>,
}

/// Overview list display options.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewOptions {
    #[serde(default)]
    pub detailed_progress_bar: bool,
    #[serde(default)]
    pub size: PresetSize,
    #[serde(default = "default_true")]
    pub show_network: bool,
    #[serde(default = "default_true")]
    pub show_quality_profile: bool,
    #[serde(default)]
    pub show_previous_airing: bool,
    #[serde(default)]
    pub show_added: bool,
    #[serde(default = "default_true")]
    pub show_season_count: bool,
    #[serde(default)]
    pub show_path: bool,
    #[serde(default)]
    pub show_size_on_disk: bool,
}

/// Partial overview options; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewOptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_progress_bar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<PresetSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_network: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_quality_profile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_previous_airing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_added: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_season_count: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_path: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_size_on_disk: Option<bool>,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            detailed_progress_bar: false,
            size: default_poster_size(),
            show_title: false,
            show_quality_profile: true,
        }
    }
}

impl Default for OverviewOptions {
    fn default() -> Self {
        Self {
            detailed_progress_bar: false,
            size: PresetSize::Medium,
            show_network: true,
            show_quality_profile: true,
            show_previous_airing: false,
            show_added: false,
            show_season_count: true,
            show_path: false,
            show_size_on_disk: false,
        }
    }
}

impl PosterOptions {
    /// Returns a copy with every `Some` field of `patch` applied.
    pub fn merged(&self, patch: &PosterOptionsPatch) -> Self {
        Self {
            detailed_progress_bar: patch
                .detailed_progress_bar
                .unwrap_or(self.detailed_progress_bar),
            size: patch.size.clone().unwrap_or_else(|| self.size.clone()),
            show_title: patch.show_title.unwrap_or(self.show_title),
            show_quality_profile: patch
                .show_quality_profile
                .unwrap_or(self.show_quality_profile),
        }
    }
}

impl PosterOptionsPatch {
    /// Builds a one-field patch, or `None` for unknown names or mismatched types.
    pub fn single(option: &str, value: PresetOptionValue) -> Option<Self> {
        let mut patch = Self::default();
        match option {
            "detailedProgressBar" => patch.detailed_progress_bar = Some(value.as_bool()?),
            "size" => patch.size = Some(value.as_size()?),
            "showTitle" => patch.show_title = Some(value.as_bool()?),
            "showQualityProfile" => patch.show_quality_profile = Some(value.as_bool()?),
            _ => return None,
        }
        Some(patch)
    }
}

impl OverviewOptions {
    /// Returns a copy with every `Some` field of `patch` applied.
    pub fn merged(&self, patch: &OverviewOptionsPatch) -> Self {
        Self {
            detailed_progress_bar: patch
                .detailed_progress_bar
                .unwrap_or(self.detailed_progress_bar),
            size: patch.size.clone().unwrap_or_else(|| self.size.clone()),
            show_network: patch.show_network.unwrap_or(self.show_network),
            show_quality_profile: patch
                .show_quality_profile
                .unwrap_or(self.show_quality_profile),
            show_previous_airing: patch
                .show_previous_airing
                .unwrap_or(self.show_previous_airing),
            show_added: patch.show_added.unwrap_or(self.show_added),
            show_season_count: patch.show_season_count.unwrap_or(self.show_season_count),
            show_path: patch.show_path.unwrap_or(self.show_path),
            show_size_on_disk: patch.show_size_on_disk.unwrap_or(self.show_size_on_disk),
        }
    }
}

impl OverviewOptionsPatch {
    /// Builds a one-field patch, or `None` for unknown names or mismatched types.
    pub fn single(option: &str, value: PresetOptionValue) -> Option<Self> {
        let mut patch = Self::default();
        match option {
            "detailedProgressBar" => patch.detailed_progress_bar = Some(value.as_bool()?),
            "size" => patch.size = Some(value.as_size()?),
            "showNetwork" => patch.show_network = Some(value.as_bool()?),
            "showQualityProfile" => patch.show_quality_profile = Some(value.as_bool()?),
            "showPreviousAiring" => patch.show_previous_airing = Some(value.as_bool()?),
            "showAdded" => patch.show_added = Some(value.as_bool()?),
            "showSeasonCount" => patch.show_season_count = Some(value.as_bool()?),
            "showPath" => patch.show_path = Some(value.as_bool()?),
            "showSizeOnDisk" => patch.show_size_on_disk = Some(value.as_bool()?),
            _ => return None,
        }
        Some(patch)
    }
}

fn default_true() -> bool {
    true
}

fn default_poster_size() -> PresetSize {
    PresetSize::Large
}

#[cfg(test)]
mod tests {
    use super::{
        OverviewOptions, OverviewOptionsPatch, PosterOptions, PosterOptionsPatch, PresetOptionValue,
        PresetSize,
    };

    #[test]
    fn test_default_presets_match_expected_values() {
        let poster = PosterOptions::default();
        assert!(!poster.detailed_progress_bar);
        assert_eq!(poster.size, PresetSize::Large);
        assert!(!poster.show_title);
        assert!(poster.show_quality_profile);

        let overview = OverviewOptions::default();
        assert_eq!(overview.size, PresetSize::Medium);
        assert!(overview.show_network);
        assert!(overview.show_season_count);
        assert!(!overview.show_path);
        assert!(!overview.show_size_on_disk);
    }

    #[test]
    fn test_merge_changes_only_patched_fields() {
        let poster = PosterOptions::default();
        let patch: PosterOptionsPatch =
            serde_json::from_str(r#"{"showTitle": true}"#).expect("patch should parse");
        let merged = poster.merged(&patch);

        assert!(merged.show_title);
        assert_eq!(
            PosterOptions {
                show_title: false,
                ..merged
            },
            poster
        );
    }

    #[test]
    fn test_patch_ignores_unknown_keys() {
        let patch: OverviewOptionsPatch =
            serde_json::from_str(r#"{"showPath": true, "bogus": 1}"#).expect("patch should parse");
        assert_eq!(patch.show_path, Some(true));
        assert_eq!(
            OverviewOptions::default().merged(&patch),
            OverviewOptions {
                show_path: true,
                ..OverviewOptions::default()
            }
        );
    }

    #[test]
    fn test_single_option_patch_requires_known_name_and_matching_type() {
        assert_eq!(
            PosterOptionsPatch::single("size", PresetOptionValue::Size(PresetSize::Small)),
            Some(PosterOptionsPatch {
                size: Some(PresetSize::Small),
                ..PosterOptionsPatch::default()
            })
        );
        assert_eq!(
            PosterOptionsPatch::single("size", PresetOptionValue::Bool(true)),
            None
        );
        assert_eq!(
            PosterOptionsPatch::single("showNetwork", PresetOptionValue::Bool(true)),
            None
        );
        assert!(OverviewOptionsPatch::single("showNetwork", PresetOptionValue::Bool(false)).is_some());
    }

    #[test]
    fn test_preset_option_value_parses_bools_and_sizes() {
        let parsed: PresetOptionValue =
            serde_json::from_str(r#""large""#).expect("size should parse");
        assert_eq!(parsed, PresetOptionValue::Size(PresetSize::Large));
        let parsed: PresetOptionValue = serde_json::from_str("false").expect("bool should parse");
        assert_eq!(parsed, PresetOptionValue::Bool(false));
    }

    #[test]
    fn test_unknown_sizes_are_kept_verbatim() {
        let patch: PosterOptionsPatch = serde_json::from_str(r#"{"size": "huge", "showTitle": true}"#)
            .expect("patch should parse");
        assert_eq!(patch.size, Some(PresetSize::Unrecognized("huge".to_string())));

        let merged = PosterOptions::default().merged(&patch);
        assert!(merged.show_title);
        assert_eq!(
            serde_json::to_value(&merged).expect("options should serialize")["size"],
            "huge"
        );
    }

    #[test]
    fn test_parse_reads_bools_before_sizes() {
        assert_eq!(PresetOptionValue::parse("true"), PresetOptionValue::Bool(true));
        assert_eq!(
            PresetOptionValue::parse("small"),
            PresetOptionValue::Size(PresetSize::Small)
        );
        assert_eq!(
            PresetOptionValue::parse("tiny"),
            PresetOptionValue::Size(PresetSize::Unrecognized("tiny".to_string()))
        );
    }

    #[test]
    fn test_missing_persisted_fields_fall_back_to_defaults() {
        let parsed: PosterOptions =
            serde_json::from_str(r#"{"showTitle": true}"#).expect("options should parse");
        assert_eq!(
            parsed,
            PosterOptions {
                show_title: true,
                ..PosterOptions::default()
            }
        );
    }
}
