//! Series records as held by the series index collection.

use crate::collection::{parse_date, CollectionRecord, FieldValue};

/// One series in the library, as delivered by the backend.
///
/// Date fields stay as the ISO-8601 strings received and are parsed on access;
/// unparsable dates read as absent.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeriesRecord {
    pub id: u64,
    pub title: String,
    pub sort_title: String,
    pub status: String,
    pub monitored: bool,
    pub network: Option<String>,
    pub quality_profile_id: Option<u32>,
    pub language_profile_id: Option<u32>,
    pub next_airing: Option<String>,
    pub previous_airing: Option<String>,
    pub added: Option<String>,
    pub season_count: u32,
    pub episode_count: u32,
    pub episode_file_count: u32,
    pub latest_season: Option<u32>,
    pub path: Option<String>,
    pub size_on_disk: u64,
    pub tags: Vec<u32>,
    pub use_scene_numbering: bool,
}

/// Stored series fields addressable by their persisted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesField {
    Id,
    Title,
    SortTitle,
    Status,
    Monitored,
    Network,
    QualityProfileId,
    LanguageProfileId,
    NextAiring,
    PreviousAiring,
    Added,
    SeasonCount,
    EpisodeCount,
    EpisodeFileCount,
    LatestSeason,
    Path,
    SizeOnDisk,
    Tags,
    UseSceneNumbering,
}

impl SeriesField {
    pub const ALL: [SeriesField; 19] = [
        Self::Id,
        Self::Title,
        Self::SortTitle,
        Self::Status,
        Self::Monitored,
        Self::Network,
        Self::QualityProfileId,
        Self::LanguageProfileId,
        Self::NextAiring,
        Self::PreviousAiring,
        Self::Added,
        Self::SeasonCount,
        Self::EpisodeCount,
        Self::EpisodeFileCount,
        Self::LatestSeason,
        Self::Path,
        Self::SizeOnDisk,
        Self::Tags,
        Self::UseSceneNumbering,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::SortTitle => "sortTitle",
            Self::Status => "status",
            Self::Monitored => "monitored",
            Self::Network => "network",
            Self::QualityProfileId => "qualityProfileId",
            Self::LanguageProfileId => "languageProfileId",
            Self::NextAiring => "nextAiring",
            Self::PreviousAiring => "previousAiring",
            Self::Added => "added",
            Self::SeasonCount => "seasonCount",
            Self::EpisodeCount => "episodeCount",
            Self::EpisodeFileCount => "episodeFileCount",
            Self::LatestSeason => "latestSeason",
            Self::Path => "path",
            Self::SizeOnDisk => "sizeOnDisk",
            Self::Tags => "tags",
            Self::UseSceneNumbering => "useSceneNumbering",
        }
    }
}

fn date_value(text: Option<&str>) -> FieldValue {
    text.and_then(parse_date).into()
}

impl CollectionRecord for SeriesRecord {
    type Field = SeriesField;

    fn parse_field(key: &str) -> Option<Self::Field> {
        SeriesField::ALL
            .iter()
            .copied()
            .find(|field| field.key() == key)
    }

    fn field_value(&self, field: Self::Field) -> FieldValue {
        match field {
            SeriesField::Id => self.id.into(),
            SeriesField::Title => self.title.clone().into(),
            SeriesField::SortTitle => self.sort_title.clone().into(),
            SeriesField::Status => self.status.clone().into(),
            SeriesField::Monitored => self.monitored.into(),
            SeriesField::Network => self.network.clone().into(),
            SeriesField::QualityProfileId => self.quality_profile_id.into(),
            SeriesField::LanguageProfileId => self.language_profile_id.into(),
            SeriesField::NextAiring => date_value(self.next_airing.as_deref()),
            SeriesField::PreviousAiring => date_value(self.previous_airing.as_deref()),
            SeriesField::Added => date_value(self.added.as_deref()),
            SeriesField::SeasonCount => self.season_count.into(),
            SeriesField::EpisodeCount => self.episode_count.into(),
            SeriesField::EpisodeFileCount => self.episode_file_count.into(),
            SeriesField::LatestSeason => self.latest_season.into(),
            SeriesField::Path => self.path.clone().into(),
            SeriesField::SizeOnDisk => self.size_on_disk.into(),
            SeriesField::Tags => self.tags.clone().into(),
            SeriesField::UseSceneNumbering => self.use_scene_numbering.into(),
        }
    }
}
