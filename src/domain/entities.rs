//! Domain entities: the dataset as loaded from JSON

use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::domain::error::{DomainError, DomainResult};

/// Top-level series information.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeriesInfo {
    pub status: String,
    pub total_episodes: u64,
}

/// Inclusive episode range `[start, end]`.
///
/// Accepts `[]`, `[start]`, `[start, end]` and `[start, null]` on input.
/// A range without an end is open-ended (ongoing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<Option<u32>>")]
pub struct EpisodeRange {
    pub start: Option<u32>,
    pub end: Option<u32>,
}

impl EpisodeRange {
    pub fn new(start: u32, end: Option<u32>) -> Self {
        Self {
            start: Some(start),
            end,
        }
    }
}

impl From<Vec<Option<u32>>> for EpisodeRange {
    fn from(values: Vec<Option<u32>>) -> Self {
        Self {
            start: values.first().copied().flatten(),
            end: values.get(1).copied().flatten(),
        }
    }
}

/// `E5 – E12`, `E5 onward`, or `?` when the start is unknown.
///
/// An end of `0` counts as no end.
impl fmt::Display for EpisodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end.filter(|&end| end != 0)) {
            (None, _) => write!(f, "?"),
            (Some(start), Some(end)) => write!(f, "E{start} – E{end}"),
            (Some(start), None) => write!(f, "E{start} onward"),
        }
    }
}

/// Format an optional range; absent ranges render as `?`.
pub fn format_range(range: Option<&EpisodeRange>) -> String {
    range.map_or_else(|| "?".to_string(), ToString::to_string)
}

/// Format a list of sub-ranges, each independently, joined with `, `.
///
/// Returns `None` for an empty list.
pub fn format_ranges(ranges: &[EpisodeRange]) -> Option<String> {
    if ranges.is_empty() {
        return None;
    }
    Some(ranges.iter().join(", "))
}

/// Sub-grouping of episodes within a saga.
///
/// Named `StoryArc` to keep it apart from `std::sync::Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoryArc {
    pub id: String,
    pub name: String,
    /// May span non-contiguous blocks of episodes
    #[serde(default)]
    pub episode_ranges: Vec<EpisodeRange>,
}

/// Top-level narrative grouping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Saga {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub super_saga: Option<String>,
    #[serde(default)]
    pub episode_range: Option<EpisodeRange>,
    #[serde(default)]
    pub arcs: Vec<StoryArc>,
}

/// A single episode; `saga` and `arc` reference `Saga::id` / `StoryArc::id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub title: String,
    pub title_romaji: String,
    pub air_date: String,
    pub saga: String,
    pub arc: String,
}

/// Wire shape of the dataset. Episodes stay untyped here so that one bad
/// record does not reject the whole document.
#[derive(Debug, Deserialize)]
struct RawDocument {
    series: String,
    info: SeriesInfo,
    #[serde(default)]
    sagas: Vec<Saga>,
    #[serde(default)]
    episodes: Vec<serde_json::Value>,
}

/// The loaded dataset. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub series: String,
    pub info: SeriesInfo,
    pub sagas: Vec<Saga>,
    pub episodes: Vec<Episode>,
    /// Episode records dropped at load because they did not match the schema
    pub rejected_episodes: usize,
}

impl Document {
    /// Parse and validate a dataset document.
    ///
    /// The document-level shape and the saga id uniqueness invariant are
    /// enforced; malformed episode records are skipped with a warning.
    pub fn parse(content: &str) -> DomainResult<Self> {
        let raw: RawDocument =
            serde_json::from_str(content).map_err(|e| DomainError::InvalidDocument {
                message: e.to_string(),
            })?;

        let mut seen = HashSet::new();
        for saga in &raw.sagas {
            if !seen.insert(saga.id.as_str()) {
                return Err(DomainError::DuplicateSagaId(saga.id.clone()));
            }
        }

        let total = raw.episodes.len();
        let mut episodes = Vec::with_capacity(total);
        for (position, value) in raw.episodes.into_iter().enumerate() {
            match serde_json::from_value::<Episode>(value) {
                Ok(episode) => episodes.push(episode),
                Err(e) => warn!("skipping malformed episode record #{}: {}", position, e),
            }
        }
        let rejected_episodes = total - episodes.len();
        debug!(
            "parsed document: series={}, sagas={}, episodes={}, rejected={}",
            raw.series,
            raw.sagas.len(),
            episodes.len(),
            rejected_episodes
        );

        Ok(Self {
            series: raw.series,
            info: raw.info,
            sagas: raw.sagas,
            episodes,
            rejected_episodes,
        })
    }

    pub fn arc_count(&self) -> usize {
        self.sagas.iter().map(|s| s.arcs.len()).sum()
    }
}

/// Summary statistics shown above the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub series: String,
    pub status: String,
    pub total_episodes: u64,
    pub sagas: usize,
    pub arcs: usize,
}

impl Summary {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            series: doc.series.clone(),
            status: doc.info.status.clone(),
            total_episodes: doc.info.total_episodes,
            sagas: doc.sagas.len(),
            arcs: doc.arc_count(),
        }
    }
}

fn default_card_name() -> String {
    "Saga".to_string()
}

/// Null or empty name falls back to `Saga`.
fn card_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|name| !name.is_empty())
        .unwrap_or_else(default_card_name))
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Descriptive card from an optional per-saga detail file.
///
/// Missing and null fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SagaCard {
    #[serde(default = "default_card_name", deserialize_with = "card_name")]
    pub saga_name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub japanese_name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub overall_summary: String,
}
