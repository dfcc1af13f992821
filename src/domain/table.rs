//! Episode table rows with saga/arc names resolved through the indices.

use crate::domain::entities::Episode;
use crate::domain::hierarchy::Indices;

/// One resolved row of the episode table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRow {
    pub id: u64,
    pub title: String,
    pub title_romaji: String,
    pub air_date: String,
    pub saga: String,
    pub arc: String,
}

impl EpisodeRow {
    pub fn resolve(episode: &Episode, indices: &Indices) -> Self {
        Self {
            id: episode.id,
            title: episode.title.clone(),
            title_romaji: episode.title_romaji.clone(),
            air_date: episode.air_date.clone(),
            saga: indices.resolve_saga_name(&episode.saga).to_string(),
            arc: indices.resolve_arc_name(&episode.arc).to_string(),
        }
    }

    /// Cells in column order; the id is rendered as `#<id>`.
    pub fn cells(&self) -> [String; 6] {
        [
            format!("#{}", self.id),
            self.title.clone(),
            self.title_romaji.clone(),
            self.air_date.clone(),
            self.saga.clone(),
            self.arc.clone(),
        ]
    }
}

pub const COLUMNS: [&str; 6] = ["#", "Title", "Romaji", "Air date", "Saga", "Arc"];

pub fn rows(episodes: &[&Episode], indices: &Indices) -> Vec<EpisodeRow> {
    episodes
        .iter()
        .map(|ep| EpisodeRow::resolve(ep, indices))
        .collect()
}

/// `"<n> episodes"`
pub fn count_label(count: usize) -> String {
    format!("{count} episodes")
}
