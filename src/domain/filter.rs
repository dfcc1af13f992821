//! Filter engine: search term, saga and arc selection over the flat episode list.

use tracing::{debug, warn};

use crate::domain::entities::{Document, Episode, StoryArc};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::hierarchy::Indices;

/// Current filter selections.
///
/// Transitions are pure: each returns the next state and leaves `self` as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub term: String,
    pub saga_id: Option<String>,
    pub arc_id: Option<String>,
}

/// Dropdown values use the empty string for "all".
fn selection(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl FilterState {
    /// Search term as matched: trimmed and case-folded.
    pub fn normalized_term(&self) -> String {
        self.term.trim().to_lowercase()
    }

    /// Change the search term only.
    pub fn with_term(&self, term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..self.clone()
        }
    }

    /// Select or clear the saga. Always resets the arc selection.
    pub fn select_saga(&self, saga_id: Option<String>) -> Self {
        Self {
            term: self.term.clone(),
            saga_id: selection(saga_id),
            arc_id: None,
        }
    }

    /// Select or clear the arc, leaving the saga untouched.
    ///
    /// Only arcs of the selected saga are selectable; anything else is rejected.
    pub fn select_arc(&self, arc_id: Option<String>, indices: &Indices) -> DomainResult<Self> {
        let arc_id = selection(arc_id);
        if let Some(arc) = &arc_id {
            let Some(saga) = &self.saga_id else {
                return Err(DomainError::ArcSelectionDisabled(arc.clone()));
            };
            if indices.saga_of_arc(arc) != Some(saga.as_str()) {
                return Err(DomainError::ArcNotInSaga {
                    arc: arc.clone(),
                    saga: saga.clone(),
                });
            }
        }
        Ok(Self {
            arc_id,
            ..self.clone()
        })
    }

    /// Select an arc from the hierarchy view: sets the owning saga and the arc.
    ///
    /// Yields the same state as selecting the saga and then the arc from the
    /// dropdowns. Unknown arcs leave the state unchanged.
    pub fn select_arc_from_hierarchy(&self, arc_id: &str, indices: &Indices) -> Self {
        match indices.saga_of_arc(arc_id) {
            Some(saga_id) => {
                debug!("hierarchy arc selection: arc={} saga={}", arc_id, saga_id);
                Self {
                    term: self.term.clone(),
                    saga_id: Some(saga_id.to_string()),
                    arc_id: Some(arc_id.to_string()),
                }
            }
            None => {
                warn!("arc {} has no owning saga in index; filter unchanged", arc_id);
                self.clone()
            }
        }
    }

    /// AND of saga, arc and term predicates, cheapest first.
    fn matches(&self, episode: &Episode, term: &str) -> bool {
        if let Some(saga) = &self.saga_id {
            if episode.saga != *saga {
                return false;
            }
        }
        if let Some(arc) = &self.arc_id {
            if episode.arc != *arc {
                return false;
            }
        }
        if term.is_empty() {
            return true;
        }
        episode.title.to_lowercase().contains(term)
            || episode.title_romaji.to_lowercase().contains(term)
    }
}

/// Visible subset of `episodes`, in input order.
pub fn filter_episodes<'a>(episodes: &'a [Episode], state: &FilterState) -> Vec<&'a Episode> {
    let term = state.normalized_term();
    episodes
        .iter()
        .filter(|ep| state.matches(ep, &term))
        .collect()
}

/// Arcs selectable under the current state.
///
/// `None` means arc selection is disabled (no saga selected). Otherwise
/// exactly the arcs the index assigns to the selected saga, in document order.
pub fn arc_options<'a>(
    doc: &'a Document,
    indices: &Indices,
    state: &FilterState,
) -> Option<Vec<&'a StoryArc>> {
    let saga_id = state.saga_id.as_deref()?;
    Some(
        doc.sagas
            .iter()
            .flat_map(|s| s.arcs.iter())
            .filter(|arc| indices.saga_of_arc(&arc.id) == Some(saga_id))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn episode(id: u64, title: &str, romaji: &str, saga: &str, arc: &str) -> Episode {
        Episode {
            id,
            title: title.into(),
            title_romaji: romaji.into(),
            air_date: "1999-10-20".into(),
            saga: saga.into(),
            arc: arc.into(),
        }
    }

    fn episodes() -> Vec<Episode> {
        vec![
            episode(1, "I'm Luffy!", "Ore wa Rufi!", "s1", "a1"),
            episode(2, "Alabasta arrives", "Arabasuta", "s2", "a7"),
            episode(3, "The Desert Kingdom", "Sabaku no Okoku", "s2", "a7"),
            episode(4, "Skypiea", "Sorajima", "s2", "a8"),
        ]
    }

    fn ids(result: &[&Episode]) -> Vec<u64> {
        result.iter().map(|e| e.id).collect()
    }

    #[test]
    fn given_no_filters_when_filtering_then_identity() {
        let eps = episodes();
        let result = filter_episodes(&eps, &FilterState::default());
        assert_eq!(ids(&result), [1, 2, 3, 4]);
        assert!(std::ptr::eq(result[0], &eps[0]));
    }

    #[rstest]
    #[case("ALA", vec![2])]
    #[case("  desert ", vec![3])]
    #[case("sora", vec![4])]
    #[case("zzz", vec![])]
    fn given_term_when_filtering_then_case_insensitive_on_both_titles(
        #[case] term: &str,
        #[case] expected: Vec<u64>,
    ) {
        let eps = episodes();
        let state = FilterState::default().with_term(term);
        assert_eq!(ids(&filter_episodes(&eps, &state)), expected);
    }

    #[test]
    fn given_saga_and_arc_when_filtering_then_both_apply() {
        let eps = episodes();
        let state = FilterState {
            term: String::new(),
            saga_id: Some("s2".into()),
            arc_id: Some("a7".into()),
        };
        assert_eq!(ids(&filter_episodes(&eps, &state)), [2, 3]);
    }

    #[test]
    fn given_selected_arc_when_selecting_saga_then_arc_reset() {
        let state = FilterState {
            term: "x".into(),
            saga_id: Some("s2".into()),
            arc_id: Some("a7".into()),
        };
        let next = state.select_saga(Some("s1".into()));
        assert_eq!(next.saga_id.as_deref(), Some("s1"));
        assert_eq!(next.arc_id, None);
        assert_eq!(next.term, "x");

        let cleared = next.select_saga(Some(String::new()));
        assert_eq!(cleared.saga_id, None);
    }

    #[test]
    fn given_whitespace_term_when_filtering_then_nothing_excluded() {
        let eps = episodes();
        let state = FilterState::default().with_term("   ");
        assert_eq!(ids(&filter_episodes(&eps, &state)), [1, 2, 3, 4]);
    }
}
