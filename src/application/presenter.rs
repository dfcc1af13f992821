//! Presentation boundary: what the core tells the view, and what the view
//! tells the core.

use crate::domain::{EpisodeRow, HierarchyNode, Saga, StoryArc};

/// Inbound calls implemented by a concrete view.
///
/// The presenter is the only component allowed side effects.
pub trait Presenter {
    fn render_hierarchy(&mut self, root: &HierarchyNode);

    fn render_episode_table(&mut self, rows: &[EpisodeRow], count: usize);

    fn populate_saga_options(&mut self, sagas: &[Saga]);

    /// `None` disables arc selection.
    fn populate_arc_options(&mut self, arcs: Option<&[&StoryArc]>);

    /// Bring the episode table into view after a hierarchy selection.
    fn focus_episode_table(&mut self) {}
}

/// Events produced by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SearchChanged(String),
    SagaChanged(Option<String>),
    ArcChanged(Option<String>),
    ArcNodeClicked(String),
}
