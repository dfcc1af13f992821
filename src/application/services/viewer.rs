//! Viewer: explicit application state plus the event loop that keeps the
//! hierarchy, the filters and the episode table consistent.

use tracing::{debug, instrument};

use crate::application::presenter::{Presenter, UiEvent};
use crate::application::ApplicationResult;
use crate::domain::{
    arc_options, filter_episodes, hierarchy, table, Document, DomainResult, EpisodeRow,
    FilterState, HierarchyNode, Indices,
};

/// Everything derived from one load, plus the current filter.
#[derive(Debug, Clone)]
pub struct AppState {
    pub document: Document,
    pub hierarchy: HierarchyNode,
    pub indices: Indices,
    pub filter: FilterState,
}

impl AppState {
    /// Build hierarchy and indices; they exist before any filtering runs.
    pub fn new(document: Document) -> Self {
        let (hierarchy, indices) = hierarchy::build(&document);
        Self {
            document,
            hierarchy,
            indices,
            filter: FilterState::default(),
        }
    }

    /// Filter state after `event`. Pure.
    pub fn next_filter(&self, event: &UiEvent) -> DomainResult<FilterState> {
        match event {
            UiEvent::SearchChanged(term) => Ok(self.filter.with_term(term.clone())),
            UiEvent::SagaChanged(saga) => Ok(self.filter.select_saga(saga.clone())),
            UiEvent::ArcChanged(arc) => self.filter.select_arc(arc.clone(), &self.indices),
            UiEvent::ArcNodeClicked(arc) => {
                Ok(self.filter.select_arc_from_hierarchy(arc, &self.indices))
            }
        }
    }

    pub fn visible_rows(&self) -> Vec<EpisodeRow> {
        let visible = filter_episodes(&self.document.episodes, &self.filter);
        table::rows(&visible, &self.indices)
    }
}

/// Drives a presenter from application state.
pub struct Viewer<P: Presenter> {
    state: AppState,
    presenter: P,
}

impl<P: Presenter> Viewer<P> {
    pub fn new(document: Document, presenter: P) -> Self {
        Self {
            state: AppState::new(document),
            presenter,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Initial render: hierarchy, saga options, disabled arc options, table.
    pub fn start(&mut self) {
        self.presenter.render_hierarchy(&self.state.hierarchy);
        self.presenter
            .populate_saga_options(&self.state.document.sagas);
        self.render_arc_options();
        self.render_table();
    }

    /// Update state for `event` without rendering.
    ///
    /// Returns true when the saga selection changed. A rejected selection
    /// leaves the state untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, event: &UiEvent) -> ApplicationResult<bool> {
        let next = self.state.next_filter(event)?;
        let saga_changed = next.saga_id != self.state.filter.saga_id;
        debug!("filter: {:?} -> {:?}", self.state.filter, next);
        self.state.filter = next;
        Ok(saga_changed)
    }

    /// Apply `event` and re-render whatever it affects.
    pub fn dispatch(&mut self, event: UiEvent) -> ApplicationResult<()> {
        let saga_changed = self.apply(&event)?;
        if saga_changed || matches!(event, UiEvent::SagaChanged(_)) {
            self.render_arc_options();
        }
        self.render_table();
        if matches!(event, UiEvent::ArcNodeClicked(_)) {
            self.presenter.focus_episode_table();
        }
        Ok(())
    }

    pub fn render_arc_options(&mut self) {
        let arcs = arc_options(&self.state.document, &self.state.indices, &self.state.filter);
        self.presenter.populate_arc_options(arcs.as_deref());
    }

    pub fn render_table(&mut self) {
        let rows = self.state.visible_rows();
        self.presenter.render_episode_table(&rows, rows.len());
    }
}
