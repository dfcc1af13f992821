//! Tests for Viewer: event handling and presenter calls

use sagatree::application::services::Viewer;
use sagatree::application::{ApplicationError, Presenter, UiEvent};
use sagatree::domain::{Document, DomainError, EpisodeRow, HierarchyNode, Saga, StoryArc};

const FIXTURE: &str = include_str!("resources/one_piece_anime.json");

/// Presenter that records what it was asked to show.
#[derive(Default)]
struct RecordingPresenter {
    hierarchy_renders: usize,
    saga_options: Vec<String>,
    arc_options: Vec<Option<Vec<String>>>,
    tables: Vec<(Vec<u64>, usize)>,
    focused: usize,
}

impl RecordingPresenter {
    fn last_table(&self) -> &[u64] {
        &self.tables.last().expect("table rendered").0
    }

    fn last_arc_options(&self) -> Option<&Vec<String>> {
        self.arc_options
            .last()
            .expect("arc options populated")
            .as_ref()
    }
}

impl Presenter for RecordingPresenter {
    fn render_hierarchy(&mut self, _root: &HierarchyNode) {
        self.hierarchy_renders += 1;
    }

    fn render_episode_table(&mut self, rows: &[EpisodeRow], count: usize) {
        self.tables
            .push((rows.iter().map(|r| r.id).collect(), count));
    }

    fn populate_saga_options(&mut self, sagas: &[Saga]) {
        self.saga_options = sagas.iter().map(|s| s.id.clone()).collect();
    }

    fn populate_arc_options(&mut self, arcs: Option<&[&StoryArc]>) {
        self.arc_options
            .push(arcs.map(|a| a.iter().map(|arc| arc.id.clone()).collect()));
    }

    fn focus_episode_table(&mut self) {
        self.focused += 1;
    }
}

fn viewer() -> Viewer<RecordingPresenter> {
    let document = Document::parse(FIXTURE).expect("fixture parses");
    Viewer::new(document, RecordingPresenter::default())
}

#[test]
fn given_loaded_document_when_starting_then_renders_everything_once() {
    let mut viewer = viewer();

    viewer.start();

    let p = viewer.presenter();
    assert_eq!(p.hierarchy_renders, 1);
    assert_eq!(p.saga_options, ["east_blue", "alabasta", "final"]);
    assert_eq!(p.arc_options, [None]);
    assert_eq!(p.tables.len(), 1);
    assert_eq!(p.tables[0].1, 9);
}

#[test]
fn given_arc_clicked_in_hierarchy_when_dispatching_then_saga_and_arc_selected() {
    let mut viewer = viewer();
    viewer.start();

    viewer
        .dispatch(UiEvent::ArcNodeClicked("arabasta".into()))
        .unwrap();

    let filter = &viewer.state().filter;
    assert_eq!(filter.saga_id.as_deref(), Some("alabasta"));
    assert_eq!(filter.arc_id.as_deref(), Some("arabasta"));
    let p = viewer.presenter();
    assert_eq!(p.last_table(), [92, 93]);
    assert_eq!(
        p.last_arc_options().unwrap(),
        &["whisky_peak".to_string(), "arabasta".to_string()]
    );
    assert_eq!(p.focused, 1);
}

#[test]
fn given_dropdown_path_when_selecting_same_arc_then_identical_to_hierarchy_click() {
    let mut clicked = viewer();
    clicked
        .dispatch(UiEvent::ArcNodeClicked("loguetown".into()))
        .unwrap();

    let mut dropdown = viewer();
    dropdown
        .dispatch(UiEvent::SagaChanged(Some("east_blue".into())))
        .unwrap();
    dropdown
        .dispatch(UiEvent::ArcChanged(Some("loguetown".into())))
        .unwrap();

    assert_eq!(clicked.state().filter, dropdown.state().filter);
    assert_eq!(
        clicked.presenter().last_table(),
        dropdown.presenter().last_table()
    );
    assert_eq!(dropdown.presenter().last_table(), [48]);
}

#[test]
fn given_selected_arc_when_changing_saga_then_arc_reset_and_options_narrowed() {
    let mut viewer = viewer();
    viewer
        .dispatch(UiEvent::ArcNodeClicked("romance_dawn".into()))
        .unwrap();

    viewer
        .dispatch(UiEvent::SagaChanged(Some("final".into())))
        .unwrap();

    assert_eq!(viewer.state().filter.arc_id, None);
    let p = viewer.presenter();
    assert_eq!(p.last_arc_options().unwrap(), &["egghead".to_string()]);
    assert_eq!(p.last_table(), [1086]);
}

#[test]
fn given_saga_cleared_when_dispatching_then_arc_selection_disabled() {
    let mut viewer = viewer();
    viewer
        .dispatch(UiEvent::ArcNodeClicked("romance_dawn".into()))
        .unwrap();

    viewer.dispatch(UiEvent::SagaChanged(None)).unwrap();

    assert_eq!(viewer.state().filter.arc_id, None);
    assert_eq!(viewer.presenter().last_arc_options(), None);
    assert_eq!(viewer.presenter().last_table().len(), 9);
}

#[test]
fn given_arc_cleared_when_dispatching_then_saga_kept() {
    let mut viewer = viewer();
    viewer
        .dispatch(UiEvent::ArcNodeClicked("whisky_peak".into()))
        .unwrap();
    let arc_option_renders = viewer.presenter().arc_options.len();

    viewer.dispatch(UiEvent::ArcChanged(None)).unwrap();

    assert_eq!(viewer.state().filter.saga_id.as_deref(), Some("alabasta"));
    assert_eq!(viewer.presenter().last_table(), [64, 92, 93]);
    assert_eq!(viewer.presenter().arc_options.len(), arc_option_renders);
}

#[test]
fn given_arc_of_other_saga_when_selecting_from_dropdown_then_rejected_and_state_kept() {
    let mut viewer = viewer();
    viewer
        .dispatch(UiEvent::SagaChanged(Some("east_blue".into())))
        .unwrap();
    let before = viewer.state().filter.clone();

    let err = viewer
        .dispatch(UiEvent::ArcChanged(Some("egghead".into())))
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::ArcNotInSaga { .. })
    ));
    assert_eq!(viewer.state().filter, before);
}

#[test]
fn given_unknown_arc_clicked_when_dispatching_then_filter_unchanged() {
    let mut viewer = viewer();
    viewer
        .dispatch(UiEvent::SearchChanged("luffy".into()))
        .unwrap();

    viewer
        .dispatch(UiEvent::ArcNodeClicked("no_such_arc".into()))
        .unwrap();

    let filter = &viewer.state().filter;
    assert_eq!(filter.saga_id, None);
    assert_eq!(filter.arc_id, None);
    assert_eq!(viewer.presenter().last_table(), [1, 4]);
}

#[test]
fn given_search_term_when_dispatching_then_matches_either_title_case_insensitively() {
    let mut viewer = viewer();

    viewer
        .dispatch(UiEvent::SearchChanged("ALA".into()))
        .unwrap();

    assert_eq!(viewer.presenter().last_table(), [92]);
}

#[test]
fn given_episode_with_unknown_ids_when_rendering_rows_then_raw_ids_shown() {
    let viewer = viewer();

    let rows = viewer.state().visible_rows();

    let orphan = rows.iter().find(|r| r.id == 1087).expect("orphan row");
    assert_eq!(orphan.saga, "lost_saga");
    assert_eq!(orphan.arc, "lost_arc");
    let first = &rows[0];
    assert_eq!(first.saga, "East Blue");
    assert_eq!(first.arc, "Romance Dawn");
}
