//! Interactive saga/arc selection, the terminal counterpart of the two
//! dependent dropdowns.

use std::sync::Arc;

use tracing::debug;

use crate::application::presenter::UiEvent;
use crate::application::services::AppState;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::arc_options;
use crate::infrastructure::traits::{SelectionItem, Selector};

const ALL_SAGAS: &str = "All sagas";
const ALL_ARCS: &str = "All arcs";

/// Service turning two interactive selections into filter events.
pub struct SelectionService {
    selector: Arc<dyn Selector>,
}

impl SelectionService {
    pub fn new(selector: Arc<dyn Selector>) -> Self {
        Self { selector }
    }

    /// Ask for a saga, then (if one was picked) for one of its arcs.
    ///
    /// Returns `None` when the user cancels either prompt. The events are
    /// meant to be applied in order to the same state.
    pub fn choose(&self, state: &AppState) -> ApplicationResult<Option<Vec<UiEvent>>> {
        let saga_items: Vec<SelectionItem> = std::iter::once(SelectionItem {
            display: ALL_SAGAS.to_string(),
            value: String::new(),
        })
        .chain(state.document.sagas.iter().map(|s| SelectionItem {
            display: s.name.clone(),
            value: s.id.clone(),
        }))
        .collect();

        let Some(saga) = self.pick(&saga_items, "Saga> ")? else {
            return Ok(None);
        };
        let saga_event = UiEvent::SagaChanged(Some(saga.value));
        let mut events = vec![saga_event.clone()];

        let filter = state.next_filter(&saga_event)?;
        let Some(arcs) = arc_options(&state.document, &state.indices, &filter) else {
            debug!("no saga selected; arc selection disabled");
            return Ok(Some(events));
        };

        let arc_items: Vec<SelectionItem> = std::iter::once(SelectionItem {
            display: ALL_ARCS.to_string(),
            value: String::new(),
        })
        .chain(arcs.iter().map(|a| SelectionItem {
            display: a.name.clone(),
            value: a.id.clone(),
        }))
        .collect();

        let Some(arc) = self.pick(&arc_items, "Arc> ")? else {
            return Ok(None);
        };
        events.push(UiEvent::ArcChanged(Some(arc.value)));
        Ok(Some(events))
    }

    fn pick(&self, items: &[SelectionItem], prompt: &str) -> ApplicationResult<Option<SelectionItem>> {
        self.selector
            .select_one(items, prompt)
            .map_err(|message| ApplicationError::Selection { message })
    }
}
