//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (SourceFetcher, Selector, Presenter)
//! but are themselves concrete structs, not traits.

mod loader;
mod selection;
mod viewer;

pub use loader::{DatasetLoader, SAGA_CARD_DIR};
pub use selection::SelectionService;
pub use viewer::{AppState, Viewer};
