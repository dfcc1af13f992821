//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{DatasetLoader, SelectionService};
use crate::config::Settings;
use crate::infrastructure::traits::{RealSourceFetcher, Selector, SkimSelector, SourceFetcher};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Dataset fetching abstraction
    pub fetcher: Arc<dyn SourceFetcher>,

    /// Interactive selection abstraction
    pub selector: Arc<dyn Selector>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let timeout = Duration::from_secs(settings.http_timeout_secs);
        Self::with_deps(
            settings,
            Arc::new(RealSourceFetcher::new(timeout)),
            Arc::new(SkimSelector),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fetcher: Arc<dyn SourceFetcher>,
        selector: Arc<dyn Selector>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fetcher,
            selector,
        }
    }

    pub fn loader(&self) -> DatasetLoader {
        DatasetLoader::new(
            Arc::clone(&self.fetcher),
            self.settings.base.clone(),
            self.settings.sources.clone(),
        )
    }

    pub fn selection(&self) -> SelectionService {
        SelectionService::new(Arc::clone(&self.selector))
    }
}
