//! Dataset loading service
//!
//! Walks an ordered list of candidate sources and returns the first document
//! that fetches and parses. One attempt per candidate, no retries.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, SourceFailure};
use crate::domain::{Document, SagaCard};
use crate::infrastructure::traits::{Source, SourceFetcher};

/// Directory, relative to the base, holding the per-saga detail files.
pub const SAGA_CARD_DIR: &str = "data";

/// Service for loading the dataset and the optional saga cards.
pub struct DatasetLoader {
    fetcher: Arc<dyn SourceFetcher>,
    base: String,
    candidates: Vec<String>,
}

impl DatasetLoader {
    pub fn new(fetcher: Arc<dyn SourceFetcher>, base: String, candidates: Vec<String>) -> Self {
        Self {
            fetcher,
            base,
            candidates,
        }
    }

    /// Load the dataset from the first candidate that succeeds.
    ///
    /// Each failed candidate is recorded; when all fail the error carries
    /// every failure, the last one retrievable via `last_failure()`.
    #[instrument(level = "debug", skip(self), fields(base = %self.base))]
    pub fn load(&self) -> ApplicationResult<Document> {
        let mut attempts = Vec::new();

        for candidate in &self.candidates {
            match self.try_candidate(candidate) {
                Ok(document) => {
                    debug!("loaded dataset from {}", candidate);
                    return Ok(document);
                }
                Err(failure) => {
                    warn!("{}", failure);
                    attempts.push(failure);
                }
            }
        }

        Err(ApplicationError::DataUnavailable { attempts })
    }

    fn try_candidate(&self, candidate: &str) -> Result<Document, SourceFailure> {
        let source =
            Source::resolve(&self.base, candidate).map_err(|reason| SourceFailure::Unreachable {
                location: candidate.to_string(),
                reason,
            })?;
        let location = source.to_string();
        debug!("trying source {}", location);

        let body = self
            .fetcher
            .fetch(&source)
            .map_err(|e| SourceFailure::Unreachable {
                location: location.clone(),
                reason: e.to_string(),
            })?;

        Document::parse(&body).map_err(|e| SourceFailure::Parse {
            location,
            reason: e.to_string(),
        })
    }

    /// Load saga cards from `data/<file>` for each file, concurrently.
    ///
    /// Files that fail to fetch or parse are skipped. Order follows `files`.
    #[instrument(level = "debug", skip(self))]
    pub fn load_saga_cards(&self, files: &[String]) -> Vec<SagaCard> {
        files
            .par_iter()
            .filter_map(|file| {
                let candidate = format!("{SAGA_CARD_DIR}/{file}");
                let source = Source::resolve(&self.base, &candidate).ok()?;
                let body = self
                    .fetcher
                    .fetch(&source)
                    .map_err(|e| debug!("saga card {} unavailable: {}", source, e))
                    .ok()?;
                serde_json::from_str::<SagaCard>(&body)
                    .map_err(|e| debug!("saga card {} unreadable: {}", source, e))
                    .ok()
            })
            .collect()
    }
}
