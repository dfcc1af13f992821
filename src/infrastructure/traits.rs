//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use tracing::debug;

/// A resolved dataset location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Http(Url),
}

impl Source {
    /// Resolve `candidate` against a base location.
    ///
    /// An absolute URL or path candidate is used verbatim. Otherwise an
    /// `http(s)://` base is joined as a URL directory and anything else as a
    /// filesystem directory.
    pub fn resolve(base: &str, candidate: &str) -> Result<Self, String> {
        if let Some(url) = parse_http_url(candidate) {
            return Ok(Source::Http(url));
        }
        if Path::new(candidate).is_absolute() {
            return Ok(Source::File(PathBuf::from(candidate)));
        }
        if let Some(mut base_url) = parse_http_url(base) {
            // Url::join drops the last segment unless the base ends in '/'
            if !base_url.path().ends_with('/') {
                let dir = format!("{}/", base_url.path());
                base_url.set_path(&dir);
            }
            return base_url
                .join(candidate)
                .map(Source::Http)
                .map_err(|e| format!("cannot join {candidate} onto {base}: {e}"));
        }
        Ok(Source::File(Path::new(base).join(candidate)))
    }
}

fn parse_http_url(s: &str) -> Option<Url> {
    Url::parse(s)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Http(url) => write!(f, "{url}"),
        }
    }
}

/// Why a single fetch attempt failed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("network error: {0}")]
    Network(String),
}

/// Dataset fetching abstraction: one attempt, body as text.
pub trait SourceFetcher: Send + Sync {
    fn fetch(&self, source: &Source) -> Result<String, FetchError>;
}

/// Item for FZF-style selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    /// Display text shown in selector
    pub display: String,
    /// Actual value (e.g., saga or arc id; empty for "all")
    pub value: String,
}

/// Interactive FZF-style selector abstraction.
pub trait Selector: Send + Sync {
    /// Present items to user and return selected one.
    /// Returns None if user cancels (Esc/Ctrl-C).
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Reads files from disk and fetches URLs with a blocking HTTP client.
#[derive(Debug)]
pub struct RealSourceFetcher {
    timeout: Duration,
}

impl RealSourceFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn fetch_http(&self, url: &Url) -> Result<String, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let response = client
            .get(url.clone())
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        debug!("GET {} -> {}", url, status);
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

impl Default for RealSourceFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl SourceFetcher for RealSourceFetcher {
    fn fetch(&self, source: &Source) -> Result<String, FetchError> {
        match source {
            Source::File(path) => Ok(std::fs::read_to_string(path)?),
            Source::Http(url) => self.fetch_http(url),
        }
    }
}

/// Real selector implementation using skim (FZF-like).
#[derive(Debug, Default)]
pub struct SkimSelector;

impl Selector for SkimSelector {
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String> {
        use skim::prelude::*;
        use std::io::Cursor;

        if items.is_empty() {
            return Ok(None);
        }

        // Build input as newline-separated display strings
        let input = items
            .iter()
            .map(|i| i.display.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let options = SkimOptionsBuilder::default()
            .prompt(Some(prompt))
            .height(Some("50%"))
            .multi(false)
            .build()
            .map_err(|e| format!("failed to build skim options: {e}"))?;

        let item_reader = SkimItemReader::default();
        let items_arc = item_reader.of_bufread(Cursor::new(input));

        match Skim::run_with(&options, Some(items_arc)) {
            Some(out) if out.is_abort => Ok(None),
            Some(out) => Ok(out.selected_items.first().and_then(|selected| {
                let display = selected.output().to_string();
                items.iter().find(|i| i.display == display).cloned()
            })),
            None => Ok(None),
        }
    }
}
