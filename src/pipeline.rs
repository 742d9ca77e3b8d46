//! Fetch → filter → group → report pipeline
//!
//! The pipeline moves through `Start → Fetching → Filtering → Grouping →
//! Saving → Done`. An error at any stage aborts the remaining stages, moves
//! the pipeline to `Failed` and is returned to the caller unchanged.
//!
//! Progress is published as [`Event`]s on a broadcast channel. The filter
//! messages are only emitted when the API returned books, and the grouping
//! messages only when some books passed the filter; the stages themselves
//! always run so that the report file is written even when it is empty.

use crate::config::Config;
use crate::error::Result;
use crate::fetcher::{BookSource, HttpBookFetcher};
use crate::filter::BookFilter;
use crate::grouper::group_books;
use crate::report::save_report;
use crate::types::{Event, PipelineSummary, Stage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

/// Capacity of the progress event channel (a full run emits at most 9 events)
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Sequences the fetcher, filter, grouper and reporter
pub struct Pipeline {
    /// Where books come from
    source: Arc<dyn BookSource>,
    /// State/parent filter
    filter: BookFilter,
    /// Report file path
    output_path: PathBuf,
    /// Progress event channel
    event_tx: broadcast::Sender<Event>,
    /// Current stage
    stage: Stage,
}

impl Pipeline {
    /// Create a pipeline over an arbitrary book source
    pub fn new(source: Arc<dyn BookSource>, filter: BookFilter, output_path: impl Into<PathBuf>) -> Self {
        let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            source,
            filter,
            output_path: output_path.into(),
            event_tx,
            stage: Stage::Start,
        }
    }

    /// Create a pipeline that fetches over HTTP as configured
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpBookFetcher::new(&config.api)?;
        Ok(Self::new(
            Arc::new(fetcher),
            BookFilter::new(config.filter.states.iter().cloned()),
            config.report.output_path.clone(),
        ))
    }

    /// Subscribe to progress events
    ///
    /// Only events sent after subscribing are received.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Report file path
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Run every stage once
    ///
    /// # Errors
    /// Returns the first error raised by any stage; later stages do not run.
    pub async fn run(&mut self) -> Result<PipelineSummary> {
        self.stage = Stage::Start;

        match self.run_stages().await {
            Ok(summary) => {
                self.advance(Stage::Done);
                info!(
                    fetched = summary.fetched,
                    filtered = summary.filtered,
                    groups = summary.groups,
                    "pipeline finished"
                );
                Ok(summary)
            }
            Err(e) => {
                let failed_at = self.stage;
                error!(stage = %failed_at, error = %e, "pipeline failed");
                self.emit(Event::Failed {
                    stage: failed_at,
                    error: e.to_string(),
                });
                self.stage = Stage::Failed;
                Err(e)
            }
        }
    }

    async fn run_stages(&mut self) -> Result<PipelineSummary> {
        self.advance(Stage::Fetching);
        self.emit(Event::Fetching);
        let books = self.source.fetch_books().await?;
        let fetched = books.len();
        self.emit(Event::Fetched { count: fetched });

        self.advance(Stage::Filtering);
        if fetched > 0 {
            self.emit(Event::Filtering);
        }
        let filtered_books = self.filter.apply(books);
        let filtered = filtered_books.len();
        if fetched > 0 {
            self.emit(Event::Filtered { count: filtered });
        }

        self.advance(Stage::Grouping);
        if filtered > 0 {
            self.emit(Event::Grouping);
        }
        let grouped = group_books(filtered_books);
        if filtered > 0 {
            self.emit(Event::Grouped {
                groups: grouped.len(),
            });
        }

        self.advance(Stage::Saving);
        self.emit(Event::Saving);
        save_report(&grouped, &self.output_path)?;
        self.emit(Event::Saved {
            path: self.output_path.clone(),
        });

        Ok(PipelineSummary {
            fetched,
            filtered,
            groups: grouped.len(),
            output_path: self.output_path.clone(),
        })
    }

    fn advance(&mut self, next: Stage) {
        debug!(from = %self.stage, to = %next, "pipeline stage");
        self.stage = next;
    }

    fn emit(&self, event: Event) {
        debug!(%event, "progress");
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}
