//! # book-extractor
//!
//! Fetches book records from a JSON API, keeps the ones associated with the
//! configured states (NJ and CO by default) that have a parent name, groups
//! them by parent name and writes a plain-text report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use book_extractor::{Config, Pipeline};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("appsettings.json"))?;
//!     let mut pipeline = Pipeline::from_config(&config)?;
//!
//!     // Print progress lines as they happen
//!     let mut events = pipeline.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("{event}");
//!         }
//!     });
//!
//!     let summary = pipeline.run().await?;
//!     println!("{} groups written to {}", summary.groups, summary.output_path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Fetching books from the API
pub mod fetcher;
/// State/parent filter
pub mod filter;
/// Grouping by parent name
pub mod grouper;
/// Pipeline orchestration
pub mod pipeline;
/// Report rendering
pub mod report;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{Config, ConfigOverrides, ConfigSource};
pub use error::{Error, FetchError, Result, ToExitCode, exit_status};
pub use fetcher::{BookSource, HttpBookFetcher};
pub use filter::{BookFilter, filter_books};
pub use grouper::group_books;
pub use pipeline::Pipeline;
pub use report::{render_report, save_report};
pub use types::{Book, BookGroup, Event, GroupedBooks, Meta, PipelineSummary, Stage};
