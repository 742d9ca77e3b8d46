//! Core types: book records, grouped books, pipeline stages and events

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A book record as returned by the API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier
    pub id: i64,
    /// Human-readable title
    pub display_name: String,
    /// Grouping key (may be missing or null)
    #[serde(default)]
    pub parent_name: Option<String>,
    /// Nested metadata carrying the state codes
    pub meta: Meta,
}

impl Book {
    /// Parent name, if present and non-empty
    pub fn parent(&self) -> Option<&str> {
        self.parent_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Whether the book is associated with the given state code (exact, case-sensitive)
    pub fn has_state(&self, state: &str) -> bool {
        self.meta.states.iter().any(|s| s == state)
    }
}

/// Metadata attached to a book
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// State codes associated with the book, in API order
    #[serde(default)]
    pub states: Vec<String>,
}

/// Top-level shape of the API response body
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BookApiResponse {
    /// The books, in API response order
    pub books: Vec<Book>,
}

/// Books sharing one parent name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookGroup {
    parent_name: String,
    books: Vec<Book>,
}

impl BookGroup {
    pub(crate) fn new(parent_name: String) -> Self {
        Self {
            parent_name,
            books: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, book: Book) {
        self.books.push(book);
    }

    /// The group key
    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }

    /// Members in their filtered order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the group has no members (never true for groups built by the grouper)
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Books partitioned by parent name
///
/// Built once by [`crate::grouper::group_books`] and read-only afterwards.
/// Groups iterate in the order their key first appeared in the input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupedBooks {
    groups: Vec<BookGroup>,
}

impl GroupedBooks {
    pub(crate) fn from_groups(groups: Vec<BookGroup>) -> Self {
        Self { groups }
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Members of the group with the given parent name
    pub fn get(&self, parent_name: &str) -> Option<&[Book]> {
        self.groups
            .iter()
            .find(|group| group.parent_name == parent_name)
            .map(BookGroup::books)
    }

    /// Iterate over the groups in order
    pub fn iter(&self) -> std::slice::Iter<'_, BookGroup> {
        self.groups.iter()
    }

    /// Group keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(BookGroup::parent_name)
    }

    /// Total number of books across all groups
    pub fn total_books(&self) -> usize {
        self.groups.iter().map(BookGroup::len).sum()
    }
}

impl<'a> IntoIterator for &'a GroupedBooks {
    type Item = &'a BookGroup;
    type IntoIter = std::slice::Iter<'a, BookGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Pipeline stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Not started yet
    Start,
    /// Fetching books from the API
    Fetching,
    /// Applying the state/parent filter
    Filtering,
    /// Grouping by parent name
    Grouping,
    /// Writing the report
    Saving,
    /// Finished successfully
    Done,
    /// Aborted by an error
    Failed,
}

impl Stage {
    /// Whether the pipeline can no longer advance
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Fetching => "fetching",
            Stage::Filtering => "filtering",
            Stage::Grouping => "grouping",
            Stage::Saving => "saving",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Progress event emitted by the pipeline
///
/// The `Display` form is the progress line printed to stdout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Fetch started
    Fetching,
    /// Fetch finished
    Fetched {
        /// Number of books returned by the API
        count: usize,
    },
    /// Filter started
    Filtering,
    /// Filter finished
    Filtered {
        /// Number of books that passed the filter
        count: usize,
    },
    /// Grouping started
    Grouping,
    /// Grouping finished
    Grouped {
        /// Number of groups
        groups: usize,
    },
    /// Report write started
    Saving,
    /// Report written
    Saved {
        /// Path of the report file
        path: PathBuf,
    },
    /// The pipeline aborted
    Failed {
        /// Stage that failed
        stage: Stage,
        /// Error message
        error: String,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Fetching => write!(f, "Fetching books from the API..."),
            Event::Fetched { count } => write!(f, "Fetched {count} books successfully."),
            Event::Filtering => write!(f, "Filtering books..."),
            Event::Filtered { count } => write!(f, "Filtered {count} books."),
            Event::Grouping => write!(f, "Grouping books..."),
            Event::Grouped { groups } => write!(f, "{groups} groups made."),
            Event::Saving => write!(f, "Saving results to a file..."),
            Event::Saved { path } => {
                write!(f, "Result has been saved to '{}'", path.display())
            }
            Event::Failed { error, .. } => write!(f, "An error occurred: {error}"),
        }
    }
}

/// Counts reported by a successful pipeline run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Books returned by the API
    pub fetched: usize,
    /// Books that passed the filter
    pub filtered: usize,
    /// Groups written to the report
    pub groups: usize,
    /// Path of the report file
    pub output_path: PathBuf,
}
