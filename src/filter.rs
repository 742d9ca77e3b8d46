//! State/parent filter
//!
//! A book passes when it carries at least one of the configured state codes
//! (exact, case-sensitive) and has a non-empty parent name. Survivors are
//! sorted by parent name in byte order; the sort is stable.

use crate::types::Book;
use tracing::debug;

/// State codes used when none are configured
pub const DEFAULT_STATES: [&str; 2] = ["NJ", "CO"];

/// Filter over book records
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookFilter {
    states: Vec<String>,
}

impl Default for BookFilter {
    fn default() -> Self {
        Self::new(DEFAULT_STATES)
    }
}

impl BookFilter {
    /// Create a filter accepting any of the given state codes
    pub fn new<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            states: states.into_iter().map(Into::into).collect(),
        }
    }

    /// Accepted state codes
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Whether a single book passes the filter
    pub fn matches(&self, book: &Book) -> bool {
        book.parent().is_some() && self.states.iter().any(|state| book.has_state(state))
    }

    /// Keep the matching books, sorted by parent name
    pub fn apply(&self, books: Vec<Book>) -> Vec<Book> {
        let total = books.len();
        let mut kept: Vec<Book> = books.into_iter().filter(|b| self.matches(b)).collect();
        // sort_by is stable: equal parent names keep their input order
        kept.sort_by(|a, b| a.parent_name.cmp(&b.parent_name));

        debug!(total, kept = kept.len(), states = ?self.states, "filtered books");
        kept
    }
}

/// Filter with the default states (NJ, CO)
pub fn filter_books(books: Vec<Book>) -> Vec<Book> {
    BookFilter::default().apply(books)
}
