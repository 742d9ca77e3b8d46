//! Grouping filtered books by parent name

use crate::types::{Book, BookGroup, GroupedBooks};
use std::collections::HashMap;
use tracing::debug;

/// Partition books by parent name
///
/// Groups appear in the order their key first occurs in `books`, and members
/// keep their relative input order. Books without a parent name are skipped;
/// the filter has already removed them in a normal run.
pub fn group_books(books: Vec<Book>) -> GroupedBooks {
    let mut groups: Vec<BookGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for book in books {
        let Some(parent) = book.parent() else {
            continue;
        };

        let slot = match index.get(parent) {
            Some(&slot) => slot,
            None => {
                let slot = groups.len();
                index.insert(parent.to_string(), slot);
                groups.push(BookGroup::new(parent.to_string()));
                slot
            }
        };
        groups[slot].push(book);
    }

    debug!(groups = groups.len(), "grouped books");
    GroupedBooks::from_groups(groups)
}
