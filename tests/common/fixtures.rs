//! API response bodies used across integration tests

/// Two books, one in NJ under Parent1 and one in CO under Parent2
pub const TWO_MATCHING_BOOKS: &str = r#"{ "books": [
    { "id": 1, "display_name": "Book1", "parent_name": "Parent1", "meta": { "states": [ "NJ" ] } },
    { "id": 2, "display_name": "Book2", "parent_name": "Parent2", "meta": { "states": [ "CO" ] } }
] }"#;

/// One book whose only state is CA
pub const ONE_NON_MATCHING_BOOK: &str = r#"{ "books": [
    { "id": 1, "display_name": "Book1", "parent_name": "Parent1", "meta": { "states": [ "CA" ] } }
] }"#;

/// An empty book list
pub const NO_BOOKS: &str = r#"{ "books": [] }"#;

/// A mix of matching, non-matching and parentless books across shared parents
pub const MIXED_BOOKS: &str = r#"{ "books": [
    { "id": 10, "display_name": "Zeta Atlas", "parent_name": "Zeta", "meta": { "states": [ "CO", "UT" ] } },
    { "id": 11, "display_name": "Alpha Guide", "parent_name": "Alpha", "meta": { "states": [ "NJ" ] } },
    { "id": 12, "display_name": "Orphan", "parent_name": null, "meta": { "states": [ "NJ" ] } },
    { "id": 13, "display_name": "Blank Parent", "parent_name": "", "meta": { "states": [ "CO" ] } },
    { "id": 14, "display_name": "Zeta Annex", "parent_name": "Zeta", "meta": { "states": [ "NJ", "NY" ] } },
    { "id": 15, "display_name": "Cali Only", "parent_name": "Alpha", "meta": { "states": [ "CA" ] } },
    { "id": 16, "display_name": "Alpha Map", "parent_name": "Alpha", "meta": { "states": [ "CO" ] } }
] }"#;
