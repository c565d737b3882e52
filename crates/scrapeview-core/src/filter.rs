//! # Text Filter
//!
//! Narrows a dataset to the items whose searchable fields contain the query.
//!
//! ## Matching Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  query ──► trim ──► lowercase ──► empty? ──yes──► whole collection      │
//! │                                      │                                  │
//! │                                      no                                 │
//! │                                      ▼                                  │
//! │   Book:  title ∪ category?                 lowercase(field)             │
//! │   Quote: text ∪ author ∪ tags[*]           .contains(query)  any ⇒ keep │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Plain substring containment: no tokenizing, no fuzzy matching, no
//! ranking. Output keeps the source order.

use crate::types::{entries, Book, Entry, Quote};

// =============================================================================
// Searchable
// =============================================================================

/// Per-dataset choice of the fields the text filter looks at.
pub trait Searchable {
    /// Fields checked by the filter. Absent optional fields are omitted.
    fn search_fields(&self) -> Vec<&str>;

    /// Whether any field contains `needle`, which must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for Book {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(category) = &self.category {
            fields.push(category);
        }
        fields
    }
}

impl Searchable for Quote {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(2 + self.tags.len());
        fields.push(self.text.as_str());
        fields.push(self.author.as_str());
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Trims and lowercases a raw query. `None` means "no filtering".
pub fn normalize_query(query: &str) -> Option<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        None
    } else {
        Some(needle)
    }
}

/// Filters already-identified entries, keeping their order.
///
/// Taking entries (rather than a slice) lets the filter run on its own
/// output, which is how idempotence is checked.
pub fn filter_entries<'a, T, I>(items: I, query: &str) -> Vec<Entry<'a, T>>
where
    T: Searchable,
    I: IntoIterator<Item = Entry<'a, T>>,
{
    match normalize_query(query) {
        None => items.into_iter().collect(),
        Some(needle) => items
            .into_iter()
            .filter(|entry| entry.item.matches(&needle))
            .collect(),
    }
}

/// Filters a whole collection.
///
/// ## Example
/// ```rust
/// use scrapeview_core::{filter_items, Book};
///
/// let books = vec![
///     Book::titled("Dune").with_category("Science Fiction"),
///     Book::titled("Emma").with_category("Classics"),
/// ];
/// let hits = filter_items(&books, "  FICTION ");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].item.title, "Dune");
/// ```
pub fn filter_items<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<Entry<'a, T>> {
    filter_entries(entries(items), query)
}
