//! # Relation Finder
//!
//! "Related" strips shown under the detail modal.
//!
//! - Books relate through an identical, present `category`.
//! - Quotes relate through at least one shared tag.
//!
//! Both scan the full collection in source order (a few hundred items, no
//! index needed), skip the focal item by [`ItemId`], and stop at `limit`.

use crate::types::{entries, Book, Entry, ItemId, Quote};

/// Books sharing the focal book's category, excluding the focal book.
///
/// A focal book without a category (or with an empty one) has no
/// relatives; so does an unknown id.
pub fn related_books(focal: ItemId, books: &[Book], limit: usize) -> Vec<Entry<'_, Book>> {
    let Some(category) = books.get(focal.index()).and_then(known_category) else {
        return Vec::new();
    };

    entries(books)
        .filter(|e| e.id != focal)
        .filter(|e| known_category(e.item) == Some(category))
        .take(limit)
        .collect()
}

/// An empty category string counts as no category.
fn known_category(book: &Book) -> Option<&str> {
    book.category.as_deref().filter(|c| !c.is_empty())
}

/// Quotes sharing at least one tag with the focal quote.
pub fn related_quotes(focal: ItemId, quotes: &[Quote], limit: usize) -> Vec<Entry<'_, Quote>> {
    let Some(anchor) = quotes.get(focal.index()) else {
        return Vec::new();
    };

    entries(quotes)
        .filter(|e| e.id != focal)
        .filter(|e| e.item.tags.iter().any(|tag| anchor.tags.contains(tag)))
        .take(limit)
        .collect()
}
