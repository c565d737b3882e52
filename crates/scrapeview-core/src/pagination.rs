//! # Paginator
//!
//! Page slicing and the compact page-number strip under the grid.
//!
//! Nothing here is stored: every value is recomputed from
//! `(filtered count, page, page size, viewport)` on each view.
//!
//! ## Page Strip Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total ≤ 7:     1  2  3  4  5  6  7                                     │
//! │                                                                         │
//! │  total = 20, page = 10, wide (window 5):                                │
//! │                 1  …  8  9 [10] 11 12  …  20                            │
//! │                    ▲  └─── window ───┘  ▲                               │
//! │                    start > 2            end < total - 1                 │
//! │                                                                         │
//! │  total = 20, page = 1, narrow (window 3):                               │
//! │                [1] 2  3  4  …  20                                       │
//! │                    └window┘ clamped to start at 2                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pages 1 and `total` are always shown on their own and never inside the
//! sliding window.

use serde::Serialize;

use crate::{FULL_PAGE_STRIP_MAX, NARROW_VIEWPORT_MAX_WIDTH};

// =============================================================================
// Page Slices
// =============================================================================

/// One page of a (filtered) collection.
#[derive(Debug, PartialEq)]
pub struct PageSlice<'a, T> {
    /// Items on the requested page; empty when the page is out of range.
    pub items: &'a [T],

    /// Number of pages, never less than 1.
    pub total_pages: usize,
}

/// `max(1, ceil(count / page_size))`. A zero page size counts as 1.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Cuts page `page` (1-based) out of `items`.
///
/// Out-of-range pages (including page 0) yield an empty slice instead of
/// failing; keeping `page` in range is the caller's job.
///
/// ## Example
/// ```rust
/// use scrapeview_core::pagination::paginate;
///
/// let items: Vec<u32> = (1..=45).collect();
/// let page = paginate(&items, 3, 20);
/// assert_eq!(page.items, &[41, 42, 43, 44, 45]);
/// assert_eq!(page.total_pages, 3);
/// assert!(paginate(&items, 4, 20).items.is_empty());
/// ```
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> PageSlice<'_, T> {
    let size = page_size.max(1);
    let total = total_pages(items.len(), size);

    let slice = match page.checked_sub(1).and_then(|p| p.checked_mul(size)) {
        Some(start) if start < items.len() => {
            let end = start.saturating_add(size).min(items.len());
            &items[start..end]
        }
        _ => &items[..0],
    };

    PageSlice {
        items: slice,
        total_pages: total,
    }
}

// =============================================================================
// Viewport
// =============================================================================

/// Width class of the display, which decides the sliding window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewport {
    /// At most 480 logical pixels wide.
    Narrow,
    #[default]
    Wide,
}

impl Viewport {
    pub fn from_width(width: u32) -> Self {
        if width <= NARROW_VIEWPORT_MAX_WIDTH {
            Viewport::Narrow
        } else {
            Viewport::Wide
        }
    }

    /// Pages in the sliding window: 3 when narrow, 5 otherwise.
    pub const fn window_size(&self) -> usize {
        match self {
            Viewport::Narrow => 3,
            Viewport::Wide => 5,
        }
    }
}

// =============================================================================
// Page Strip
// =============================================================================

/// One slot of the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "page")]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Builds the page strip for `page` out of `total_pages`.
///
/// ## Algorithm
/// 1. `total_pages <= 7`: every page, no ellipsis.
/// 2. Otherwise a window of `window_size` pages centered on `page`; an even
///    window gives up one page at its upper end.
/// 3. The window is shifted so that it stays within `[2, total_pages - 1]`.
/// 4. Emit `1`, `…` if the window does not touch page 2, the window, `…` if
///    it does not touch `total_pages - 1`, then `total_pages`.
pub fn page_index_display(page: usize, total_pages: usize, window_size: usize) -> Vec<PageMarker> {
    if total_pages <= FULL_PAGE_STRIP_MAX {
        return (1..=total_pages.max(1)).map(PageMarker::Page).collect();
    }

    // i128 holds every usize, so page numbers far past the end cannot overflow.
    let total = total_pages as i128;
    let page = page as i128;
    let window = window_size as i128;

    let mut start = page - window / 2;
    let mut end = page + window / 2;
    if window % 2 == 0 {
        end -= 1;
    }

    if start < 2 {
        start = 2;
        end = start + window - 1;
    }
    if end > total - 1 {
        end = total - 1;
        start = end - window + 1;
    }
    // A window wider than the interior would otherwise reach page 1.
    start = start.max(2);

    let mut markers = Vec::new();
    markers.push(PageMarker::Page(1));
    if start > 2 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.extend((start..=end).map(|p| PageMarker::Page(p as usize)));
    if end < total - 1 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.push(PageMarker::Page(total_pages));

    markers
}

// =============================================================================
// Prev / Next
// =============================================================================

/// Prev/Next targets for the pager buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNav {
    pub page: usize,
    pub total_pages: usize,
}

impl PageNav {
    pub fn new(page: usize, total_pages: usize) -> Self {
        PageNav {
            page,
            total_pages: total_pages.max(1),
        }
    }

    /// Prev is disabled on page 1.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Next is disabled on the last page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn prev(&self) -> usize {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next(&self) -> usize {
        self.page.saturating_add(1).min(self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageMarker::{Ellipsis, Page};

    fn pages(ns: &[usize]) -> Vec<PageMarker> {
        ns.iter().copied().map(Page).collect()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(1000, 20), 50);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let items: Vec<u32> = (0..10).collect();
        assert!(paginate(&items, 0, 4).items.is_empty());
        assert!(paginate(&items, 4, 4).items.is_empty());
        assert!(paginate(&items, usize::MAX, 4).items.is_empty());
        assert_eq!(paginate(&items, 3, 4).items, &[8, 9]);

        let empty: Vec<u32> = Vec::new();
        let page = paginate(&empty, 1, 20);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_concatenated_pages_reproduce_collection() {
        let items: Vec<u32> = (0..57).collect();
        for size in [1, 7, 20, 57, 100] {
            let total = paginate(&items, 1, size).total_pages;
            let joined: Vec<u32> = (1..=total)
                .flat_map(|p| paginate(&items, p, size).items.iter().copied())
                .collect();
            assert_eq!(joined, items, "page size {}", size);
        }
    }

    #[test]
    fn test_small_totals_list_everything() {
        assert_eq!(page_index_display(1, 1, 5), pages(&[1]));
        assert_eq!(page_index_display(3, 7, 5), pages(&[1, 2, 3, 4, 5, 6, 7]));
        assert_eq!(page_index_display(7, 7, 3), pages(&[1, 2, 3, 4, 5, 6, 7]));
    }

    #[test]
    fn test_first_page_wide() {
        assert_eq!(
            page_index_display(1, 20, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_last_page_wide() {
        assert_eq!(
            page_index_display(20, 20, 5),
            vec![Page(1), Ellipsis, Page(15), Page(16), Page(17), Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn test_middle_page_wide_and_narrow() {
        assert_eq!(
            page_index_display(10, 20, 5),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10), Page(11), Page(12), Ellipsis, Page(20)]
        );
        assert_eq!(
            page_index_display(10, 20, 3),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_window_touching_edges_has_no_ellipsis() {
        // window 2..=6 touches page 2
        assert_eq!(
            page_index_display(4, 10, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        // total 8: window 3..=7 touches page 7
        assert_eq!(
            page_index_display(5, 8, 5),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6), Page(7), Page(8)]
        );
    }

    #[test]
    fn test_even_window_shrinks_upper_bound() {
        assert_eq!(
            page_index_display(10, 20, 4),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_oversized_window_stays_inside() {
        let markers = page_index_display(5, 9, 20);
        assert_eq!(markers, pages(&[1, 2, 3, 4, 5, 6, 7, 8, 9]));
    }

    #[test]
    fn test_strip_properties_hold_everywhere() {
        for total in 1..=30 {
            for page in 1..=total {
                for window in [3, 5] {
                    let markers = page_index_display(page, total, window);
                    assert_eq!(markers.first(), Some(&Page(1)));
                    assert_eq!(markers.last(), Some(&Page(total)));
                    assert!(markers.windows(2).all(|w| !(w[0] == Ellipsis && w[1] == Ellipsis)));
                    assert!(markers.contains(&Page(page)));
                    if total <= 7 {
                        assert!(!markers.contains(&Ellipsis));
                    }
                    let numbers: Vec<usize> = markers
                        .iter()
                        .filter_map(|m| match m {
                            Page(n) => Some(*n),
                            Ellipsis => None,
                        })
                        .collect();
                    assert!(numbers.windows(2).all(|w| w[0] < w[1]));
                }
            }
        }
    }

    #[test]
    fn test_viewport_window_sizes() {
        assert_eq!(Viewport::from_width(320), Viewport::Narrow);
        assert_eq!(Viewport::from_width(480), Viewport::Narrow);
        assert_eq!(Viewport::from_width(481), Viewport::Wide);
        assert_eq!(Viewport::Narrow.window_size(), 3);
        assert_eq!(Viewport::Wide.window_size(), 5);
    }

    #[test]
    fn test_page_nav() {
        let single = PageNav::new(1, 1);
        assert!(!single.has_prev());
        assert!(!single.has_next());
        assert_eq!(single.prev(), 1);
        assert_eq!(single.next(), 1);

        let middle = PageNav::new(3, 5);
        assert_eq!(middle.prev(), 2);
        assert_eq!(middle.next(), 4);

        let last = PageNav::new(5, 5);
        assert!(last.has_prev());
        assert!(!last.has_next());
        assert_eq!(last.next(), 5);
    }

    #[test]
    fn test_page_far_past_the_end_is_total() {
        let markers = page_index_display(1 << 63, 12, 5);
        assert_eq!(
            markers,
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10), Page(11), Page(12)]
        );
        assert_eq!(page_index_display(usize::MAX, 30, 3).last(), Some(&Page(30)));
        assert_eq!(page_index_display(4, 9, usize::MAX).len(), 9);

        let nav = PageNav::new(usize::MAX, 3);
        assert_eq!(nav.next(), 3);
        assert_eq!(nav.prev(), usize::MAX - 1);
    }
}
