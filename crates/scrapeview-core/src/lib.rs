//! # scrapeview-core: Pure Query Engine for Scrapeview
//!
//! This crate is the **heart** of Scrapeview. It holds the in-memory query
//! engine over the two scraped datasets (books and quotes) as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Scrapeview Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal front end                           │   │
//! │  │    Mode buttons ──► Search box ──► Grid ──► Pager ──► Modal     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Actions                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               scrapeview-client (Browser, HTTP)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ scrapeview-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌──────────┐         │   │
//! │  │   │  rating  │ │  filter  │ │ pagination │ │ related  │         │   │
//! │  │   └──────────┘ └──────────┘ └────────────┘ └──────────┘         │   │
//! │  │                 ┌──────────────────────────┐                    │   │
//! │  │                 │ session (state machine)  │                    │   │
//! │  │                 └──────────────────────────┘                    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (Book, Quote) and stable item identifiers
//! - [`rating`] - Word/numeric rating to a 0..=5 star count
//! - [`filter`] - Case-insensitive substring filter per dataset
//! - [`pagination`] - Page slices and the page-number strip with ellipses
//! - [`related`] - Related books (category) and quotes (shared tag)
//! - [`session`] - The interaction state machine and composed views
//! - [`theme`] - Light/dark preference resolution
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use scrapeview_core::session::{Action, Effect, Session};
//! use scrapeview_core::Mode;
//!
//! let mut session = Session::new();
//! let effect = session.dispatch(Action::SetMode(Mode::Books)).unwrap();
//! assert!(matches!(effect, Effect::Fetch(_)));
//!
//! // Clicking the active mode again turns browsing off.
//! session.dispatch(Action::SetMode(Mode::Books)).unwrap();
//! assert_eq!(session.mode(), Mode::None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod pagination;
pub mod rating;
pub mod related;
pub mod session;
pub mod theme;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use filter::{filter_entries, filter_items, Searchable};
pub use pagination::{page_index_display, paginate, PageMarker, PageNav, PageSlice, Viewport};
pub use rating::normalize_rating;
pub use related::{related_books, related_quotes};
pub use session::{Action, Effect, Session, SessionView};
pub use theme::Theme;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Cards shown per page in books mode.
pub const BOOKS_PAGE_SIZE: usize = 20;

/// Cards shown per page in quotes mode.
pub const QUOTES_PAGE_SIZE: usize = 20;

/// Maximum related books listed in the book modal.
pub const RELATED_BOOKS_LIMIT: usize = 8;

/// Maximum related quotes listed in the quote modal.
pub const RELATED_QUOTES_LIMIT: usize = 6;

/// Widest viewport (logical pixels) still considered narrow.
///
/// Narrow viewports get a 3-page sliding window, wider ones get 5.
pub const NARROW_VIEWPORT_MAX_WIDTH: u32 = 480;

/// Up to this many pages the page strip lists every page without ellipses.
pub const FULL_PAGE_STRIP_MAX: usize = 7;
