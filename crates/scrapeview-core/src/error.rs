//! # Error Types
//!
//! Domain-specific error types for scrapeview-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  scrapeview-core errors (this file)                                    │
//! │  └── CoreError        - Rejected session transitions, bad tokens       │
//! │                                                                         │
//! │  scrapeview-client errors (separate crate)                             │
//! │  └── ClientError      - Config, HTTP and decode failures               │
//! │                                                                         │
//! │  terminal errors (in app)                                              │
//! │  └── CommandError     - What the user sees for a bad command           │
//! │                                                                         │
//! │  Flow: CoreError → CommandError → one line on screen                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filtering, pagination, relation lookup and rating normalization are total
//! functions and never produce an error; only session transitions that name
//! something that does not exist can fail.

use thiserror::Error;

use crate::types::{Dataset, ItemId};

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A selection named an item that is not in the loaded collection.
    ///
    /// ## When This Occurs
    /// - The dataset has not been loaded yet
    /// - The id came from a page of a different dataset
    #[error("No {dataset} item with id {id}")]
    ItemNotFound { dataset: Dataset, id: ItemId },

    /// A mode token could not be parsed.
    #[error("Unknown mode: '{0}'. Valid options: none, books, quotes")]
    UnknownMode(String),

    /// A theme token could not be parsed.
    #[error("Unknown theme: '{0}'. Valid options: light, dark")]
    UnknownTheme(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
