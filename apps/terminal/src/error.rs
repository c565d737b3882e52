//! # Command Error Type
//!
//! Everything that can go wrong with one line of input.
//!
//! ```text
//!   input line ──► Command::from_str ──► App::execute ──► redraw
//!                        │                     │
//!                        ▼                     ▼
//!                UnknownCommand          NoSuchCard
//!                MissingArgument         Core(ItemNotFound)
//!                InvalidNumber           NoSuchPage
//!                        │                     │
//!                        └──────────┬──────────┘
//!                                   ▼
//!                       "! <message>" on one line,
//!                       the loop keeps running
//! ```

use scrapeview_core::CoreError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command `{0}` (type `help` for the list)")]
    UnknownCommand(String),

    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),

    /// The numbered card or related item is not on screen.
    #[error("There is no #{0} to open here")]
    NoSuchCard(usize),

    #[error("There is no page {page} (pages run 1..={total_pages})")]
    NoSuchPage { page: usize, total_pages: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CommandError {
    /// Short machine-readable code, used as a log field.
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::UnknownCommand(_) => "UNKNOWN_COMMAND",
            CommandError::MissingArgument { .. } => "MISSING_ARGUMENT",
            CommandError::InvalidNumber(_) => "INVALID_NUMBER",
            CommandError::NoSuchCard(_) => "NO_SUCH_CARD",
            CommandError::NoSuchPage { .. } => "NO_SUCH_PAGE",
            CommandError::Core(CoreError::ItemNotFound { .. }) => "NOT_FOUND",
            CommandError::Core(_) => "INVALID_INPUT",
        }
    }
}
