//! # scrapeview-client: I/O Layer for Scrapeview
//!
//! Everything the pure core needs from the outside world: the two dataset
//! endpoints, the configuration file and the persisted theme.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Client Architecture                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Browser (owns the Session)                  │  │
//! │  │                                                                  │  │
//! │  │  Applies user actions, spawns one Tokio task per fetch effect,  │  │
//! │  │  applies completions in arrival order                            │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ CatalogSource  │  │  ClientConfig  │  │     ThemeStore         │    │
//! │  │                │  │                │  │                        │    │
//! │  │ HttpCatalog:   │  │ TOML file +    │  │ preferences.toml in    │    │
//! │  │ GET books and  │  │ SCRAPEVIEW_*   │  │ the platform data dir  │    │
//! │  │ quotes arrays  │  │ env overrides  │  │                        │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`browser`] - Session owner and fetch runner
//! - [`config`] - API location and display settings
//! - [`error`] - Client error types
//! - [`preferences`] - Theme persistence
//! - [`source`] - Dataset sources (HTTP and test doubles)

pub mod browser;
pub mod config;
pub mod error;
pub mod preferences;
pub mod source;

pub use browser::{Browser, FetchOutcome};
pub use config::{ApiSettings, ClientConfig, DisplaySettings};
pub use error::{ClientError, ClientResult};
pub use preferences::ThemeStore;
pub use source::{CatalogSource, HttpCatalog};
