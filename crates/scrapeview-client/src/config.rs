//! # Client Configuration
//!
//! Where the datasets live and how the results are laid out.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SCRAPEVIEW_API_URL=http://scraper.local:8080                       │
//! │     SCRAPEVIEW_VIEWPORT_WIDTH=400                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $SCRAPEVIEW_CONFIG, or                                             │
//! │     ~/.config/scrapeview/config.toml (Linux)                           │
//! │     ~/Library/Application Support/com.scrapeview.scrapeview/… (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8080, 20 cards per page, 1024px wide              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:8080"
//! books_path = "/api/scrapedBooks"
//! quotes_path = "/api/scrapedQuotes"
//!
//! [display]
//! viewport_width = 1024
//! books_page_size = 20
//! quotes_page_size = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use scrapeview_core::pagination::Viewport;
use scrapeview_core::session::PageSizes;
use scrapeview_core::{Dataset, BOOKS_PAGE_SIZE, QUOTES_PAGE_SIZE};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// API Settings
// =============================================================================

/// Location of the scraping backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Scheme, host and port of the backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the books endpoint (absolute paths replace any base path).
    #[serde(default = "default_books_path")]
    pub books_path: String,

    #[serde(default = "default_quotes_path")]
    pub quotes_path: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_books_path() -> String {
    "/api/scrapedBooks".to_string()
}

fn default_quotes_path() -> String {
    "/api/scrapedQuotes".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            books_path: default_books_path(),
            quotes_path: default_quotes_path(),
        }
    }
}

impl ApiSettings {
    /// Parsed base URL; only http and https are accepted.
    pub fn base(&self) -> ClientResult<Url> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::InvalidUrl(format!(
                "API URL must use http or https, got: {}",
                other
            ))),
        }
    }

    /// Full URL of a dataset endpoint.
    pub fn endpoint(&self, dataset: Dataset) -> ClientResult<Url> {
        let path = match dataset {
            Dataset::Books => &self.books_path,
            Dataset::Quotes => &self.quotes_path,
        };
        Ok(self.base()?.join(path)?)
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// Layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Logical width used to pick the pager window (≤ 480 is narrow).
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_books_page_size")]
    pub books_page_size: usize,

    #[serde(default = "default_quotes_page_size")]
    pub quotes_page_size: usize,
}

fn default_viewport_width() -> u32 {
    1024
}

fn default_books_page_size() -> usize {
    BOOKS_PAGE_SIZE
}

fn default_quotes_page_size() -> usize {
    QUOTES_PAGE_SIZE
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            viewport_width: default_viewport_width(),
            books_page_size: default_books_page_size(),
            quotes_page_size: default_quotes_page_size(),
        }
    }
}

impl DisplaySettings {
    pub fn viewport(&self) -> Viewport {
        Viewport::from_width(self.viewport_width)
    }

    pub fn page_sizes(&self) -> PageSizes {
        PageSizes {
            books: self.books_page_size,
            quotes: self.quotes_page_size,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, `SCRAPEVIEW_CONFIG`, or platform dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var("SCRAPEVIEW_CONFIG").ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        self.api.base()?;

        if self.display.books_page_size == 0 || self.display.quotes_page_size == 0 {
            return Err(ClientError::InvalidConfig(
                "page sizes must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SCRAPEVIEW_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Ok(path) = std::env::var("SCRAPEVIEW_BOOKS_PATH") {
            self.api.books_path = path;
        }

        if let Ok(path) = std::env::var("SCRAPEVIEW_QUOTES_PATH") {
            self.api.quotes_path = path;
        }

        if let Ok(width) = std::env::var("SCRAPEVIEW_VIEWPORT_WIDTH") {
            match width.parse::<u32>() {
                Ok(w) => {
                    debug!(width = w, "Overriding viewport width from environment");
                    self.display.viewport_width = w;
                }
                Err(_) => warn!(width = %width, "Ignoring non-numeric viewport width"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "scrapeview", "scrapeview")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
