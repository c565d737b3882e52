//! # Catalog Sources
//!
//! Where the two datasets come from. [`CatalogSource`] is the seam the
//! [`crate::browser::Browser`] fetches through; [`HttpCatalog`] is the real
//! implementation against the scraping backend.
//!
//! ```text
//!   Browser ──spawn──► CatalogSource::fetch(dataset)
//!                         │
//!                         ├── HttpCatalog: GET {base}/api/scrapedBooks
//!                         │                GET {base}/api/scrapedQuotes
//!                         │
//!                         └── test doubles (in-memory, delayed, failing)
//! ```
//!
//! Both endpoints answer with a bare JSON array. No retries, no timeouts
//! beyond reqwest's defaults, no caching: a failed fetch is reported once
//! and the dataset stays unloaded.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use scrapeview_core::session::Payload;
use scrapeview_core::{Book, Dataset, Quote};

use crate::config::ApiSettings;
use crate::error::{ClientError, ClientResult};

/// Something that can produce the books and quotes collections.
#[async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    async fn fetch_books(&self) -> ClientResult<Vec<Book>>;

    async fn fetch_quotes(&self) -> ClientResult<Vec<Quote>>;

    /// Fetches one dataset as a session payload.
    async fn fetch(&self, dataset: Dataset) -> ClientResult<Payload> {
        match dataset {
            Dataset::Books => self.fetch_books().await.map(Payload::Books),
            Dataset::Quotes => self.fetch_quotes().await.map(Payload::Quotes),
        }
    }
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// Fetches datasets from the scraping backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    books_url: Url,
    quotes_url: Url,
}

impl HttpCatalog {
    /// Resolves both endpoint URLs up front so a bad config fails at startup.
    pub fn new(api: &ApiSettings) -> ClientResult<Self> {
        Ok(HttpCatalog {
            client: Client::new(),
            books_url: api.endpoint(Dataset::Books)?,
            quotes_url: api.endpoint(Dataset::Quotes)?,
        })
    }

    pub fn books_url(&self) -> &Url {
        &self.books_url
    }

    pub fn quotes_url(&self) -> &Url {
        &self.quotes_url
    }

    #[instrument(skip(self, url), fields(url = %url))]
    async fn get_list<T: DeserializeOwned>(&self, url: &Url, dataset: Dataset) -> ClientResult<Vec<T>> {
        let response = self.client.get(url.clone()).send().await?.error_for_status()?;
        let body = response.text().await?;

        let items: Vec<T> = serde_json::from_str(&body).map_err(|e| ClientError::Decode {
            dataset: dataset.to_string(),
            reason: e.to_string(),
        })?;

        debug!(count = items.len(), "Fetched {}", dataset);
        Ok(items)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_books(&self) -> ClientResult<Vec<Book>> {
        self.get_list(&self.books_url, Dataset::Books).await
    }

    async fn fetch_quotes(&self) -> ClientResult<Vec<Quote>> {
        self.get_list(&self.quotes_url, Dataset::Quotes).await
    }
}
