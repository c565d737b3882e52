//! # Browser
//!
//! Owns a [`Session`] and carries out the fetches it asks for.
//!
//! ## Fetch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  dispatch(SetMode(Books))                                               │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Session ── Effect::Fetch(req) ──► tokio::spawn(source.fetch(books))    │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                   mpsc ◄── Completion { req, outcome }  │
//! │                                    │                                    │
//! │  next_completion() ◄───────────────┘                                    │
//! │      │                                                                  │
//! │      ├── Ok(payload)  ──► Session::dispatch(Loaded) ──► Applied         │
//! │      │                                           └────► Discarded       │
//! │      └── Err(e)       ──► error! log, dataset stays unloaded            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Completions are applied on the owner's task only, one at a time, so the
//! session never needs a lock. A response for a mode the user already left
//! is dropped by the session itself.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use scrapeview_core::pagination::Viewport;
use scrapeview_core::session::{DiscardReason, FetchRequest, PageSizes, Payload};
use scrapeview_core::{Action, CoreResult, Dataset, Effect, Session, SessionView};

use crate::error::ClientResult;
use crate::source::CatalogSource;

/// A finished fetch, waiting to be applied.
#[derive(Debug)]
struct Completion {
    request: FetchRequest,
    outcome: ClientResult<Payload>,
}

/// What became of a fetch once it was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { dataset: Dataset, count: usize },
    Discarded(DiscardReason),
    Failed { dataset: Dataset, message: String },
}

pub struct Browser<S: CatalogSource> {
    session: Session,
    source: Arc<S>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl<S: CatalogSource> Browser<S> {
    pub fn new(source: S) -> Self {
        Self::with_page_sizes(source, PageSizes::default())
    }

    pub fn with_page_sizes(source: S, page_sizes: PageSizes) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Browser {
            session: Session::with_page_sizes(page_sizes),
            source: Arc::new(source),
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self, viewport: Viewport) -> SessionView<'_> {
        self.session.view(viewport)
    }

    /// Fetches started but not yet applied.
    pub fn pending(&self) -> usize {
        self.in_flight
    }

    pub fn has_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Applies a user action, starting a fetch if the session asks for one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, action: Action) -> CoreResult<Effect> {
        let effect = self.session.dispatch(action)?;
        if let Effect::Fetch(request) = effect {
            self.spawn_fetch(request);
        }
        Ok(effect)
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        debug!(dataset = %request.dataset, ticket = request.ticket, "Starting fetch");

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let outcome = source.fetch(request.dataset).await;
            // The receiver lives as long as the browser; a send error only
            // means the browser was dropped mid-fetch.
            let _ = tx.send(Completion { request, outcome });
        });
    }

    /// Waits for the next fetch to finish and applies it.
    ///
    /// Returns `None` right away when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<FetchOutcome> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.rx.recv().await?;
        Some(self.apply(completion))
    }

    /// Applies every fetch that has already finished, without waiting.
    pub fn drain_completions(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            outcomes.push(self.apply(completion));
        }
        outcomes
    }

    /// Waits until every started fetch has been applied.
    pub async fn settle(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.next_completion().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    fn apply(&mut self, completion: Completion) -> FetchOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        let Completion { request, outcome } = completion;
        let dataset = request.dataset;

        let payload = match outcome {
            Ok(payload) if payload.is_empty() => {
                warn!(%dataset, ticket = request.ticket, "Backend returned an empty collection");
                payload
            }
            Ok(payload) => payload,
            Err(e) => {
                error!(%dataset, ticket = request.ticket, "Fetch failed: {}", e);
                return FetchOutcome::Failed {
                    dataset,
                    message: e.to_string(),
                };
            }
        };

        match self.session.dispatch(Action::Loaded { request, payload }) {
            Ok(Effect::Applied { dataset, count }) => {
                info!(%dataset, count, "Dataset loaded");
                FetchOutcome::Applied { dataset, count }
            }
            Ok(Effect::Discarded(reason)) => {
                info!(?reason, ticket = request.ticket, "Dropped fetch result");
                FetchOutcome::Discarded(reason)
            }
            Ok(effect) => {
                warn!(?effect, "Unexpected effect while installing a payload");
                FetchOutcome::Failed {
                    dataset,
                    message: format!("unexpected effect {:?}", effect),
                }
            }
            Err(e) => FetchOutcome::Failed {
                dataset,
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use async_trait::async_trait;
    use scrapeview_core::{Book, ItemId, Mode, Quote};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct FakeCatalog {
        books: Vec<Book>,
        quotes: Vec<Quote>,
        books_delay: Duration,
        fail_books: bool,
        book_calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogSource for FakeCatalog {
        async fn fetch_books(&self) -> ClientResult<Vec<Book>> {
            self.book_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.books_delay).await;
            if self.fail_books {
                return Err(ClientError::Decode {
                    dataset: "books".to_string(),
                    reason: "not json".to_string(),
                });
            }
            Ok(self.books.clone())
        }

        async fn fetch_quotes(&self) -> ClientResult<Vec<Quote>> {
            Ok(self.quotes.clone())
        }
    }

    fn catalog() -> FakeCatalog {
        FakeCatalog {
            books: (0..30)
                .map(|i| Book::titled(format!("Book {}", i)).with_category("Poetry"))
                .collect(),
            quotes: vec![
                Quote::new("x", "Austen", ["love"]),
                Quote::new("y", "Twain", ["life"]),
            ],
            ..FakeCatalog::default()
        }
    }

    #[tokio::test]
    async fn test_entering_mode_loads_dataset() {
        let mut browser = Browser::new(catalog());
        let effect = browser.dispatch(Action::SetMode(Mode::Books)).unwrap();
        assert!(matches!(effect, Effect::Fetch(_)));
        assert_eq!(browser.pending(), 1);

        let outcome = browser.next_completion().await;
        assert_eq!(
            outcome,
            Some(FetchOutcome::Applied {
                dataset: Dataset::Books,
                count: 30,
            })
        );
        assert!(!browser.has_pending());
        assert!(browser.next_completion().await.is_none());

        let view = browser.view(Viewport::Wide);
        let results = view.results.unwrap();
        assert_eq!(results.total_matches, 30);
        assert_eq!(results.pager.total_pages, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_books_do_not_clobber_quotes() {
        let mut browser = Browser::new(FakeCatalog {
            books_delay: Duration::from_millis(500),
            ..catalog()
        });

        browser.dispatch(Action::SetMode(Mode::Books)).unwrap();
        browser.dispatch(Action::SetMode(Mode::Quotes)).unwrap();
        assert_eq!(browser.pending(), 2);

        let outcomes = browser.settle().await;
        assert_eq!(
            outcomes,
            vec![
                FetchOutcome::Applied {
                    dataset: Dataset::Quotes,
                    count: 2,
                },
                FetchOutcome::Discarded(DiscardReason::Stale {
                    dataset: Dataset::Books,
                    current: Mode::Quotes,
                }),
            ]
        );
        assert_eq!(browser.session().mode(), Mode::Quotes);
        assert!(!browser.session().is_loaded(Dataset::Books));
        assert_eq!(browser.session().quotes().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_dataset_unloaded() {
        let mut browser = Browser::new(FakeCatalog {
            fail_books: true,
            ..catalog()
        });

        browser.dispatch(Action::SetMode(Mode::Books)).unwrap();
        let outcome = browser.next_completion().await.unwrap();
        assert!(matches!(outcome, FetchOutcome::Failed { dataset: Dataset::Books, .. }));

        let view = browser.view(Viewport::Wide);
        assert!(view.results.unwrap().cards.is_empty());

        // Leaving and re-entering tries again.
        browser.dispatch(Action::SetMode(Mode::Books)).unwrap();
        let effect = browser.dispatch(Action::SetMode(Mode::Books)).unwrap();
        assert!(matches!(effect, Effect::Fetch(_)));
        browser.settle().await;
        assert_eq!(browser.source.book_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_loaded_dataset_is_not_refetched() {
        let mut browser = Browser::new(catalog());
        browser.dispatch(Action::SetMode(Mode::Books)).unwrap();
        browser.settle().await;

        browser.dispatch(Action::SetMode(Mode::Quotes)).unwrap();
        browser.settle().await;
        let effect = browser
            .dispatch(Action::CategoryClick("Poetry".to_string()))
            .unwrap();

        assert_eq!(effect, Effect::Nothing);
        assert_eq!(browser.source.book_calls.load(Ordering::SeqCst), 1);
        assert_eq!(browser.session().match_count(), 30);
    }

    #[tokio::test]
    async fn test_empty_collection_loads_and_is_not_refetched() {
        let mut browser = Browser::new(FakeCatalog::default());
        browser.dispatch(Action::SetMode(Mode::Books)).unwrap();

        let outcome = browser.next_completion().await;
        assert_eq!(
            outcome,
            Some(FetchOutcome::Applied {
                dataset: Dataset::Books,
                count: 0,
            })
        );
        assert!(browser.session().is_loaded(Dataset::Books));
        assert!(browser.view(Viewport::Wide).results.unwrap().cards.is_empty());

        browser.dispatch(Action::SetMode(Mode::Books)).unwrap();
        let effect = browser.dispatch(Action::SetMode(Mode::Books)).unwrap();
        assert_eq!(effect, Effect::Nothing);
        assert_eq!(browser.source.book_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drain_applies_finished_fetches() {
        let mut browser = Browser::new(catalog());
        browser.dispatch(Action::SetMode(Mode::Quotes)).unwrap();
        assert!(browser.drain_completions().len() <= 1);

        browser.settle().await;
        assert!(browser.session().is_loaded(Dataset::Quotes));
        browser.dispatch(Action::SelectQuote(ItemId::new(1))).unwrap();
        assert!(browser.view(Viewport::Narrow).modal.is_some());
    }
}
