//! # Application State
//!
//! The [`Browser`] plus the two things only the front end knows about: how
//! wide the "window" is and which theme is showing.
//!
//! ```text
//!   Command ──► App::execute ──► Browser::dispatch(Action) ──► Session
//!                  │
//!                  ├── open/related: resolve "n-th card on screen" to an ItemId
//!                  ├── theme: toggle and persist through ThemeStore
//!                  └── width: pick the pager window (narrow ≤ 480px)
//! ```

use tracing::{debug, warn};

use scrapeview_client::{Browser, CatalogSource, DisplaySettings, FetchOutcome, ThemeStore};
use scrapeview_core::pagination::Viewport;
use scrapeview_core::session::{Cards, ModalView};
use scrapeview_core::{Action, SessionView, Theme};

use crate::commands::Command;
use crate::error::CommandError;

/// What the event loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Redraw,
    Help,
    Quit,
}

pub struct App<S: CatalogSource> {
    browser: Browser<S>,
    viewport_width: u32,
    theme: Theme,
    themes: Option<ThemeStore>,
}

impl<S: CatalogSource> App<S> {
    pub fn new(source: S, display: &DisplaySettings, theme: Theme, themes: Option<ThemeStore>) -> Self {
        App {
            browser: Browser::with_page_sizes(source, display.page_sizes()),
            viewport_width: display.viewport_width,
            theme,
            themes,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_width(self.viewport_width)
    }

    pub fn view(&self) -> SessionView<'_> {
        self.browser.view(self.viewport())
    }

    pub fn browser(&self) -> &Browser<S> {
        &self.browser
    }

    pub fn has_pending(&self) -> bool {
        self.browser.has_pending()
    }

    pub async fn next_completion(&mut self) -> Option<FetchOutcome> {
        self.browser.next_completion().await
    }

    /// Applies fetches that finished meanwhile, so one redraw covers them.
    pub fn drain_completions(&mut self) -> Vec<FetchOutcome> {
        self.browser.drain_completions()
    }

    /// Runs one command against the session.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, CommandError> {
        debug!(?command, "Executing command");

        let action = match command {
            Command::Mode(mode) => Action::SetMode(mode),
            Command::Search(query) => Action::SetQuery(query),
            Command::Clear => Action::SetQuery(String::new()),
            Command::Page(page) => self.page_action(page)?,
            Command::Next => Action::NextPage,
            Command::Prev => Action::PrevPage,
            Command::Open(n) => self.card_action(n)?,
            Command::Related(n) => self.related_action(n)?,
            Command::Close => Action::ClearSelection,
            Command::Tag(tag) => Action::TagClick(tag),
            Command::Category(category) => Action::CategoryClick(category),
            Command::Theme(theme) => {
                let next = theme.unwrap_or(self.theme.toggled());
                self.set_theme(next);
                return Ok(Outcome::Redraw);
            }
            Command::Width(width) => {
                self.viewport_width = width;
                return Ok(Outcome::Redraw);
            }
            Command::Help => return Ok(Outcome::Help),
            Command::Quit => return Ok(Outcome::Quit),
        };

        self.browser.dispatch(action)?;
        Ok(Outcome::Redraw)
    }

    /// Pages outside `1..=total_pages` are refused rather than stored.
    fn page_action(&self, page: usize) -> Result<Action, CommandError> {
        let total_pages = self.browser.session().total_pages();
        if page == 0 || page > total_pages {
            return Err(CommandError::NoSuchPage { page, total_pages });
        }
        Ok(Action::SetPage(page))
    }

    /// Selection for the n-th (1-based) card on the current page.
    fn card_action(&self, n: usize) -> Result<Action, CommandError> {
        let view = self.view();
        let cards = view.results.map(|r| r.cards);
        let index = n.checked_sub(1).ok_or(CommandError::NoSuchCard(n))?;

        match cards {
            Some(Cards::Books(cards)) => cards.get(index).map(|e| Action::SelectBook(e.id)),
            Some(Cards::Quotes(cards)) => cards.get(index).map(|e| Action::SelectQuote(e.id)),
            None => None,
        }
        .ok_or(CommandError::NoSuchCard(n))
    }

    /// Selection for the n-th (1-based) related item of the open modal.
    fn related_action(&self, n: usize) -> Result<Action, CommandError> {
        let index = n.checked_sub(1).ok_or(CommandError::NoSuchCard(n))?;

        match self.view().modal {
            Some(ModalView::Book { related, .. }) => {
                related.get(index).map(|e| Action::SelectBook(e.id))
            }
            Some(ModalView::Quote { related, .. }) => {
                related.get(index).map(|e| Action::SelectQuote(e.id))
            }
            None => None,
        }
        .ok_or(CommandError::NoSuchCard(n))
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Some(store) = &self.themes {
            if let Err(e) = store.save(theme) {
                warn!("Could not persist theme: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scrapeview_client::ClientResult;
    use scrapeview_core::session::Selection;
    use scrapeview_core::{Book, Dataset, ItemId, Mode, Quote};

    struct StaticCatalog;

    #[async_trait]
    impl CatalogSource for StaticCatalog {
        async fn fetch_books(&self) -> ClientResult<Vec<Book>> {
            Ok((0..25)
                .map(|i| {
                    let category = if i < 5 { "Travel" } else { "Poetry" };
                    Book::titled(format!("Book {}", i)).with_category(category)
                })
                .collect())
        }

        async fn fetch_quotes(&self) -> ClientResult<Vec<Quote>> {
            Ok(vec![
                Quote::new("x", "Austen", ["love"]),
                Quote::new("y", "Twain", ["love", "life"]),
                Quote::new("z", "Wilde", ["war"]),
            ])
        }
    }

    fn app() -> App<StaticCatalog> {
        App::new(StaticCatalog, &DisplaySettings::default(), Theme::Dark, None)
    }

    async fn run(app: &mut App<StaticCatalog>, line: &str) -> Result<Outcome, CommandError> {
        let outcome = app.execute(line.parse()?);
        while app.next_completion().await.is_some() {}
        outcome
    }

    #[tokio::test]
    async fn test_open_numbers_cards_on_current_page() {
        let mut app = app();
        run(&mut app, "books").await.unwrap();
        run(&mut app, "page 2").await.unwrap();
        run(&mut app, "open 1").await.unwrap();

        // Page 2 of 20-per-page starts at the 21st book.
        assert_eq!(
            app.browser().session().selection(),
            Selection::Book(ItemId::new(20))
        );
        assert_eq!(run(&mut app, "open 9").await, Err(CommandError::NoSuchCard(9)));
        assert_eq!(run(&mut app, "open 0").await, Err(CommandError::NoSuchCard(0)));
    }

    #[tokio::test]
    async fn test_page_out_of_range_is_refused() {
        let mut app = app();
        run(&mut app, "books").await.unwrap();

        let no_such = |page: usize| -> Result<Outcome, CommandError> {
            Err(CommandError::NoSuchPage { page, total_pages: 2 })
        };
        assert_eq!(run(&mut app, "page 0").await, no_such(0));
        assert_eq!(run(&mut app, "page 99").await, no_such(99));
        assert_eq!(
            run(&mut app, &format!("page {}", usize::MAX)).await,
            no_such(usize::MAX)
        );
        assert_eq!(app.browser().session().page(), 1);

        run(&mut app, "page 2").await.unwrap();
        run(&mut app, "next").await.unwrap();
        assert_eq!(app.browser().session().page(), 2);
        let pager = app.view().results.unwrap().pager;
        assert_eq!((pager.page, pager.total_pages), (2, 2));
    }

    #[tokio::test]
    async fn test_drain_picks_up_finished_fetches() {
        let mut app = app();
        app.execute(Command::Mode(Mode::Quotes)).unwrap();
        assert!(app.has_pending());

        let mut outcomes = app.drain_completions();
        while outcomes.is_empty() {
            tokio::task::yield_now().await;
            outcomes = app.drain_completions();
        }

        assert_eq!(
            outcomes,
            vec![FetchOutcome::Applied {
                dataset: Dataset::Quotes,
                count: 3,
            }]
        );
        assert!(!app.has_pending());
        assert!(app.drain_completions().is_empty());
        assert_eq!(app.view().results.unwrap().total_matches, 3);
    }

    #[tokio::test]
    async fn test_related_retargets_modal() {
        let mut app = app();
        run(&mut app, "quotes").await.unwrap();
        run(&mut app, "open 1").await.unwrap();
        run(&mut app, "related 1").await.unwrap();

        assert_eq!(
            app.browser().session().selection(),
            Selection::Quote(ItemId::new(1))
        );
        run(&mut app, "close").await.unwrap();
        assert_eq!(app.browser().session().selection(), Selection::None);
        assert!(run(&mut app, "related 1").await.is_err());
    }

    #[tokio::test]
    async fn test_category_chip_switches_to_books() {
        let mut app = app();
        run(&mut app, "quotes").await.unwrap();
        run(&mut app, "category Travel").await.unwrap();

        let session = app.browser().session();
        assert_eq!(session.mode(), Mode::Books);
        assert_eq!(session.query(), "Travel");
        assert_eq!(session.match_count(), 5);
    }

    #[tokio::test]
    async fn test_theme_toggle_persists_and_width_changes_viewport() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("preferences.toml"));
        let mut app = App::new(
            StaticCatalog,
            &DisplaySettings::default(),
            Theme::Dark,
            Some(store.clone()),
        );

        run(&mut app, "theme").await.unwrap();
        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(store.load().unwrap(), Some(Theme::Light));

        assert_eq!(app.viewport(), Viewport::Wide);
        run(&mut app, "width 360").await.unwrap();
        assert_eq!(app.viewport(), Viewport::Narrow);

        assert_eq!(run(&mut app, "quit").await, Ok(Outcome::Quit));
    }
}
