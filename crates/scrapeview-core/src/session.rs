//! # Session State Controller
//!
//! The interaction state machine: active mode, query, page, open modal and
//! the two loaded collections. Every transition goes through
//! [`Session::dispatch`], whose `match` is the whole transition table.
//!
//! ## Transition Table
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────────┐
//! │ Action               │ Rule                                             │
//! ├──────────────────────┼──────────────────────────────────────────────────┤
//! │ SetMode(m)           │ m == mode ? none : m;  page = 1;                 │
//! │                      │ entering an unloaded dataset ⇒ Effect::Fetch     │
//! │ SetQuery(q)          │ query = q (verbatim);  page = 1                  │
//! │ SetPage(n)           │ page = n (callers only offer valid targets)      │
//! │ PrevPage / NextPage  │ page ∓ 1 clamped to [1, total_pages]             │
//! │ SelectBook/Quote(id) │ open or retarget the modal                       │
//! │ ClearSelection       │ close the modal                                  │
//! │ TagClick(t)          │ mode = quotes (no toggle); query = t; page = 1   │
//! │ CategoryClick(c)     │ mode = books  (no toggle); query = c; page = 1   │
//! │ Loaded{req, payload} │ apply only if payload's dataset is the current   │
//! │                      │ mode's and not loaded yet; else Discarded        │
//! └──────────────────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! ## Fetch Lifecycle
//! The session never performs I/O. Entering a mode whose dataset is not
//! loaded returns [`Effect::Fetch`]; whoever owns the session runs the
//! request and feeds the result back as [`Action::Loaded`]. A response that
//! arrives after the user switched to another mode is discarded, so a slow
//! books request can never clobber a newer quotes selection.

use crate::error::{CoreError, CoreResult};
use crate::filter::{filter_items, Searchable};
use crate::pagination::{page_index_display, paginate, PageMarker, PageNav, Viewport};
use crate::related::{related_books, related_quotes};
use crate::types::{Book, Dataset, Entry, ItemId, Mode, Quote};
use crate::{BOOKS_PAGE_SIZE, QUOTES_PAGE_SIZE, RELATED_BOOKS_LIMIT, RELATED_QUOTES_LIMIT};

// =============================================================================
// Actions & Effects
// =============================================================================

/// A request for one dataset, handed out by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub dataset: Dataset,

    /// Monotonic per session; only used to correlate logs.
    pub ticket: u64,
}

/// A fetched collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Books(Vec<Book>),
    Quotes(Vec<Quote>),
}

impl Payload {
    pub fn dataset(&self) -> Dataset {
        match self {
            Payload::Books(_) => Dataset::Books,
            Payload::Quotes(_) => Dataset::Quotes,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Payload::Books(books) => books.len(),
            Payload::Quotes(quotes) => quotes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the user (or the fetch plumbing) can do to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetMode(Mode),
    SetQuery(String),
    SetPage(usize),
    PrevPage,
    NextPage,
    SelectBook(ItemId),
    SelectQuote(ItemId),
    ClearSelection,
    TagClick(String),
    CategoryClick(String),
    Loaded {
        request: FetchRequest,
        payload: Payload,
    },
}

/// What the owner of the session has to do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// State changed (or not); nothing else to do.
    Nothing,

    /// Start this request; feed the outcome back as [`Action::Loaded`].
    Fetch(FetchRequest),

    /// A payload was installed.
    Applied { dataset: Dataset, count: usize },

    /// A payload was ignored.
    Discarded(DiscardReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// The user left the mode the request was made for.
    Stale { dataset: Dataset, current: Mode },

    /// An earlier response already filled this dataset.
    AlreadyLoaded(Dataset),

    /// The payload is not for the dataset that was requested.
    Mismatched { requested: Dataset, received: Dataset },
}

/// Which detail modal is open. One at a time by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Book(ItemId),
    Quote(ItemId),
}

// =============================================================================
// Session
// =============================================================================

#[derive(Debug)]
struct Collection<T> {
    items: Vec<T>,
    loaded: bool,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection {
            items: Vec::new(),
            loaded: false,
        }
    }
}

/// Page sizes per dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizes {
    pub books: usize,
    pub quotes: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        PageSizes {
            books: BOOKS_PAGE_SIZE,
            quotes: QUOTES_PAGE_SIZE,
        }
    }
}

impl PageSizes {
    pub fn for_dataset(&self, dataset: Dataset) -> usize {
        match dataset {
            Dataset::Books => self.books,
            Dataset::Quotes => self.quotes,
        }
    }
}

/// The browse session.
///
/// ## Invariants
/// - Changing `mode` or `query` resets `page` to 1
/// - At most one modal is open ([`Selection`])
/// - Each dataset is installed at most once and never mutated afterwards,
///   which is what makes [`ItemId`] stable
#[derive(Debug)]
pub struct Session {
    mode: Mode,
    query: String,
    page: usize,
    selection: Selection,
    books: Collection<Book>,
    quotes: Collection<Quote>,
    page_sizes: PageSizes,
    next_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session: mode none, empty query, page 1, nothing loaded.
    pub fn new() -> Self {
        Self::with_page_sizes(PageSizes::default())
    }

    pub fn with_page_sizes(page_sizes: PageSizes) -> Self {
        Session {
            mode: Mode::None,
            query: String::new(),
            page: 1,
            selection: Selection::None,
            books: Collection::default(),
            quotes: Collection::default(),
            page_sizes,
            next_ticket: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn page_sizes(&self) -> PageSizes {
        self.page_sizes
    }

    pub fn books(&self) -> &[Book] {
        &self.books.items
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes.items
    }

    pub fn is_loaded(&self, dataset: Dataset) -> bool {
        match dataset {
            Dataset::Books => self.books.loaded,
            Dataset::Quotes => self.quotes.loaded,
        }
    }

    /// Number of items matching the query in the current mode.
    pub fn match_count(&self) -> usize {
        match self.mode {
            Mode::None => 0,
            Mode::Books => filter_items(&self.books.items, &self.query).len(),
            Mode::Quotes => filter_items(&self.quotes.items, &self.query).len(),
        }
    }

    /// Pages of the current filtered view (1 when browsing is off).
    pub fn total_pages(&self) -> usize {
        match self.mode.dataset() {
            None => 1,
            Some(dataset) => crate::pagination::total_pages(
                self.match_count(),
                self.page_sizes.for_dataset(dataset),
            ),
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Applies one action. This `match` is the transition table.
    ///
    /// Only selections can fail, when they name an item that is not in the
    /// loaded collection; the session is left untouched in that case.
    pub fn dispatch(&mut self, action: Action) -> CoreResult<Effect> {
        let effect = match action {
            Action::SetMode(mode) => self.set_mode(mode),
            Action::SetQuery(query) => {
                self.set_query(query);
                Effect::Nothing
            }
            Action::SetPage(page) => {
                self.set_page(page);
                Effect::Nothing
            }
            Action::PrevPage => {
                self.page = PageNav::new(self.page, self.total_pages()).prev();
                Effect::Nothing
            }
            Action::NextPage => {
                self.page = PageNav::new(self.page, self.total_pages()).next();
                Effect::Nothing
            }
            Action::SelectBook(id) => {
                self.ensure_exists(Dataset::Books, id)?;
                self.selection = Selection::Book(id);
                Effect::Nothing
            }
            Action::SelectQuote(id) => {
                self.ensure_exists(Dataset::Quotes, id)?;
                self.selection = Selection::Quote(id);
                Effect::Nothing
            }
            Action::ClearSelection => {
                self.clear_selection();
                Effect::Nothing
            }
            Action::TagClick(tag) => self.tag_click(tag),
            Action::CategoryClick(category) => self.category_click(category),
            Action::Loaded { request, payload } => self.install(request, payload),
        };

        Ok(effect)
    }

    /// Mode button: toggles off when `mode` is already active.
    pub fn set_mode(&mut self, mode: Mode) -> Effect {
        self.enter_mode(if mode == self.mode { Mode::None } else { mode })
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn select_book(&mut self, id: ItemId) -> CoreResult<()> {
        self.dispatch(Action::SelectBook(id)).map(|_| ())
    }

    pub fn select_quote(&mut self, id: ItemId) -> CoreResult<()> {
        self.dispatch(Action::SelectQuote(id)).map(|_| ())
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    /// Tag chip: jump to quotes filtered by the tag, as clicked.
    pub fn tag_click(&mut self, tag: impl Into<String>) -> Effect {
        let effect = self.enter_mode(Mode::Quotes);
        self.query = tag.into();
        effect
    }

    /// Category chip: jump to books filtered by the category, as clicked.
    pub fn category_click(&mut self, category: impl Into<String>) -> Effect {
        let effect = self.enter_mode(Mode::Books);
        self.query = category.into();
        effect
    }

    /// Moves to `target` and resets the page.
    ///
    /// A fetch is requested only on an actual transition into a mode whose
    /// dataset is still missing; staying in the same mode never refetches.
    fn enter_mode(&mut self, target: Mode) -> Effect {
        let previous = self.mode;
        self.mode = target;
        self.page = 1;

        match target.dataset() {
            Some(dataset) if target != previous && !self.is_loaded(dataset) => {
                Effect::Fetch(self.issue(dataset))
            }
            _ => Effect::Nothing,
        }
    }

    fn issue(&mut self, dataset: Dataset) -> FetchRequest {
        self.next_ticket += 1;
        FetchRequest {
            dataset,
            ticket: self.next_ticket,
        }
    }

    fn install(&mut self, request: FetchRequest, payload: Payload) -> Effect {
        let dataset = payload.dataset();

        if dataset != request.dataset {
            return Effect::Discarded(DiscardReason::Mismatched {
                requested: request.dataset,
                received: dataset,
            });
        }
        if self.mode.dataset() != Some(dataset) {
            return Effect::Discarded(DiscardReason::Stale {
                dataset,
                current: self.mode,
            });
        }
        if self.is_loaded(dataset) {
            return Effect::Discarded(DiscardReason::AlreadyLoaded(dataset));
        }

        let count = payload.len();
        match payload {
            Payload::Books(items) => self.books = Collection { items, loaded: true },
            Payload::Quotes(items) => self.quotes = Collection { items, loaded: true },
        }
        self.page = 1;

        Effect::Applied { dataset, count }
    }

    fn ensure_exists(&self, dataset: Dataset, id: ItemId) -> CoreResult<()> {
        let len = match dataset {
            Dataset::Books => self.books.items.len(),
            Dataset::Quotes => self.quotes.items.len(),
        };
        if id.index() < len {
            Ok(())
        } else {
            Err(CoreError::ItemNotFound { dataset, id })
        }
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Composes filter → paginate → page strip → related for the current
    /// state. Recomputed on every call; nothing is cached.
    pub fn view(&self, viewport: Viewport) -> SessionView<'_> {
        let results = match self.mode {
            Mode::None => None,
            Mode::Books => Some(self.results(&self.books.items, viewport, Cards::Books)),
            Mode::Quotes => Some(self.results(&self.quotes.items, viewport, Cards::Quotes)),
        };

        SessionView {
            mode: self.mode,
            query: &self.query,
            placeholder: placeholder(self.mode),
            results,
            modal: self.modal(),
        }
    }

    fn results<'a, T: Searchable>(
        &'a self,
        items: &'a [T],
        viewport: Viewport,
        wrap: fn(Vec<Entry<'a, T>>) -> Cards<'a>,
    ) -> ResultsView<'a> {
        let page_size = match self.mode.dataset() {
            Some(dataset) => self.page_sizes.for_dataset(dataset),
            None => 1,
        };
        let matches = filter_items(items, &self.query);
        let slice = paginate(&matches, self.page, page_size);

        ResultsView {
            total_matches: matches.len(),
            cards: wrap(slice.items.to_vec()),
            pager: Pager {
                page: self.page,
                total_pages: slice.total_pages,
                strip: page_index_display(self.page, slice.total_pages, viewport.window_size()),
                nav: PageNav::new(self.page, slice.total_pages),
            },
        }
    }

    fn modal(&self) -> Option<ModalView<'_>> {
        match self.selection {
            Selection::None => None,
            Selection::Book(id) => self.books.items.get(id.index()).map(|item| ModalView::Book {
                focal: Entry { id, item },
                related: related_books(id, &self.books.items, RELATED_BOOKS_LIMIT),
            }),
            Selection::Quote(id) => self.quotes.items.get(id.index()).map(|item| ModalView::Quote {
                focal: Entry { id, item },
                related: related_quotes(id, &self.quotes.items, RELATED_QUOTES_LIMIT),
            }),
        }
    }
}

/// Search box hint per mode.
pub fn placeholder(mode: Mode) -> &'static str {
    match mode {
        Mode::Books => "Try searching for a book title or category",
        Mode::Quotes => "Try searching a quote, author or a tag",
        Mode::None => "Select Books or Quotes to start searching",
    }
}

// =============================================================================
// View Types
// =============================================================================

/// Everything a front end needs to draw the current state.
#[derive(Debug)]
pub struct SessionView<'a> {
    pub mode: Mode,
    pub query: &'a str,
    pub placeholder: &'static str,

    /// `None` when browsing is off: no grid, no pager, no result count.
    pub results: Option<ResultsView<'a>>,

    pub modal: Option<ModalView<'a>>,
}

impl SessionView<'_> {
    /// The search box is disabled while no mode is active.
    pub fn search_enabled(&self) -> bool {
        self.mode.is_active()
    }
}

#[derive(Debug)]
pub struct ResultsView<'a> {
    pub total_matches: usize,
    pub cards: Cards<'a>,
    pub pager: Pager,
}

/// The cards on the current page.
#[derive(Debug)]
pub enum Cards<'a> {
    Books(Vec<Entry<'a, Book>>),
    Quotes(Vec<Entry<'a, Quote>>),
}

impl Cards<'_> {
    pub fn len(&self) -> usize {
        match self {
            Cards::Books(cards) => cards.len(),
            Cards::Quotes(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Message shown instead of an empty grid.
    pub fn empty_message(&self) -> &'static str {
        match self {
            Cards::Books(_) => "No books found. Try a different keyword.",
            Cards::Quotes(_) => "No quotes found. Try a different keyword.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    pub page: usize,
    pub total_pages: usize,
    pub strip: Vec<PageMarker>,
    pub nav: PageNav,
}

/// The open detail modal with its related strip.
#[derive(Debug)]
pub enum ModalView<'a> {
    Book {
        focal: Entry<'a, Book>,
        related: Vec<Entry<'a, Book>>,
    },
    Quote {
        focal: Entry<'a, Quote>,
        related: Vec<Entry<'a, Quote>>,
    },
}

// =============================================================================
// Unit Tests
// =============================================================================
