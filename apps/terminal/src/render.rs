//! # Rendering
//!
//! Turns a [`SessionView`] into plain text. [`Screen`] writes into any
//! formatter; the caller decides where it goes.
//!
//! ## Screen Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Scrapeview   [Books]  Quotes                              theme: dark  │
//! │  Search: poetry                                                         │
//! │  50 results                                                             │
//! │                                                                         │
//! │   1. A Light in the Attic  ★★★☆☆  £51.77  #Poetry                       │
//! │   2. ...                                                                │
//! │                                                                         │
//! │  ‹ Prev   1 … 4 [5] 6 … 12   Next ›                                     │
//! │                                                                         │
//! │  ┌ modal (when open) ─────────────────────────────────────────────     │
//! │  │ title, price, stars, details, numbered related items               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::{self, Display, Formatter};

use scrapeview_core::rating::star_bar;
use scrapeview_core::session::{Cards, ModalView, Pager, ResultsView};
use scrapeview_core::{Book, Entry, Mode, PageMarker, Quote, SessionView, Theme};

/// Full screen for the current state, written straight into any formatter.
pub struct Screen<'v, 'a> {
    view: &'v SessionView<'a>,
    theme: Theme,
}

impl<'v, 'a> Screen<'v, 'a> {
    pub fn new(view: &'v SessionView<'a>, theme: Theme) -> Self {
        Screen { view, theme }
    }
}

impl Display for Screen<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", header(self.view.mode, self.theme))?;
        writeln!(f, "{}", search_line(self.view))?;

        match &self.view.results {
            None => writeln!(f, "\nSelect Books or Quotes to start searching.")?,
            Some(results) => write_results(f, results)?,
        }

        if let Some(modal) = &self.view.modal {
            writeln!(f)?;
            write_modal(f, modal)?;
        }
        Ok(())
    }
}

fn header(mode: Mode, theme: Theme) -> String {
    let button = |label: &str, active: bool| {
        if active {
            format!("[{}]", label)
        } else {
            format!(" {} ", label)
        }
    };
    format!(
        "Scrapeview  {} {}    theme: {}",
        button("Books", mode == Mode::Books),
        button("Quotes", mode == Mode::Quotes),
        theme
    )
}

fn search_line(view: &SessionView<'_>) -> String {
    if !view.search_enabled() {
        return format!("Search (disabled): {}", view.placeholder);
    }
    if view.query.is_empty() {
        format!("Search: ({})", view.placeholder)
    } else {
        format!("Search: {}", view.query)
    }
}

fn write_results(f: &mut Formatter<'_>, results: &ResultsView<'_>) -> fmt::Result {
    writeln!(f, "{} results\n", results.total_matches)?;

    if results.cards.is_empty() {
        writeln!(f, "  {}", results.cards.empty_message())?;
    } else {
        match &results.cards {
            Cards::Books(cards) => {
                for (n, entry) in cards.iter().enumerate() {
                    writeln!(f, "{}", book_card(n + 1, entry.item))?;
                }
            }
            Cards::Quotes(cards) => {
                for (n, entry) in cards.iter().enumerate() {
                    writeln!(f, "{}", quote_card(n + 1, entry.item))?;
                }
            }
        }
    }

    writeln!(f, "\n{}", pager_line(&results.pager))
}

/// One grid card for a book.
pub fn book_card(n: usize, book: &Book) -> String {
    let mut line = format!("{:>3}. {}  {}", n, book.title, star_bar(book.stars()));
    let price = book.card_price();
    if !price.is_empty() {
        line.push_str("  ");
        line.push_str(&price);
    }
    if let Some(category) = &book.category {
        line.push_str("  #");
        line.push_str(category);
    }
    line
}

/// One grid card for a quote.
pub fn quote_card(n: usize, quote: &Quote) -> String {
    let mut line = format!("{:>3}. “{}”  - {}", n, quote.text, quote.author);
    if !quote.tags.is_empty() {
        line.push_str("  ");
        line.push_str(&hashtags(&quote.tags));
    }
    line
}

fn hashtags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prev, the page strip with the current page bracketed, then Next.
///
/// Disabled buttons are drawn in parentheses.
pub fn pager_line(pager: &Pager) -> String {
    let prev = if pager.nav.has_prev() { "‹ Prev" } else { "(‹ Prev)" };
    let next = if pager.nav.has_next() { "Next ›" } else { "(Next ›)" };

    let strip: Vec<String> = pager
        .strip
        .iter()
        .map(|marker| match marker {
            PageMarker::Ellipsis => "…".to_string(),
            PageMarker::Page(n) if *n == pager.page => format!("[{}]", n),
            PageMarker::Page(n) => n.to_string(),
        })
        .collect();

    format!("{}   {}   {}", prev, strip.join(" "), next)
}

fn write_modal(f: &mut Formatter<'_>, modal: &ModalView<'_>) -> fmt::Result {
    match modal {
        ModalView::Book { focal, related } => {
            let book = focal.item;
            writeln!(f, "┌ {}", book.title)?;

            write!(f, "│ {}", book.headline_price())?;
            if let Some(availability) = &book.availability {
                write!(f, "  {}", availability)?;
            }
            writeln!(f)?;
            writeln!(f, "│ {}", star_bar(book.stars()))?;
            if let Some(category) = &book.category {
                writeln!(f, "│ #{}", category)?;
            }
            if let Some(description) = &book.description {
                writeln!(f, "│\n│ Description\n│ {}", description)?;
            }
            if let Some(upc) = &book.upc {
                writeln!(f, "│ UPC: {}", upc)?;
            }
            if let Some(product_type) = &book.product_type {
                writeln!(f, "│ Product Type: {}", product_type)?;
            }
            if let Some(prices) = book.price_breakdown() {
                writeln!(f, "│ Prices: {}", prices)?;
            }
            if let Some(tax) = book.tax.as_ref().filter(|t| t.is_present()) {
                writeln!(f, "│ Tax: £{}", tax.amount_text())?;
            }
            if let Some(reviews) = book.number_of_reviews {
                writeln!(f, "│ Reviews: {}", reviews)?;
            }

            writeln!(f, "│\n│ Related Books")?;
            write_related(f, related, |b: &Book| b.title.clone())?;
        }
        ModalView::Quote { focal, related } => {
            let quote = focal.item;
            writeln!(f, "┌ “{}”", quote.text)?;
            writeln!(f, "│ - {}", quote.author)?;
            if !quote.tags.is_empty() {
                writeln!(f, "│ {}", hashtags(&quote.tags))?;
            }

            writeln!(f, "│\n│ Related Quotes")?;
            write_related(f, related, |q: &Quote| format!("“{}” - {}", q.text, q.author))?;
        }
    }
    writeln!(f, "└ (close | related <n>)")
}

fn write_related<T>(
    f: &mut Formatter<'_>,
    related: &[Entry<'_, T>],
    label: impl Fn(&T) -> String,
) -> fmt::Result {
    if related.is_empty() {
        writeln!(f, "│   (none)")?;
    }
    for (n, entry) in related.iter().enumerate() {
        writeln!(f, "│ {:>3}. {}", n + 1, label(entry.item))?;
    }
    Ok(())
}

pub fn help() -> &'static str {
    "\
Commands:
  books | quotes      toggle browsing of a dataset
  mode <m>            books, quotes or none
  search <text>       filter the current dataset
  clear               empty the search box
  page <n>            jump to page n
  next | prev         step one page
  open <n>            open the n-th card on this page
  related <n>         open the n-th related item
  close               close the open item
  tag <tag>           quotes with this tag
  category <cat>      books in this category
  theme [light|dark]  toggle or set the theme
  width <px>          pretend the window is this wide
  help | quit"
}
