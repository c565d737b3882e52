//! # Domain Types
//!
//! Wire types served by the scraping backend, plus the identifiers the
//! query engine uses to talk about them.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │      Quote      │   │     ItemId      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  title          │   │  text           │   │  index into the │       │
//! │  │  rating (word/  │   │  author         │   │  loaded, frozen │       │
//! │  │    number)      │   │  tags[]         │   │  collection     │       │
//! │  │  price (text/   │   └─────────────────┘   └─────────────────┘       │
//! │  │    number)      │                                                   │
//! │  │  category?      │   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ...details?    │   │      Mode       │   │    Dataset      │       │
//! │  └─────────────────┘   │  None/Books/    │   │  Books/Quotes   │       │
//! │                        │  Quotes         │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Collections are loaded at most once and never mutated afterwards, so the
//! position of an item is a stable identifier. Selection and "exclude self"
//! compare [`ItemId`]s, never contents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Item Identity
// =============================================================================

/// Position of an item inside its loaded collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(usize);

impl ItemId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        ItemId(index)
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item borrowed from a collection together with its stable id.
#[derive(Debug)]
pub struct Entry<'a, T> {
    pub id: ItemId,
    pub item: &'a T,
}

// Manual impls: deriving would demand `T: Clone`/`T: PartialEq`.
impl<T> Clone for Entry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Entry<'_, T> {}

impl<T> PartialEq for Entry<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.item, other.item)
    }
}

/// Pairs every item of a collection with its [`ItemId`].
pub fn entries<T>(items: &[T]) -> impl Iterator<Item = Entry<'_, T>> + '_ {
    items.iter().enumerate().map(|(index, item)| Entry {
        id: ItemId(index),
        item,
    })
}

// =============================================================================
// Dataset & Mode
// =============================================================================

/// One of the two scraped datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Dataset {
    Books,
    Quotes,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Books => write!(f, "books"),
            Dataset::Quotes => write!(f, "quotes"),
        }
    }
}

/// Which dataset is currently being browsed, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Mode {
    /// Nothing selected: the search box is inert and no grid renders.
    #[default]
    None,
    Books,
    Quotes,
}

impl Mode {
    /// The dataset this mode browses.
    pub const fn dataset(&self) -> Option<Dataset> {
        match self {
            Mode::None => None,
            Mode::Books => Some(Dataset::Books),
            Mode::Quotes => Some(Dataset::Quotes),
        }
    }

    pub const fn is_active(&self) -> bool {
        !matches!(self, Mode::None)
    }
}

impl From<Dataset> for Mode {
    fn from(dataset: Dataset) -> Self {
        match dataset {
            Dataset::Books => Mode::Books,
            Dataset::Quotes => Mode::Quotes,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::None => write!(f, "none"),
            Mode::Books => write!(f, "books"),
            Mode::Quotes => write!(f, "quotes"),
        }
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(Mode::None),
            "books" | "book" => Ok(Mode::Books),
            "quotes" | "quote" => Ok(Mode::Quotes),
            other => Err(CoreError::UnknownMode(other.to_string())),
        }
    }
}

// =============================================================================
// Heterogeneous Scalars
// =============================================================================

/// A rating as the backend happens to send it.
///
/// The scraper stores the star class name ("Three"), but numeric ratings
/// are accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum RatingValue {
    Number(f64),
    Word(String),
}

/// A money amount that is either numeric (`51.77`) or preformatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl Price {
    /// Whether the amount counts as present (non-zero number, non-empty text).
    pub fn is_present(&self) -> bool {
        match self {
            Price::Amount(value) => *value != 0.0 && !value.is_nan(),
            Price::Text(text) => !text.is_empty(),
        }
    }

    /// Raw amount without currency symbol.
    pub fn amount_text(&self) -> String {
        match self {
            Price::Amount(value) => value.to_string(),
            Price::Text(text) => text.clone(),
        }
    }
}

/// Numeric amounts render with a pound sign; text renders verbatim.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(value) => write!(f, "£{}", value),
            Price::Text(text) => write!(f, "{}", text),
        }
    }
}

// =============================================================================
// Book
// =============================================================================

/// A scraped book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Book {
    /// Backend row id. Not used for identity.
    #[serde(default)]
    pub id: Option<i64>,

    pub title: String,

    #[serde(default)]
    pub image_url: String,

    /// Word ("Three") or number.
    #[serde(default)]
    pub rating: Option<RatingValue>,

    #[serde(default)]
    pub price: Option<Price>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub product_url: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub availability: Option<String>,

    #[serde(default)]
    pub upc: Option<String>,

    #[serde(default)]
    pub product_type: Option<String>,

    #[serde(default)]
    pub price_excl_tax: Option<Price>,

    #[serde(default)]
    pub price_incl_tax: Option<Price>,

    #[serde(default)]
    pub tax: Option<Price>,

    #[serde(default)]
    pub number_of_reviews: Option<i64>,
}

impl Book {
    /// Creates a book with only a title; every other field is absent.
    pub fn titled(title: impl Into<String>) -> Self {
        Book {
            id: None,
            title: title.into(),
            image_url: String::new(),
            rating: None,
            price: None,
            category: None,
            product_url: None,
            description: None,
            availability: None,
            upc: None,
            product_type: None,
            price_excl_tax: None,
            price_incl_tax: None,
            tax: None,
            number_of_reviews: None,
        }
    }

    /// Builder-style category setter (mostly for fixtures).
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Star count on the 0..=5 scale.
    pub fn stars(&self) -> u8 {
        crate::rating::normalize_rating(self.rating.as_ref())
    }

    /// Price as shown on a grid card.
    pub fn card_price(&self) -> String {
        self.price.as_ref().map(Price::to_string).unwrap_or_default()
    }

    /// Price as shown in the detail header: tax-inclusive when known.
    pub fn headline_price(&self) -> String {
        match &self.price_incl_tax {
            Some(incl) if incl.is_present() => format!("£{}", incl.amount_text()),
            _ => self.card_price(),
        }
    }

    /// "Excl. Tax: £x | Incl. Tax: £y", or `None` when neither is known.
    pub fn price_breakdown(&self) -> Option<String> {
        let excl = self.price_excl_tax.as_ref().filter(|p| p.is_present());
        let incl = self.price_incl_tax.as_ref().filter(|p| p.is_present());
        if excl.is_none() && incl.is_none() {
            return None;
        }

        let parts: Vec<String> = [("Excl. Tax", excl), ("Incl. Tax", incl)]
            .into_iter()
            .filter_map(|(label, price)| price.map(|p| format!("{}: £{}", label, p.amount_text())))
            .collect();
        Some(parts.join(" | "))
    }
}

// =============================================================================
// Quote
// =============================================================================

/// A scraped quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Quote {
    #[serde(default)]
    pub id: Option<i64>,

    pub text: String,

    pub author: String,

    /// Ordered as scraped.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Quote {
    pub fn new<S: Into<String>>(
        text: impl Into<String>,
        author: impl Into<String>,
        tags: impl IntoIterator<Item = S>,
    ) -> Self {
        Quote {
            id: None,
            text: text.into(),
            author: author.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
