//! # Rating Normalizer
//!
//! Maps the heterogeneous rating values served by the backend to a star
//! count on the `0..=5` scale.
//!
//! ```text
//!   Number(3.6)  ──► round ──► clamp(0, 5) ──► 4
//!   Word(" Three ") ──► trim + lowercase ──► lexicon ──► 3
//!   Word("Seven") ──► not in lexicon ──► 0
//!   None / ""     ──► 0
//! ```

use crate::types::RatingValue;

/// Number of stars on the rating scale.
pub const MAX_STARS: u8 = 5;

const LEXICON: [(&str, u8); 5] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
];

/// Normalizes a rating to an integer star count in `0..=5`.
///
/// Never fails: unknown words, `NaN` and missing values all map to 0.
///
/// ## Example
/// ```rust
/// use scrapeview_core::rating::normalize_rating;
/// use scrapeview_core::RatingValue;
///
/// assert_eq!(normalize_rating(Some(&RatingValue::Word("Three".into()))), 3);
/// assert_eq!(normalize_rating(Some(&RatingValue::Number(7.0))), 5);
/// assert_eq!(normalize_rating(None), 0);
/// ```
pub fn normalize_rating(value: Option<&RatingValue>) -> u8 {
    match value {
        None => 0,
        Some(RatingValue::Number(n)) => normalize_number(*n),
        Some(RatingValue::Word(word)) => normalize_word(word),
    }
}

fn normalize_number(n: f64) -> u8 {
    if n.is_nan() {
        return 0;
    }
    n.round().clamp(0.0, MAX_STARS as f64) as u8
}

fn normalize_word(word: &str) -> u8 {
    let token = word.trim().to_lowercase();
    LEXICON
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, stars)| *stars)
        .unwrap_or(0)
}

/// Renders a star bar such as `★★★☆☆`.
pub fn star_bar(stars: u8) -> String {
    let filled = stars.min(MAX_STARS) as usize;
    let empty = MAX_STARS as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// Accessible label for a star count.
pub fn rating_label(stars: u8) -> String {
    format!("Rating: {} out of {}", stars.min(MAX_STARS), MAX_STARS)
}
