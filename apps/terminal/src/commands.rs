//! # Commands
//!
//! One command per input line. The first word picks the command, the rest
//! of the line is its argument.
//!
//! ## Command Reference
//! ```text
//! ┌───────────────────┬──────────────────────────────────────────────────┐
//! │ books | quotes    │ Toggle browsing of a dataset                     │
//! │ mode <m>          │ Same, by name (books, quotes, none)              │
//! │ search <text>     │ Filter the current dataset (text kept verbatim)  │
//! │ clear             │ Empty the search box                             │
//! │ page <n>          │ Jump to page n                                   │
//! │ next | prev       │ Step one page                                    │
//! │ open <n>          │ Open the n-th card of the current page           │
//! │ related <n>       │ Open the n-th related item of the open modal     │
//! │ close             │ Close the modal                                  │
//! │ tag <tag>         │ Browse quotes with this tag                      │
//! │ category <cat>    │ Browse books in this category                    │
//! │ theme [l|d]       │ Toggle (or set) light/dark                       │
//! │ width <px>        │ Pretend the window is this wide                  │
//! │ help | quit       │                                                  │
//! └───────────────────┴──────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use scrapeview_core::{Mode, Theme};

use crate::error::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mode(Mode),
    Search(String),
    Clear,
    Page(usize),
    Next,
    Prev,
    Open(usize),
    Related(usize),
    Close,
    Tag(String),
    Category(String),
    Theme(Option<Theme>),
    Width(u32),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "books" => Command::Mode(Mode::Books),
            "quotes" => Command::Mode(Mode::Quotes),
            "mode" => Command::Mode(required(rest, "mode", "books, quotes or none")?.parse()?),
            "search" | "s" => Command::Search(rest.to_string()),
            "clear" => Command::Clear,
            "page" | "p" => Command::Page(number(required(rest, "page", "a page number")?)?),
            "next" | "n" => Command::Next,
            "prev" => Command::Prev,
            "open" | "o" => Command::Open(number(required(rest, "open", "a card number")?)?),
            "related" | "r" => {
                Command::Related(number(required(rest, "related", "an item number")?)?)
            }
            "close" => Command::Close,
            "tag" => Command::Tag(required(rest, "tag", "a tag")?.to_string()),
            "category" => Command::Category(required(rest, "category", "a category")?.to_string()),
            "theme" => match rest.trim() {
                "" => Command::Theme(None),
                name => Command::Theme(Some(name.parse()?)),
            },
            "width" => Command::Width(number(required(rest, "width", "a width in pixels")?)?),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, CommandError> {
    let value = rest.trim();
    if value.is_empty() {
        Err(CommandError::MissingArgument { command, expected })
    } else {
        Ok(value)
    }
}

fn number<N: FromStr>(text: &str) -> Result<N, CommandError> {
    text.parse()
        .map_err(|_| CommandError::InvalidNumber(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrapeview_core::CoreError;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("books").unwrap(), Command::Mode(Mode::Books));
        assert_eq!(parse("QUOTES").unwrap(), Command::Mode(Mode::Quotes));
        assert_eq!(parse("mode off").unwrap(), Command::Mode(Mode::None));
        assert_eq!(parse("next").unwrap(), Command::Next);
        assert_eq!(parse("close").unwrap(), Command::Close);
        assert_eq!(parse("q").unwrap(), Command::Quit);
    }

    #[test]
    fn test_search_text_is_kept_verbatim() {
        assert_eq!(
            parse("search  Love  ").unwrap(),
            Command::Search(" Love  ".to_string())
        );
        assert_eq!(parse("search").unwrap(), Command::Search(String::new()));
    }

    #[test]
    fn test_numeric_arguments() {
        assert_eq!(parse("page 4").unwrap(), Command::Page(4));
        assert_eq!(parse("open 2").unwrap(), Command::Open(2));
        assert_eq!(parse("width 375").unwrap(), Command::Width(375));
        assert_eq!(
            parse("page four").unwrap_err(),
            CommandError::InvalidNumber("four".to_string())
        );
        assert!(matches!(
            parse("open").unwrap_err(),
            CommandError::MissingArgument { command: "open", .. }
        ));
    }

    #[test]
    fn test_chip_commands_take_the_rest_of_the_line() {
        assert_eq!(
            parse("category Science Fiction").unwrap(),
            Command::Category("Science Fiction".to_string())
        );
        assert_eq!(parse("tag love").unwrap(), Command::Tag("love".to_string()));
        assert!(parse("tag   ").is_err());
    }

    #[test]
    fn test_theme_and_unknown_tokens() {
        assert_eq!(parse("theme").unwrap(), Command::Theme(None));
        assert_eq!(parse("theme light").unwrap(), Command::Theme(Some(Theme::Light)));
        assert!(matches!(
            parse("theme sepia").unwrap_err(),
            CommandError::Core(CoreError::UnknownTheme(_))
        ));
        assert!(matches!(
            parse("mode movies").unwrap_err(),
            CommandError::Core(CoreError::UnknownMode(_))
        ));
        assert_eq!(
            parse("dance").unwrap_err(),
            CommandError::UnknownCommand("dance".to_string())
        );
    }
}
