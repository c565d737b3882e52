//! # Scrapeview Terminal
//!
//! Line-oriented front end over the browse session.
//!
//! ## Module Organization
//! ```text
//! scrapeview_terminal/
//! ├── lib.rs          ◄─── You are here (startup & event loop)
//! ├── app.rs          ◄─── Browser + viewport width + theme
//! ├── commands.rs     ◄─── Input line → Command
//! ├── render.rs       ◄─── SessionView → text
//! └── error.rs        ◄─── CommandError shown to the user
//! ```
//!
//! ## Event Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   stdin line ─────────┐                   ┌──── fetch completion        │
//! │                       ▼                   ▼                             │
//! │                 ┌──────────────────────────────┐                        │
//! │                 │        tokio::select!        │                        │
//! │                 └──────────────┬───────────────┘                        │
//! │                                ▼                                        │
//! │                  App::execute / Browser applies                         │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                     render::Screen to stdout                            │
//! │                                                                         │
//! │   Logs go to stderr so they never interleave with the screen.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod commands;
pub mod error;
pub mod render;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use scrapeview_client::preferences::environment_theme;
use scrapeview_client::{CatalogSource, ClientConfig, HttpCatalog, ThemeStore};
use scrapeview_core::theme::resolve_theme;

use app::{App, Outcome};
use commands::Command;

/// Runs the terminal front end until `quit` or end of input.
///
/// ## Startup Sequence
/// 1. Initialize logging
/// 2. Load config (file, then `SCRAPEVIEW_*` overrides)
/// 3. Resolve the endpoint URLs
/// 4. Restore the theme
/// 5. Read commands
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("Starting Scrapeview");

    let config = ClientConfig::load_or_default(None);
    let catalog = HttpCatalog::new(&config.api)?;
    info!(books = %catalog.books_url(), quotes = %catalog.quotes_url(), "Catalog endpoints");

    let themes = match ThemeStore::at_default_location() {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("Theme will not be remembered: {}", e);
            None
        }
    };
    let theme = match &themes {
        Some(store) => store.restore(),
        None => resolve_theme(None, environment_theme()),
    };

    let mut app = App::new(catalog, &config.display, theme, themes);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    draw(&app);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>().and_then(|command| app.execute(command)) {
                    Ok(Outcome::Quit) => break,
                    Ok(Outcome::Help) => println!("{}", render::help()),
                    Ok(Outcome::Redraw) => redraw(&mut app),
                    Err(e) => {
                        debug!(code = e.code(), "Command rejected: {}", e);
                        println!("! {}", e);
                    }
                }
            }
            Some(outcome) = app.next_completion(), if app.has_pending() => {
                debug!(?outcome, "Fetch settled");
                redraw(&mut app);
            }
        }
    }

    info!("Bye");
    Ok(())
}

fn draw<S: CatalogSource>(app: &App<S>) {
    println!("\n{}", render::Screen::new(&app.view(), app.theme()));
}

/// Applies whatever else already finished, then draws once.
fn redraw<S: CatalogSource>(app: &mut App<S>) {
    for outcome in app.drain_completions() {
        debug!(?outcome, "Fetch settled");
    }
    draw(app);
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=scrapeview=trace` - Trace for scrapeview crates only
/// - Default: `info,scrapeview=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,scrapeview=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
