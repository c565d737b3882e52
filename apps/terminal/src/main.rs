//! # Scrapeview Entry Point
//!
//! The actual setup is in lib.rs so it can be tested.

#[tokio::main]
async fn main() {
    if let Err(e) = scrapeview_terminal::run().await {
        eprintln!("scrapeview: {}", e);
        std::process::exit(1);
    }
}
