//! Pipeline entry points for scraper operations.
//!
//! - `run_scrape`: fetch the page, extract rows, persist them
//! - `persist`: write an already-extracted row set to a destination

pub mod run;

pub use run::{RunSummary, fetch_rows, persist, run_scrape};
