// src/pipeline/run.rs

//! Scrape-and-persist pipeline.
//!
//! A run is a linear pass: fetch page markup, reduce it to text, extract
//! ranking rows, then either append them to the tracked CSV or upload a
//! brand-new file. A fetch failure aborts before anything is written; a
//! zero-row extraction proceeds but is reported distinctly.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Config, Destination, RankingRow};
use crate::services::{ContentReducer, RankingExtractor, sheet};
use crate::storage::BlobStorage;
use crate::utils::{self, http};

/// Summary of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    /// Rows extracted from the page
    pub rows_extracted: usize,
    /// Human-readable destination description
    pub destination: String,
}

/// Run the full pipeline against the configured destination.
pub async fn run_scrape(
    config: &Config,
    storage: &dyn BlobStorage,
    client: &reqwest::Client,
) -> Result<RunSummary> {
    let rows = fetch_rows(config, client).await?;
    persist(&config.destination, storage, &rows, Utc::now()).await
}

/// Fetch the ranking page and extract its rows.
pub async fn fetch_rows(config: &Config, client: &reqwest::Client) -> Result<Vec<RankingRow>> {
    log::info!("Fetching {}", config.scrape.source_url);
    let html = http::fetch_text(client, &config.scrape.source_url).await?;

    let reducer = ContentReducer::new(&config.scrape.content_selectors)?;
    let text = reducer.reduce(&html);

    let rows = RankingExtractor::new().extract(&text);
    if rows.is_empty() {
        log::warn!(
            "Extracted 0 ranking rows from {} - the page format may have changed",
            config.scrape.source_url
        );
    } else {
        log::info!("Extracted {} ranking rows", rows.len());
    }
    Ok(rows)
}

/// Persist rows to the given destination.
pub async fn persist(
    destination: &Destination,
    storage: &dyn BlobStorage,
    rows: &[RankingRow],
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    match destination {
        Destination::AppendExisting { file_id } => {
            append_existing(storage, file_id, rows, now).await
        }
        Destination::CreateNew {
            filename_keyword,
            folder_id,
        } => create_new(storage, filename_keyword, folder_id.as_deref(), rows, now).await,
    }
}

/// Append timestamped rows to the tracked file, keeping its name.
async fn append_existing(
    storage: &dyn BlobStorage,
    file_id: &str,
    rows: &[RankingRow],
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    let mut records = match storage.download(file_id).await {
        Ok(Some(bytes)) => sheet::read_rows(&bytes),
        Ok(None) => {
            log::warn!("Existing file {file_id} not found. Starting from an empty record set.");
            Vec::new()
        }
        Err(e) => {
            log::warn!(
                "Failed to read existing file {file_id}: {e}. Starting from an empty record set."
            );
            Vec::new()
        }
    };

    if records.is_empty() {
        records.push(sheet::append_header());
    }

    let stamp = utils::capture_stamp(now);
    for row in rows {
        let mut record = Vec::with_capacity(RankingRow::FIELD_COUNT + 1);
        record.push(stamp.clone());
        record.extend(row.to_record());
        records.push(record);
    }

    let bytes = sheet::write_rows(&records)?;
    let name = storage.metadata_name(file_id).await?;
    storage.overwrite(file_id, bytes, &name).await?;

    log::info!("Appended {} rows to {name} ({file_id})", rows.len());
    Ok(RunSummary {
        rows_extracted: rows.len(),
        destination: format!("{name} ({file_id})"),
    })
}

/// Upload rows as a brand-new timestamped file.
async fn create_new(
    storage: &dyn BlobStorage,
    filename_keyword: &str,
    folder_id: Option<&str>,
    rows: &[RankingRow],
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    let mut records = Vec::with_capacity(rows.len() + 1);
    records.push(sheet::create_header());
    records.extend(rows.iter().map(RankingRow::to_record));

    let bytes = sheet::write_rows(&records)?;
    let name = format!("{filename_keyword}_{}.csv", utils::file_stamp(now));
    let id = storage.create(&name, bytes, folder_id).await?;

    log::info!("Uploaded {} rows as {name} ({id})", rows.len());
    Ok(RunSummary {
        rows_extracted: rows.len(),
        destination: format!("{name} ({id})"),
    })
}
