//! Batch scraping pipeline: URLs → fetch → extract → classify → harvest →
//! (optional) profile enrichment → records.
//!
//! Each input URL yields exactly one [`JobRecord`] — fully populated, or an
//! error stub when the primary fetch fails. URLs are processed with bounded
//! concurrency; output order is reconstructed by input index, never by
//! completion order. No state is shared between jobs.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, instrument, warn};
use url::Url;

use joblens_scraper::{PageFetcher, extract_fields, harvest, is_high_trust};
use joblens_shared::{JobRecord, Result, ScrapeConfig};

use crate::enrich::enrich_contacts;

// ---------------------------------------------------------------------------
// BatchConfig
// ---------------------------------------------------------------------------

/// Configuration for one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Listing URLs to scrape, in output order.
    pub urls: Vec<String>,
    /// Runtime scrape settings (threshold, concurrency, fetch policy).
    pub scrape: ScrapeConfig,
}

/// Progress callback for reporting batch status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when a job finishes (successfully or as an error stub).
    fn job_scraped(&self, url: &str, current: usize, total: usize);
    /// Called when the batch completes.
    fn done(&self, records: &[JobRecord]);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn job_scraped(&self, _url: &str, _current: usize, _total: usize) {}
    fn done(&self, _records: &[JobRecord]) {}
}

// ---------------------------------------------------------------------------
// Batch run
// ---------------------------------------------------------------------------

/// Run the batch pipeline. The returned vector has one record per input URL,
/// in input order.
#[instrument(skip_all, fields(jobs = config.urls.len()))]
pub async fn run_batch(
    config: &BatchConfig,
    progress: &dyn ProgressReporter,
) -> Result<Vec<JobRecord>> {
    config.scrape.validate()?;

    let start = Instant::now();
    let fetcher = Arc::new(PageFetcher::new(&config.scrape)?);
    let semaphore = Arc::new(Semaphore::new(config.scrape.concurrency as usize));
    let total = config.urls.len();

    info!(
        total,
        concurrency = config.scrape.concurrency,
        enrich_profiles = config.scrape.enrich_profiles,
        threshold = config.scrape.hire_rate_threshold,
        "starting batch"
    );
    progress.phase("Scraping job listings");

    let mut join_set = JoinSet::new();
    for (index, url) in config.urls.iter().enumerate() {
        let fetcher = fetcher.clone();
        let sem = semaphore.clone();
        let url = url.clone();
        let scrape = config.scrape.clone();

        join_set.spawn(async move {
            let _permit = sem.acquire().await.expect("semaphore closed");

            // Rate limiting between fetches
            if scrape.rate_limit_ms > 0 {
                tokio::time::sleep(Duration::from_millis(scrape.rate_limit_ms)).await;
            }

            (index, scrape_job(&fetcher, &url, &scrape).await)
        });
    }

    // Index-addressed slots keep output order equal to input order.
    let mut slots: Vec<Option<JobRecord>> = vec![None; total];
    let mut completed = 0usize;

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, record)) => {
                completed += 1;
                progress.job_scraped(&config.urls[index], completed, total);
                slots[index] = Some(record);
            }
            Err(e) => {
                warn!(error = %e, "scrape task failed to join");
            }
        }
    }

    // A joined-with-error task still owes its URL a record.
    let records: Vec<JobRecord> = slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.unwrap_or_else(|| JobRecord::error_stub(&config.urls[i], "scrape task failed"))
        })
        .collect();

    let errors = records.iter().filter(|r| r.is_error()).count();
    info!(
        total,
        errors,
        elapsed_ms = start.elapsed().as_millis(),
        "batch complete"
    );

    progress.done(&records);
    Ok(records)
}

// ---------------------------------------------------------------------------
// Single-job scrape
// ---------------------------------------------------------------------------

/// Scrape one listing URL into a record. Never fails the batch: a bad URL
/// or a failed primary fetch reduces the record to `{url, error}`.
async fn scrape_job(fetcher: &PageFetcher, url_str: &str, config: &ScrapeConfig) -> JobRecord {
    let url = match Url::parse(url_str) {
        Ok(u) => u,
        Err(e) => return JobRecord::error_stub(url_str, format!("invalid URL: {e}")),
    };

    let fetched = match fetcher.fetch(&url).await {
        Ok(doc) => doc,
        Err(e) => {
            warn!(%url, error = %e, "primary fetch failed");
            return JobRecord::error_stub(url_str, e.to_string());
        }
    };

    // Parse and extract in a tight scope: the DOM handle is not `Send` and
    // must be dropped before the enrichment fetch awaits.
    let (fields, primary_contacts) = {
        let doc = fetched.parse();
        (
            extract_fields(&doc, &fetched.url),
            harvest(&doc, &fetched.url),
        )
    };

    // Enrichment is opt-in; a profile link alone never triggers a fetch.
    let profile_url = fields
        .client_profile_url
        .as_deref()
        .and_then(|u| Url::parse(u).ok());

    let contacts = match (config.enrich_profiles, profile_url) {
        (true, Some(profile)) => enrich_contacts(fetcher, primary_contacts, &profile).await,
        _ => primary_contacts,
    };

    let is_high_trust = is_high_trust(
        fields.payment_verified,
        fields.hire_rate_percent,
        fields.budget.as_deref(),
        config.hire_rate_threshold,
    );

    JobRecord {
        url: url_str.to_string(),
        title: fields.title,
        description: fields.description,
        skills: fields.skills,
        budget: fields.budget,
        client_name: fields.client_name,
        client_profile_url: fields.client_profile_url,
        client_location: fields.client_location,
        payment_verified: fields.payment_verified,
        hire_rate_percent: fields.hire_rate_percent,
        is_high_trust,
        emails: finalize_contacts(contacts.emails),
        profile_links: finalize_contacts(contacts.profile_links),
        error: None,
    }
}

/// Flatten a harvested set into the record's display list. The harvester
/// dedups byte-identical entries; the record additionally guarantees no
/// duplicates under trimmed, case-insensitive comparison (first match wins,
/// sorted order preserved).
fn finalize_contacts(set: BTreeSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    set.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| seen.insert(s.to_ascii_lowercase()))
        .collect()
}
