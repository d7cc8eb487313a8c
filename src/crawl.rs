use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::fetch;
use crate::parser::{detail, listing};
use crate::record::FilmRecord;

pub const LISTING_URL: &str = "https://en.wikipedia.org/wiki/List_of_highest-grossing_films";

const CONCURRENCY: usize = 10;

/// Crawl stats returned after completion.
pub struct CrawlStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// The two-stage crawl pipeline: parse the listing into partial
/// records, then fetch each film's detail page at most once through a
/// bounded worker pool. Owns its HTTP client; no ambient state.
pub struct Crawler {
    client: Client,
    concurrency: usize,
}

impl Crawler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: fetch::client()?,
            concurrency: CONCURRENCY,
        })
    }

    /// Run the crawl and return completed records in completion order —
    /// detail responses land as they arrive, so feed order is not rank
    /// order.
    pub async fn crawl(
        &self,
        listing_url: &str,
        limit: Option<usize>,
    ) -> Result<(Vec<FilmRecord>, CrawlStats)> {
        let html = fetch::fetch_html(&self.client, listing_url)
            .await
            .with_context(|| format!("failed to fetch listing page {listing_url}"))?;

        let mut partials = listing::parse_listing(&html, listing_url)?;
        if let Some(n) = limit {
            partials.truncate(n);
        }
        let total = partials.len();
        if total == 0 {
            warn!("Listing page yielded no rows with a title link");
            return Ok((Vec::new(), CrawlStats { total: 0, ok: 0, errors: 0 }));
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
                .progress_chars("=> "),
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        // Channel: workers send completed records (or None for a lost
        // row), the collector drains in arrival order
        let (tx, mut rx) = tokio::sync::mpsc::channel::<Option<FilmRecord>>(self.concurrency * 2);

        for partial in partials {
            let client = self.client.clone();
            let sem = Arc::clone(&semaphore);
            let tx = tx.clone();

            tokio::spawn(async move {
                let _permit = sem.acquire().await.unwrap();
                match fetch::fetch_html(&client, &partial.url).await {
                    Ok(page) => {
                        let details = detail::parse_detail(&page);
                        let _ = tx.send(Some(partial.complete(details))).await;
                    }
                    Err(e) => {
                        // No retry: a failed fetch is a lost row
                        warn!("Fetch failed for {}: {}", partial.title, e);
                        let _ = tx.send(None).await;
                    }
                }
            });
        }

        // Drop our copy of tx so rx closes when all spawned tasks finish
        drop(tx);

        let mut records = Vec::with_capacity(total);
        let mut errors = 0usize;
        while let Some(result) = rx.recv().await {
            match result {
                Some(record) => records.push(record),
                None => errors += 1,
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        info!("Crawled {} detail pages ({} ok, {} errors)", total, records.len(), errors);

        let ok = records.len();
        Ok((records, CrawlStats { total, ok, errors }))
    }
}
