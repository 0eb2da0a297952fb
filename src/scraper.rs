use std::time::Duration;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use url::Url;
use uuid::Uuid;

use crate::driver::PageDriver;
use crate::error::{DriverError, ScrapeError};
use crate::extractor::JobExtractor;
use crate::models::{JobCollection, JobRecord, SearchIntent};
use crate::query::build_search_url;
use crate::reveal::{RevealConfig, reveal_all};
use crate::selectors::JobSelectors;
use crate::utils::Cooldown;

/// Tuning for a crawl run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Wait after navigation for the result list to render.
    pub stabilize_ms: u64,
    /// Base delay between successive search intents.
    pub cooldown_ms: u64,
    /// Extra random spread added on top of the base delay.
    pub cooldown_jitter_ms: u64,
    pub reveal: RevealConfig,
    /// Overrides the built-in selector fallback lists.
    pub custom_selectors: Option<JobSelectors>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            stabilize_ms: 5000,
            cooldown_ms: 3000,
            cooldown_jitter_ms: 500,
            reveal: RevealConfig::default(),
            custom_selectors: None,
        }
    }
}

/// Outcome of one crawl run across a list of search intents.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSession {
    pub session_id: String,
    pub started_at: String,
    pub finished_at: String,
    pub intents_run: usize,
    pub errors: Vec<String>,
    pub jobs: JobCollection,
}

/// Sequences search intents against one browser session.
///
/// Intents run strictly one at a time; the collection only ever grows
/// during a run. A failing intent is logged and skipped, it never aborts
/// the crawl or drops records already captured.
pub struct JobScraper<D> {
    driver: D,
    extractor: JobExtractor,
    config: CrawlConfig,
    cooldown: Cooldown,
    cancel: CancellationToken,
}

impl<D: PageDriver> JobScraper<D> {
    pub fn new(driver: D, config: CrawlConfig) -> Self {
        let extractor = match &config.custom_selectors {
            Some(selectors) => JobExtractor::with_selectors(selectors.clone()),
            None => JobExtractor::new(),
        };
        let cooldown = Cooldown::new(config.cooldown_ms, config.cooldown_jitter_ms);

        Self {
            driver,
            extractor,
            config,
            cooldown,
            cancel: CancellationToken::new(),
        }
    }

    /// Handle for aborting the crawl from outside; checked at every
    /// suspension point.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run all intents in order and return the accumulated collection.
    pub async fn run(&self, intents: &[SearchIntent]) -> CrawlSession {
        let session_id = Uuid::new_v4().to_string();
        let started_at = Local::now().to_rfc3339();
        let mut jobs = JobCollection::new();
        let mut errors = Vec::new();
        let mut intents_run = 0;

        for (index, intent) in intents.iter().enumerate() {
            if self.cancel.is_cancelled() {
                log::warn!(
                    "crawl cancelled after {} of {} intents",
                    index,
                    intents.len()
                );
                break;
            }

            intents_run += 1;
            log::info!(
                "searching \"{}\" in {}",
                intent.keywords,
                intent.location
            );

            match self.run_intent(intent).await {
                Ok(records) => {
                    log::info!(
                        "{} listings captured for \"{}\"",
                        records.len(),
                        intent.keywords
                    );
                    jobs.append(records);
                }
                Err(e) => {
                    log::error!("search \"{}\" failed: {}", intent.keywords, e);
                    errors.push(format!("{}: {}", intent.keywords, e));
                }
            }

            if index + 1 < intents.len() {
                self.pace().await;
            }
        }

        CrawlSession {
            session_id,
            started_at,
            finished_at: Local::now().to_rfc3339(),
            intents_run,
            errors,
            jobs,
        }
    }

    async fn run_intent(&self, intent: &SearchIntent) -> Result<Vec<JobRecord>, ScrapeError> {
        let url = build_search_url(intent);

        self.driver
            .navigate(&url)
            .await
            .map_err(|source| ScrapeError::Navigation {
                url: url.to_string(),
                source,
            })?;
        self.driver
            .wait_fixed(Duration::from_millis(self.config.stabilize_ms))
            .await;

        reveal_all(&self.driver, &self.config.reveal, &self.cancel).await?;

        let html = self.driver.page_source().await?;
        Ok(self.extractor.extract(&html, &url))
    }

    /// Navigate to a record's detail page and pull its description.
    ///
    /// Returns `Ok(None)` when the page renders without a recognizable
    /// description block.
    pub async fn fetch_description(
        &self,
        record: &JobRecord,
    ) -> Result<Option<String>, ScrapeError> {
        let url = Url::parse(&record.link).map_err(|e| ScrapeError::Navigation {
            url: record.link.clone(),
            source: DriverError::Navigation(e.to_string()),
        })?;

        self.driver
            .navigate(&url)
            .await
            .map_err(|source| ScrapeError::Navigation {
                url: url.to_string(),
                source,
            })?;
        self.driver
            .wait_fixed(Duration::from_millis(self.config.stabilize_ms))
            .await;

        let html = self.driver.page_source().await?;
        Ok(self.extractor.extract_description(&html))
    }

    /// Inter-intent cooldown; wakes early on cancellation.
    async fn pace(&self) {
        tokio::select! {
            _ = self.cooldown.wait() => {}
            _ = self.cancel.cancelled() => {}
        }
    }

    /// Hand the driver back, e.g. to shut the browser session down.
    pub fn into_driver(self) -> D {
        self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilterOptions;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Driver stub serving canned pages keyed by URL.
    struct MockCatalog {
        pages: HashMap<String, String>,
        current: Mutex<Option<String>>,
    }

    impl MockCatalog {
        fn new(pages: HashMap<String, String>) -> Self {
            Self {
                pages,
                current: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl PageDriver for MockCatalog {
        async fn navigate(&self, url: &Url) -> Result<(), DriverError> {
            if self.pages.contains_key(url.as_str()) {
                *self.current.lock().unwrap() = Some(url.to_string());
                Ok(())
            } else {
                Err(DriverError::Navigation("unreachable".to_string()))
            }
        }

        async fn page_source(&self) -> Result<String, DriverError> {
            let current = self.current.lock().unwrap();
            let url = current
                .as_ref()
                .ok_or_else(|| DriverError::Session("no page loaded".to_string()))?;
            Ok(self.pages[url].clone())
        }

        async fn scroll_by(&self, _pixels: u32) -> Result<(), DriverError> {
            Ok(())
        }

        async fn scroll_extent(&self) -> Result<u64, DriverError> {
            Ok(0)
        }
    }

    fn fast_config() -> CrawlConfig {
        CrawlConfig {
            stabilize_ms: 0,
            cooldown_ms: 0,
            cooldown_jitter_ms: 0,
            reveal: RevealConfig {
                increment_px: 100,
                settle_ms: 0,
                max_increments: 5,
            },
            custom_selectors: None,
        }
    }

    fn intent(keywords: &str) -> SearchIntent {
        SearchIntent {
            keywords: keywords.to_string(),
            location: "Remote".to_string(),
            options: FilterOptions::default(),
        }
    }

    fn listing_page(cards: &[(&str, &str, &str)]) -> String {
        let body: String = cards
            .iter()
            .map(|(title, company, link)| {
                format!(
                    r#"<div class="job-search-card">
                        <a class="base-card__full-link" href="{link}">
                            <span class="job-card-list__title">{title}</span>
                        </a>
                        <span class="job-card-container__company-name">{company}</span>
                    </div>"#
                )
            })
            .collect();
        format!("<html><body>{body}</body></html>")
    }

    #[tokio::test]
    async fn test_run_accumulates_across_intents() {
        let first = intent("backend engineer");
        let second = intent("backend developer");

        let mut pages = HashMap::new();
        pages.insert(
            build_search_url(&first).to_string(),
            listing_page(&[("Backend Engineer", "Acme", "https://example.com/jobs/1")]),
        );
        pages.insert(
            build_search_url(&second).to_string(),
            listing_page(&[
                ("Backend Developer", "Globex", "https://example.com/jobs/2"),
                ("Backend Engineer", "Acme", "https://example.com/jobs/1"),
            ]),
        );

        let scraper = JobScraper::new(MockCatalog::new(pages), fast_config());
        let session = scraper.run(&[first, second]).await;

        // Accumulation only; the overlap collapses in post-processing.
        assert_eq!(session.jobs.len(), 3);
        assert_eq!(session.intents_run, 2);
        assert!(session.errors.is_empty());
    }

    #[tokio::test]
    async fn test_run_skips_failing_intent_and_continues() {
        let good = intent("platform engineer");
        let bad = intent("nowhere");

        let mut pages = HashMap::new();
        pages.insert(
            build_search_url(&good).to_string(),
            listing_page(&[("Platform Engineer", "Initech", "https://example.com/jobs/3")]),
        );

        let scraper = JobScraper::new(MockCatalog::new(pages), fast_config());
        let session = scraper.run(&[bad, good]).await;

        assert_eq!(session.jobs.len(), 1);
        assert_eq!(session.errors.len(), 1);
        assert!(session.errors[0].contains("nowhere"));
    }

    #[tokio::test]
    async fn test_run_stops_on_cancellation() {
        let scraper = JobScraper::new(MockCatalog::new(HashMap::new()), fast_config());
        scraper.cancel_token().cancel();

        let session = scraper.run(&[intent("anything")]).await;

        assert_eq!(session.intents_run, 0);
        assert!(session.jobs.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_description() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://example.com/jobs/7".to_string(),
            r#"<html><body><div class="jobs-description__content">Ship backend services.</div></body></html>"#.to_string(),
        );

        let scraper = JobScraper::new(MockCatalog::new(pages), fast_config());
        let record = JobRecord {
            title: "Dev".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            link: "https://example.com/jobs/7".to_string(),
            posted_date: "Recent".to_string(),
            platform: "LinkedIn".to_string(),
            captured_at: Local::now().to_rfc3339(),
            description: None,
        };

        let description = scraper.fetch_description(&record).await.unwrap();
        assert_eq!(description.as_deref(), Some("Ship backend services."));
    }
}
