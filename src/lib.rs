// LinkedIn Jobs Scraper Library
//
// Collects job listings from the dynamically rendered search catalog:
// builds parametrized search URLs, reveals lazily loaded results, extracts
// records with fallback selectors, then deduplicates and filters the set.

pub mod config;
pub mod driver;
pub mod error;
pub mod extractor;
pub mod models;
pub mod postprocess;
pub mod query;
pub mod reveal;
pub mod scraper;
pub mod selectors;
pub mod storage;
pub mod utils;
pub mod webdriver;

// Re-export main types for convenience
pub use config::{Credentials, ScraperConfig};
pub use driver::PageDriver;
pub use error::{DriverError, ScrapeError};
pub use extractor::JobExtractor;
pub use models::{FilterOptions, JobCollection, JobRecord, SearchIntent};
pub use postprocess::{JobFilters, deduplicate, filter};
pub use query::build_search_url;
pub use reveal::{RevealConfig, reveal_all};
pub use crate::scraper::{CrawlConfig, CrawlSession, JobScraper};
pub use selectors::JobSelectors;
pub use webdriver::WebDriverBackend;
