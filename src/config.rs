use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{FilterOptions, SearchIntent};
use crate::postprocess::JobFilters;
use crate::scraper::CrawlConfig;

/// Environment variables holding the catalog credentials.
pub const EMAIL_ENV: &str = "LINKEDIN_EMAIL";
pub const PASSWORD_ENV: &str = "LINKEDIN_PASSWORD";

/// Full scraper configuration, loaded from a TOML file.
///
/// Everything has a default, so a minimal file with just `keywords` works.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// One search intent is issued per keyword phrase.
    pub keywords: Vec<String>,
    pub location: String,
    pub options: FilterOptions,
    pub crawl: CrawlConfig,
    /// Post-processing filters applied before persisting.
    pub filters: Option<JobFilters>,
    /// Enrich the first N post-processed records with descriptions from
    /// their detail pages. Zero skips enrichment.
    pub enrich_details: usize,
    pub webdriver_url: String,
    pub page_load_timeout_secs: u64,
    pub output: PathBuf,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            keywords: vec!["software engineer".to_string()],
            location: "Brazil".to_string(),
            options: FilterOptions::default(),
            crawl: CrawlConfig::default(),
            filters: None,
            enrich_details: 0,
            webdriver_url: "http://localhost:9515".to_string(),
            page_load_timeout_secs: 60,
            output: PathBuf::from("jobs.json"),
        }
    }
}

impl ScraperConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: ScraperConfig = toml::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Expand the keyword list into per-keyword search intents sharing the
    /// configured location and options.
    pub fn intents(&self) -> Vec<SearchIntent> {
        self.keywords
            .iter()
            .map(|keywords| SearchIntent {
                keywords: keywords.clone(),
                location: self.location.clone(),
                options: self.options.clone(),
            })
            .collect()
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }
}

/// Catalog login credentials, taken from the environment rather than the
/// config file.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        let email = std::env::var(EMAIL_ENV)
            .with_context(|| format!("{} is not set", EMAIL_ENV))?;
        let password = std::env::var(PASSWORD_ENV)
            .with_context(|| format!("{} is not set", PASSWORD_ENV))?;
        Ok(Self { email, password })
    }
}
