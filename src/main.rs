use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use linkedin_jobs_scraper::config::{Credentials, ScraperConfig};
use linkedin_jobs_scraper::driver::PageDriver;
use linkedin_jobs_scraper::models::JobCollection;
use linkedin_jobs_scraper::scraper::JobScraper;
use linkedin_jobs_scraper::webdriver::WebDriverBackend;
use linkedin_jobs_scraper::{postprocess, storage};

#[derive(Parser)]
#[command(name = "linkedin-jobs-scraper")]
#[command(about = "Collect, deduplicate and filter LinkedIn job listings")]
struct Cli {
    /// Path to the scraper configuration (TOML)
    #[arg(short, long, default_value = "scraper.toml")]
    config: PathBuf,

    /// Override the output file from the config
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the login step (use an already authenticated browser profile)
    #[arg(long)]
    no_login: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_level));

    let config = ScraperConfig::load(&cli.config).unwrap_or_else(|e| {
        log::warn!("{:#}; falling back to defaults", e);
        ScraperConfig::default()
    });
    let output = cli.output.unwrap_or_else(|| config.output.clone());

    let credentials = if cli.no_login {
        None
    } else {
        Some(Credentials::from_env()?)
    };

    log::info!("connecting to webdriver at {}", config.webdriver_url);
    let backend =
        WebDriverBackend::connect(&config.webdriver_url, config.page_load_timeout()).await?;

    if let Some(credentials) = &credentials {
        backend.login(credentials).await?;
    }

    let scraper = JobScraper::new(backend, config.crawl.clone());

    // Abort cleanly on Ctrl-C; the partial collection is still persisted.
    let cancel = scraper.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupt received, finishing up");
            cancel.cancel();
        }
    });

    let intents = config.intents();
    log::info!("running {} search intents", intents.len());
    let session = scraper.run(&intents).await;

    let collection = postprocess::deduplicate(&session.jobs);
    let collection = if config.enrich_details > 0 {
        enrich(&scraper, collection, config.enrich_details).await
    } else {
        collection
    };
    let collection = match &config.filters {
        Some(filters) if !filters.is_empty() => postprocess::filter(&collection, filters),
        _ => collection,
    };

    storage::write_json(&output, &collection)?;

    let companies: HashSet<&str> = collection.iter().map(|r| r.company.as_str()).collect();
    log::info!("crawl {} finished", session.session_id);
    log::info!("  unique jobs: {}", collection.len());
    log::info!("  companies: {}", companies.len());
    if !session.errors.is_empty() {
        log::warn!("  failed searches: {}", session.errors.len());
    }

    scraper.into_driver().quit().await?;
    Ok(())
}

/// Visit the first `limit` detail pages and attach descriptions.
///
/// Enrichment failures keep the bare record; they never drop it.
async fn enrich<D: PageDriver>(
    scraper: &JobScraper<D>,
    collection: JobCollection,
    limit: usize,
) -> JobCollection {
    let mut enriched = Vec::with_capacity(collection.len());

    for (index, record) in collection.into_records().into_iter().enumerate() {
        if index < limit {
            match scraper.fetch_description(&record).await {
                Ok(Some(description)) => {
                    enriched.push(record.with_description(description));
                    continue;
                }
                Ok(None) => log::debug!("no description found for {}", record.link),
                Err(e) => log::warn!("failed to fetch details for {}: {}", record.link, e),
            }
        }
        enriched.push(record);
    }

    JobCollection::from(enriched)
}
