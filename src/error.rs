use thiserror::Error;

/// Failures at the automation-driver seam.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The driver session could not be created or has gone away.
    #[error("webdriver session error: {0}")]
    Session(String),

    /// Navigation timed out or the target was unreachable.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// An injected script failed to run or returned garbage.
    #[error("script execution failed: {0}")]
    Script(String),
}

/// Crawl-level failures surfaced to the orchestrator and the shell.
///
/// Field- and candidate-level problems never reach this type; they are
/// recovered inside the extractor.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: DriverError,
    },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("crawl cancelled")]
    Cancelled,

    #[error("failed to persist collection: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}
