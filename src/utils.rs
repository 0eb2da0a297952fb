use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// User agent rotation for the browser session.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:122.0) Gecko/20100101 Firefox/122.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
];

pub fn random_user_agent() -> &'static str {
    let mut rng = rand::rng();
    let index = rng.random_range(0..USER_AGENTS.len());
    USER_AGENTS[index]
}

/// Inter-request cooldown with random jitter.
///
/// Deliberate backpressure towards the catalog: the base delay bounds the
/// request rate, the jitter keeps the cadence from looking mechanical.
pub struct Cooldown {
    base_ms: u64,
    jitter_ms: u64,
}

impl Cooldown {
    pub fn new(base_ms: u64, jitter_ms: u64) -> Self {
        Self { base_ms, jitter_ms }
    }

    /// Pick the next delay: base plus up to `jitter_ms` extra.
    pub fn next_delay(&self) -> Duration {
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..=self.jitter_ms)
        };
        Duration::from_millis(self.base_ms + jitter)
    }

    pub async fn wait(&self) {
        sleep(self.next_delay()).await;
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(3000, 500)
    }
}
