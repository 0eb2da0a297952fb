use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::DriverError;

/// Narrow seam to the browser-automation driver.
///
/// The core only ever needs these five capabilities; everything else about
/// the browser (launching, profiles, timeouts) belongs to the backend.
/// Implementations are driven strictly sequentially, one operation in
/// flight per document context.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate the session to the given URL and wait for the load.
    async fn navigate(&self, url: &Url) -> Result<(), DriverError>;

    /// Snapshot of the currently rendered markup.
    async fn page_source(&self) -> Result<String, DriverError>;

    /// Advance the scroll position by a pixel increment.
    async fn scroll_by(&self, pixels: u32) -> Result<(), DriverError>;

    /// Total scrollable extent of the current document, in pixels.
    /// Grows as the catalog lazily loads more content.
    async fn scroll_extent(&self) -> Result<u64, DriverError>;

    /// Cooperative fixed wait, letting the renderer catch up.
    async fn wait_fixed(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
