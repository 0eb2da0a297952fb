use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::driver::PageDriver;
use crate::error::DriverError;

/// Tuning for the progressive content reveal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Pixels advanced per scroll step.
    pub increment_px: u32,
    /// Settle wait after each step, giving the renderer time to load.
    pub settle_ms: u64,
    /// Safety cap on total steps; the extent may never stabilize.
    pub max_increments: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            increment_px: 100,
            settle_ms: 100,
            max_increments: 600,
        }
    }
}

/// Scroll until the document stops growing.
///
/// Advances by a fixed increment and re-samples the scrollable extent after
/// each step; terminates once cumulative advancement reaches the last
/// observed extent. The extent itself may grow as content lazy-loads, so
/// this is a fixed point, not a step count. When the extent keeps growing
/// past the safety cap the reveal stops unconditionally and extraction
/// proceeds on whatever has loaded. Cancellation stops the reveal early
/// with partial content.
pub async fn reveal_all<D: PageDriver + ?Sized>(
    driver: &D,
    config: &RevealConfig,
    cancel: &CancellationToken,
) -> Result<(), DriverError> {
    let settle = Duration::from_millis(config.settle_ms);
    let mut advanced: u64 = 0;

    for _ in 0..config.max_increments {
        if cancel.is_cancelled() {
            log::debug!("reveal cancelled after {} px", advanced);
            return Ok(());
        }

        driver.scroll_by(config.increment_px).await?;
        advanced += u64::from(config.increment_px);
        driver.wait_fixed(settle).await;

        let extent = driver.scroll_extent().await?;
        if advanced >= extent {
            log::debug!("document stabilized at {} px", extent);
            return Ok(());
        }
    }

    log::warn!(
        "scroll extent still growing after {} increments, stopping reveal",
        config.max_increments
    );
    Ok(())
}
