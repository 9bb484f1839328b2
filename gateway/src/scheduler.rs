//! Periodic scrape driver.
//!
//! Runs one cycle immediately, then one every `interval` measured from the
//! start of the previous run. Each periodic run is spawned as its own task,
//! so a slow upstream can make runs overlap; the last writer wins per
//! label tuple.

use std::sync::Arc;
use std::time::Duration;

use biconomy_exporter::{NodeInfoSource, Scraper};
use tokio::time::{self, Instant, MissedTickBehavior};

/// Shortest period accepted by the timer.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Runs the initial scrape and then schedules scrapes forever.
pub async fn run_scrape_loop<S>(scraper: Arc<Scraper<S>>, interval: Duration)
where
    S: NodeInfoSource + 'static,
{
    if scraper.run().await {
        tracing::info!("Initial metrics scrape completed successfully");
    } else {
        tracing::warn!("Initial metrics scrape failed, will retry on next interval");
    }

    let period = interval.max(MIN_INTERVAL);
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let scraper = scraper.clone();
        tokio::spawn(async move {
            scraper.run().await;
        });
    }
}
