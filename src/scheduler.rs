use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::extractor::Extractor;
use crate::models::Product;
use crate::notify::Notifier;
use crate::tracker::StockTracker;

/// Bookkeeping for one completed sweep over all configured URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStats {
    pub urls_checked: usize,
    pub fetch_failures: usize,
    pub transitions: usize,
    pub delivery_failures: usize,
}

/// Drives one full sweep over all configured products at a fixed
/// interval, once immediately at startup and then on every tick.
///
/// Everything runs on one task: URLs are fetched sequentially in
/// configured order, so the tracker needs no locking. If a sweep
/// outlasts the interval the next tick fires as soon as it finishes;
/// cycles back up rather than overlap.
pub struct StockScheduler {
    products: Vec<Product>,
    extractor: Arc<dyn Extractor>,
    notifier: Arc<dyn Notifier>,
    tracker: StockTracker,
    interval: Duration,
    last_checked: Option<DateTime<Utc>>,
}

impl StockScheduler {
    pub fn new(
        products: Vec<Product>,
        extractor: Arc<dyn Extractor>,
        notifier: Arc<dyn Notifier>,
        interval: Duration,
    ) -> Self {
        Self {
            products,
            extractor,
            notifier,
            tracker: StockTracker::new(),
            interval,
            last_checked: None,
        }
    }

    /// Run sweeps until the task is dropped. The first tick of a tokio
    /// interval completes immediately, which gives the startup sweep.
    pub async fn run(&mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            let stats = self.run_cycle().await;
            info!(
                urls_checked = stats.urls_checked,
                fetch_failures = stats.fetch_failures,
                transitions = stats.transitions,
                delivery_failures = stats.delivery_failures,
                "cycle complete"
            );
        }
    }

    /// One full sweep: fetch every configured URL in order, feed the
    /// tracker, and deliver whatever transitions fall out.
    ///
    /// A failed fetch is isolated to its URL; the item keeps its
    /// last-known state and the fixed interval is the retry mechanism.
    /// Delivery failures are logged and dropped; the tracker state is
    /// already committed, so nothing is retried or rolled back.
    pub async fn run_cycle(&mut self) -> CycleStats {
        let mut stats = CycleStats::default();

        for product in &self.products {
            for url in &product.urls {
                stats.urls_checked += 1;

                let observation = match self.extractor.fetch(url).await {
                    Ok(observation) => Some(observation),
                    Err(e) => {
                        warn!(url = %url, error = %e, "fetch failed, skipping URL this cycle");
                        stats.fetch_failures += 1;
                        None
                    }
                };

                if let Some(event) = self.tracker.apply(&product.name, url, observation) {
                    stats.transitions += 1;
                    info!(
                        product = %event.product_name,
                        item = %event.item_name,
                        kind = ?event.kind,
                        url = %event.url,
                        "stock transition"
                    );

                    if let Err(e) = self.notifier.deliver(&event).await {
                        stats.delivery_failures += 1;
                        error!(
                            item = %event.item_name,
                            error = %e,
                            "notification delivery failed"
                        );
                    }
                }
            }
        }

        self.last_checked = Some(Utc::now());
        self.log_summary();
        stats
    }

    /// Per-product available counts, in configured order.
    fn log_summary(&self) {
        for product in &self.products {
            info!(
                product = %product.name,
                available = self.tracker.available_count(&product.name),
                "stock summary"
            );
        }
        if let Some(checked) = self.last_checked {
            info!(last_checked = %checked.format("%a %b %e %T %Y"), "sweep recorded");
        }
    }

    pub fn tracker(&self) -> &StockTracker {
        &self.tracker
    }

    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        self.last_checked
    }
}
