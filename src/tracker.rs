use std::collections::HashMap;

use crate::models::{ItemState, Observation, TransitionEvent, TransitionKind};

/// Owns the per-item availability state and decides when a transition
/// has occurred. No I/O; deterministic given its inputs.
///
/// State is a two-level map: product name -> item name -> [`ItemState`].
/// An entry exists if and only if at least one successful observation of
/// that (product, item) pair has occurred. Entries are never removed
/// during a run.
#[derive(Debug, Default)]
pub struct StockTracker {
    stock: HashMap<String, HashMap<String, ItemState>>,
}

impl StockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one observation for a URL and update state.
    ///
    /// Returns at most one [`TransitionEvent`]:
    /// - `None` observation (fetch or extraction failed this cycle):
    ///   no state change, no event. The item keeps its last-known state
    ///   until a future successful observation.
    /// - First sight of an item name under a product: records the
    ///   baseline, emits nothing. Pre-existing items at startup would
    ///   otherwise flood the notifier.
    /// - Known item: emits an event iff the observed availability
    ///   differs from the stored one. The stored state is updated
    ///   before the event is returned, so a lost notification never
    ///   causes a duplicate on the next cycle.
    ///
    /// The stored URL is refreshed on every successful observation.
    /// Two URLs that extract to the same item name share one entry and
    /// the last-processed URL wins.
    pub fn apply(
        &mut self,
        product_name: &str,
        url: &str,
        observation: Option<Observation>,
    ) -> Option<TransitionEvent> {
        let observation = observation?;

        let items = self.stock.entry(product_name.to_string()).or_default();

        match items.get_mut(&observation.name) {
            Some(item) => {
                let was_available = item.available;
                item.available = observation.available;
                item.url = url.to_string();

                let kind = match (was_available, observation.available) {
                    (false, true) => TransitionKind::BecameAvailable,
                    (true, false) => TransitionKind::BecameUnavailable,
                    _ => return None,
                };

                Some(TransitionEvent {
                    kind,
                    product_name: product_name.to_string(),
                    item_name: observation.name,
                    url: url.to_string(),
                })
            }
            None => {
                items.insert(
                    observation.name.clone(),
                    ItemState {
                        name: observation.name,
                        available: observation.available,
                        url: url.to_string(),
                    },
                );
                None
            }
        }
    }

    /// Count of available items per product. Pure read, used for the
    /// per-cycle summary.
    pub fn summarize(&self) -> HashMap<String, usize> {
        self.stock
            .iter()
            .map(|(product, items)| {
                let available = items.values().filter(|i| i.available).count();
                (product.clone(), available)
            })
            .collect()
    }

    /// Count of available items for one product; zero when nothing has
    /// been observed for it yet.
    pub fn available_count(&self, product_name: &str) -> usize {
        self.stock
            .get(product_name)
            .map(|items| items.values().filter(|i| i.available).count())
            .unwrap_or(0)
    }

    /// Last-known state for a single item, if it has ever been observed.
    pub fn item(&self, product_name: &str, item_name: &str) -> Option<&ItemState> {
        self.stock.get(product_name)?.get(item_name)
    }

    /// Total number of distinct items observed across all products.
    pub fn item_count(&self) -> usize {
        self.stock.values().map(|items| items.len()).sum()
    }
}
