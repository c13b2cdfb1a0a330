use serde::{Deserialize, Serialize};

/// A logical product family (e.g. one GPU model line) and the vendor
/// page URLs that represent its individual stock-keeping units.
/// Configured once at startup; immutable during a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub urls: Vec<String>,
}

/// One cycle's fetched-and-extracted availability reading for a URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Observation {
    pub name: String,
    pub available: bool,
}

/// Last-known availability of a named item, kept for the lifetime of
/// the run. Item identity is the extracted display name, not the URL:
/// two URLs that extract to the same name share one entry, and the
/// last-processed URL wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemState {
    pub name: String,
    pub available: bool,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    BecameAvailable,
    BecameUnavailable,
}

/// A change in availability, produced and consumed within one cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitionEvent {
    pub kind: TransitionKind,
    pub product_name: String,
    pub item_name: String,
    pub url: String,
}

impl Product {
    pub fn url_count(&self) -> usize {
        self.urls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_count() {
        let product = Product {
            name: "RTX 3080".to_string(),
            urls: vec![
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
            ],
        };
        assert_eq!(product.url_count(), 2);
    }

    #[test]
    fn test_transition_kind_serde() {
        let json = serde_json::to_string(&TransitionKind::BecameAvailable).unwrap();
        assert_eq!(json, "\"became_available\"");
        let kind: TransitionKind = serde_json::from_str("\"became_unavailable\"").unwrap();
        assert_eq!(kind, TransitionKind::BecameUnavailable);
    }
}
