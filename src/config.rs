use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::Product;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub products: Vec<Product>,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between the start of one sweep and the next tick.
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// CSS selector for the item name on a product page.
    pub name_selector: String,
    /// CSS selector whose presence means the item is purchasable.
    pub availability_selector: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    pub discord: DiscordConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub webhook_url: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    /// Shown as the embed author on every notification.
    pub store_name: String,
    pub store_icon_url: Option<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            // The upstream pages change slowly; ten minutes keeps the
            // watcher well under any rate limit.
            interval_secs: 600,
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            user_agent: "RestockWatcher/0.1".to_string(),
            name_selector: ".product-hero__title".to_string(),
            availability_selector: ".purchase-info__price .inc-vat .price".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file layered with `RESTOCK__`
    /// environment variables (e.g. `RESTOCK__SCHEDULER__INTERVAL_SECS`).
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("RESTOCK").separator("__"))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.products.is_empty() {
            return Err(ConfigError::Message(
                "At least one product must be configured".into(),
            ));
        }

        for product in &self.products {
            if product.name.trim().is_empty() {
                return Err(ConfigError::Message("Product name cannot be empty".into()));
            }
            if product.urls.is_empty() {
                return Err(ConfigError::Message(format!(
                    "Product '{}' has no URLs",
                    product.name
                )));
            }
            for url in &product.urls {
                if Url::parse(url).is_err() {
                    return Err(ConfigError::Message(format!("Invalid URL: {}", url)));
                }
            }
        }

        if self.scheduler.interval_secs == 0 {
            return Err(ConfigError::Message(
                "Scheduler interval_secs must be greater than 0".into(),
            ));
        }

        if self.extractor.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "Extractor request_timeout_secs must be greater than 0".into(),
            ));
        }

        if Selector::parse(&self.extractor.name_selector).is_err() {
            return Err(ConfigError::Message(format!(
                "Invalid name_selector: {}",
                self.extractor.name_selector
            )));
        }

        if Selector::parse(&self.extractor.availability_selector).is_err() {
            return Err(ConfigError::Message(format!(
                "Invalid availability_selector: {}",
                self.extractor.availability_selector
            )));
        }

        if !self
            .notifications
            .discord
            .webhook_url
            .starts_with("https://discord.com/api/webhooks/")
        {
            return Err(ConfigError::Message(
                "Invalid Discord webhook URL format".into(),
            ));
        }

        Ok(())
    }

    /// Total number of watched URLs across all products.
    pub fn watched_url_count(&self) -> usize {
        self.products.iter().map(|p| p.urls.len()).sum()
    }
}
