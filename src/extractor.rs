use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::config::ExtractorConfig;
use crate::models::Observation;
use crate::utils::error::{AppError, Result};

/// Produces one availability reading for a product page URL.
///
/// "Not purchasable" is a valid `available = false` observation, never
/// an error. Errors are reserved for transport failures and pages the
/// expected structure is missing from.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Observation>;
}

/// Plain HTTP extractor: GET the page, parse the HTML, read the item
/// name from one CSS selector and infer availability from the presence
/// of another (the price node only renders for purchasable items).
pub struct HttpExtractor {
    client: Client,
    name_selector: Selector,
    availability_selector: Selector,
    config: ExtractorConfig,
}

impl HttpExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        let name_selector = Selector::parse(&config.name_selector).map_err(|e| {
            AppError::Validation(format!(
                "Invalid CSS selector '{}': {:?}",
                config.name_selector, e
            ))
        })?;
        let availability_selector =
            Selector::parse(&config.availability_selector).map_err(|e| {
                AppError::Validation(format!(
                    "Invalid CSS selector '{}': {:?}",
                    config.availability_selector, e
                ))
            })?;

        Ok(Self {
            client,
            name_selector,
            availability_selector,
            config,
        })
    }

    /// Pull the observation out of a fetched page. Separated from the
    /// network path so it can be exercised on fixture HTML.
    pub fn extract(&self, html: &str) -> Result<Observation> {
        let document = Html::parse_document(html);

        let name: String = document
            .select(&self.name_selector)
            .next()
            .map(|el| el.text().collect::<String>())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AppError::ElementNotFound {
                selector: self.config.name_selector.clone(),
            })?;

        let available = document.select(&self.availability_selector).next().is_some();

        Ok(Observation { name, available })
    }
}

#[async_trait]
impl Extractor for HttpExtractor {
    async fn fetch(&self, url: &str) -> Result<Observation> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        self.extract(&body)
    }
}
