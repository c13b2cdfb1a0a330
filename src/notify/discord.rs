use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::config::DiscordConfig;
use crate::models::{TransitionEvent, TransitionKind};
use crate::notify::Notifier;
use crate::utils::error::{AppError, Result};

const IN_STOCK_COLOR: u32 = 0x009933;
const OUT_OF_STOCK_COLOR: u32 = 0xCC0000;

/// Sends stock transition notifications to a Discord webhook as
/// color-coded embeds.
pub struct DiscordNotifier {
    client: Client,
    config: DiscordConfig,
}

impl DiscordNotifier {
    pub fn new(config: DiscordConfig) -> Self {
        DiscordNotifier {
            client: Client::new(),
            config,
        }
    }

    fn embed_color(&self, kind: TransitionKind) -> u32 {
        match kind {
            TransitionKind::BecameAvailable => IN_STOCK_COLOR,
            TransitionKind::BecameUnavailable => OUT_OF_STOCK_COLOR,
        }
    }

    fn content_line(&self, event: &TransitionEvent) -> String {
        match event.kind {
            TransitionKind::BecameAvailable => {
                format!("{} now in stock!", event.product_name)
            }
            TransitionKind::BecameUnavailable => {
                format!("{} now out of stock :rage:", event.product_name)
            }
        }
    }

    fn create_embed(&self, event: &TransitionEvent) -> serde_json::Value {
        let mut author = json!({
            "name": self.config.store_name,
            "url": event.url,
        });

        if let Some(icon_url) = &self.config.store_icon_url {
            author["icon_url"] = json!(icon_url);
            author["proxy_icon_url"] = json!(icon_url);
        }

        json!({
            "title": event.item_name,
            "url": event.url,
            "color": self.embed_color(event.kind),
            "author": author,
        })
    }

    fn create_webhook_payload(&self, event: &TransitionEvent) -> serde_json::Value {
        let mut payload = json!({
            "content": self.content_line(event),
            "embeds": [self.create_embed(event)],
        });

        if let Some(username) = &self.config.username {
            payload["username"] = json!(username);
        }

        if let Some(avatar_url) = &self.config.avatar_url {
            payload["avatar_url"] = json!(avatar_url);
        }

        payload
    }

    async fn post(&self, payload: &serde_json::Value) -> Result<()> {
        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Notification(format!(
                "webhook returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn deliver(&self, event: &TransitionEvent) -> Result<()> {
        let payload = self.create_webhook_payload(event);
        self.post(&payload).await
    }

    async fn deliver_startup(&self, watched_urls: usize) -> Result<()> {
        let mut payload = json!({
            "content": format!("Stock watcher is live! Watching {} items.", watched_urls),
        });

        if let Some(username) = &self.config.username {
            payload["username"] = json!(username);
        }

        self.post(&payload).await
    }
}
