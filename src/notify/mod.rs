use async_trait::async_trait;

use crate::models::TransitionEvent;
use crate::utils::error::Result;

pub mod discord;

pub use discord::DiscordNotifier;

/// Delivers transition notifications to an outbound channel.
///
/// Delivery failure is reported as an error value and must never take
/// the process down; the tracker state is already committed by the
/// time `deliver` is called, so a lost notification stays lost.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// At-most-once delivery attempt for one transition.
    async fn deliver(&self, event: &TransitionEvent) -> Result<()>;

    /// One-shot announcement at process start with the number of
    /// watched URLs.
    async fn deliver_startup(&self, watched_urls: usize) -> Result<()>;
}
