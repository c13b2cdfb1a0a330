pub mod config;
pub mod extractor;
pub mod models;
pub mod notify;
pub mod scheduler;
pub mod tracker;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use extractor::{Extractor, HttpExtractor};
pub use models::{Observation, Product, TransitionEvent, TransitionKind};
pub use notify::{DiscordNotifier, Notifier};
pub use scheduler::StockScheduler;
pub use tracker::StockTracker;
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
