use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use restock_watcher::{AppConfig, DiscordNotifier, HttpExtractor, Notifier, StockScheduler};

#[derive(Parser, Debug)]
#[command(name = "restock-watcher", version, about = "Watches product pages and notifies on stock transitions")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Send a welcome message to the notification channel at startup
    #[arg(long)]
    welcome: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("restock_watcher=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::from_file(&args.config)?;

    let watched = config.watched_url_count();
    info!("watching {} items", watched);

    let extractor = Arc::new(HttpExtractor::new(config.extractor.clone())?);
    let notifier = Arc::new(DiscordNotifier::new(config.notifications.discord.clone()));

    if args.welcome {
        if let Err(e) = notifier.deliver_startup(watched).await {
            error!(error = %e, "startup notification failed");
        }
    }

    let mut scheduler = StockScheduler::new(
        config.products,
        extractor,
        notifier,
        Duration::from_secs(config.scheduler.interval_secs),
    );

    tokio::select! {
        _ = scheduler.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
        }
    }

    Ok(())
}
