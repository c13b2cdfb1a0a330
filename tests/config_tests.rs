// Configuration loading tests against real TOML files on disk.

use std::fs;
use std::path::PathBuf;

use restock_watcher::AppConfig;
use tempfile::TempDir;

fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let (_dir, path) = write_config(
        r#"
        [[products]]
        name = "RTX 3080"
        urls = ["https://example.com/rtx-3080", "https://example.com/rtx-3080-oc"]

        [notifications.discord]
        webhook_url = "https://discord.com/api/webhooks/123/token"
        store_name = "eBuyer"
        "#,
    );

    let config = AppConfig::from_file(&path).unwrap();

    assert_eq!(config.products.len(), 1);
    assert_eq!(config.products[0].name, "RTX 3080");
    assert_eq!(config.watched_url_count(), 2);

    // Unspecified sections fall back to defaults.
    assert_eq!(config.scheduler.interval_secs, 600);
    assert_eq!(config.extractor.name_selector, ".product-hero__title");
    assert_eq!(
        config.extractor.availability_selector,
        ".purchase-info__price .inc-vat .price"
    );
    assert!(config.notifications.discord.username.is_none());
}

#[test]
fn test_load_full_config() {
    let (_dir, path) = write_config(
        r##"
        [[products]]
        name = "RTX 3080"
        urls = ["https://example.com/rtx-3080"]

        [[products]]
        name = "RTX 3090"
        urls = ["https://example.com/rtx-3090"]

        [scheduler]
        interval_secs = 120

        [extractor]
        request_timeout_secs = 15
        user_agent = "RestockWatcher/0.1"
        name_selector = "#product-name"
        availability_selector = ".add-to-basket"

        [notifications.discord]
        webhook_url = "https://discord.com/api/webhooks/123/token"
        username = "Stock Watcher"
        store_name = "eBuyer"
        store_icon_url = "https://example.com/ebuyer.png"
        "##,
    );

    let config = AppConfig::from_file(&path).unwrap();

    assert_eq!(config.products.len(), 2);
    assert_eq!(config.scheduler.interval_secs, 120);
    assert_eq!(config.extractor.name_selector, "#product-name");
    assert_eq!(
        config.notifications.discord.username.as_deref(),
        Some("Stock Watcher")
    );
}

#[test]
fn test_reject_config_without_products() {
    let (_dir, path) = write_config(
        r#"
        products = []

        [notifications.discord]
        webhook_url = "https://discord.com/api/webhooks/123/token"
        store_name = "eBuyer"
        "#,
    );

    let result = AppConfig::from_file(&path);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("At least one product"));
}

#[test]
fn test_reject_zero_interval() {
    let (_dir, path) = write_config(
        r#"
        [[products]]
        name = "RTX 3080"
        urls = ["https://example.com/rtx-3080"]

        [scheduler]
        interval_secs = 0

        [notifications.discord]
        webhook_url = "https://discord.com/api/webhooks/123/token"
        store_name = "eBuyer"
        "#,
    );

    assert!(AppConfig::from_file(&path).is_err());
}

#[test]
fn test_reject_non_discord_webhook_url() {
    let (_dir, path) = write_config(
        r#"
        [[products]]
        name = "RTX 3080"
        urls = ["https://example.com/rtx-3080"]

        [notifications.discord]
        webhook_url = "https://example.com/not-a-webhook"
        store_name = "eBuyer"
        "#,
    );

    let result = AppConfig::from_file(&path);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Invalid Discord webhook URL"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = AppConfig::from_file(&dir.path().join("nope.toml"));
    assert!(result.is_err());
}
