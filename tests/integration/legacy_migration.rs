//! Integration tests for the legacy data directory migration

use cakeshop_config::config::paths::{LEGACY_PRODUCT_DIR, PRODUCT_DIR};
use cakeshop_config::config::{ConfigBootstrapper, EmbeddedDefaults, PathResolver};
use std::fs;

use crate::integration::TestLayout;

#[test]
fn test_bootstrap_migrates_legacy_directory() {
    let layout = TestLayout::new();
    let data = layout.container_root().join("data");
    let legacy = data.join(LEGACY_PRODUCT_DIR);
    fs::create_dir_all(legacy.join("local")).unwrap();
    fs::write(
        legacy.join("local").join("application.properties"),
        "geth.url=http\\://legacy\\:8545\n",
    )
    .unwrap();

    let settings = layout.settings("local");
    let defaults = EmbeddedDefaults;
    let outcome = ConfigBootstrapper::new(&settings, &defaults)
        .bootstrap()
        .unwrap();

    assert!(!legacy.exists());
    assert!(data.join(PRODUCT_DIR).join("local").is_dir());
    // The legacy file became the existing user file and survived reconciliation
    assert_eq!(outcome.config.get("geth.url").as_deref(), Some("http://legacy:8545"));
}

#[test]
fn test_migration_happens_once() {
    let layout = TestLayout::new();
    let data = layout.container_root().join("data");
    fs::create_dir_all(data.join(LEGACY_PRODUCT_DIR).join("local")).unwrap();

    let settings = layout.settings("local");
    let resolver = PathResolver::new(&settings);
    let first = resolver.config_dir().unwrap();
    assert!(!data.join(LEGACY_PRODUCT_DIR).exists());

    // A legacy dir reappearing later is left alone because the new one exists
    fs::create_dir_all(data.join(LEGACY_PRODUCT_DIR).join("stale")).unwrap();
    let second = resolver.config_dir().unwrap();

    assert_eq!(first, second);
    assert!(data.join(LEGACY_PRODUCT_DIR).join("stale").exists());
    assert!(!data.join(PRODUCT_DIR).join("stale").exists());
}

#[test]
fn test_no_migration_with_override() {
    let layout = TestLayout::new();
    let data = layout.container_root().join("data");
    fs::create_dir_all(data.join(LEGACY_PRODUCT_DIR)).unwrap();

    let settings = layout.settings_with_override("local", &layout.root().join("conf"));
    PathResolver::new(&settings).config_dir().unwrap();

    assert!(data.join(LEGACY_PRODUCT_DIR).exists());
    assert!(!data.join(PRODUCT_DIR).exists());
}
