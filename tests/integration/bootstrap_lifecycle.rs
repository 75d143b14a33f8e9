//! Integration tests for seeding and reconciling the config file

use cakeshop_config::config::{
    BootstrapState, ConfigBootstrapper, DirectoryDefaults, EmbeddedDefaults, Properties,
    CONFIG_PATH_KEY,
};
use cakeshop_config::{BootstrapError, ConfigError};
use std::fs;
use std::path::Path;

use crate::integration::TestLayout;

fn packaged(root: &Path, base: &str, env: &str, env_content: &str) -> DirectoryDefaults {
    let config = root.join("packaged").join("config");
    fs::create_dir_all(&config).unwrap();
    fs::write(config.join("application.properties"), base).unwrap();
    fs::write(
        config.join(format!("application-{}.properties", env)),
        env_content,
    )
    .unwrap();
    DirectoryDefaults::new(root.join("packaged"))
}

#[test]
fn test_seed_is_sorted_union_with_env_winning() {
    let layout = TestLayout::new();
    let defaults = packaged(
        layout.root(),
        "zeta=base\nshared=base\nalpha=base\n",
        "local",
        "shared=local\nmiddle=local\n",
    );
    let settings = layout.settings("local");

    let outcome = ConfigBootstrapper::new(&settings, &defaults)
        .bootstrap()
        .unwrap();

    assert_eq!(outcome.state, BootstrapState::Seeded);
    let config_dir = layout.computed_config_dir("local");
    assert_eq!(
        layout.read_config(&config_dir),
        "alpha=base\nmiddle=local\nshared=local\nzeta=base\n"
    );
}

#[test]
fn test_seed_when_dir_exists_but_file_missing() {
    let layout = TestLayout::new();
    let config_dir = layout.computed_config_dir("local");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("unrelated.txt"), "keep").unwrap();

    let settings = layout.settings("local");
    let defaults = EmbeddedDefaults;
    let outcome = ConfigBootstrapper::new(&settings, &defaults)
        .bootstrap()
        .unwrap();

    assert_eq!(outcome.state, BootstrapState::Seeded);
    assert!(config_dir.join("unrelated.txt").exists());
    assert_eq!(outcome.config.get("geth.auto.start").as_deref(), Some("true"));
}

#[test]
fn test_reconcile_preserves_overrides_and_adds_keys() {
    let layout = TestLayout::new();
    let defaults = packaged(
        layout.root(),
        "base.only=1\n",
        "local",
        "geth.url=http\\://packaged\nnew.key=added\n",
    );
    let config_dir = layout.computed_config_dir("local");
    layout.write_config(&config_dir, "geth.url=http\\://custom\nuser.key=mine\n");

    let settings = layout.settings("local");
    let outcome = ConfigBootstrapper::new(&settings, &defaults)
        .bootstrap()
        .unwrap();

    assert_eq!(outcome.state, BootstrapState::Reconciled);
    let on_disk = Properties::parse(&layout.read_config(&config_dir)).unwrap();
    assert_eq!(on_disk.get("geth.url"), Some("http://custom"));
    assert_eq!(on_disk.get("new.key"), Some("added"));
    assert_eq!(on_disk.get("user.key"), Some("mine"));
    assert!(!on_disk.contains_key("base.only"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let layout = TestLayout::new();
    let settings = layout.settings("production");
    let defaults = EmbeddedDefaults;
    let bootstrapper = ConfigBootstrapper::new(&settings, &defaults);
    let config_dir = layout.computed_config_dir("production");

    bootstrapper.bootstrap().unwrap();
    let first = layout.read_config(&config_dir);
    bootstrapper.bootstrap().unwrap();
    bootstrapper.bootstrap().unwrap();
    assert_eq!(layout.read_config(&config_dir), first);
}

#[test]
fn test_hand_edited_file_is_normalized() {
    let layout = TestLayout::new();
    let config_dir = layout.computed_config_dir("test");
    layout.write_config(
        &config_dir,
        "# my notes\nzz.custom = spaced value\ngeth.url:http://localhost:9999\n",
    );

    let settings = layout.settings("test");
    let defaults = EmbeddedDefaults;
    ConfigBootstrapper::new(&settings, &defaults)
        .bootstrap()
        .unwrap();

    let text = layout.read_config(&config_dir);
    assert!(!text.contains("# my notes"));
    assert!(text.contains("geth.url=http\\://localhost\\:9999\n"));
    assert!(text.ends_with("zz.custom=spaced value\n"));
}

#[test]
fn test_config_path_is_injected() {
    let layout = TestLayout::new();
    let settings = layout.settings("local");
    let defaults = EmbeddedDefaults;
    let outcome = ConfigBootstrapper::new(&settings, &defaults)
        .bootstrap()
        .unwrap();

    let expected = layout.computed_config_dir("local").display().to_string();
    assert_eq!(outcome.config.get(CONFIG_PATH_KEY).as_deref(), Some(expected.as_str()));
    // Synthetic key is not written to the file
    let on_disk = Properties::parse(&layout.read_config(&layout.computed_config_dir("local")))
        .unwrap();
    assert!(!on_disk.contains_key(CONFIG_PATH_KEY));
}

#[test]
fn test_placeholders_resolve_against_config_path() {
    let layout = TestLayout::new();
    let settings = layout.settings("local");
    let defaults = EmbeddedDefaults;
    let outcome = ConfigBootstrapper::new(&settings, &defaults)
        .bootstrap()
        .unwrap();

    let expected = layout
        .computed_config_dir("local")
        .join("geth")
        .display()
        .to_string();
    assert_eq!(outcome.config.get("geth.datadir").as_deref(), Some(expected.as_str()));
    assert_eq!(
        outcome.config.properties().get("geth.datadir"),
        Some(expected.as_str())
    );

    // Persisted file keeps the reference literal
    let on_disk = Properties::parse(&layout.read_config(&layout.computed_config_dir("local")))
        .unwrap();
    assert_eq!(on_disk.get("geth.datadir"), Some("${config.path}/geth"));
}

#[test]
fn test_reconcile_cr_only_user_file_keeps_every_key() {
    let layout = TestLayout::new();
    let config_dir = layout.computed_config_dir("local");
    layout.write_config(&config_dir, "geth.url=http\\://custom\rmy.key=mine\r# note\r");

    let settings = layout.settings("local");
    let defaults = EmbeddedDefaults;
    let outcome = ConfigBootstrapper::new(&settings, &defaults)
        .bootstrap()
        .unwrap();

    assert_eq!(outcome.state, BootstrapState::Reconciled);
    let on_disk = Properties::parse(&layout.read_config(&config_dir)).unwrap();
    assert_eq!(on_disk.get("geth.url"), Some("http://custom"));
    assert_eq!(on_disk.get("my.key"), Some("mine"));
    assert_eq!(on_disk.get("geth.auto.start"), Some("true"));
    assert!(!layout.read_config(&config_dir).contains('\r'));
}

#[test]
fn test_missing_environment_writes_nothing() {
    let layout = TestLayout::new();
    let before = layout.snapshot();

    let settings = layout.settings_without_env();
    let defaults = EmbeddedDefaults;
    let err = ConfigBootstrapper::new(&settings, &defaults)
        .bootstrap()
        .unwrap_err();

    assert!(matches!(
        err,
        BootstrapError::Config(ConfigError::EnvironmentUnset(_))
    ));
    assert_eq!(layout.snapshot(), before);
}

#[test]
fn test_missing_packaged_env_defaults_is_fatal() {
    let layout = TestLayout::new();
    let settings = layout.settings("staging");
    let defaults = EmbeddedDefaults;

    let err = ConfigBootstrapper::new(&settings, &defaults)
        .bootstrap()
        .unwrap_err();
    assert!(matches!(err, BootstrapError::ResourceMissing(_)));
    assert!(!layout
        .computed_config_dir("staging")
        .join("application.properties")
        .exists());
}

#[test]
fn test_malformed_existing_file_is_fatal_and_untouched() {
    let layout = TestLayout::new();
    let config_dir = layout.computed_config_dir("local");
    let content = "ok=1\nbroken=\\uZZZZ\n";
    layout.write_config(&config_dir, content);

    let settings = layout.settings("local");
    let defaults = EmbeddedDefaults;
    let err = ConfigBootstrapper::new(&settings, &defaults)
        .bootstrap()
        .unwrap_err();

    match err {
        BootstrapError::Decode { line, .. } => assert_eq!(line, 2),
        other => panic!("Expected Decode error, got {:?}", other),
    }
    assert_eq!(layout.read_config(&config_dir), content);
}
