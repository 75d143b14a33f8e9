//! Property-based tests for determinism guarantees

use cakeshop_config::config::{persist, Properties};
use proptest::collection::btree_map;
use proptest::prelude::*;
use tempfile::TempDir;

fn arb_properties() -> impl Strategy<Value = Properties> {
    btree_map(any::<String>(), any::<String>(), 0..12).prop_map(|m| m.into_iter().collect())
}

/// Rendering then parsing yields the same set
#[test]
fn test_text_round_trip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&arb_properties(), |props| {
            let parsed = Properties::parse(&props.to_text()).unwrap();
            prop_assert_eq!(parsed, props);
            Ok(())
        })
        .unwrap();
}

/// Rendering depends only on content, not insertion order
#[test]
fn test_render_ignores_insertion_order() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &btree_map("[a-z.]{1,12}", "[ -~]{0,16}", 0..10),
            |map| {
                let forward: Properties = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                let reverse: Properties = map
                    .iter()
                    .rev()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                prop_assert_eq!(forward.to_text(), reverse.to_text());
                Ok(())
            },
        )
        .unwrap();
}

/// Persisting a file's own contents again leaves it byte-identical
#[test]
fn test_persist_idempotent() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&arb_properties(), |props| {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("application.properties");

            persist(&props, &path).unwrap();
            let first = std::fs::read(&path).unwrap();

            let reloaded = Properties::load_file(&path).unwrap();
            persist(&reloaded, &path).unwrap();
            let second = std::fs::read(&path).unwrap();

            prop_assert_eq!(first, second);
            Ok(())
        })
        .unwrap();
}
