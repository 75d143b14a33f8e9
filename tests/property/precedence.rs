//! Property-based tests for layer precedence

use cakeshop_config::config::merge::merge_policy::{merge_layers, reconcile, seed, Layer};
use cakeshop_config::config::Properties;
use proptest::collection::btree_map;
use proptest::prelude::*;

fn arb_layer() -> impl Strategy<Value = Properties> {
    btree_map("[a-e]{1,2}", "[a-z0-9]{0,4}", 0..8).prop_map(|m| m.into_iter().collect())
}

/// Every key from either layer survives, and the higher layer wins
#[test]
fn test_reconcile_keeps_union_and_user_wins() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(arb_layer(), arb_layer()), |(env, existing)| {
            let merged = reconcile(env.clone(), existing.clone());
            for (key, value) in env.iter() {
                prop_assert!(merged.contains_key(key));
                if !existing.contains_key(key) {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }
            for (key, value) in existing.iter() {
                prop_assert_eq!(merged.get(key), Some(value));
            }
            prop_assert!(merged.len() <= env.len() + existing.len());
            Ok(())
        })
        .unwrap();
}

/// Env defaults override base defaults on collision
#[test]
fn test_seed_env_wins() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(arb_layer(), arb_layer()), |(base, env)| {
            let merged = seed(base.clone(), env.clone());
            for (key, value) in env.iter() {
                prop_assert_eq!(merged.get(key), Some(value));
            }
            for key in base.keys() {
                prop_assert!(merged.contains_key(key));
            }
            Ok(())
        })
        .unwrap();
}

/// The order layers are supplied in does not matter
#[test]
fn test_layer_order_is_fixed() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(arb_layer(), arb_layer(), arb_layer()),
            |(base, env, user)| {
                let mut given = [
                    (Layer::UserFile, user.clone()),
                    (Layer::BaseDefaults, base.clone()),
                    (Layer::EnvDefaults, env.clone()),
                ];
                let mut sorted = [
                    (Layer::BaseDefaults, base),
                    (Layer::EnvDefaults, env),
                    (Layer::UserFile, user),
                ];
                prop_assert_eq!(merge_layers(&mut given), merge_layers(&mut sorted));
                Ok(())
            },
        )
        .unwrap();
}
