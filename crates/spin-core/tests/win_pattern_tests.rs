//! Pruebas de bindings diferidos a win patterns.

use serde_json::json;
use spin_core::injection::{PatternInjection, RoundInjector};

fn binding(from: &str, to: &str, params: serde_json::Value) -> PatternInjection {
    PatternInjection { from: from.into(), to: to.into(), params }
}

#[test]
fn resolution_merges_only_the_matching_pattern_in_arrival_order() {
    let mut injector = RoundInjector::new();
    injector.inject_to_win_pattern(binding("base", "p1", json!({"credit": 10, "tags": ["x"]})));
    injector.inject_to_win_pattern(binding("bonus", "p2", json!({"credit": 99})));
    injector.inject_to_win_pattern(binding("base", "p1", json!({"credit": 20, "tags": ["y"]})));

    let resolved = injector.win_pattern_injections("p1");

    // sólo los dos bindings de p1, mergeados en orden de llegada con la
    // regla por defecto (los arrays appendean)
    assert_eq!(resolved, json!({"credit": 20, "tags": ["x", "y"]}));

    // p2 sigue diferido, no fue un scan destructivo
    let pending = injector.pending_pattern_injections();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].to, "p2");

    let resolved2 = injector.win_pattern_injections("p2");
    assert_eq!(resolved2, json!({"credit": 99}));
    assert!(injector.pending_pattern_injections().is_empty());
}

#[test]
fn resolving_an_unknown_pattern_yields_an_empty_object() {
    let mut injector = RoundInjector::new();
    injector.inject_to_win_pattern(binding("base", "p1", json!({"credit": 10})));

    assert_eq!(injector.win_pattern_injections("nope"), json!({}));
    assert_eq!(injector.pending_pattern_injections().len(), 1);
}

#[test]
fn resolution_records_one_history_entry_per_merged_binding() {
    let mut injector = RoundInjector::new();
    injector.inject_to_win_pattern(binding("a", "p1", json!({"x": 1})));
    injector.inject_to_win_pattern(binding("b", "p1", json!({"y": 2})));

    injector.win_pattern_injections("p1");

    assert_eq!(injector.history().len(), 2);
    assert_eq!(injector.history()[0].updates, json!({"x": 1}));
    assert_eq!(injector.history()[1].updates, json!({"y": 2}));
}
