//! Pruebas del dispatcher y de los handlers estándar.

use serde_json::{json, Map, Value};
use spin_core::errors::RoundCoreError;
use spin_core::finalizer::{ConditionRegistry, FinalizerDispatcher, FinalizerHandler};
use spin_core::glossary;
use spin_core::round::RoundContext;

fn ctx() -> RoundContext {
    RoundContext::new("base")
}

#[test]
fn empty_config_yields_empty_report_without_error() {
    let dispatcher = FinalizerDispatcher::standard();
    let mut bag = json!({"mode": "base", "settings": {}});

    let report = dispatcher.finish(&mut bag, &mut ctx());

    assert!(report.finalizer.is_empty());
}

#[test]
fn items_by_mode_selects_the_active_mode_list() {
    let dispatcher = FinalizerDispatcher::standard();
    let mut bag = json!({
        "mode": "bonus",
        "win": {"total": 50},
        "settings": {"finalizer": {
            "items_by_mode": {"bonus": ["base"], "base": []},
            "base": {"conditions": ["has_win"]},
        }},
    });

    let report = dispatcher.finish(&mut bag, &mut ctx());

    assert_eq!(report.result("base"), Some(&json!(true)));
    assert_eq!(bag["contexts"], json!(["1"]));
}

#[test]
fn unknown_handler_names_are_skipped_with_no_result() {
    let dispatcher = FinalizerDispatcher::standard();
    let mut bag = json!({
        "mode": "base",
        "win": {"total": 50},
        "settings": {"finalizer": {
            "items": ["no_such_type", "base"],
            "base": {"conditions": ["has_win"]},
        }},
    });

    let report = dispatcher.finish(&mut bag, &mut ctx());

    assert!(report.result("no_such_type").is_none());
    assert_eq!(report.result("base"), Some(&json!(true)));
}

#[test]
fn base_without_config_slice_reports_false() {
    let dispatcher = FinalizerDispatcher::standard();
    let mut bag = json!({
        "mode": "base",
        "settings": {"finalizer": {"items": ["base"]}},
    });

    let report = dispatcher.finish(&mut bag, &mut ctx());

    assert_eq!(report.result("base"), Some(&json!(false)));
}

#[test]
fn failing_condition_means_no_effect() {
    let dispatcher = FinalizerDispatcher::standard();
    let mut bag = json!({
        "mode": "base",
        "settings": {"finalizer": {
            "items": ["base"],
            "base": {"conditions": ["has_win"]},
        }},
    });

    let report = dispatcher.finish(&mut bag, &mut ctx());

    assert_eq!(report.result("base"), Some(&json!(false)));
    assert!(bag.get("contexts").is_none());
}

#[test]
fn handler_fault_is_neutralized_to_false_and_the_rest_still_runs() {
    struct Faulty;
    impl FinalizerHandler for Faulty {
        fn check(
            &self,
            _bag: &mut Value,
            _ctx: &mut RoundContext,
            _conditions: &ConditionRegistry,
            type_name: &str,
        ) -> Result<Value, RoundCoreError> {
            Err(RoundCoreError::HandlerFault(type_name.into(), "boom".into()))
        }
    }

    let mut dispatcher = FinalizerDispatcher::standard();
    dispatcher.register("faulty", Box::new(Faulty));

    let mut bag = json!({
        "mode": "base",
        "win": {"total": 50},
        "settings": {"finalizer": {
            "items": ["faulty", "base"],
            "base": {"conditions": ["has_win"]},
        }},
    });

    let report = dispatcher.finish(&mut bag, &mut ctx());

    assert_eq!(report.result("faulty"), Some(&json!(false)));
    assert_eq!(report.result("base"), Some(&json!(true)));
}

#[test]
fn later_handlers_observe_earlier_injections() {
    // A inyecta win.total, la condición de B depende de ese valor
    struct InjectWin;
    impl FinalizerHandler for InjectWin {
        fn check(
            &self,
            bag: &mut Value,
            ctx: &mut RoundContext,
            _conditions: &ConditionRegistry,
            _type_name: &str,
        ) -> Result<Value, RoundCoreError> {
            ctx.injector.inject(bag, json!({"win": {"total": 100}}));
            Ok(Value::Bool(true))
        }
    }

    let mut dispatcher = FinalizerDispatcher::standard();
    dispatcher.register("inject_win", Box::new(InjectWin));

    let mut bag = json!({
        "mode": "base",
        "settings": {"finalizer": {
            "items": ["inject_win", "base"],
            "base": {"conditions": ["has_win"]},
        }},
    });

    let report = dispatcher.finish(&mut bag, &mut ctx());

    assert_eq!(report.result("inject_win"), Some(&json!(true)));
    assert_eq!(report.result("base"), Some(&json!(true)));
    assert_eq!(bag["contexts"], json!(["1"]));
}

#[test]
fn collectible_accumulates_and_emits_a_feature() {
    let dispatcher = FinalizerDispatcher::standard();
    let mut context = ctx();
    let mut bag = json!({
        "mode": "base",
        "win": {"total": 50},
        "settings": {"finalizer": {
            "items": ["collectible", "collectible"],
            "collectible": {
                "conditions": ["has_win", "less_than_max_value"],
                "step": 2,
                "max": 10,
                "name": "gems",
            },
        }},
    });

    let report = dispatcher.finish(&mut bag, &mut context);

    assert_eq!(report.result("collectible"), Some(&json!(true)));
    // dos corridas del item: 2 + 2
    assert_eq!(context.stats.value(glossary::COLLECTIBLE), Some(4.0));

    let records = context.featurer.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind, glossary::COLLECTIBLE);
    assert_eq!(records[0].name, "gems");
    assert_eq!(records[0].value, 2.0);
    assert_eq!(records[1].value, 4.0);
}

#[test]
fn collectible_stops_at_the_configured_max() {
    let dispatcher = FinalizerDispatcher::standard();
    let mut context = ctx();
    context.stats.set_value(glossary::COLLECTIBLE, 10.0);

    let mut bag = json!({
        "mode": "base",
        "win": {"total": 50},
        "settings": {"finalizer": {
            "items": ["collectible"],
            "collectible": {
                "conditions": ["less_than_max_value"],
                "step": 2,
                "max": 10,
                "name": "gems",
            },
        }},
    });

    let report = dispatcher.finish(&mut bag, &mut context);

    assert_eq!(report.result("collectible"), Some(&json!(false)));
    assert!(context.featurer.records().is_empty());
}

#[test]
fn collectible_with_missing_step_is_a_neutralized_config_error() {
    let dispatcher = FinalizerDispatcher::standard();
    let mut bag = json!({
        "mode": "base",
        "settings": {"finalizer": {
            "items": ["collectible"],
            "collectible": {"conditions": [], "name": "gems"},
        }},
    });

    let report = dispatcher.finish(&mut bag, &mut ctx());

    assert_eq!(report.result("collectible"), Some(&json!(false)));
}

#[test]
fn function_type_invokes_a_registered_injective_function() {
    let dispatcher = FinalizerDispatcher::standard();
    let mut context = ctx();
    context.injector.add_injective_functions(
        "bonus",
        vec![(
            "grant".to_string(),
            Box::new(|bag: &mut Value| {
                if let Some(map) = bag.as_object_mut() {
                    map.insert("granted".into(), json!(true));
                }
            }) as _,
        )],
    );

    let mut bag = json!({
        "mode": "base",
        "settings": {"finalizer": {
            "items": ["function"],
            "function": {"conditions": [], "fn": "bonus.grant"},
        }},
    });

    let report = dispatcher.finish(&mut bag, &mut context);

    assert_eq!(report.result("function"), Some(&json!(true)));
    assert_eq!(bag["granted"], json!(true));
}

#[test]
fn function_type_with_unregistered_fn_reports_false() {
    let dispatcher = FinalizerDispatcher::standard();
    let mut bag = json!({
        "mode": "base",
        "settings": {"finalizer": {
            "items": ["function"],
            "function": {"conditions": [], "fn": "bonus.grant"},
        }},
    });

    let report = dispatcher.finish(&mut bag, &mut ctx());

    assert_eq!(report.result("function"), Some(&json!(false)));
}

#[test]
fn to_context_returns_the_configured_payload() {
    let dispatcher = FinalizerDispatcher::standard();
    let mut bag = json!({
        "mode": "base",
        "win": {"total": 50},
        "settings": {"finalizer": {
            "items": ["to_context"],
            "to_context": {
                "conditions": ["has_win"],
                "to_context": {"bonus_round": true},
            },
        }},
    });

    let report = dispatcher.finish(&mut bag, &mut ctx());

    assert_eq!(report.result("to_context"), Some(&json!({"bonus_round": true})));
    // no muta el bag: el payload es para el caller
    assert!(bag.get("bonus_round").is_none());
}

#[test]
fn report_serializes_under_the_finalizer_key() {
    let mut finalizer = Map::new();
    finalizer.insert("base".into(), json!(true));
    let report = spin_core::FinalizerReport { finalizer };

    assert_eq!(report.into_value(), json!({"finalizer": {"base": true}}));
}
