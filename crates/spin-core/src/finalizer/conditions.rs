//! Condiciones estándar y su registry.
//!
//! Una condición es una lectura pura del bag + contexto que resuelve a bool
//! y falla cerrada: cualquier input ausente o malformado es `false`, nunca
//! un error que escape de su frontera.

use std::collections::HashMap;

use log::warn;
use serde_json::Value;

use crate::glossary;
use crate::round::RoundContext;

/// Predicado puro sobre el snapshot del bag.
pub trait Condition {
    fn evaluate(&self, bag: &Value, ctx: &RoundContext) -> bool;
}

/// Registry de condiciones por nombre, poblado desde el set fijo de
/// `glossary` (más las que registre el entorno).
#[derive(Default)]
pub struct ConditionRegistry {
    inner: HashMap<String, Box<dyn Condition>>,
}

impl ConditionRegistry {
    /// Registry con las condiciones estándar.
    pub fn standard() -> Self {
        let mut registry = Self::default();
        registry.register(glossary::HAS_WIN, Box::new(HasWin));
        registry.register(glossary::IS_FINISHED, Box::new(IsFinished));
        registry.register(glossary::LESS_THAN_MAX_VALUE, Box::new(LessThanMaxValue));
        registry.register(glossary::PREVIOUS_WIN_SMALLER, Box::new(PreviousWinSmaller));
        registry.register(glossary::IS_NOT_FIRST_SPIN, Box::new(IsNotFirstSpin));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, condition: Box<dyn Condition>) {
        self.inner.insert(name.into(), condition);
    }

    /// Conjunción AND en el orden configurado, con short-circuit en el
    /// primer `false`. Un nombre sin implementación cuenta como `false` con
    /// warning, nunca como error.
    pub fn evaluate_all(&self, names: &[String], bag: &Value, ctx: &RoundContext) -> bool {
        names.iter().all(|name| match self.inner.get(name) {
            Some(condition) => condition.evaluate(bag, ctx),
            None => {
                warn!("condition '{name}' is not defined");
                false
            }
        })
    }
}

fn win_total(bag: &Value) -> Option<f64> {
    bag.get("win").and_then(|w| w.get("total")).and_then(Value::as_f64)
}

/// `win.total > 0`.
struct HasWin;

impl Condition for HasWin {
    fn evaluate(&self, bag: &Value, _ctx: &RoundContext) -> bool {
        win_total(bag).map(|t| t > 0.0).unwrap_or(false)
    }
}

/// `features.finished` es true.
struct IsFinished;

impl Condition for IsFinished {
    fn evaluate(&self, bag: &Value, _ctx: &RoundContext) -> bool {
        bag.get("features")
            .and_then(|f| f.get("finished"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// El acumulador `collectible` todavía no llegó al `max` configurado en
/// `settings.finalizer.collectible`.
struct LessThanMaxValue;

impl Condition for LessThanMaxValue {
    fn evaluate(&self, bag: &Value, ctx: &RoundContext) -> bool {
        let max = bag
            .get("settings")
            .and_then(|s| s.get("finalizer"))
            .and_then(|f| f.get(glossary::COLLECTIBLE))
            .and_then(|c| c.get("max"))
            .and_then(Value::as_f64);
        let Some(max) = max else {
            warn!("invalid finalizer config or max value for '{}'", glossary::COLLECTIBLE);
            return false;
        };
        let current = ctx.stats.value(glossary::COLLECTIBLE).unwrap_or(0.0);
        current < max
    }
}

/// El win actual supera al anterior registrado en stats.
struct PreviousWinSmaller;

impl Condition for PreviousWinSmaller {
    fn evaluate(&self, bag: &Value, ctx: &RoundContext) -> bool {
        match (win_total(bag), ctx.stats.value(glossary::STAT_PREV_WIN)) {
            (Some(total), Some(prev)) => total > prev,
            _ => false,
        }
    }
}

/// Hay spins consumidos: `total > rest` (ambos 0 por defecto).
struct IsNotFirstSpin;

impl Condition for IsNotFirstSpin {
    fn evaluate(&self, _bag: &Value, ctx: &RoundContext) -> bool {
        let total = ctx.stats.value(glossary::STAT_TOTAL).unwrap_or(0.0);
        let rest = ctx.stats.value(glossary::STAT_REST).unwrap_or(0.0);
        total > rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::RoundContext;
    use serde_json::json;

    fn ctx() -> RoundContext {
        RoundContext::new("base")
    }

    #[test]
    fn has_win_fails_closed_on_missing_fields() {
        let registry = ConditionRegistry::standard();
        let names = vec![glossary::HAS_WIN.to_string()];
        assert!(!registry.evaluate_all(&names, &json!({}), &ctx()));
        assert!(!registry.evaluate_all(&names, &json!({"win": {}}), &ctx()));
        assert!(!registry.evaluate_all(&names, &json!({"win": {"total": "x"}}), &ctx()));
        assert!(registry.evaluate_all(&names, &json!({"win": {"total": 10}}), &ctx()));
    }

    #[test]
    fn unknown_condition_counts_as_false() {
        let registry = ConditionRegistry::standard();
        let names = vec!["no_such_condition".to_string()];
        assert!(!registry.evaluate_all(&names, &json!({}), &ctx()));
    }

    #[test]
    fn empty_conjunction_is_true() {
        let registry = ConditionRegistry::standard();
        assert!(registry.evaluate_all(&[], &json!({}), &ctx()));
    }

    #[test]
    fn less_than_max_value_reads_config_and_stats() {
        let registry = ConditionRegistry::standard();
        let names = vec![glossary::LESS_THAN_MAX_VALUE.to_string()];
        let bag = json!({"settings": {"finalizer": {"collectible": {"max": 3}}}});

        let mut context = ctx();
        assert!(registry.evaluate_all(&names, &bag, &context));

        context.stats.set_value(glossary::COLLECTIBLE, 3.0);
        assert!(!registry.evaluate_all(&names, &bag, &context));

        // sin max configurado: falla cerrada
        assert!(!registry.evaluate_all(&names, &json!({}), &context));
    }

    #[test]
    fn previous_win_smaller_requires_both_values() {
        let registry = ConditionRegistry::standard();
        let names = vec![glossary::PREVIOUS_WIN_SMALLER.to_string()];
        let bag = json!({"win": {"total": 50}});

        let mut context = ctx();
        assert!(!registry.evaluate_all(&names, &bag, &context));

        context.stats.set_value(glossary::STAT_PREV_WIN, 20.0);
        assert!(registry.evaluate_all(&names, &bag, &context));
        context.stats.set_value(glossary::STAT_PREV_WIN, 80.0);
        assert!(!registry.evaluate_all(&names, &bag, &context));
    }
}
