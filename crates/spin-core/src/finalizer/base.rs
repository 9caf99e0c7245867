//! Finalizer `base`: inyección simple condicionada.

use log::warn;
use serde_json::{json, Value};

use crate::errors::RoundCoreError;
use crate::model::FinalizerEntry;
use crate::round::RoundContext;

use super::{ConditionRegistry, FinalizerHandler};

/// Si sus condiciones pasan, inyecta `{"contexts": ["1"]}` en el bag a
/// través del injector (merge por defecto: si `contexts` ya es un array, el
/// contexto nuevo se appendea).
pub struct BaseFinalizer;

impl FinalizerHandler for BaseFinalizer {
    fn check(
        &self,
        bag: &mut Value,
        ctx: &mut RoundContext,
        conditions: &ConditionRegistry,
        type_name: &str,
    ) -> Result<Value, RoundCoreError> {
        let Some(entry) = FinalizerEntry::from_bag(bag, type_name)? else {
            warn!("finalizer base configuration is missing");
            return Ok(Value::Bool(false));
        };

        if !conditions.evaluate_all(&entry.conditions, bag, ctx) {
            return Ok(Value::Bool(false));
        }

        ctx.injector.inject(bag, json!({ "contexts": ["1"] }));
        Ok(Value::Bool(true))
    }
}
