//! Finalizer `to_context`: devuelve un payload de contexto al caller.

use log::warn;
use serde_json::Value;

use crate::errors::RoundCoreError;
use crate::model::FinalizerEntry;
use crate::round::RoundContext;

use super::{ConditionRegistry, FinalizerHandler};

/// No muta el bag: si las condiciones pasan devuelve el payload
/// `to_context` configurado para que el caller decida dónde mergearlo.
pub struct ToContextFinalizer;

impl FinalizerHandler for ToContextFinalizer {
    fn check(
        &self,
        bag: &mut Value,
        ctx: &mut RoundContext,
        conditions: &ConditionRegistry,
        type_name: &str,
    ) -> Result<Value, RoundCoreError> {
        let Some(entry) = FinalizerEntry::from_bag(bag, type_name)? else {
            warn!("finalizer configuration for type '{type_name}' not found");
            return Ok(Value::Bool(false));
        };

        if !conditions.evaluate_all(&entry.conditions, bag, ctx) {
            return Ok(Value::Bool(false));
        }

        Ok(entry.to_context.unwrap_or(Value::Bool(false)))
    }
}
