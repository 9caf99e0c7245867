//! Finalizer `function`: invoca una función inyectiva registrada.

use log::warn;
use serde_json::Value;

use crate::errors::RoundCoreError;
use crate::model::FinalizerEntry;
use crate::round::RoundContext;

use super::{ConditionRegistry, FinalizerHandler};

/// Resuelve `fn: "modulo.nombre"` contra el registry de funciones del
/// injector y la ejecuta sobre el bag si las condiciones pasan. La función
/// no puede tocar el contexto, sólo el bag.
pub struct FunctionFinalizer;

impl FinalizerHandler for FunctionFinalizer {
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

        let reference = entry.function.clone().ok_or_else(|| {
            RoundCoreError::ConfigurationInvalid(type_name.into(), "missing 'fn'".into())
        })?;
        let Some((module, name)) = reference.split_once('.') else {
            return Err(RoundCoreError::ConfigurationInvalid(
                type_name.into(),
                format!("'fn' must be 'module.name', got '{reference}'"),
            ));
        };

        if !conditions.evaluate_all(&entry.conditions, bag, ctx) {
            return Ok(Value::Bool(false));
        }

        let Some(function) = ctx.injector.injective_function(module, name) else {
            warn!("injective function '{reference}' is not registered");
            return Ok(Value::Bool(false));
        };
        function(bag);
        Ok(Value::Bool(true))
    }
}
