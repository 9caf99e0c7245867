//! Finalizer `collectible`: acumulación por pasos + emisión de feature.

use log::warn;
use serde_json::Value;

use crate::errors::RoundCoreError;
use crate::featurer::FeatureRecord;
use crate::glossary;
use crate::model::FinalizerEntry;
use crate::round::RoundContext;

use super::{ConditionRegistry, FinalizerHandler};

/// Suma `step` al acumulador de stats del tipo y emite un `FeatureRecord`
/// con el valor alcanzado. `collectible` y `collectible2` comparten esta
/// estrategia, cada uno acumula bajo su propio `type_name`.
pub struct CollectibleFinalizer;

impl FinalizerHandler for CollectibleFinalizer {
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

        let step = entry.step.ok_or_else(|| {
            RoundCoreError::ConfigurationInvalid(type_name.into(), "missing 'step'".into())
        })?;
        let name = entry.name.clone().ok_or_else(|| {
            RoundCoreError::ConfigurationInvalid(type_name.into(), "missing 'name'".into())
        })?;

        if !conditions.evaluate_all(&entry.conditions, bag, ctx) {
            return Ok(Value::Bool(false));
        }

        ctx.stats.update_collectible(type_name, step);
        let value = ctx.stats.value(type_name).unwrap_or(0.0);
        ctx.featurer.add(FeatureRecord {
            kind: glossary::COLLECTIBLE.into(),
            name,
            value,
        });
        Ok(Value::Bool(true))
    }
}
