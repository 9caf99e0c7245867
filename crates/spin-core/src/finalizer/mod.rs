//! Pipeline de finalizers condicionados.
//!
//! El dispatcher resuelve la lista de tipos activa para el modo, invoca cada
//! handler en orden (los handlers posteriores observan las mutaciones de los
//! anteriores porque todos leen el mismo bag vivo) y junta los resultados en
//! un `FinalizerReport`. Ninguna falla de handler aborta el resto.

pub mod conditions;

mod base;
mod collectible;
mod function;
mod to_context;

use std::collections::HashMap;

use log::{error, warn};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::errors::RoundCoreError;
use crate::glossary;
use crate::round::RoundContext;

pub use base::BaseFinalizer;
pub use collectible::CollectibleFinalizer;
pub use conditions::{Condition, ConditionRegistry};
pub use function::FunctionFinalizer;
pub use to_context::ToContextFinalizer;

/// Contrato uniforme de un handler de finalizer.
///
/// `check` parsea su propio slice de configuración por `type_name`, evalúa
/// su lista de condiciones como AND y, de pasar, ejecuta exactamente un
/// efecto de dominio. Las mutaciones del bag van siempre a través del
/// injector del contexto, nunca a mano.
pub trait FinalizerHandler {
    fn check(
        &self,
        bag: &mut Value,
        ctx: &mut RoundContext,
        conditions: &ConditionRegistry,
        type_name: &str,
    ) -> Result<Value, RoundCoreError>;
}

/// Resultado por tipo de finalizer ejecutado.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinalizerReport {
    pub finalizer: Map<String, Value>,
}

impl FinalizerReport {
    pub fn into_value(self) -> Value {
        json!({ "finalizer": self.finalizer })
    }

    pub fn result(&self, type_name: &str) -> Option<&Value> {
        self.finalizer.get(type_name)
    }
}

/// Dispatcher: registry de handlers + registry de condiciones.
pub struct FinalizerDispatcher {
    handlers: HashMap<String, Box<dyn FinalizerHandler>>,
    conditions: ConditionRegistry,
}

impl Default for FinalizerDispatcher {
    fn default() -> Self {
        Self::standard()
    }
}

impl FinalizerDispatcher {
    /// Dispatcher con los tipos estándar (`collectible` y `collectible2`
    /// comparten estrategia) y las condiciones estándar.
    pub fn standard() -> Self {
        let mut dispatcher = Self {
            handlers: HashMap::new(),
            conditions: ConditionRegistry::standard(),
        };
        dispatcher.register(glossary::BASE, Box::new(BaseFinalizer));
        dispatcher.register(glossary::COLLECTIBLE, Box::new(CollectibleFinalizer));
        dispatcher.register(glossary::COLLECTIBLE2, Box::new(CollectibleFinalizer));
        dispatcher.register(glossary::FUNCTION, Box::new(FunctionFinalizer));
        dispatcher.register(glossary::TO_CONTEXT, Box::new(ToContextFinalizer));
        dispatcher
    }

    pub fn register(&mut self, type_name: impl Into<String>, handler: Box<dyn FinalizerHandler>) {
        self.handlers.insert(type_name.into(), handler);
    }

    pub fn conditions_mut(&mut self) -> &mut ConditionRegistry {
        &mut self.conditions
    }

    /// Ejecuta los finalizers activos contra el bag vivo.
    ///
    /// Tipos sin handler registrado se saltean con warning; un handler que
    /// falla se registra como `false` y el resto sigue corriendo.
    pub fn finish(&self, bag: &mut Value, ctx: &mut RoundContext) -> FinalizerReport {
        let items = self.items(bag);
        let mut results = Map::new();

        for item in items {
            let Some(handler) = self.handlers.get(&item) else {
                warn!("finalizer type '{item}' not found in the collection");
                continue;
            };
            let value = match handler.check(bag, ctx, &self.conditions, &item) {
                Ok(value) => value,
                Err(e) => {
                    error!("finalizer '{item}' neutralized: {e}");
                    Value::Bool(false)
                }
            };
            results.insert(item, value);
        }

        FinalizerReport { finalizer: results }
    }

    /// Lista de tipos a correr: `settings.finalizer.items` plano, o
    /// `settings.finalizer.items_by_mode[mode]`; sin configuración la lista
    /// es vacía (no es un error).
    fn items(&self, bag: &Value) -> Vec<String> {
        let config = bag.get("settings").and_then(|s| s.get("finalizer"));
        let Some(config) = config else { return Vec::new() };

        let from_list = |value: &Value| -> Vec<String> {
            value
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|i| i.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        };

        if let Some(items) = config.get("items") {
            return from_list(items);
        }
        if let Some(by_mode) = config.get("items_by_mode") {
            let mode = bag.get("mode").and_then(Value::as_str).unwrap_or_default();
            if let Some(items) = by_mode.get(mode) {
                return from_list(items);
            }
        }
        Vec::new()
    }
}
