//! El `RoundInjector`: buffers por scope, cola de deletions, bindings
//! diferidos a win patterns y el commit por round.

use std::collections::HashMap;

use chrono::Utc;
use log::warn;
use serde_json::{Map, Value};

use super::history::InjectionRecord;
use super::merge::merge_update_set;

/// Directiva de borrado tipada (sin claves compuestas por string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionDirective {
    Field(String),
    ChildField { field: String, child: String },
}

/// Binding diferido a un win pattern: `params` queda retenido hasta que
/// alguien resuelva el pattern `to`.
#[derive(Debug, Clone)]
pub struct PatternInjection {
    pub from: String,
    pub to: String,
    pub params: Value,
}

/// Función inyectiva registrada por nombre; el finalizer `function` las
/// resuelve por `"modulo.nombre"` desde su configuración.
pub type InjectiveFn = Box<dyn Fn(&mut Value)>;

/// Motor de inyección de un round.
///
/// Una instancia por round (aislamiento por construcción): el único estado
/// que lógicamente sobrevive al round es el buffer all-modes, que la factory
/// cosecha y vuelve a sembrar en el round siguiente.
#[derive(Default)]
pub struct RoundInjector {
    all: Map<String, Value>,
    next: Map<String, Value>,
    to_delete: Vec<DeletionDirective>,
    to_pattern: Vec<PatternInjection>,
    to_round_state: Map<String, Value>,
    history: Vec<InjectionRecord>,
    injective: HashMap<String, HashMap<String, InjectiveFn>>,
}

impl std::fmt::Debug for RoundInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundInjector")
            .field("all", &self.all)
            .field("next", &self.next)
            .field("to_delete", &self.to_delete)
            .field("to_pattern", &self.to_pattern.len())
            .field("to_round_state", &self.to_round_state)
            .field("history", &self.history.len())
            .finish()
    }
}

impl RoundInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construye un injector sembrado con el buffer all-modes del round
    /// anterior (threading explícito de la factory).
    pub fn with_all_modes(all: Map<String, Value>) -> Self {
        Self { all, ..Self::default() }
    }

    /// Merge inmediato sobre el bag con la regla por defecto (arrays
    /// appendean). Update sets que no son objeto se descartan con warning:
    /// un escritor malformado no aborta el round.
    pub fn inject(&mut self, params: &mut Value, updates: Value) {
        self.merge_into(params, updates, false);
    }

    /// Merge inmediato en modo current: los arrays reemplazan en vez de
    /// appendear.
    pub fn inject_to_current_mode(&mut self, params: &mut Value, updates: Value) {
        self.merge_into(params, updates, true);
    }

    /// Acumula updates para el próximo modo (object-assign: última escritura
    /// gana dentro del buffer, sin append de arrays).
    pub fn inject_to_next_mode(&mut self, updates: Value) {
        Self::assign_into_buffer(&mut self.next, updates, "next-mode");
    }

    /// Acumula updates para todos los modos futuros.
    pub fn inject_to_all_modes(&mut self, updates: Value) {
        Self::assign_into_buffer(&mut self.all, updates, "all-modes");
    }

    /// Encola el borrado de un campo de primer nivel.
    pub fn delete_from_params(&mut self, field: impl Into<String>) {
        self.to_delete.push(DeletionDirective::Field(field.into()));
    }

    /// Encola el borrado de un campo hijo (`field.child`).
    pub fn delete_from_params_child(&mut self, field: impl Into<String>, child: impl Into<String>) {
        self.to_delete.push(DeletionDirective::ChildField { field: field.into(), child: child.into() });
    }

    /// Commit del round: aplica las deletions encoladas, mergea `updates`,
    /// superpone los buffers staged (`all` y luego `next` ganan los empates
    /// con los params recién calculados) y limpia `next` y la cola de
    /// deletions.
    pub fn execute_injections(&mut self, params: &mut Value, updates: Value) {
        self.handle_deletions(params);
        self.to_delete.clear();

        self.merge_into(params, updates, false);

        if let Some(map) = params.as_object_mut() {
            for (k, v) in self.all.clone() {
                map.insert(k, v);
            }
            for (k, v) in std::mem::take(&mut self.next) {
                map.insert(k, v);
            }
        } else {
            self.next.clear();
        }
    }

    /// Difiere un update set hasta que se resuelva el win pattern destino.
    pub fn inject_to_win_pattern(&mut self, item: PatternInjection) {
        self.to_pattern.push(item);
    }

    /// Resuelve un win pattern: mergea en orden de llegada todos los
    /// bindings destinados a `pattern` (misma regla que `inject`), los
    /// retira de la lista diferida y devuelve el resultado. Los bindings de
    /// otros patterns quedan intactos.
    pub fn win_pattern_injections(&mut self, pattern: &str) -> Value {
        let deferred = std::mem::take(&mut self.to_pattern);
        let (matching, rest): (Vec<_>, Vec<_>) = deferred.into_iter().partition(|i| i.to == pattern);
        self.to_pattern = rest;

        let mut result = Value::Object(Map::new());
        for item in matching {
            self.merge_into(&mut result, item.params, false);
        }
        result
    }

    /// Acumula updates destinados al round state persistido.
    pub fn add_injections_to_round_state(&mut self, updates: Value) {
        Self::assign_into_buffer(&mut self.to_round_state, updates, "round-state");
    }

    /// Flush explícito del buffer de round state: mergea lo acumulado en un
    /// objeto fresco (misma regla que `inject`) y vacía el buffer.
    pub fn execute_injections_to_round_state(&mut self) -> Value {
        let staged = std::mem::take(&mut self.to_round_state);
        let mut result = Value::Object(Map::new());
        self.merge_into(&mut result, Value::Object(staged), false);
        result
    }

    /// History de merges, en orden de aplicación.
    pub fn history(&self) -> &[InjectionRecord] {
        &self.history
    }

    /// Deletions pendientes de flush.
    pub fn pending_deletions(&self) -> &[DeletionDirective] {
        &self.to_delete
    }

    /// Bindings diferidos todavía no resueltos.
    pub fn pending_pattern_injections(&self) -> &[PatternInjection] {
        &self.to_pattern
    }

    /// Vista del buffer all-modes.
    pub fn all_modes(&self) -> &Map<String, Value> {
        &self.all
    }

    /// Cosecha el buffer all-modes al cierre del round (lo consume la
    /// factory para sembrarlo en el round siguiente).
    pub fn take_all_modes(&mut self) -> Map<String, Value> {
        std::mem::take(&mut self.all)
    }

    /// Superpone el buffer all-modes sobre un bag recién construido
    /// (aplicación a tiempo de construcción; no pasa por la History).
    pub fn overlay_all_modes(&self, params: &mut Value) {
        if let Some(map) = params.as_object_mut() {
            for (k, v) in self.all.clone() {
                map.insert(k, v);
            }
        }
    }

    /// Registra funciones inyectivas bajo un módulo.
    pub fn add_injective_functions(&mut self, module: impl Into<String>, functions: Vec<(String, InjectiveFn)>) {
        let entry = self.injective.entry(module.into()).or_default();
        for (name, f) in functions {
            entry.insert(name, f);
        }
    }

    pub fn injective_function(&self, module: &str, name: &str) -> Option<&InjectiveFn> {
        self.injective.get(module).and_then(|m| m.get(name))
    }

    /// Merge interno: valida forma, registra el set pre-trim en la History y
    /// aplica la regla append-vs-replace.
    fn merge_into(&mut self, target: &mut Value, updates: Value, replace_arrays: bool) {
        let updates = match updates {
            Value::Object(map) => map,
            other => {
                warn!("discarding non-object update set: {other:?}");
                return;
            }
        };
        let Some(target_map) = target.as_object_mut() else {
            warn!("injection target is not an object, update set discarded");
            return;
        };

        self.history.push(InjectionRecord {
            seq: self.history.len() as u64,
            updates: Value::Object(updates.clone()),
            ts: Utc::now(),
        });

        merge_update_set(target_map, updates, replace_arrays);
    }

    fn handle_deletions(&self, params: &mut Value) {
        let Some(map) = params.as_object_mut() else { return };
        for directive in &self.to_delete {
            match directive {
                DeletionDirective::Field(name) => {
                    map.remove(name);
                }
                DeletionDirective::ChildField { field, child } => {
                    if let Some(Value::Object(inner)) = map.get_mut(field) {
                        inner.remove(child);
                    }
                }
            }
        }
    }

    fn assign_into_buffer(buffer: &mut Map<String, Value>, updates: Value, scope: &str) {
        let Value::Object(updates) = updates else {
            warn!("discarding non-object update set staged for {scope}");
            return;
        };
        for (k, v) in updates {
            buffer.insert(k, v);
        }
    }
}
