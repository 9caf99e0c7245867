//! Resultado observable de un round.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Único contrato de salida del orquestador: `{contexts}`.
/// Ante cualquier falla interna el round colapsa a `RoundResult::default()`
/// (`contexts` objeto vacío), nunca a un error propagado.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundResult {
    pub contexts: Value,
}

impl Default for RoundResult {
    fn default() -> Self {
        Self { contexts: Value::Object(Map::new()) }
    }
}
