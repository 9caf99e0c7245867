//! Estado vivo de un round.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::model::{build_bag, RoundArgs};
use crate::round::RoundContext;

/// Dueño del parameter bag de un round.
///
/// El bag se construye como `{args, settings, mode}` y de ahí en adelante se
/// muta exclusivamente a través del injector del contexto; `RoundState` no
/// implementa merges propios.
#[derive(Debug)]
pub struct RoundState {
    pub round_id: Uuid,
    pub params: Value,
}

impl RoundState {
    pub fn new(args: &RoundArgs, settings: &Value, mode: &str) -> Self {
        Self {
            round_id: Uuid::new_v4(),
            params: build_bag(args, settings, mode),
        }
    }

    /// Resultado observable: `params.contexts` (objeto vacío si no existe).
    pub fn contexts(&self) -> Value {
        self.params
            .get("contexts")
            .cloned()
            .unwrap_or(Value::Object(Map::new()))
    }

    /// Flush explícito del buffer de round-state persistido: devuelve el
    /// merge acumulado para que el entorno lo persista donde corresponda.
    pub fn flush_persisted(&self, ctx: &mut RoundContext) -> Value {
        ctx.injector.execute_injections_to_round_state()
    }
}
