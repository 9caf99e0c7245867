//! Construcción del parameter bag.
//!
//! El bag es JSON neutro (`serde_json::Value` objeto): el motor no interpreta
//! la semántica de los campos, sólo aplica la regla de merge sobre ellos.
//! Con `preserve_order` los update sets mantienen orden de inserción, que es
//! observable a través de la History.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Argumentos de creación de un round (el DTO externo).
///
/// `predefined` transporta un outcome forzado para el worker; el resto de
/// campos viaja opaco dentro de `args` en el bag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predefined: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Arma el bag inicial `{args, settings, mode}`.
pub fn build_bag(args: &RoundArgs, settings: &Value, mode: &str) -> Value {
    json!({
        "args": serde_json::to_value(args).unwrap_or(Value::Null),
        "settings": settings,
        "mode": mode,
    })
}
