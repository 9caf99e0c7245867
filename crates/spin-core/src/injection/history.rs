//! History append-only de merges ejecutados.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Registro inmutable de un update set efectivamente mergeado.
///
/// `updates` es el set tal como fue entregado por el escritor (pre-trim):
/// los campos redirigidos a append quedan registrados igual que los que
/// sobreescribieron. `ts` es metadato, no participa de ninguna comparación.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectionRecord {
    pub seq: u64,
    pub updates: Value,
    pub ts: DateTime<Utc>,
}
