//! Configuración tipada en el borde.
//!
//! Dentro del bag, `settings` viaja como JSON neutro; cada handler parsea su
//! propio slice con serde al momento de usarlo. Acá viven los tipos de ese
//! parseo y la configuración de arranque del servicio.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::RoundCoreError;

/// Configuración de arranque de un `RoundService`: modo activo + settings
/// completos (incluido `settings.finalizer`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundConfig {
    pub mode: String,
    #[serde(default)]
    pub settings: Value,
}

impl RoundConfig {
    /// Parsea la configuración desde JSON crudo.
    pub fn from_value(value: Value) -> Result<Self, RoundCoreError> {
        serde_json::from_value(value)
            .map_err(|e| RoundCoreError::ConfigurationInvalid("round_config".into(), e.to_string()))
    }
}

/// Slice de configuración de un finalizer concreto
/// (`settings.finalizer.<type_name>`).
///
/// Tolerante por diseño: campos ausentes quedan en `None` y cada handler
/// decide cuáles son obligatorios para él.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinalizerEntry {
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Referencia `"modulo.funcion"` al registry de funciones inyectivas.
    #[serde(default, rename = "fn", skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    /// Payload devuelto por el tipo `to_context`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_context: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FinalizerEntry {
    /// Lee y parsea el slice `settings.finalizer.<type_name>` del bag.
    /// `Ok(None)` si el slice no existe; `ConfigurationInvalid` si existe
    /// pero no tiene la forma esperada.
    pub fn from_bag(bag: &Value, type_name: &str) -> Result<Option<Self>, RoundCoreError> {
        let Some(slice) = bag
            .get("settings")
            .and_then(|s| s.get("finalizer"))
            .and_then(|f| f.get(type_name))
        else {
            return Ok(None);
        };
        serde_json::from_value(slice.clone())
            .map(Some)
            .map_err(|e| RoundCoreError::ConfigurationInvalid(type_name.into(), e.to_string()))
    }
}
