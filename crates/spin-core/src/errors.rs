//! Errores del core de rounds (taxonomía fija, ver política de neutralización
//! en `finalizer` y `round::service`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum RoundCoreError {
    #[error("no registered implementation for '{0}'")] ConfigurationMissing(String),
    #[error("invalid configuration for '{0}': {1}")] ConfigurationInvalid(String, String),
    #[error("handler '{0}' failed: {1}")] HandlerFault(String, String),
    #[error("orchestration fault: {0}")] OrchestrationFault(String),
    #[error("internal: {0}")] Internal(String),
}
