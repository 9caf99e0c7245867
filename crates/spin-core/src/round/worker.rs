//! Worker: el paso fijo de orquestación dentro del round.
//!
//! Inyecta el outcome crudo del spin en modo current (los arrays del
//! outcome reemplazan, no appendean) y corre el pipeline de finalizers. El
//! reporte del dispatcher se inyecta al bag para que `finalizer.*` sea
//! observable aguas abajo.

use log::error;
use serde_json::{json, Value};

use crate::finalizer::FinalizerDispatcher;
use crate::round::RoundScope;

/// Corre el worker sobre el scope. Un bag malformado loguea y retorna sin
/// efecto, el round simplemente produce un resultado vacío.
pub fn run(scope: &mut RoundScope, dispatcher: &FinalizerDispatcher) {
    let RoundScope { state, ctx } = scope;

    if !state.params.is_object() || state.params.get("settings").is_none() {
        error!("invalid round state: missing settings in params");
        return;
    }

    let outcome = raw_outcome(&state.params);
    ctx.injector.inject_to_current_mode(&mut state.params, outcome);

    let report = dispatcher.finish(&mut state.params, ctx);
    ctx.injector.inject(&mut state.params, report.into_value());
}

/// Outcome crudo del spin: `args.predefined` si el request lo trae, si no
/// el outcome fijo por defecto.
fn raw_outcome(params: &Value) -> Value {
    params
        .get("args")
        .and_then(|a| a.get("predefined"))
        .filter(|p| p.is_object())
        .cloned()
        .unwrap_or_else(|| json!({ "win": { "total": 100 } }))
}
