//! Bootstrap de demostración: arma un `RoundService` con configuración
//! inline, corre un par de rounds y muestra el resultado observable.

use serde_json::json;
use spin_core::model::{RoundArgs, RoundConfig};
use spin_core::round::RoundService;

fn main() {
    let config = RoundConfig {
        mode: "base".into(),
        settings: json!({
            "finalizer": {
                "items_by_mode": {
                    "base": ["base", "collectible"],
                    "bonus": ["base"],
                },
                "base": { "conditions": ["has_win"] },
                "collectible": {
                    "conditions": ["has_win", "less_than_max_value"],
                    "step": 1,
                    "max": 5,
                    "name": "gems",
                },
            },
        }),
    };

    let mut service = RoundService::new(config);

    // un round con el outcome fijo del worker y otro con outcome forzado
    let result = service.go(&RoundArgs::default());
    println!("Resultado round 1: {result:?}");

    let forced = RoundArgs {
        predefined: Some(json!({ "win": { "total": 0 } })),
        ..Default::default()
    };
    let result = service.go(&forced);
    println!("Resultado round 2 (sin win): {result:?}");
}
