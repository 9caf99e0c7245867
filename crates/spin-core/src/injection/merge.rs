//! Regla de merge de update sets.
//!
//! La distinción append/replace es estructural (ambos lados secuencia), no un
//! registry de tipos: cualquier escritor opta por semántica de append con
//! sólo producir un array para un campo que ya es array en el destino.

use serde_json::{Map, Value};

/// Mergea `updates` sobre `target` campo a campo, en orden de inserción.
///
/// Con `replace_arrays = false`, si el destino y el valor entrante son ambos
/// arrays, los elementos entrantes se agregan al final del array existente y
/// el campo no sobreescribe. Todo el resto (incluidos arrays con
/// `replace_arrays = true`) sobreescribe el valor previo.
pub fn merge_update_set(target: &mut Map<String, Value>, updates: Map<String, Value>, replace_arrays: bool) {
    for (key, value) in updates {
        if !replace_arrays {
            if let Value::Array(incoming) = &value {
                if let Some(Value::Array(existing)) = target.get_mut(&key) {
                    existing.extend(incoming.iter().cloned());
                    continue;
                }
            }
        }
        target.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn arrays_append_by_default() {
        let mut target = as_map(json!({"triggered": ["a"], "win": 1}));
        merge_update_set(&mut target, as_map(json!({"triggered": ["b"], "win": 2})), false);
        assert_eq!(Value::Object(target), json!({"triggered": ["a", "b"], "win": 2}));
    }

    #[test]
    fn arrays_replace_in_current_mode() {
        let mut target = as_map(json!({"triggered": ["a"]}));
        merge_update_set(&mut target, as_map(json!({"triggered": ["b"]})), true);
        assert_eq!(Value::Object(target), json!({"triggered": ["b"]}));
    }

    #[test]
    fn array_over_non_array_replaces() {
        // sólo secuencia-sobre-secuencia appendea; array nuevo o sobre escalar
        // sobreescribe
        let mut target = as_map(json!({"x": 1}));
        merge_update_set(&mut target, as_map(json!({"x": ["a"], "y": ["b"]})), false);
        assert_eq!(Value::Object(target), json!({"x": ["a"], "y": ["b"]}));
    }
}
