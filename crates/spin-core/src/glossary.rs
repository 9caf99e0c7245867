//! Nombres canónicos de tipos de finalizer y condiciones.
//!
//! El conjunto es fijo y enumerable: los registries se pueblan al construir
//! el scope a partir de estas constantes, nunca por reflexión.

/// Tipos de finalizer registrables.
pub const BASE: &str = "base";
pub const COLLECTIBLE: &str = "collectible";
pub const COLLECTIBLE2: &str = "collectible2";
pub const FUNCTION: &str = "function";
pub const TO_CONTEXT: &str = "to_context";

/// Condiciones estándar.
pub const HAS_WIN: &str = "has_win";
pub const IS_FINISHED: &str = "is_finished";
pub const LESS_THAN_MAX_VALUE: &str = "less_than_max_value";
pub const PREVIOUS_WIN_SMALLER: &str = "previous_win_smaller";
pub const IS_NOT_FIRST_SPIN: &str = "is_not_first_spin";

/// Claves de stats consumidas por las condiciones estándar.
pub const STAT_PREV_WIN: &str = "prev_win";
pub const STAT_TOTAL: &str = "total";
pub const STAT_REST: &str = "rest";

/// Lista de tipos de finalizer con implementación estándar.
pub fn standard_finalizer_types() -> [&'static str; 5] {
    [BASE, COLLECTIBLE, COLLECTIBLE2, FUNCTION, TO_CONTEXT]
}
