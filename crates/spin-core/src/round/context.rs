//! Contexto explícito del round.
//!
//! Los colaboradores (injector, stats, featurer) no viajan dentro del bag:
//! van en un `RoundContext` que se pasa explícitamente a cada handler y
//! condición. El bag queda fuera del contexto a propósito: así un handler
//! puede mutar el bag vía injector mientras sostiene el contexto.

use crate::featurer::Featurer;
use crate::injection::RoundInjector;
use crate::stats::ModeStats;

#[derive(Debug, Default)]
pub struct RoundContext {
    pub injector: RoundInjector,
    pub stats: ModeStats,
    pub featurer: Featurer,
}

impl RoundContext {
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            injector: RoundInjector::new(),
            stats: ModeStats::new(mode),
            featurer: Featurer::default(),
        }
    }

    /// Contexto con un injector ya sembrado (buffer all-modes del round
    /// anterior).
    pub fn with_injector(mode: impl Into<String>, injector: RoundInjector) -> Self {
        Self {
            injector,
            stats: ModeStats::new(mode),
            featurer: Featurer::default(),
        }
    }
}
