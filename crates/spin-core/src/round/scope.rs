//! Scope por round: una instancia fresca de `{bag, injector, buffers}` por
//! request, sin singletons ambientes.

use serde_json::{Map, Value};

use crate::errors::RoundCoreError;
use crate::injection::RoundInjector;
use crate::model::{RoundArgs, RoundConfig};
use crate::round::{RoundContext, RoundState};

/// Estado + contexto aislados de un round en curso.
#[derive(Debug)]
pub struct RoundScope {
    pub state: RoundState,
    pub ctx: RoundContext,
}

/// Factory de scopes.
///
/// El buffer all-modes es el único valor que cruza rounds: la factory lo
/// cosecha del injector al cerrar cada round (`absorb`) y lo siembra en el
/// injector del siguiente, aplicándolo también al bag recién construido.
#[derive(Debug)]
pub struct RoundScopeFactory {
    config: RoundConfig,
    all_modes: Map<String, Value>,
}

impl RoundScopeFactory {
    pub fn new(config: RoundConfig) -> Self {
        Self { config, all_modes: Map::new() }
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Construye un scope fresco para un request.
    pub fn create(&self, args: &RoundArgs) -> Result<RoundScope, RoundCoreError> {
        if !self.config.settings.is_object() {
            return Err(RoundCoreError::OrchestrationFault(
                "settings must be a JSON object".into(),
            ));
        }

        let injector = RoundInjector::with_all_modes(self.all_modes.clone());
        let mut state = RoundState::new(args, &self.config.settings, &self.config.mode);
        injector.overlay_all_modes(&mut state.params);

        Ok(RoundScope {
            state,
            ctx: RoundContext::with_injector(self.config.mode.clone(), injector),
        })
    }

    /// Cierra el round: cosecha el buffer all-modes (posiblemente crecido
    /// durante el round) para el siguiente `create`.
    pub fn absorb(&mut self, mut ctx: RoundContext) {
        self.all_modes = ctx.injector.take_all_modes();
    }
}
