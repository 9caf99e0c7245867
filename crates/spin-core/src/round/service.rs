//! Orquestador de rounds.

use log::error;
use serde_json::{Map, Value};

use crate::errors::RoundCoreError;
use crate::finalizer::FinalizerDispatcher;
use crate::model::{RoundArgs, RoundConfig, RoundResult};
use crate::round::{worker, RoundScope, RoundScopeFactory};

/// Punto de entrada del core: un `go` por round.
///
/// Cada invocación obtiene su scope aislado de la factory, corre el worker,
/// hace el commit del round y devuelve `{contexts}`. Cualquier falla de
/// orquestación colapsa a resultado vacío; nada acá es fatal para el
/// proceso.
pub struct RoundService {
    factory: RoundScopeFactory,
    dispatcher: FinalizerDispatcher,
}

impl RoundService {
    pub fn new(config: RoundConfig) -> Self {
        Self::with_dispatcher(config, FinalizerDispatcher::standard())
    }

    pub fn with_dispatcher(config: RoundConfig, dispatcher: FinalizerDispatcher) -> Self {
        Self { factory: RoundScopeFactory::new(config), dispatcher }
    }

    pub fn dispatcher_mut(&mut self) -> &mut FinalizerDispatcher {
        &mut self.dispatcher
    }

    pub fn go(&mut self, args: &RoundArgs) -> RoundResult {
        match self.run_round(args) {
            Ok(result) => result,
            Err(e) => {
                error!("error processing the round: {e}");
                RoundResult::default()
            }
        }
    }

    fn run_round(&mut self, args: &RoundArgs) -> Result<RoundResult, RoundCoreError> {
        let mut scope = self.factory.create(args)?;
        worker::run(&mut scope, &self.dispatcher);

        let RoundScope { mut state, mut ctx } = scope;
        ctx.injector.execute_injections(&mut state.params, Value::Object(Map::new()));

        let contexts = state.contexts();
        self.factory.absorb(ctx);

        Ok(RoundResult { contexts })
    }
}
