//! Orquestación de un round: estado, contexto explícito, worker, scope por
//! round y servicio.

mod context;
mod scope;
mod service;
mod state;
pub mod worker;

pub use context::RoundContext;
pub use scope::{RoundScope, RoundScopeFactory};
pub use service::RoundService;
pub use state::RoundState;
