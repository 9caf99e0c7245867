//! spin-core: motor de inyección y merge de parámetros para rounds.
//!
//! Un round opera sobre un bag JSON aislado; los escritores (worker y
//! finalizers) proponen update sets que el `RoundInjector` mergea con regla
//! append-vs-replace, buffers por scope, deletions tipadas y bindings
//! diferidos a win patterns. Ejecución secuencial y cooperativa: el
//! aislamiento por scope cumple el rol que tendría un lock.

pub mod errors;
pub mod featurer;
pub mod finalizer;
pub mod glossary;
pub mod injection;
pub mod model;
pub mod round;
pub mod stats;

pub use errors::RoundCoreError;
pub use featurer::{FeatureRecord, Featurer};
pub use finalizer::{Condition, ConditionRegistry, FinalizerDispatcher, FinalizerHandler, FinalizerReport};
pub use injection::{DeletionDirective, InjectionRecord, PatternInjection, RoundInjector};
pub use model::{FinalizerEntry, RoundArgs, RoundConfig, RoundResult};
pub use round::{RoundContext, RoundScope, RoundScopeFactory, RoundService, RoundState};
pub use stats::ModeStats;
