//! Sustrato de merge: el `RoundInjector` y su regla append-vs-replace.
//!
//! Toda mutación del bag pasa por acá. Los escritores (worker, finalizers)
//! proponen update sets etiquetados con un destino (round actual, próximo
//! modo, todos los modos, round-state persistido, win pattern diferido) y el
//! injector sabe mergearlos, diferirlos y aplicarlos en el orden correcto.

mod history;
mod injector;
mod merge;

pub use history::InjectionRecord;
pub use injector::{DeletionDirective, InjectiveFn, PatternInjection, RoundInjector};
pub use merge::merge_update_set;
