//! Modelo neutral del round: bag de parámetros, configuración tipada en el
//! borde y resultado observable.

mod config;
mod params;
mod result;

pub use config::{FinalizerEntry, RoundConfig};
pub use params::{build_bag, RoundArgs};
pub use result::RoundResult;
