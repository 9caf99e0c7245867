//! Sink append-only de features emitidas durante el round.

use serde::{Deserialize, Serialize};

/// Registro de feature emitido por un finalizer (hoy sólo `collectible`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub kind: String,
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Default)]
pub struct Featurer {
    records: Vec<FeatureRecord>,
}

impl Featurer {
    pub fn add(&mut self, record: FeatureRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }
}
