use crate::models::{
    Direction, MeasurementState, Pass, PassKind, Passes, Settings, SimpleState,
};
use serde::Deserialize;
use std::collections::BTreeMap;

/// The pass catalog is configuration, not code: id, name, icon, target and
/// variant come from an embedded JSON document, so swapping the dataset never
/// touches engine logic.
const CATALOG_JSON: &str = include_str!("catalog.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CatalogKind {
    Simple,
    Measurement { direction: Direction, unit: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub target: u32,
    #[serde(flatten)]
    pub kind: CatalogKind,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn load() -> Result<Self, serde_json::Error> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(CATALOG_JSON)?;
        Ok(Self { entries })
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Catalog display order for the card carousel.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    /// Fresh passes for a first run: empty sequences, zero rounds.
    pub fn default_passes(&self) -> Passes {
        self.entries
            .iter()
            .map(|entry| {
                let kind = match &entry.kind {
                    CatalogKind::Simple => PassKind::Simple(SimpleState::default()),
                    CatalogKind::Measurement { direction, unit } => {
                        PassKind::Measurement(MeasurementState {
                            direction: *direction,
                            unit: unit.clone(),
                            measurements: Vec::new(),
                            current_stamps: 0,
                        })
                    }
                };
                let pass = Pass {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                    icon: entry.icon.clone(),
                    target: entry.target,
                    kind,
                    completed_rounds: 0,
                };
                (entry.id.clone(), pass)
            })
            .collect()
    }

    /// Default settings: one absent baseline slot per measurement pass.
    pub fn default_settings(&self) -> Settings {
        let start_values: BTreeMap<String, Option<f64>> = self
            .entries
            .iter()
            .filter(|entry| matches!(entry.kind, CatalogKind::Measurement { .. }))
            .map(|entry| (entry.id.clone(), None))
            .collect();
        Settings {
            start_values,
            setup_complete: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let catalog = Catalog::load().expect("embedded catalog must parse");
        assert_eq!(catalog.entries().len(), 6);
        let passes = catalog.default_passes();
        assert!(passes.values().all(|pass| pass.target > 0));
    }

    #[test]
    fn default_settings_cover_measurement_passes() {
        let catalog = Catalog::load().unwrap();
        let settings = catalog.default_settings();
        assert_eq!(settings.start_values.len(), 3);
        assert!(settings.start_values.values().all(|value| value.is_none()));
        assert!(!settings.setup_complete);
    }
}
