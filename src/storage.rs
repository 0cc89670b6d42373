use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::models::{
    Dietzies, ExportDocument, HistoryEntry, ImportDocument, PassKind, Passes, Settings, StoreData,
};
use chrono::{DateTime, Utc};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

/// Read-or-default: a missing or corrupt file degrades to empty records, it
/// never aborts startup.
pub async fn load_data(path: &Path) -> StoreData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                StoreData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            StoreData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &StoreData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

impl StoreData {
    /// Read-through initializers: create the record with defaults when it is
    /// absent, return the existing one unchanged otherwise. Idempotent.
    pub fn settings_mut(&mut self, catalog: &Catalog) -> &mut Settings {
        self.settings
            .get_or_insert_with(|| catalog.default_settings())
    }

    pub fn passes_mut(&mut self, catalog: &Catalog) -> &mut Passes {
        self.passes.get_or_insert_with(|| catalog.default_passes())
    }

    pub fn dietzies_mut(&mut self) -> &mut Dietzies {
        self.dietzies.get_or_insert_with(Dietzies::default)
    }

    pub fn init_all(&mut self, catalog: &Catalog) {
        self.settings_mut(catalog);
        self.passes_mut(catalog);
        self.dietzies_mut();
    }

    pub fn export(&self, catalog: &Catalog, export_date: DateTime<Utc>) -> ExportDocument {
        ExportDocument {
            settings: self
                .settings
                .clone()
                .unwrap_or_else(|| catalog.default_settings()),
            passes: self
                .passes
                .clone()
                .unwrap_or_else(|| catalog.default_passes()),
            dietzies: self.dietzies.clone().unwrap_or_default(),
            export_date,
        }
    }

    /// Replaces whichever records the snapshot carries. Each candidate record
    /// is validated first and one bad record rejects the whole import, so a
    /// malformed backup can never half-overwrite live state.
    pub fn import(&mut self, doc: ImportDocument) -> Result<(), String> {
        if let Some(passes) = &doc.passes {
            validate_passes(passes)?;
        }
        if let Some(dietzies) = &doc.dietzies {
            validate_dietzies(dietzies)?;
        }

        if let Some(settings) = doc.settings {
            self.settings = Some(settings);
        }
        if let Some(passes) = doc.passes {
            self.passes = Some(passes);
        }
        if let Some(dietzies) = doc.dietzies {
            self.dietzies = Some(dietzies);
        }
        Ok(())
    }

    /// Full data wipe; the next access re-creates defaults.
    pub fn clear_all(&mut self) {
        *self = StoreData::default();
    }
}

fn validate_passes(passes: &Passes) -> Result<(), String> {
    for (key, pass) in passes {
        if key != &pass.id {
            return Err(format!("pass key '{key}' does not match id '{}'", pass.id));
        }
        if pass.target == 0 {
            return Err(format!("pass '{key}' has target 0"));
        }
        if let PassKind::Simple(state) = &pass.kind {
            for (index, stamp) in state.stamps.iter().enumerate() {
                if stamp.id as usize != index + 1 {
                    return Err(format!("pass '{key}' has a gap in its stamp sequence"));
                }
            }
        }
    }
    Ok(())
}

fn validate_dietzies(dietzies: &Dietzies) -> Result<(), String> {
    if dietzies.total_earned < dietzies.total_redeemed {
        return Err("dietzies: more redeemed than earned".to_string());
    }
    if dietzies.available != dietzies.total_earned - dietzies.total_redeemed {
        return Err("dietzies: available does not match earned minus redeemed".to_string());
    }

    let earned = dietzies
        .history
        .iter()
        .filter(|entry| matches!(entry, HistoryEntry::Earned { .. }))
        .count() as u32;
    let redeemed = dietzies.history.len() as u32 - earned;
    if earned != dietzies.total_earned || redeemed != dietzies.total_redeemed {
        return Err("dietzies: history does not match counters".to_string());
    }
    Ok(())
}
