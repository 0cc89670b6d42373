use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Measurement-pass baselines plus the one-shot onboarding flag.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub start_values: BTreeMap<String, Option<f64>>,
    pub setup_complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stamp {
    pub id: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    /// Net stamps this reading contributed; negative when the reading moved
    /// back toward the baseline.
    pub stamps_earned: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SimpleState {
    pub stamps: Vec<Stamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementState {
    pub direction: Direction,
    pub unit: String,
    pub measurements: Vec<Measurement>,
    pub current_stamps: u32,
}

/// Variant payload of a pass; the `type` tag is part of the persisted shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PassKind {
    Simple(SimpleState),
    Measurement(MeasurementState),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pass {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub target: u32,
    #[serde(flatten)]
    pub kind: PassKind,
    pub completed_rounds: u32,
}

pub type Passes = BTreeMap<String, Pass>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryEntry {
    Earned {
        source: String,
        timestamp: DateTime<Utc>,
    },
    Redeemed {
        timestamp: DateTime<Utc>,
    },
}

/// The reward ledger. `available == total_earned - total_redeemed` always.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dietzies {
    pub available: u32,
    pub total_earned: u32,
    pub total_redeemed: u32,
    pub history: Vec<HistoryEntry>,
}

/// Everything the app persists, as one document. A `None` record means it was
/// never written (or failed to decode) and is lazily replaced by defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passes: Option<Passes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietzies: Option<Dietzies>,
}

/// Backup document; the exact shape prior exports used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub settings: Settings,
    pub passes: Passes,
    pub dietzies: Dietzies,
    pub export_date: DateTime<Utc>,
}

/// Import payload: any subset of the three records may be present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    pub settings: Option<Settings>,
    pub passes: Option<Passes>,
    pub dietzies: Option<Dietzies>,
    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct MeasurementRequest {
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub start_values: Option<BTreeMap<String, Option<f64>>>,
    pub setup_complete: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StampResponse {
    pub success: bool,
    pub stamp_count: u32,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamps_earned: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_stamps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub completed_rounds: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RedeemResponse {
    pub success: bool,
    pub available: u32,
}

/// A pass plus the derived fields the card UI renders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassView {
    #[serde(flatten)]
    pub pass: Pass,
    pub stamp_count: u32,
    pub progress: f64,
    pub progress_text: String,
    pub complete: bool,
    pub measurement_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryItemView {
    pub text: String,
    pub date: String,
    pub kind: String,
}
