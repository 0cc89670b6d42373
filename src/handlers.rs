use crate::dietzies;
use crate::errors::{AppError, PassError};
use crate::models::{
    Dietzies, ExportDocument, HistoryItemView, ImportDocument, MeasurementRequest,
    MeasurementResponse, Pass, PassView, Passes, RedeemResponse, ResetResponse, Settings,
    SettingsUpdate, StampResponse,
};
use crate::passes;
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use chrono::Utc;
use tracing::info;

// Every mutation follows the same shape: lock, clone, mutate the clone with
// the pure engine, persist the clone, commit it into the shared state only
// after the write succeeded. A failed write leaves memory and disk in the
// previously agreed state.

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut data = state.data.lock().await.clone();
    let available = data.dietzies_mut().available;
    Html(render_index(available))
}

pub async fn list_passes(State(state): State<AppState>) -> Json<Vec<PassView>> {
    let mut data = state.data.lock().await.clone();
    let settings = data.settings_mut(&state.catalog).clone();
    let pass_map = data.passes_mut(&state.catalog).clone();
    Json(build_views(&state, &pass_map, &settings))
}

pub async fn add_stamp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StampResponse>, AppError> {
    let now = Utc::now();
    let mut guard = state.data.lock().await;
    let mut next = guard.clone();

    let outcome = passes::add_stamp(next.passes_mut(&state.catalog), &id, now)?;
    if outcome.completed {
        let available = dietzies::award(next.dietzies_mut(), &id, now);
        info!("pass '{id}' completed, dietzie awarded (available: {available})");
    }

    persist_data(&state.data_path, &next).await?;
    *guard = next;

    Ok(Json(StampResponse {
        success: outcome.added,
        stamp_count: outcome.stamp_count,
        completed: outcome.completed,
    }))
}

pub async fn remove_stamp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StampResponse>, AppError> {
    let mut guard = state.data.lock().await;
    let mut next = guard.clone();

    let outcome = passes::remove_stamp(next.passes_mut(&state.catalog), &id)?;
    persist_data(&state.data_path, &next).await?;
    *guard = next;

    Ok(Json(StampResponse {
        success: outcome.removed,
        stamp_count: outcome.stamp_count,
        completed: false,
    }))
}

pub async fn add_measurement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MeasurementRequest>,
) -> Result<Json<MeasurementResponse>, AppError> {
    let now = Utc::now();
    let mut guard = state.data.lock().await;
    let mut next = guard.clone();

    let settings = next.settings_mut(&state.catalog).clone();
    let result = passes::add_measurement(
        next.passes_mut(&state.catalog),
        &settings,
        &id,
        payload.value,
        now,
    );

    match result {
        Ok(outcome) => {
            if outcome.completed {
                let available = dietzies::award(next.dietzies_mut(), &id, now);
                info!("pass '{id}' completed, dietzie awarded (available: {available})");
            }
            persist_data(&state.data_path, &next).await?;
            *guard = next;

            Ok(Json(MeasurementResponse {
                success: true,
                stamps_earned: Some(outcome.stamps_earned),
                total_stamps: Some(outcome.total_stamps),
                start_value: Some(outcome.start_value),
                current_value: Some(outcome.current_value),
                diff: Some(outcome.diff),
                completed: Some(outcome.completed),
                error: None,
            }))
        }
        // User-correctable conditions come back as a non-fatal result body.
        Err(PassError::NoBaseline(reason)) => Ok(Json(measurement_failure(reason, None))),
        Err(PassError::WrongDirection { diff, reason }) => {
            Ok(Json(measurement_failure(reason, Some(diff))))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn remove_measurement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StampResponse>, AppError> {
    let mut guard = state.data.lock().await;
    let mut next = guard.clone();

    let settings = next.settings_mut(&state.catalog).clone();
    let outcome = passes::remove_measurement(next.passes_mut(&state.catalog), &settings, &id)?;
    persist_data(&state.data_path, &next).await?;
    *guard = next;

    Ok(Json(StampResponse {
        success: outcome.removed,
        stamp_count: outcome.stamp_count,
        completed: false,
    }))
}

pub async fn reset_pass(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResetResponse>, AppError> {
    let mut guard = state.data.lock().await;
    let mut next = guard.clone();

    let completed_rounds = passes::reset_pass(next.passes_mut(&state.catalog), &id)?;
    persist_data(&state.data_path, &next).await?;
    *guard = next;

    Ok(Json(ResetResponse { completed_rounds }))
}

pub async fn get_dietzies(State(state): State<AppState>) -> Json<Dietzies> {
    let mut data = state.data.lock().await.clone();
    Json(data.dietzies_mut().clone())
}

pub async fn redeem_dietzie(
    State(state): State<AppState>,
) -> Result<Json<RedeemResponse>, AppError> {
    let now = Utc::now();
    let mut guard = state.data.lock().await;
    let mut next = guard.clone();

    let ledger = next.dietzies_mut();
    let success = dietzies::redeem(ledger, now);
    let available = ledger.available;

    if success {
        persist_data(&state.data_path, &next).await?;
        *guard = next;
    }

    Ok(Json(RedeemResponse { success, available }))
}

pub async fn dietzie_history(State(state): State<AppState>) -> Json<Vec<HistoryItemView>> {
    let mut data = state.data.lock().await.clone();
    let pass_map = data.passes_mut(&state.catalog).clone();
    let items = data
        .dietzies_mut()
        .history
        .iter()
        .map(|entry| dietzies::format_history_item(entry, &pass_map))
        .collect();
    Json(items)
}

pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    let mut data = state.data.lock().await.clone();
    Json(data.settings_mut(&state.catalog).clone())
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(payload): Json<SettingsUpdate>,
) -> Result<Json<Settings>, AppError> {
    let mut guard = state.data.lock().await;
    let mut next = guard.clone();

    let settings = next.settings_mut(&state.catalog);
    if let Some(values) = payload.start_values {
        for (id, value) in values {
            settings.start_values.insert(id, value);
        }
    }
    if let Some(flag) = payload.setup_complete {
        settings.setup_complete = flag;
    }
    let updated = settings.clone();

    persist_data(&state.data_path, &next).await?;
    *guard = next;

    Ok(Json(updated))
}

pub async fn export_data(State(state): State<AppState>) -> Json<ExportDocument> {
    let data = state.data.lock().await;
    Json(data.export(&state.catalog, Utc::now()))
}

pub async fn import_data(
    State(state): State<AppState>,
    Json(doc): Json<ImportDocument>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut guard = state.data.lock().await;
    let mut next = guard.clone();

    next.import(doc).map_err(AppError::unprocessable)?;
    persist_data(&state.data_path, &next).await?;
    *guard = next;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Full data wipe back to catalog defaults.
pub async fn reset_all(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let mut guard = state.data.lock().await;
    let mut next = guard.clone();

    next.clear_all();
    next.init_all(&state.catalog);
    persist_data(&state.data_path, &next).await?;
    *guard = next;

    Ok(Json(serde_json::json!({ "success": true })))
}

fn measurement_failure(reason: String, diff: Option<f64>) -> MeasurementResponse {
    MeasurementResponse {
        success: false,
        stamps_earned: None,
        total_stamps: None,
        start_value: None,
        current_value: None,
        diff,
        completed: None,
        error: Some(reason),
    }
}

fn build_views(state: &AppState, pass_map: &Passes, settings: &Settings) -> Vec<PassView> {
    let mut views = Vec::with_capacity(pass_map.len());
    for id in state.catalog.ids() {
        if let Some(pass) = pass_map.get(id) {
            views.push(view_of(pass, settings));
        }
    }
    // Imported passes outside the catalog render after the known ones.
    for (id, pass) in pass_map {
        if state.catalog.ids().any(|known| known == id) {
            continue;
        }
        views.push(view_of(pass, settings));
    }
    views
}

fn view_of(pass: &Pass, settings: &Settings) -> PassView {
    PassView {
        stamp_count: passes::stamp_count(pass),
        progress: passes::progress(pass),
        progress_text: passes::progress_text(pass),
        complete: passes::is_complete(pass),
        measurement_enabled: passes::is_measurement_enabled(settings, &pass.id),
        current_value: passes::current_value(pass),
        pass: pass.clone(),
    }
}
