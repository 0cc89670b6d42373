use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/passes", get(handlers::list_passes))
        .route(
            "/api/passes/:id/stamps",
            post(handlers::add_stamp).delete(handlers::remove_stamp),
        )
        .route(
            "/api/passes/:id/measurements",
            post(handlers::add_measurement).delete(handlers::remove_measurement),
        )
        .route("/api/passes/:id/reset", post(handlers::reset_pass))
        .route("/api/dietzies", get(handlers::get_dietzies))
        .route("/api/dietzies/redeem", post(handlers::redeem_dietzie))
        .route("/api/dietzies/history", get(handlers::dietzie_history))
        .route(
            "/api/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        .route("/api/export", get(handlers::export_data))
        .route("/api/import", post(handlers::import_data))
        .route("/api/reset", post(handlers::reset_all))
        .with_state(state)
}
