use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/calculate/pallets", post(handlers::calculate_pallets))
        .route("/api/calculate/cph", post(handlers::calculate_cph))
        .route("/api/calculate/zph", post(handlers::calculate_zph))
        .route("/api/submissions", post(handlers::submit))
        .route(
            "/api/history",
            get(handlers::get_history).delete(handlers::clear_history),
        )
        .route("/api/history/:date", get(handlers::get_entry))
        .route("/api/chart", get(handlers::get_chart))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/chat", get(handlers::chat_greeting).post(handlers::chat))
        .with_state(state)
}
