// Router wiring
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    assistant_chat, autonomous_actions, get_dashboard, health_check, recent_activity,
    refresh_dashboard, stream_dashboard,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/refresh", post(refresh_dashboard))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/dashboard/recent-activity", get(recent_activity))
        .route("/dashboard/autonomous-actions", get(autonomous_actions))
        .route("/assistant/chat", post(assistant_chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
