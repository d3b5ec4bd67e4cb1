// HTTP request handlers
use crate::domain::pagination::{reveal, sort_newest_first};
use crate::infrastructure::chunked_json::stream_from_watch;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Response, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RevealQuery {
    pub visible: Option<usize>,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: String,
}

fn respond(result: Result<Response<Body>, StatusCode>) -> axum::response::Response {
    match result {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard state
pub async fn get_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    respond(json_response(&snapshot, accepts_brotli(&headers)).await)
}

/// Manual refresh; answers with the state after the load settles
pub async fn refresh_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.store.refresh().await;
    respond(json_response(&snapshot, accepts_brotli(&headers)).await)
}

/// Stream dashboard state changes (loading, data, refreshes)
pub async fn stream_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    stream_from_watch(state.store.subscribe(), accepts_brotli(&headers))
}

pub async fn recent_activity(
    Query(query): Query<RevealQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mut items = state
        .store
        .snapshot()
        .data
        .map(|data| data.recent_activity)
        .unwrap_or_default();
    sort_newest_first(&mut items);

    let page = reveal(&items, query.visible, state.page_size);
    respond(json_response(&page, accepts_brotli(&headers)).await)
}

pub async fn autonomous_actions(
    Query(query): Query<RevealQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mut items = state
        .store
        .snapshot()
        .data
        .map(|data| data.autonomous_actions)
        .unwrap_or_default();
    sort_newest_first(&mut items);

    let page = reveal(&items, query.visible, state.page_size);
    respond(json_response(&page, accepts_brotli(&headers)).await)
}

/// Voice assistant round trip; failures come back as transient messages
pub async fn assistant_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    Json(state.assistant.ask(&request.prompt).await)
}

#[cfg(test)]
mod tests {
    use crate::application::assistant_service::AssistantService;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::dashboard_store::DashboardStore;
    use crate::application::fake_repository::{Canned, FakeRepository};
    use crate::application::transform::TransformOptions;
    use crate::infrastructure::config::SchemaMismatchPolicy;
    use crate::presentation::app_state::AppState;
    use crate::presentation::routes::router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use bytes::Buf;
    use futures::StreamExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_state(repository: FakeRepository) -> Arc<AppState> {
        let repository = Arc::new(repository);
        Arc::new(AppState {
            store: DashboardStore::new(DashboardService::new(
                repository.clone(),
                "u-42".to_string(),
                TransformOptions::default(),
                SchemaMismatchPolicy::MockActivity,
            )),
            assistant: AssistantService::new(repository),
            page_size: 2,
        })
    }

    async fn call(state: Arc<AppState>, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = app_state(FakeRepository::healthy());
        let response = router(state).oneshot(get("/healthz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_before_and_after_refresh() {
        let state = app_state(FakeRepository::healthy());

        let (status, body) = call(state.clone(), get("/dashboard")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loading"], true);
        assert_eq!(body["data"], Value::Null);

        let (status, body) = call(state.clone(), post_json("/dashboard/refresh", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loading"], false);
        assert_eq!(body["isUsingFallback"], false);
        assert_eq!(body["data"]["user"]["name"], "Meera Rao");
    }

    #[tokio::test]
    async fn test_refresh_with_account_outage_reports_demo_mode() {
        let state = app_state(FakeRepository::healthy().with_user(Canned::Status(500)));

        let (_, body) = call(state, post_json("/dashboard/refresh", json!({}))).await;
        assert_eq!(body["loading"], false);
        assert_eq!(body["isUsingFallback"], true);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
        assert_eq!(body["data"]["user"]["name"], "Krishna Singh");
    }

    #[tokio::test]
    async fn test_recent_activity_pages() {
        let state = app_state(FakeRepository::healthy().with_usage_logs(Canned::Mismatch));
        state.store.refresh().await;

        let (_, body) = call(state.clone(), get("/dashboard/recent-activity")).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["total"], 3);
        assert_eq!(body["hasMore"], true);
        assert_eq!(body["nextVisible"], 3);

        let (_, body) = call(state, get("/dashboard/recent-activity?visible=3")).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 3);
        assert_eq!(body["hasMore"], false);
    }

    #[tokio::test]
    async fn test_stream_sends_current_state_first() {
        let state = app_state(FakeRepository::healthy());
        let response = router(state).oneshot(get("/dashboard/stream")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut frames = response.into_body().into_data_stream();
        let mut frame = frames.next().await.unwrap().unwrap();
        let length = frame.get_u32() as usize;
        assert_eq!(length, frame.len());

        let body: Value = serde_json::from_slice(&frame).unwrap();
        assert_eq!(body["loading"], true);
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn test_autonomous_actions_before_load_is_empty() {
        let state = app_state(FakeRepository::healthy());
        let (status, body) = call(state, get("/dashboard/autonomous-actions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
        assert_eq!(body["hasMore"], false);
    }

    #[tokio::test]
    async fn test_assistant_chat() {
        let state = app_state(FakeRepository::healthy());
        let (_, body) = call(
            state.clone(),
            post_json("/assistant/chat", json!({"prompt": "fridge usage?"})),
        )
        .await;
        assert_eq!(body["ok"], true);

        let (status, body) = call(state, post_json("/assistant/chat", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], false);
    }
}
