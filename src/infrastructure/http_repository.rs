// Energy backend repository implementation over HTTP
use crate::application::energy_repository::EnergyRepository;
use crate::application::source_error::SourceError;
use crate::domain::account::UserRecord;
use crate::domain::autonomous_log::AutonomousLogEntry;
use crate::domain::usage_log::UsageLogEntry;
use crate::infrastructure::config::BackendSettings;
use crate::infrastructure::schema::{
    AUTONOMOUS_LOG, USAGE_LOGS, unwrap_autonomous_envelope, validate_usage_logs,
};
use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const USER: &str = "/users/{id}";
const CHATBOT: &str = "/chatbot";

#[derive(Debug, Clone)]
pub struct RequestTimeouts {
    pub account: Duration,
    pub logs: Duration,
    pub autonomous: Duration,
    pub chat: Option<Duration>,
}

impl From<&BackendSettings> for RequestTimeouts {
    fn from(settings: &BackendSettings) -> Self {
        Self {
            account: settings.account_timeout(),
            logs: settings.logs_timeout(),
            autonomous: settings.autonomous_timeout(),
            chat: settings.chat_timeout(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpEnergyRepository {
    client: reqwest::Client,
    base_url: String,
    timeouts: RequestTimeouts,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    prompt: &'a str,
}

impl HttpEnergyRepository {
    pub fn new(base_url: &str, timeouts: RequestTimeouts) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeouts,
        })
    }

    pub fn from_settings(settings: &BackendSettings) -> anyhow::Result<Self> {
        Self::new(&settings.base_url, RequestTimeouts::from(settings))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(
        &self,
        path: &str,
        resource: &'static str,
        timeout: Duration,
    ) -> Result<Value, SourceError> {
        let url = self.url(path);
        tracing::debug!("GET {} (timeout {:?})", url, timeout);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(resource, e))?;

        Self::json_body(resource, response).await
    }

    async fn json_body(
        resource: &'static str,
        response: reqwest::Response,
    ) -> Result<Value, SourceError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                resource,
                status,
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SourceError::from_reqwest(resource, e))
    }
}

#[async_trait]
impl EnergyRepository for HttpEnergyRepository {
    async fn fetch_user(&self, user_id: &str) -> Result<UserRecord, SourceError> {
        let path = format!("/users/{}", urlencoding::encode(user_id));
        let payload = self.get_json(&path, USER, self.timeouts.account).await?;

        serde_json::from_value(payload).map_err(|e| SourceError::Decode {
            resource: USER,
            detail: e.to_string(),
        })
    }

    async fn fetch_usage_logs(&self) -> Result<Vec<UsageLogEntry>, SourceError> {
        let payload = self
            .get_json(USAGE_LOGS, USAGE_LOGS, self.timeouts.logs)
            .await?;
        validate_usage_logs(payload)
    }

    async fn fetch_autonomous_log(&self) -> Result<Vec<AutonomousLogEntry>, SourceError> {
        let payload = self
            .get_json(AUTONOMOUS_LOG, AUTONOMOUS_LOG, self.timeouts.autonomous)
            .await?;
        unwrap_autonomous_envelope(payload)
    }

    async fn send_chat(&self, prompt: &str) -> Result<String, SourceError> {
        let mut request = self
            .client
            .post(self.url(CHATBOT))
            .json(&ChatRequest { prompt });
        if let Some(timeout) = self.timeouts.chat {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(CHATBOT, e))?;
        let payload = Self::json_body(CHATBOT, response).await?;

        chat_reply_text(&payload).ok_or_else(|| SourceError::Decode {
            resource: CHATBOT,
            detail: "reply has no text".to_string(),
        })
    }
}

/// The chatbot answers either with a bare string or an object holding the text
fn chat_reply_text(payload: &Value) -> Option<String> {
    match payload {
        Value::String(text) => Some(text.clone()),
        Value::Object(fields) => ["response", "reply", "message"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn timeouts() -> RequestTimeouts {
        RequestTimeouts {
            account: Duration::from_millis(500),
            logs: Duration::from_millis(500),
            autonomous: Duration::from_millis(500),
            chat: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_user() {
        let router = Router::new().route(
            "/users/:id",
            get(|axum::extract::Path(id): axum::extract::Path<String>| async move {
                Json(json!({"uid": id, "name": "Meera Rao", "monthly_budget": 100.0}))
            }),
        );
        let repository = HttpEnergyRepository::new(&serve(router).await, timeouts()).unwrap();

        let user = repository.fetch_user("u 42").await.unwrap();
        assert_eq!(user.uid, "u 42");
        assert_eq!(user.name, "Meera Rao");
    }

    #[tokio::test]
    async fn test_fetch_user_server_error() {
        let router = Router::new().route(
            "/users/:id",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }),
        );
        let repository = HttpEnergyRepository::new(&serve(router).await, timeouts()).unwrap();

        match repository.fetch_user("u-42").await {
            Err(SourceError::Status { status, body, .. }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "down");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_user_timeout() {
        let router = Router::new().route(
            "/users/:id",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({"uid": "late", "name": "Late"}))
            }),
        );
        let repository = HttpEnergyRepository::new(&serve(router).await, timeouts()).unwrap();

        let err = repository.fetch_user("u-42").await.unwrap_err();
        assert!(matches!(err, SourceError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_logs_serving_appliances() {
        let router = Router::new().route("/logs", get(|| async { Json(json!([{"uid": "x"}])) }));
        let repository = HttpEnergyRepository::new(&serve(router).await, timeouts()).unwrap();

        let err = repository.fetch_usage_logs().await.unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    #[tokio::test]
    async fn test_logs_keep_good_rows() {
        let router = Router::new().route(
            "/logs",
            get(|| async {
                Json(json!([
                    {"appliance_id": "ac", "start_time": "2024-05-01T10:00:00",
                     "energy_consumed": 1.5, "trigger": "manual"},
                    {"appliance_id": "ac", "start_time": "2024-05-01T11:00:00Z",
                     "energy_consumed": null, "trigger": "manual"},
                    {"appliance_id": "fr", "start_time": "2024-05-01T12:00:00Z",
                     "energy_consumed": 0.3, "trigger": "routine"}
                ]))
            }),
        );
        let repository = HttpEnergyRepository::new(&serve(router).await, timeouts()).unwrap();

        let logs = repository.fetch_usage_logs().await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].appliance_id, "ac");
        assert_eq!(logs[1].appliance_id, "fr");
    }

    #[tokio::test]
    async fn test_fetch_autonomous_log() {
        let router = Router::new().route(
            "/autonomous-ai/log",
            get(|| async {
                Json(json!({"success": true, "log": [
                    {"timestamp": "2024-05-01T10:00:00Z", "reasoning": "r", "outcome": "o",
                     "tool_calls": [{"name": "autonomous_appliance_control",
                                     "args": {"appliance_id": "ac", "action": "turn_off"}}]}
                ]}))
            }),
        );
        let repository = HttpEnergyRepository::new(&serve(router).await, timeouts()).unwrap();

        let log = repository.fetch_autonomous_log().await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].tool_calls[0].name, "autonomous_appliance_control");
    }

    #[tokio::test]
    async fn test_send_chat() {
        let router = Router::new().route(
            "/chatbot",
            post(|Json(body): Json<Value>| async move {
                let prompt = body["prompt"].as_str().unwrap_or_default().to_string();
                Json(json!({"response": format!("echo: {}", prompt)}))
            }),
        );
        let repository = HttpEnergyRepository::new(&serve(router).await, timeouts()).unwrap();

        let reply = repository.send_chat("hello").await.unwrap();
        assert_eq!(reply, "echo: hello");
    }

    #[test]
    fn test_chat_reply_text() {
        assert_eq!(chat_reply_text(&json!("hi")), Some("hi".to_string()));
        assert_eq!(chat_reply_text(&json!({"reply": "yo"})), Some("yo".to_string()));
        assert_eq!(chat_reply_text(&json!({"other": 1})), None);
        assert_eq!(chat_reply_text(&json!(3)), None);
    }
}
