// In-memory EnergyRepository for service and handler tests
use crate::application::energy_repository::EnergyRepository;
use crate::application::source_error::SourceError;
use crate::domain::account::UserRecord;
use crate::domain::autonomous_log::AutonomousLogEntry;
use crate::domain::usage_log::UsageLogEntry;
use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Canned<T> {
    Ok(T),
    Status(u16),
    Timeout,
    Mismatch,
}

impl<T: Clone> Canned<T> {
    fn produce(&self, resource: &'static str) -> Result<T, SourceError> {
        match self {
            Canned::Ok(value) => Ok(value.clone()),
            Canned::Status(status) => Err(SourceError::Status {
                resource,
                status: *status,
                body: "canned failure".to_string(),
            }),
            Canned::Timeout => Err(SourceError::Timeout { resource }),
            Canned::Mismatch => Err(SourceError::SchemaMismatch {
                resource,
                detail: "first element has no appliance_id".to_string(),
            }),
        }
    }
}

pub struct FakeRepository {
    pub user: Canned<UserRecord>,
    pub usage_logs: Canned<Vec<UsageLogEntry>>,
    pub autonomous_log: Canned<Vec<AutonomousLogEntry>>,
    pub chat: Canned<String>,
    /// Per-call delays for `fetch_user`, consumed in order
    pub user_delays: Mutex<VecDeque<(Duration, UserRecord)>>,
}

impl FakeRepository {
    pub fn healthy() -> Self {
        Self {
            user: Canned::Ok(sample_user("Meera Rao")),
            usage_logs: Canned::Ok(sample_logs()),
            autonomous_log: Canned::Ok(sample_autonomous_log()),
            chat: Canned::Ok("Your fridge used 1.2 kWh today.".to_string()),
            user_delays: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_user(mut self, user: Canned<UserRecord>) -> Self {
        self.user = user;
        self
    }

    pub fn with_usage_logs(mut self, logs: Canned<Vec<UsageLogEntry>>) -> Self {
        self.usage_logs = logs;
        self
    }

    pub fn with_autonomous_log(mut self, log: Canned<Vec<AutonomousLogEntry>>) -> Self {
        self.autonomous_log = log;
        self
    }

    pub fn with_chat(mut self, chat: Canned<String>) -> Self {
        self.chat = chat;
        self
    }

    /// Queue a delayed `fetch_user` answer; later calls fall back to `self.user`
    pub fn then_user_after(self, delay: Duration, user: UserRecord) -> Self {
        self.user_delays
            .lock()
            .expect("user_delays lock")
            .push_back((delay, user));
        self
    }
}

#[async_trait]
impl EnergyRepository for FakeRepository {
    async fn fetch_user(&self, _user_id: &str) -> Result<UserRecord, SourceError> {
        let queued = self.user_delays.lock().expect("user_delays lock").pop_front();
        if let Some((delay, user)) = queued {
            tokio::time::sleep(delay).await;
            return Ok(user);
        }
        self.user.produce("/users/{id}")
    }

    async fn fetch_usage_logs(&self) -> Result<Vec<UsageLogEntry>, SourceError> {
        self.usage_logs.produce("/logs")
    }

    async fn fetch_autonomous_log(&self) -> Result<Vec<AutonomousLogEntry>, SourceError> {
        self.autonomous_log.produce("/autonomous-ai/log")
    }

    async fn send_chat(&self, _prompt: &str) -> Result<String, SourceError> {
        self.chat.produce("/chatbot")
    }
}

pub fn sample_user(name: &str) -> UserRecord {
    serde_json::from_value(json!({
        "uid": "u-42",
        "name": name,
        "monthly_budget": 120.0,
        "current_month_usage": 180.0,
        "current_month_cost": 30.0,
        "appliances": [
            {"appliance_id": "fr", "name": "Fridge", "energy_today": 1.2, "status": "on"}
        ]
    }))
    .expect("sample user")
}

pub fn sample_logs() -> Vec<UsageLogEntry> {
    serde_json::from_value(json!([
        {"appliance_id": "fr", "start_time": "2024-05-01T07:00:00Z",
         "end_time": "2024-05-01T08:00:00Z", "energy_consumed": 0.4, "trigger": "manual"},
        {"appliance_id": "fr", "start_time": "2024-05-01T09:00:00Z",
         "energy_consumed": 0.02, "trigger": "routine"}
    ]))
    .expect("sample logs")
}

pub fn sample_autonomous_log() -> Vec<AutonomousLogEntry> {
    serde_json::from_value(json!([
        {"timestamp": "2024-05-01T22:00:00Z", "reasoning": "Fridge door alarm",
         "outcome": "Notified user", "tool_calls": []}
    ]))
    .expect("sample autonomous log")
}
