// Repository trait for energy backend access
use crate::application::source_error::SourceError;
use crate::domain::account::UserRecord;
use crate::domain::autonomous_log::AutonomousLogEntry;
use crate::domain::usage_log::UsageLogEntry;
use async_trait::async_trait;

#[async_trait]
pub trait EnergyRepository: Send + Sync {
    /// Fetch the account record for a user (required by every dashboard load)
    async fn fetch_user(&self, user_id: &str) -> Result<UserRecord, SourceError>;

    /// Fetch historical usage logs, validated against the usage-log schema
    async fn fetch_usage_logs(&self) -> Result<Vec<UsageLogEntry>, SourceError>;

    /// Fetch the autonomous AI log, unwrapped from its `{success, log}` envelope
    async fn fetch_autonomous_log(&self) -> Result<Vec<AutonomousLogEntry>, SourceError>;

    /// Send one assistant prompt and return the reply text
    async fn send_chat(&self, prompt: &str) -> Result<String, SourceError>;
}
