use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_account_timeout")]
    pub account_timeout_secs: u64,
    #[serde(default = "default_optional_timeout")]
    pub logs_timeout_secs: u64,
    #[serde(default = "default_optional_timeout")]
    pub autonomous_timeout_secs: u64,
    /// Unset means the chat round trip never times out
    #[serde(default)]
    pub chat_timeout_secs: Option<u64>,
}

impl BackendSettings {
    pub fn account_timeout(&self) -> Duration {
        Duration::from_secs(self.account_timeout_secs)
    }

    pub fn logs_timeout(&self) -> Duration {
        Duration::from_secs(self.logs_timeout_secs)
    }

    pub fn autonomous_timeout(&self) -> Duration {
        Duration::from_secs(self.autonomous_timeout_secs)
    }

    pub fn chat_timeout(&self) -> Option<Duration> {
        self.chat_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_id: default_user_id(),
            account_timeout_secs: default_account_timeout(),
            logs_timeout_secs: default_optional_timeout(),
            autonomous_timeout_secs: default_optional_timeout(),
            chat_timeout_secs: None,
        }
    }
}

/// What to show in recent activity when `/logs` serves appliance records instead of logs
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchemaMismatchPolicy {
    #[default]
    MockActivity,
    Empty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub schema_mismatch: SchemaMismatchPolicy,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            currency_symbol: default_currency_symbol(),
            schema_mismatch: SchemaMismatchPolicy::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_user_id() -> String {
    "demo-user".to_string()
}

fn default_account_timeout() -> u64 {
    10
}

fn default_optional_timeout() -> u64 {
    5
}

fn default_page_size() -> usize {
    5
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Load `config/dashboard.toml` (optional) overlaid with `ENERGY_DASH__SECTION__KEY` variables
pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("ENERGY_DASH")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
