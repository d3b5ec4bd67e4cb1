// Dashboard service - One data-acquisition pass with fallback to demo data
use crate::application::energy_repository::EnergyRepository;
use crate::application::transform::{TransformOptions, build_view_model};
use crate::domain::autonomous_log::AutonomousLogEntry;
use crate::domain::dashboard::DashboardViewModel;
use crate::domain::fixture::{mock_recent_activity, mock_view_model};
use crate::domain::usage_log::UsageLogEntry;
use crate::infrastructure::config::SchemaMismatchPolicy;
use std::sync::Arc;

pub const FALLBACK_MESSAGE: &str =
    "Live energy data is unavailable right now. Showing demo data instead.";

#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    AccountUnavailable(String),
    TransformFailed(String),
}

impl FallbackReason {
    pub fn detail(&self) -> &str {
        match self {
            FallbackReason::AccountUnavailable(detail) | FallbackReason::TransformFailed(detail) => {
                detail
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardLoad {
    pub data: DashboardViewModel,
    pub fallback: Option<FallbackReason>,
}

impl DashboardLoad {
    fn live(data: DashboardViewModel) -> Self {
        Self {
            data,
            fallback: None,
        }
    }

    fn fallback(reason: FallbackReason) -> Self {
        Self {
            data: mock_view_model(),
            fallback: Some(reason),
        }
    }

    pub fn is_using_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Usage logs after validation, remembering whether the endpoint served the wrong resource
struct UsageLogs {
    entries: Vec<UsageLogEntry>,
    schema_mismatch: bool,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn EnergyRepository>,
    user_id: String,
    options: TransformOptions,
    schema_mismatch: SchemaMismatchPolicy,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn EnergyRepository>,
        user_id: String,
        options: TransformOptions,
        schema_mismatch: SchemaMismatchPolicy,
    ) -> Self {
        Self {
            repository,
            user_id,
            options,
            schema_mismatch,
        }
    }

    pub async fn load(&self) -> DashboardLoad {
        let user = match self.repository.fetch_user(&self.user_id).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Account fetch failed, using demo data: {}", e);
                return DashboardLoad::fallback(FallbackReason::AccountUnavailable(e.to_string()));
            }
        };

        let usage_logs = self.fetch_usage_logs().await;
        let autonomous_log = self.fetch_autonomous_log().await;

        tracing::debug!(
            "Building dashboard for {} from {} usage logs and {} autonomous entries",
            self.user_id,
            usage_logs.entries.len(),
            autonomous_log.len()
        );

        match build_view_model(&user, &usage_logs.entries, &autonomous_log, &self.options) {
            Ok(mut data) => {
                if usage_logs.schema_mismatch
                    && self.schema_mismatch == SchemaMismatchPolicy::MockActivity
                {
                    data.recent_activity = mock_recent_activity();
                }
                DashboardLoad::live(data)
            }
            Err(e) => {
                tracing::error!("Dashboard transform failed, using demo data: {}", e);
                DashboardLoad::fallback(FallbackReason::TransformFailed(e.to_string()))
            }
        }
    }

    async fn fetch_usage_logs(&self) -> UsageLogs {
        match self.repository.fetch_usage_logs().await {
            Ok(entries) => UsageLogs {
                entries,
                schema_mismatch: false,
            },
            Err(e) => {
                tracing::warn!("Usage logs unavailable, continuing without them: {}", e);
                UsageLogs {
                    entries: Vec::new(),
                    schema_mismatch: e.is_schema_mismatch(),
                }
            }
        }
    }

    async fn fetch_autonomous_log(&self) -> Vec<AutonomousLogEntry> {
        self.repository
            .fetch_autonomous_log()
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Autonomous log unavailable, continuing without it: {}", e);
                Vec::new()
            })
    }
}
