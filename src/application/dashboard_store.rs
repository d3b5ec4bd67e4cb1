// Dashboard store - Current dashboard state, status flags and guarded refresh
use crate::application::dashboard_service::{DashboardLoad, DashboardService, FALLBACK_MESSAGE};
use crate::domain::dashboard::DashboardViewModel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub loading: bool,
    /// Non-fatal, user-facing status message
    pub error: Option<String>,
    pub is_using_fallback: bool,
    pub data: Option<DashboardViewModel>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Token of the refresh that produced `data`
    pub request_id: u64,
}

impl DashboardState {
    fn initial() -> Self {
        Self {
            loading: true,
            error: None,
            is_using_fallback: false,
            data: None,
            last_updated: None,
            request_id: 0,
        }
    }

    fn from_load(load: DashboardLoad, request_id: u64) -> Self {
        let is_using_fallback = load.is_using_fallback();
        Self {
            loading: false,
            error: is_using_fallback.then(|| FALLBACK_MESSAGE.to_string()),
            is_using_fallback,
            data: Some(load.data),
            last_updated: Some(Utc::now()),
            request_id,
        }
    }
}

pub struct DashboardStore {
    service: DashboardService,
    state: watch::Sender<DashboardState>,
    latest_request: AtomicU64,
}

impl DashboardStore {
    pub fn new(service: DashboardService) -> Self {
        let (state, _) = watch::channel(DashboardState::initial());
        Self {
            service,
            state,
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// Run one load and publish it unless a newer refresh was issued meanwhile
    pub async fn refresh(&self) -> DashboardState {
        let request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| state.loading = true);

        let load = self.service.load().await;
        if let Some(reason) = &load.fallback {
            tracing::warn!("Refresh {} is serving demo data: {}", request_id, reason.detail());
        }

        let published = self.state.send_if_modified(|state| {
            if self.latest_request.load(Ordering::SeqCst) != request_id {
                return false;
            }
            *state = DashboardState::from_load(load, request_id);
            true
        });

        if published {
            tracing::info!(
                "Dashboard refresh {} published (fallback: {})",
                request_id,
                self.state.borrow().is_using_fallback
            );
        } else {
            tracing::debug!("Discarding stale dashboard refresh {}", request_id);
        }

        self.snapshot()
    }
}
