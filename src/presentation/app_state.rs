// Application state for HTTP handlers
use crate::application::assistant_service::AssistantService;
use crate::application::dashboard_store::DashboardStore;

pub struct AppState {
    pub store: DashboardStore,
    pub assistant: AssistantService,
    /// Items revealed per "show more" step
    pub page_size: usize,
}
