// Account domain model - the raw `/users/{id}` payload
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub monthly_budget: f64,
    #[serde(default)]
    pub current_month_usage: f64,
    #[serde(default)]
    pub current_month_cost: f64,
    #[serde(default)]
    pub last_month_usage: Option<f64>,
    #[serde(default)]
    pub last_month_cost: Option<f64>,
    #[serde(default)]
    pub appliances: Vec<ApplianceRecord>,
    #[serde(default)]
    pub insights: Option<InsightsRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplianceRecord {
    pub appliance_id: String,
    pub name: String,
    #[serde(default)]
    pub energy_today: f64,
    #[serde(default)]
    pub status: Option<String>,
}

impl ApplianceRecord {
    pub fn is_active(&self) -> bool {
        matches!(
            self.status.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("on") | Some("active")
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightsRecord {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub potential_savings: f64,
}
