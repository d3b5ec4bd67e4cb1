// Dashboard domain model - the view model the UI renders from
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewModel {
    pub user: UserSummary,
    pub power_consumers: Vec<PowerConsumer>,
    pub overview: Vec<OverviewCard>,
    pub ai_insights: AiInsights,
    pub autonomous_actions: Vec<AutonomousAction>,
    pub recent_activity: Vec<ActivityItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub monthly_budget: f64,
    pub current_usage: f64,
    pub current_cost: f64,
    pub budget_left: f64,
    pub budget_used_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerConsumer {
    pub id: String,
    pub name: String,
    pub energy: f64,
    pub percentage: f64,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Percentage magnitude, one decimal
    pub magnitude: f64,
}

impl Trend {
    pub fn flat() -> Self {
        Self {
            direction: TrendDirection::Flat,
            magnitude: 0.0,
        }
    }

    /// Relative change from `previous` to `current`, flat when there is no usable baseline
    pub fn between(previous: Option<f64>, current: f64) -> Self {
        let Some(previous) = previous.filter(|p| p.is_finite() && *p > 0.0) else {
            return Self::flat();
        };

        let change = (current - previous) / previous * 100.0;
        let magnitude = round1(change.abs());
        let direction = if magnitude == 0.0 {
            TrendDirection::Flat
        } else if change > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        };

        Self {
            direction,
            magnitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewCard {
    pub title: String,
    pub value: String,
    pub trend: Trend,
}

impl OverviewCard {
    pub fn new(title: impl Into<String>, value: String, trend: Trend) -> Self {
        Self {
            title: title.into(),
            value,
            trend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsights {
    pub summary: String,
    pub recommendations: Vec<String>,
    pub potential_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutonomousAction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub reasoning: String,
    pub outcome: String,
    pub routines: Vec<RoutineSummary>,
    pub optimizations: Vec<OptimizationSummary>,
    pub tool_call_count: usize,
}

/// Summary of a `create_autonomous_routine` call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineSummary {
    pub name: String,
    pub appliance_id: Option<String>,
    pub action: Option<String>,
    pub schedule: Option<String>,
}

/// Summary of an `autonomous_appliance_control` call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSummary {
    pub appliance_id: String,
    pub action: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    User,
    System,
    Ai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn from_energy(kwh: f64) -> Self {
        if kwh > 1.0 {
            Impact::High
        } else if kwh > 0.1 {
            Impact::Medium
        } else {
            Impact::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub id: String,
    pub appliance_id: String,
    pub appliance_name: String,
    pub action: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub energy: f64,
    pub impact: Impact,
    pub timestamp: DateTime<Utc>,
    pub duration_minutes: Option<i64>,
}

/// Anything the UI lists in reverse-chronological order
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

impl Timestamped for ActivityItem {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Timestamped for AutonomousAction {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
