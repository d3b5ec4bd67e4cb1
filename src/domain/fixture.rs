// Fixed demo dataset shown whenever live data cannot be assembled
use chrono::{DateTime, Utc};

use super::dashboard::{
    ActivityItem, ActivityType, AiInsights, AutonomousAction, DashboardViewModel, Impact,
    OptimizationSummary, OverviewCard, PowerConsumer, RoutineSummary, Trend, TrendDirection,
    UserSummary,
};

// 2024-06-01T18:00:00Z
const ANCHOR_SECS: i64 = 1_717_264_800;

fn at(minutes_before_anchor: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ANCHOR_SECS - minutes_before_anchor * 60, 0)
        .unwrap_or_default()
}

pub fn mock_view_model() -> DashboardViewModel {
    DashboardViewModel {
        user: UserSummary {
            id: "demo-user".to_string(),
            name: "Krishna Singh".to_string(),
            email: Some("krishna.singh@example.com".to_string()),
            monthly_budget: 150.0,
            current_usage: 412.5,
            current_cost: 96.4,
            budget_left: 53.6,
            budget_used_percentage: 64.3,
        },
        power_consumers: vec![
            consumer("ac-01", "Air Conditioner", 6.2, 48.4, "on"),
            consumer("wh-01", "Water Heater", 3.1, 24.2, "off"),
            consumer("fr-01", "Refrigerator", 2.3, 18.0, "on"),
            consumer("wm-01", "Washing Machine", 1.2, 9.4, "off"),
        ],
        overview: vec![
            OverviewCard::new(
                "Monthly Usage",
                "412.5 kWh".to_string(),
                Trend {
                    direction: TrendDirection::Down,
                    magnitude: 8.3,
                },
            ),
            OverviewCard::new(
                "Monthly Cost",
                "$96.40".to_string(),
                Trend {
                    direction: TrendDirection::Down,
                    magnitude: 6.1,
                },
            ),
            OverviewCard::new(
                "Budget Left",
                "$53.60".to_string(),
                Trend {
                    direction: TrendDirection::Up,
                    magnitude: 64.3,
                },
            ),
            OverviewCard::new("Active Appliances", "2".to_string(), Trend::flat()),
        ],
        ai_insights: AiInsights {
            summary: "Evening cooling accounts for almost half of today's consumption. \
                      Shifting water heating to off-peak hours keeps you well within budget."
                .to_string(),
            recommendations: vec![
                "Raise the air conditioner setpoint to 25°C between 6pm and 10pm".to_string(),
                "Run the water heater before 6am when tariffs are lowest".to_string(),
                "Use the washing machine's eco cycle for everyday loads".to_string(),
            ],
            potential_savings: 14.5,
        },
        autonomous_actions: vec![
            AutonomousAction {
                id: "auto-2".to_string(),
                timestamp: at(30),
                reasoning: "Peak tariff window started while the water heater was idle-heating."
                    .to_string(),
                outcome: "Water heater paused until 10pm".to_string(),
                routines: Vec::new(),
                optimizations: vec![OptimizationSummary {
                    appliance_id: "wh-01".to_string(),
                    action: "turn_off".to_string(),
                    reason: Some("peak tariff".to_string()),
                }],
                tool_call_count: 1,
            },
            AutonomousAction {
                id: "auto-1".to_string(),
                timestamp: at(24 * 60),
                reasoning: "The air conditioner runs every evening at full power.".to_string(),
                outcome: "Created an evening cooling routine".to_string(),
                routines: vec![RoutineSummary {
                    name: "Evening eco cooling".to_string(),
                    appliance_id: Some("ac-01".to_string()),
                    action: Some("set_temperature_25".to_string()),
                    schedule: Some("18:00".to_string()),
                }],
                optimizations: Vec::new(),
                tool_call_count: 1,
            },
        ],
        recent_activity: mock_recent_activity(),
    }
}

/// The three-entry activity list used when `/logs` serves the wrong resource
pub fn mock_recent_activity() -> Vec<ActivityItem> {
    vec![
        activity("1", "ac-01", "Air Conditioner", ActivityType::User, 1.8, at(15), Some(90)),
        activity("2", "wh-01", "Water Heater", ActivityType::System, 0.6, at(120), Some(30)),
        activity("3", "fr-01", "Refrigerator", ActivityType::Ai, 0.05, at(240), None),
    ]
}

fn consumer(id: &str, name: &str, energy: f64, percentage: f64, status: &str) -> PowerConsumer {
    PowerConsumer {
        id: id.to_string(),
        name: name.to_string(),
        energy,
        percentage,
        status: status.to_string(),
    }
}

fn activity(
    id: &str,
    appliance_id: &str,
    appliance_name: &str,
    kind: ActivityType,
    energy: f64,
    timestamp: DateTime<Utc>,
    duration_minutes: Option<i64>,
) -> ActivityItem {
    let action = match kind {
        ActivityType::User => "Controlled",
        ActivityType::System => "Automated",
        ActivityType::Ai => "Activity",
    };

    ActivityItem {
        id: id.to_string(),
        appliance_id: appliance_id.to_string(),
        appliance_name: appliance_name.to_string(),
        action: action.to_string(),
        kind,
        energy,
        impact: Impact::from_energy(energy),
        timestamp,
        duration_minutes,
    }
}
