// Raw backend payloads -> dashboard view model
use crate::application::source_error::TransformError;
use crate::domain::account::{ApplianceRecord, UserRecord};
use crate::domain::autonomous_log::{
    APPLIANCE_CONTROL_TOOL, AutonomousLogEntry, CREATE_ROUTINE_TOOL, ToolCall,
};
use crate::domain::dashboard::{
    ActivityItem, ActivityType, AiInsights, AutonomousAction, DashboardViewModel, Impact,
    OptimizationSummary, OverviewCard, PowerConsumer, RoutineSummary, Trend, TrendDirection,
    UserSummary, round1,
};
use crate::domain::pagination::sort_newest_first;
use crate::domain::usage_log::{Trigger, UsageLogEntry};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct TransformOptions {
    pub currency_symbol: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}

pub fn build_view_model(
    user: &UserRecord,
    usage_logs: &[UsageLogEntry],
    autonomous_log: &[AutonomousLogEntry],
    options: &TransformOptions,
) -> Result<DashboardViewModel, TransformError> {
    check_figures(user)?;

    let summary = user_summary(user);
    let overview = overview_cards(user, &summary, options);
    let ai_insights = ai_insights(user, &summary);

    let mut recent_activity: Vec<ActivityItem> = usage_logs
        .iter()
        .map(|log| activity_from_log(log, &user.appliances))
        .collect();
    sort_newest_first(&mut recent_activity);

    let mut autonomous_actions: Vec<AutonomousAction> = autonomous_log
        .iter()
        .enumerate()
        .map(|(index, entry)| action_from_log(index, entry))
        .collect();
    sort_newest_first(&mut autonomous_actions);

    Ok(DashboardViewModel {
        user: summary,
        power_consumers: power_consumers(&user.appliances),
        overview,
        ai_insights,
        autonomous_actions,
        recent_activity,
    })
}

fn check_figures(user: &UserRecord) -> Result<(), TransformError> {
    let figures = [
        ("monthly_budget", Some(user.monthly_budget)),
        ("current_month_usage", Some(user.current_month_usage)),
        ("current_month_cost", Some(user.current_month_cost)),
        ("last_month_usage", user.last_month_usage),
        ("last_month_cost", user.last_month_cost),
    ];

    for (field, value) in figures {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(TransformError::NonFiniteFigure { field });
        }
    }
    Ok(())
}

fn user_summary(user: &UserRecord) -> UserSummary {
    let budget_left = round2(user.monthly_budget - user.current_month_cost);
    let budget_used_percentage = if user.monthly_budget > 0.0 {
        round1(user.current_month_cost / user.monthly_budget * 100.0)
    } else {
        0.0
    };

    UserSummary {
        id: user.uid.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        monthly_budget: user.monthly_budget,
        current_usage: user.current_month_usage,
        current_cost: user.current_month_cost,
        budget_left,
        budget_used_percentage,
    }
}

fn power_consumers(appliances: &[ApplianceRecord]) -> Vec<PowerConsumer> {
    let total: f64 = appliances
        .iter()
        .map(|a| a.energy_today)
        .filter(|e| e.is_finite() && *e > 0.0)
        .sum();

    let mut consumers: Vec<PowerConsumer> = appliances
        .iter()
        .map(|a| {
            let energy = if a.energy_today.is_finite() { a.energy_today.max(0.0) } else { 0.0 };
            PowerConsumer {
                id: a.appliance_id.clone(),
                name: a.name.clone(),
                energy,
                percentage: if total > 0.0 { round1(energy / total * 100.0) } else { 0.0 },
                status: a.status.clone().unwrap_or_else(|| "unknown".to_string()),
            }
        })
        .collect();

    consumers.sort_by(|a, b| b.energy.total_cmp(&a.energy));
    consumers
}

fn overview_cards(
    user: &UserRecord,
    summary: &UserSummary,
    options: &TransformOptions,
) -> Vec<OverviewCard> {
    let budget_trend = Trend {
        direction: if summary.budget_used_percentage > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Flat
        },
        magnitude: summary.budget_used_percentage,
    };
    let active = user.appliances.iter().filter(|a| a.is_active()).count();

    vec![
        OverviewCard::new(
            "Monthly Usage",
            format!("{:.1} kWh", user.current_month_usage),
            Trend::between(user.last_month_usage, user.current_month_usage),
        ),
        OverviewCard::new(
            "Monthly Cost",
            format_currency(&options.currency_symbol, user.current_month_cost),
            Trend::between(user.last_month_cost, user.current_month_cost),
        ),
        OverviewCard::new(
            "Budget Left",
            format_currency(&options.currency_symbol, summary.budget_left),
            budget_trend,
        ),
        OverviewCard::new("Active Appliances", active.to_string(), Trend::flat()),
    ]
}

fn ai_insights(user: &UserRecord, summary: &UserSummary) -> AiInsights {
    match &user.insights {
        Some(insights) => AiInsights {
            summary: insights.summary.clone(),
            recommendations: insights.recommendations.clone(),
            potential_savings: insights.potential_savings,
        },
        None => AiInsights {
            summary: format!(
                "You have used {:.1}% of your monthly budget so far.",
                summary.budget_used_percentage
            ),
            recommendations: Vec::new(),
            potential_savings: 0.0,
        },
    }
}

pub fn activity_from_log(log: &UsageLogEntry, appliances: &[ApplianceRecord]) -> ActivityItem {
    let (action, kind) = match log.trigger() {
        Trigger::Manual => ("Controlled", ActivityType::User),
        Trigger::Routine => ("Automated", ActivityType::System),
        Trigger::Other => ("Activity", ActivityType::Ai),
    };

    let appliance_name = log
        .appliance_name
        .clone()
        .or_else(|| {
            appliances
                .iter()
                .find(|a| a.appliance_id == log.appliance_id)
                .map(|a| a.name.clone())
        })
        .unwrap_or_else(|| log.appliance_id.clone());

    ActivityItem {
        id: format!("{}-{}", log.appliance_id, log.start_time.timestamp()),
        appliance_id: log.appliance_id.clone(),
        appliance_name,
        action: action.to_string(),
        kind,
        energy: log.energy_consumed,
        impact: Impact::from_energy(log.energy_consumed),
        timestamp: log.start_time,
        duration_minutes: log.duration_minutes(),
    }
}

pub fn action_from_log(index: usize, entry: &AutonomousLogEntry) -> AutonomousAction {
    let routines = entry
        .tool_calls
        .iter()
        .filter(|call| call.name == CREATE_ROUTINE_TOOL)
        .map(routine_summary)
        .collect();

    let optimizations = entry
        .tool_calls
        .iter()
        .filter(|call| call.name == APPLIANCE_CONTROL_TOOL)
        .filter_map(optimization_summary)
        .collect();

    AutonomousAction {
        id: format!("auto-{}-{}", entry.timestamp.timestamp_millis(), index),
        timestamp: entry.timestamp,
        reasoning: entry.reasoning.clone(),
        outcome: entry.outcome.clone(),
        routines,
        optimizations,
        tool_call_count: entry.tool_calls.len(),
    }
}

fn routine_summary(call: &ToolCall) -> RoutineSummary {
    RoutineSummary {
        name: str_arg(&call.args, &["name", "routine_name"])
            .unwrap_or_else(|| "Untitled routine".to_string()),
        appliance_id: str_arg(&call.args, &["appliance_id"]),
        action: str_arg(&call.args, &["action"]),
        schedule: str_arg(&call.args, &["schedule", "time", "trigger_time"]),
    }
}

fn optimization_summary(call: &ToolCall) -> Option<OptimizationSummary> {
    let appliance_id = str_arg(&call.args, &["appliance_id"]);
    let action = str_arg(&call.args, &["action", "command"]);

    match (appliance_id, action) {
        (Some(appliance_id), Some(action)) => Some(OptimizationSummary {
            appliance_id,
            action,
            reason: str_arg(&call.args, &["reason"]),
        }),
        _ => {
            tracing::debug!("Skipping {} call without appliance_id/action", call.name);
            None
        }
    }
}

/// First of `keys` present in `args`, stringifying scalars
fn str_arg(args: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match args.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

pub fn format_currency(symbol: &str, amount: f64) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", symbol, amount.abs())
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
