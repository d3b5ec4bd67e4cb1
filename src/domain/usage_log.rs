// Usage log domain model - one historical appliance-energy record from `/logs`
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::timestamp::{deserialize_optional_utc, deserialize_utc};

#[derive(Debug, Clone, Deserialize)]
pub struct UsageLogEntry {
    pub appliance_id: String,
    #[serde(default)]
    pub appliance_name: Option<String>,
    #[serde(deserialize_with = "deserialize_utc")]
    pub start_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_utc")]
    pub end_time: Option<DateTime<Utc>>,
    /// Energy consumed in kWh
    pub energy_consumed: f64,
    #[serde(default)]
    pub trigger: String,
}

/// Who initiated a usage-log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Manual,
    Routine,
    Other,
}

impl Trigger {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "manual" => Trigger::Manual,
            "routine" => Trigger::Routine,
            _ => Trigger::Other,
        }
    }
}

impl UsageLogEntry {
    pub fn trigger(&self) -> Trigger {
        Trigger::parse(&self.trigger)
    }

    pub fn duration_minutes(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.start_time).num_minutes())
            .filter(|minutes| *minutes >= 0)
    }
}
