// Schema validation for the optional backend resources
use crate::application::source_error::SourceError;
use crate::domain::autonomous_log::{AutonomousLogEntry, AutonomousLogEnvelope};
use crate::domain::usage_log::UsageLogEntry;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const USAGE_LOGS: &str = "/logs";
pub const AUTONOMOUS_LOG: &str = "/autonomous-ai/log";

/// Fields every usage-log record carries; appliance records served under `/logs` lack them
const USAGE_LOG_FIELDS: [&str; 3] = ["appliance_id", "start_time", "energy_consumed"];

/// Validate a `/logs` payload, rejecting anything that is not a list of usage logs
pub fn validate_usage_logs(payload: Value) -> Result<Vec<UsageLogEntry>, SourceError> {
    let Value::Array(items) = payload else {
        return Err(mismatch(USAGE_LOGS, "expected an array".to_string()));
    };

    if let Some(first) = items.first() {
        let Some(record) = first.as_object() else {
            return Err(mismatch(USAGE_LOGS, "first element is not an object".to_string()));
        };

        let missing: Vec<&str> = USAGE_LOG_FIELDS
            .iter()
            .copied()
            .filter(|field| !record.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(mismatch(
                USAGE_LOGS,
                format!("first element is missing {}", missing.join(", ")),
            ));
        }
    }

    Ok(decode_rows(USAGE_LOGS, items))
}

/// Unwrap the `{success, log}` envelope of `/autonomous-ai/log`
pub fn unwrap_autonomous_envelope(payload: Value) -> Result<Vec<AutonomousLogEntry>, SourceError> {
    let envelope: AutonomousLogEnvelope =
        serde_json::from_value(payload).map_err(|e| SourceError::Decode {
            resource: AUTONOMOUS_LOG,
            detail: e.to_string(),
        })?;

    if !envelope.success {
        return Err(SourceError::Decode {
            resource: AUTONOMOUS_LOG,
            detail: "envelope reports success = false".to_string(),
        });
    }

    let rows = envelope.log.ok_or_else(|| SourceError::Decode {
        resource: AUTONOMOUS_LOG,
        detail: "envelope has no log".to_string(),
    })?;

    Ok(decode_rows(AUTONOMOUS_LOG, rows))
}

/// Decode each row on its own, skipping the ones that do not fit
fn decode_rows<T: DeserializeOwned>(resource: &'static str, rows: Vec<Value>) -> Vec<T> {
    let total = rows.len();
    let decoded: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping {} row {}: {}", resource, index, e);
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::warn!("Kept {} of {} rows from {}", decoded.len(), total, resource);
    }
    decoded
}

fn mismatch(resource: &'static str, detail: String) -> SourceError {
    SourceError::SchemaMismatch { resource, detail }
}
