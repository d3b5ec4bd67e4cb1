// Failure kinds for backend resource fetches and view-model transforms
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request to {resource} timed out")]
    Timeout { resource: &'static str },

    #[error("request to {resource} failed: {source}")]
    Transport {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{resource} returned status {status}: {body}")]
    Status {
        resource: &'static str,
        status: u16,
        body: String,
    },

    #[error("could not decode {resource}: {detail}")]
    Decode {
        resource: &'static str,
        detail: String,
    },

    /// The endpoint answered with a different resource than the one asked for
    #[error("{resource} does not match the expected schema: {detail}")]
    SchemaMismatch {
        resource: &'static str,
        detail: String,
    },
}

impl SourceError {
    pub fn from_reqwest(resource: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout { resource }
        } else if err.is_decode() {
            SourceError::Decode {
                resource,
                detail: err.to_string(),
            }
        } else {
            SourceError::Transport {
                resource,
                source: err,
            }
        }
    }

    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, SourceError::SchemaMismatch { .. })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("account figure `{field}` is not a finite number")]
    NonFiniteFigure { field: &'static str },
}
