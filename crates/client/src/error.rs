use reqwest::StatusCode;
use thiserror::Error;

/// Remote-call failure taxonomy. Every variant means "could not ask the
/// remote service"; none of them is ever degraded into an empty result.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no live backend for service `{service}`")]
    NoBackend { service: String },
    #[error("service `{service}` unreachable: {source}")]
    Unreachable {
        service: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("service `{service}` responded with status {status}")]
    Upstream { service: String, status: StatusCode },
    #[error("invalid response from service `{service}`: {source}")]
    Decode {
        service: String,
        #[source]
        source: reqwest::Error,
    },
}
