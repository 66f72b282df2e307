use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, error};

use super::{endpoint::Endpoint, error::Error};

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub status_code: Option<u16>,
    #[serde(default)]
    pub message: serde_json::Value,
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// `message` is either a string or a list of strings.
    pub fn message(&self) -> Option<String> {
        match &self.message {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(parts) => Some(
                parts
                    .iter()
                    .filter_map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => self.error.clone(),
        }
    }
}

pub fn error_from_status(status: reqwest::StatusCode, body: &str) -> Error {
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Error::Unauthorized;
    }
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
    Error::Status {
        code: status.as_u16(),
        message,
    }
}

pub async fn parse<T: DeserializeOwned>(
    endpoint: &Endpoint,
    resp: reqwest::Response,
) -> Result<T, Error> {
    let resp = check_status(endpoint, resp).await?;
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        error!("request: {} failed to decode body: {}", endpoint, e);
        Error::InvalidResponse(e.to_string())
    })
}

pub async fn check_status(
    endpoint: &Endpoint,
    resp: reqwest::Response,
) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        debug!("request: {} status: {}", endpoint, status);
        return Ok(resp);
    }
    error!("request {} status: {}", endpoint, status);
    let body = resp.text().await.unwrap_or_default();
    Err(error_from_status(status, &body))
}
