//! HTTP client for the Mediascope task service.

use std::fmt;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::{ApiError, Error, Result};
use crate::result::{Table, TaskId, TaskResult, TaskState, TaskStatus, TaskTicket};
use crate::task::Task;

/// Base URL of the TV Index task service.
pub const BASE_URL: &str = "https://api.mediascope.net/tvindex/api/v1";

/// Default delay between two state checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default time to wait for a task before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Client for submitting tasks and fetching their results.
#[derive(Clone)]
pub struct MediascopeClient {
    token: String,
    http_client: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
    timeout: Duration,
}

impl MediascopeClient {
    /// Creates a client for the production service.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, BASE_URL)
    }

    /// Creates a client for another deployment (or a mock server).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            http_client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets how often [`MediascopeClient::execute`] checks the task state and
    /// how long it waits in total.
    pub fn with_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.timeout = timeout;
        self
    }

    /// Returns the API token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the delay between two state checks.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns how long `wait` polls before giving up.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Submits a task and returns the identifier the service assigned.
    pub async fn submit(&self, task: &Task) -> Result<TaskId> {
        let document = task.document();
        debug!(
            kind = %task.kind(),
            audiences = document.target_audiences.len(),
            "submitting task"
        );
        let ticket: TaskTicket = self.post(task.kind().endpoint(), &document).await?;
        debug!(id = %ticket.id, "task accepted");
        Ok(ticket.id)
    }

    /// Fetches the current state of a task.
    pub async fn state(&self, id: &TaskId) -> Result<TaskState> {
        self.get(&format!("/task/state/{id}")).await
    }

    /// Fetches the raw result of a finished task.
    pub async fn result(&self, id: &TaskId) -> Result<TaskResult> {
        self.get(&format!("/task/result/{id}")).await
    }

    /// Polls until the task is done.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::TaskFailed` if the service reports a failure and
    /// `ApiError::Timeout` if the task is not done within the timeout.
    pub async fn wait(&self, id: &TaskId) -> Result<()> {
        let started = Instant::now();
        loop {
            let state = self.state(id).await?;
            debug!(%id, status = ?state.status, "polled task state");
            match state.status {
                TaskStatus::Done => return Ok(()),
                TaskStatus::Failed => {
                    return Err(ApiError::TaskFailed {
                        id: id.to_string(),
                        message: state
                            .message
                            .unwrap_or_else(|| "no reason given".to_string()),
                    }
                    .into())
                }
                TaskStatus::New | TaskStatus::InProgress => {}
            }

            if started.elapsed() >= self.timeout {
                return Err(ApiError::Timeout {
                    id: id.to_string(),
                    waited_secs: self.timeout.as_secs(),
                }
                .into());
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Submits a task, waits for it and returns the flattened result.
    pub async fn execute(&self, task: &Task) -> Result<Table> {
        let id = self.submit(task).await?;
        self.wait(&id).await?;
        let result = self.result(&id).await?;
        let table = result.table(task);
        info!(%id, rows = table.rows.len(), columns = table.columns.len(), "task finished");
        Ok(table)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(network_error)?;

        self.handle_response(endpoint, response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(network_error)?;

        self.handle_response(endpoint, response).await
    }

    /// Handles the HTTP response, converting it to our error types.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        Err(self.parse_error_response(endpoint, response).await)
    }

    /// Parses an error response into our error types.
    async fn parse_error_response(&self, endpoint: &str, response: reqwest::Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let message = response.text().await.unwrap_or_default();
        debug!(endpoint, status = status_code, "request failed");

        let api_error = match status_code {
            401 | 403 => ApiError::Auth {
                message: if message.is_empty() {
                    "Authentication failed".to_string()
                } else {
                    message
                },
            },
            404 => ApiError::NotFound {
                resource: "endpoint".to_string(),
                id: endpoint.to_string(),
            },
            429 => ApiError::RateLimit { retry_after },
            400 | 422 => ApiError::Validation {
                field: None,
                message: if message.is_empty() {
                    "Bad request".to_string()
                } else {
                    message
                },
            },
            _ => ApiError::Http {
                status: status_code,
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    message
                },
            },
        };

        Error::Api(api_error)
    }
}

/// Connection failures become `ApiError::Network`; other transport errors pass through.
fn network_error(e: reqwest::Error) -> Error {
    if e.is_connect() || e.is_timeout() {
        ApiError::Network {
            message: e.to_string(),
        }
        .into()
    } else {
        e.into()
    }
}

impl fmt::Debug for MediascopeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediascopeClient")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("poll_interval", &self.poll_interval)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
