//! Client for the remote coaching endpoint.
//!
//! One call is one POST of the formatted prompt, raced against a fixed
//! deadline. Whatever goes wrong is normalized into a [`FeedbackError`] so
//! callers never handle transport-specific errors.
//!
//! Request body:
//!
//! ```json
//! { "inputs": { "message": "<prompt text>" } }
//! ```
//!
//! The service is inconsistent about where it puts the text, so the response
//! is read loosely: `error` wins, then `output`, then `response`, then
//! [`NO_FEEDBACK_PLACEHOLDER`].

use crate::format::format_session;
use crate::{CoachConfig, Error, FeedbackError, FeedbackResult, Result, WorkoutSession};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Feedback returned when the service answers without any text
pub const NO_FEEDBACK_PLACEHOLDER: &str = "No feedback available from AI coach.";

#[derive(Serialize)]
struct CoachRequest<'a> {
    inputs: CoachInputs<'a>,
}

#[derive(Serialize)]
struct CoachInputs<'a> {
    message: &'a str,
}

/// Answer of the service's `/health` route
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.as_deref() == Some("healthy")
    }
}

/// Client for the coaching endpoint.
///
/// Cloning is cheap and clones share the underlying connection pool.
/// Concurrent calls are fully independent.
#[derive(Clone, Debug)]
pub struct FeedbackClient {
    http: reqwest::Client,
    endpoint: Url,
    health_url: Url,
    timeout: Duration,
    health_timeout: Duration,
}

impl FeedbackClient {
    /// Build a client from explicit configuration
    pub fn new(config: &CoachConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = config.endpoint_url()?;
        let health_url = endpoint
            .join("health")
            .map_err(|e| Error::Config(format!("Cannot derive health URL: {}", e)))?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            "FeedbackClient endpoint={} timeout_ms={}",
            endpoint, config.timeout_ms
        );
        Ok(Self {
            http,
            endpoint,
            health_url,
            timeout: config.timeout(),
            health_timeout: config.health_timeout(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Request feedback for an already formatted prompt.
    ///
    /// Single-shot: there is no retry. When the deadline wins, the request
    /// future is dropped, which aborts the in-flight transport; a late answer
    /// is never observed.
    pub async fn get_feedback(&self, prompt: &str) -> FeedbackResult {
        debug!(
            "get_feedback posting to {} prompt_len={}",
            self.endpoint,
            prompt.len()
        );

        let outcome = with_deadline(self.timeout, self.exchange(prompt)).await;
        match &outcome {
            Ok(feedback) => info!("get_feedback received {} bytes of feedback", feedback.len()),
            Err(e) => error!("Error calling AI Coach API ({}): {}", e.kind(), e),
        }
        outcome
    }

    /// Format a session and request feedback for it
    pub async fn feedback_for_session(&self, session: &WorkoutSession) -> FeedbackResult {
        let prompt = format_session(session);
        info!(
            "Requesting feedback for session {:?} ({} exercises)",
            session.id,
            session.exercises.len()
        );
        self.get_feedback(&prompt).await
    }

    /// Query the service's `/health` route next to the endpoint
    pub async fn check_health(&self) -> std::result::Result<HealthStatus, FeedbackError> {
        debug!("check_health querying {}", self.health_url);
        let outcome = with_deadline(self.health_timeout, self.fetch_health()).await;
        if let Err(e) = &outcome {
            warn!("Health check failed ({}): {}", e.kind(), e);
        }
        outcome
    }

    async fn fetch_health(&self) -> std::result::Result<HealthStatus, FeedbackError> {
        let response = self
            .http
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(normalize)?;
        let body = read_success_body(response).await?;
        serde_json::from_str(&body).map_err(FeedbackError::unreadable)
    }

    async fn exchange(&self, prompt: &str) -> FeedbackResult {
        let request = CoachRequest {
            inputs: CoachInputs { message: prompt },
        };
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(normalize)?;

        let body = read_success_body(response).await?;
        debug!("get_feedback response body len={}", body.len());
        parse_feedback(&body)
    }
}

/// Race `fut` against a timer; the timer maps to [`FeedbackError::Timeout`]
async fn with_deadline<T, F>(deadline: Duration, fut: F) -> std::result::Result<T, FeedbackError>
where
    F: Future<Output = std::result::Result<T, FeedbackError>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(FeedbackError::Timeout {
            after_ms: deadline.as_millis() as u64,
        }),
    }
}

async fn read_success_body(
    response: reqwest::Response,
) -> std::result::Result<String, FeedbackError> {
    let status = response.status();
    if !status.is_success() {
        // hyper only records the phrase when it differs from the canonical one
        let reason = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
            .or_else(|| status.canonical_reason())
            .unwrap_or("");
        return Err(FeedbackError::http_status(status.as_u16(), reason));
    }
    response.text().await.map_err(normalize)
}

/// Classify a transport-level failure
fn normalize(err: reqwest::Error) -> FeedbackError {
    if let Some(status) = err.status() {
        return FeedbackError::http_status(status.as_u16(), status.canonical_reason().unwrap_or(""));
    }
    if err.is_decode() {
        return FeedbackError::unreadable(&err);
    }

    let mut message = err.to_string();
    let mut source = StdError::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    FeedbackError::Transport(message)
}

/// Extract the feedback text from a response body.
///
/// The body must be a JSON object. A truthy `error` field fails the call;
/// otherwise the first non-empty string among `output` and `response` is the
/// feedback, falling back to [`NO_FEEDBACK_PLACEHOLDER`].
pub fn parse_feedback(body: &str) -> FeedbackResult {
    let value: Value = serde_json::from_str(body).map_err(FeedbackError::unreadable)?;
    let Value::Object(fields) = value else {
        return Err(FeedbackError::unreadable("expected a JSON object"));
    };

    if let Some(err) = fields.get("error").filter(|v| is_truthy(v)) {
        let message = match err {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(FeedbackError::remote(&message));
    }

    let feedback = ["output", "response"]
        .iter()
        .find_map(|key| {
            fields
                .get(*key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or(NO_FEEDBACK_PLACEHOLDER);
    Ok(feedback.to_string())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
