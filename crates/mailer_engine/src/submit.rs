use std::time::Duration;

use mailer_core::{ErrorKind, FailureReport, SubmissionOutcome};
use mailer_logging::{mailer_info, mailer_warn};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://toggl-hire-frontend-homework.onrender.com/api/send";

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    emails: &'a [String],
}

/// Body of any non-200 response.
#[derive(Debug, Deserialize)]
struct FailureBody {
    error: String,
    #[serde(default)]
    emails: Vec<String>,
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    /// Send the whole entry list in one request. Every outcome, including transport
    /// problems, is folded into the returned value.
    async fn submit(&self, emails: &[String]) -> SubmissionOutcome;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
    }

    async fn post(&self, emails: &[String]) -> Result<SubmissionOutcome, reqwest::Error> {
        let client = self.build_client()?;
        let response = client
            .post(&self.settings.endpoint)
            .json(&SubmitRequest { emails })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            mailer_info!("Submission accepted for {} entries", emails.len());
            return Ok(SubmissionOutcome::Success);
        }

        let body = response.bytes().await?;
        Ok(SubmissionOutcome::Failure(parse_failure(status, &body)))
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(&self, emails: &[String]) -> SubmissionOutcome {
        match self.post(emails).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let reason = if err.is_timeout() { "timeout" } else { "network error" };
                mailer_warn!(
                    "Submission to {} failed ({}): {}",
                    self.settings.endpoint,
                    reason,
                    err
                );
                SubmissionOutcome::Failure(FailureReport::transport())
            }
        }
    }
}

fn parse_failure(status: StatusCode, body: &[u8]) -> FailureReport {
    match serde_json::from_slice::<FailureBody>(body) {
        Ok(failure) => {
            mailer_info!(
                "Submission rejected with {}: category {}, {} offending entries",
                status,
                failure.error,
                failure.emails.len()
            );
            FailureReport {
                kind: ErrorKind::from_category(&failure.error),
                offending_entries: failure.emails,
            }
        }
        Err(err) => {
            mailer_warn!(
                "Submission failed with {} and an unreadable body: {}",
                status,
                err
            );
            FailureReport::transport()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_has_emails_array() {
        let emails = vec!["a@x.com".to_string(), String::new()];
        let body = serde_json::to_value(SubmitRequest { emails: &emails }).unwrap();
        assert_eq!(body, serde_json::json!({ "emails": ["a@x.com", ""] }));
    }

    #[test]
    fn failure_body_without_emails_defaults_to_empty_list() {
        let report = parse_failure(StatusCode::BAD_REQUEST, br#"{"error":"send_failure"}"#);
        assert_eq!(report.kind, ErrorKind::SendFailure);
        assert!(report.offending_entries.is_empty());
    }

    #[test]
    fn failure_body_without_category_is_transport() {
        let report = parse_failure(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(report, FailureReport::transport());
    }
}
