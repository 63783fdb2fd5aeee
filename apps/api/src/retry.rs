//! Optional resilience layer around the provider-backed clients.
//!
//! Clients stay single-attempt and keep their own timeout per call; the policy
//! only decides whether another call follows. Enabled when
//! `PROVIDER_MAX_RETRIES > 0`.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct RetryPolicy {
    max_retries: u32,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Runs `operation`, retrying transient upstream failures (429, 5xx, timeouts)
    /// with exponential backoff: 1s, 2s, 4s, ...
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = Duration::from_millis(1000u64 << attempt.min(10));
                    attempt += 1;
                    warn!(
                        "{} attempt {} failed ({}), retrying after {}ms...",
                        label,
                        attempt,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::llm_client::testing::StubTransport;
    use crate::llm_client::{LlmError, MODEL};
    use crate::schedule::client::ScheduleClient;
    use crate::schedule::models::fixtures::weekday_schedule;
    use crate::schedule::prompt_builder::{build_prompt, SchedulePrompt};

    fn prompt() -> SchedulePrompt {
        build_prompt("Algebra", 1, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    fn one_week_reply() -> String {
        let schedule = weekday_schedule(1, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        serde_json::to_string(&schedule).unwrap()
    }

    fn schedule_client(stub: Arc<StubTransport>) -> ScheduleClient {
        ScheduleClient::new(stub, Some("test-key".to_string()), MODEL.to_string())
    }

    fn server_error() -> LlmError {
        LlmError::Api {
            status: 503,
            body: "overloaded".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_attempt_is_retried_with_a_fresh_bound() {
        let stub = Arc::new(
            StubTransport::replying(&one_week_reply())
                .with_delays(vec![Duration::from_secs(61)]),
        );
        let client = schedule_client(stub.clone());
        let prompt = prompt();

        let schedule = RetryPolicy::new(3)
            .run("schedule generation", || client.generate(&prompt, 1))
            .await
            .unwrap();

        assert_eq!(schedule.day_count(), 5);
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_errors_are_retried_until_success() {
        let stub = Arc::new(StubTransport::new(vec![
            Err(server_error()),
            Err(server_error()),
            Ok(one_week_reply()),
        ]));
        let client = schedule_client(stub.clone());
        let prompt = prompt();

        let schedule = RetryPolicy::new(3)
            .run("schedule generation", || client.generate(&prompt, 1))
            .await
            .unwrap();

        assert_eq!(schedule.weeks.len(), 1);
        assert_eq!(stub.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let stub = Arc::new(StubTransport::new(vec![
            Err(server_error()),
            Err(server_error()),
            Err(server_error()),
        ]));
        let client = schedule_client(stub.clone());
        let prompt = prompt();

        let err = RetryPolicy::new(1)
            .run("schedule generation", || client.generate(&prompt, 1))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Upstream(LlmError::Api { status: 503, .. })
        ));
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_parse_and_client_errors_are_not_retried() {
        let stub = Arc::new(StubTransport::new(vec![Ok("{\"weeks\": [".to_string())]));
        let client = schedule_client(stub.clone());
        let prompt = prompt();

        let err = RetryPolicy::new(3)
            .run("schedule generation", || client.generate(&prompt, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Parse { .. }));
        assert_eq!(stub.calls(), 1);

        let stub = Arc::new(StubTransport::new(vec![Err(LlmError::Api {
            status: 400,
            body: "bad request".to_string(),
        })]));
        let client = schedule_client(stub.clone());
        let err = RetryPolicy::new(3)
            .run("schedule generation", || client.generate(&prompt, 1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Upstream(LlmError::Api { status: 400, .. })
        ));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_policy_is_single_attempt() {
        let stub = Arc::new(
            StubTransport::replying(&one_week_reply())
                .with_delays(vec![Duration::from_secs(61)]),
        );
        let client = schedule_client(stub.clone());
        let prompt = prompt();

        let err = RetryPolicy::default()
            .run("schedule generation", || client.generate(&prompt, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Upstream(LlmError::Timeout(_))));
        assert_eq!(stub.calls(), 1);
    }
}
