use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatTransport;
use crate::retry::RetryPolicy;
use crate::schedule::client::ScheduleClient;
use crate::tutor::TutorClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub schedules: ScheduleClient,
    pub tutor: TutorClient,
    pub retry: RetryPolicy,
}

impl AppState {
    /// Wires both provider-backed services onto one transport and credential.
    pub fn new(config: Config, transport: Arc<dyn ChatTransport>) -> Self {
        let schedules = ScheduleClient::new(
            transport.clone(),
            config.groq_api_key.clone(),
            config.model.clone(),
        );
        let tutor = TutorClient::new(transport, config.groq_api_key.clone(), config.model.clone());
        let retry = RetryPolicy::new(config.provider_max_retries);
        Self {
            config,
            schedules,
            tutor,
            retry,
        }
    }
}
