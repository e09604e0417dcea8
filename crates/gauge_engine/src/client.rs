use std::time::Duration;

use gauge_core::{CountFailure, CountOutcome, CountRequest, FailureKind};
use gauge_logging::gauge_debug;
use reqwest::StatusCode;
use url::Url;

use crate::wire::{CountReply, ErrorReply, RequestBody};
use crate::EngineError;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Count,
    ChatCount,
}

impl Endpoint {
    pub fn for_request(request: &CountRequest) -> Self {
        match request {
            CountRequest::Simple { .. } => Endpoint::Count,
            CountRequest::Chat { .. } => Endpoint::ChatCount,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Count => "count",
            Endpoint::ChatCount => "chat-count",
        }
    }
}

/// Asynchronous access to the counting service.
///
/// Failures are returned as values; implementations never retry.
#[async_trait::async_trait]
pub trait CountClient: Send + Sync {
    async fn count(&self, request: &CountRequest) -> CountOutcome;
}

#[derive(Debug, Clone)]
pub struct ReqwestCountClient {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestCountClient {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let base_url = settings.base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|source| EngineError::InvalidBaseUrl {
            url: settings.base_url.clone(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EngineError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(EngineError::Client)?;

        Ok(Self { base_url, client })
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

#[async_trait::async_trait]
impl CountClient for ReqwestCountClient {
    async fn count(&self, request: &CountRequest) -> CountOutcome {
        let url = self.endpoint_url(Endpoint::for_request(request));
        gauge_debug!("POST {} model={}", url, request.model_id());

        let response = self
            .client
            .post(&url)
            .json(&RequestBody::from(request))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(service_failure(status, &body));
        }

        let reply: CountReply = serde_json::from_slice(&body).map_err(|err| {
            CountFailure::new(FailureKind::MalformedResponse, err.to_string())
        })?;
        Ok(reply.tokens)
    }
}

fn service_failure(status: StatusCode, body: &[u8]) -> CountFailure {
    let message = serde_json::from_slice::<ErrorReply>(body)
        .map(|reply| reply.message())
        .unwrap_or_else(|_| status.to_string());
    CountFailure::new(
        FailureKind::Service {
            status: status.as_u16(),
        },
        message,
    )
}

fn map_reqwest_error(err: reqwest::Error) -> CountFailure {
    if err.is_timeout() {
        return CountFailure::new(FailureKind::Network, format!("request timed out: {err}"));
    }
    if err.is_connect() {
        return CountFailure::new(FailureKind::Network, format!("connection failed: {err}"));
    }
    CountFailure::new(FailureKind::Network, err.to_string())
}
