//! reqwest implementation of [`DashboardBackend`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::CreatorId,
    error::ApiFailure,
    protocol::{
        AiStatus, BrandMatchingRequest, CreatorAnalytics, CreatorQuery, CreatorSummary,
        DashboardOverview, Envelope, GenerateContentRequest, GeneratedContent, MatchingResult,
        RiskAssessment, RiskCheckRequest,
    },
};
use tracing::{debug, warn};

use crate::{config::ClientSettings, DashboardBackend};

pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(settings.api_base_url.clone(), http))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiFailure>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        let mut request = self.http.get(&url);
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await.map_err(|err| {
            warn!(url = %url, error = %err, "backend request failed");
            ApiFailure::transport()
        })?;
        read_envelope(&url, response).await
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiFailure>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                warn!(url = %url, error = %err, "backend request failed");
                ApiFailure::transport()
            })?;
        read_envelope(&url, response).await
    }
}

/// Application failures arrive with 4xx/5xx statuses and an envelope body,
/// so the body decides the outcome. An unreadable body is a transport failure.
async fn read_envelope<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ApiFailure> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|err| {
        warn!(url = %url, status = status.as_u16(), error = %err, "failed to read backend response");
        ApiFailure::transport()
    })?;
    let envelope: Envelope = serde_json::from_slice(&bytes).map_err(|err| {
        warn!(url = %url, status = status.as_u16(), error = %err, "backend response is not an envelope");
        ApiFailure::transport()
    })?;
    debug!(url = %url, status = status.as_u16(), success = envelope.success, "backend responded");
    envelope.into_result()
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn dashboard_overview(&self) -> Result<DashboardOverview, ApiFailure> {
        self.get::<_, ()>("/dashboard/overview", None).await
    }

    async fn list_creators(&self, query: &CreatorQuery) -> Result<Vec<CreatorSummary>, ApiFailure> {
        self.get("/creators", Some(query)).await
    }

    async fn creator_analytics(&self, creator_id: CreatorId) -> Result<CreatorAnalytics, ApiFailure> {
        self.get::<_, ()>(&format!("/creators/{}/analytics", creator_id.0), None)
            .await
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GeneratedContent, ApiFailure> {
        self.post("/content/generate", request).await
    }

    async fn match_brand_creators(
        &self,
        request: &BrandMatchingRequest,
    ) -> Result<MatchingResult, ApiFailure> {
        self.post("/matching/brand-creator", request).await
    }

    async fn check_content_risk(
        &self,
        request: &RiskCheckRequest,
    ) -> Result<RiskAssessment, ApiFailure> {
        self.post("/risk/content-check", request).await
    }

    async fn ai_status(&self) -> Result<AiStatus, ApiFailure> {
        self.get::<_, ()>("/ai/status", None).await
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
