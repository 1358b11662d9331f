use async_trait::async_trait;
use shared::{
    domain::CreatorId,
    error::ApiFailure,
    protocol::{
        AiStatus, BrandMatchingRequest, CreatorAnalytics, CreatorQuery, CreatorSummary,
        DashboardOverview, GenerateContentRequest, GeneratedContent, MatchingResult,
        RiskAssessment, RiskCheckRequest,
    },
};

pub mod catalog;
pub mod config;
pub mod flow;
pub mod format;
pub mod operation;
pub mod orchestrator;
pub mod requests;
pub mod selection;
pub mod tier;
pub mod transport;
pub mod validation;
pub mod view;

pub use catalog::{BrandCatalog, CatalogError};
pub use config::{load_settings, ClientSettings};
pub use flow::{Flow, FlowKind};
pub use operation::{AsyncOperation, InvocationId, OperationState};
pub use orchestrator::{Completion, FlowOutcome, FlowRegistry, FlowStatus, Orchestrator};
pub use tier::{classify, MatchTier};
pub use transport::HttpBackend;
pub use validation::Rejection;
pub use view::DashboardView;

/// The business backend. Every call resolves to the envelope's data or a
/// typed failure; generation, matching and risk scoring happen on the far side.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn dashboard_overview(&self) -> Result<DashboardOverview, ApiFailure>;
    async fn list_creators(&self, query: &CreatorQuery) -> Result<Vec<CreatorSummary>, ApiFailure>;
    async fn creator_analytics(&self, creator_id: CreatorId) -> Result<CreatorAnalytics, ApiFailure>;
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GeneratedContent, ApiFailure>;
    async fn match_brand_creators(
        &self,
        request: &BrandMatchingRequest,
    ) -> Result<MatchingResult, ApiFailure>;
    async fn check_content_risk(
        &self,
        request: &RiskCheckRequest,
    ) -> Result<RiskAssessment, ApiFailure>;
    async fn ai_status(&self) -> Result<AiStatus, ApiFailure>;
}
