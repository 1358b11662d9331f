//! Flow registry and the orchestrator that drives every flow through
//! validation, request building, the backend call and the staleness check.

use std::{collections::HashMap, sync::Arc};

use shared::{
    domain::{BrandId, ContentType, CreatorId, PlatformFilter},
    error::ApiFailure,
    protocol::{
        AiStatus, CreatorAnalytics, CreatorQuery, CreatorSummary, DashboardOverview,
        GeneratedContent, MatchingResult, RiskAssessment,
    },
};
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    catalog::BrandCatalog,
    flow::{Flow, FlowKind},
    operation::{AsyncOperation, InvocationId, OperationSnapshot, OperationState},
    requests::{prepare, BackendRequest},
    selection::Selection,
    validation::Rejection,
    view::{self, DashboardView},
    DashboardBackend,
};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub enum FlowOutcome {
    DashboardOverview(Result<DashboardOverview, ApiFailure>),
    CreatorDirectory(Result<Vec<CreatorSummary>, ApiFailure>),
    CreatorAnalytics(CreatorId, Result<CreatorAnalytics, ApiFailure>),
    ContentGeneration(Result<GeneratedContent, ApiFailure>),
    BrandMatching(Result<MatchingResult, ApiFailure>),
    RiskCheck(Result<RiskAssessment, ApiFailure>),
    AiStatus(Result<AiStatus, ApiFailure>),
}

impl FlowOutcome {
    pub fn flow(&self) -> Flow {
        match self {
            FlowOutcome::DashboardOverview(_) => Flow::DashboardOverview,
            FlowOutcome::CreatorDirectory(_) => Flow::CreatorDirectory,
            FlowOutcome::CreatorAnalytics(id, _) => Flow::CreatorAnalytics(*id),
            FlowOutcome::ContentGeneration(_) => Flow::ContentGeneration,
            FlowOutcome::BrandMatching(_) => Flow::BrandMatching,
            FlowOutcome::RiskCheck(_) => Flow::RiskCheck,
            FlowOutcome::AiStatus(_) => Flow::AiStatus,
        }
    }

    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            FlowOutcome::DashboardOverview(r) => r.as_ref().err(),
            FlowOutcome::CreatorDirectory(r) => r.as_ref().err(),
            FlowOutcome::CreatorAnalytics(_, r) => r.as_ref().err(),
            FlowOutcome::ContentGeneration(r) => r.as_ref().err(),
            FlowOutcome::BrandMatching(r) => r.as_ref().err(),
            FlowOutcome::RiskCheck(r) => r.as_ref().err(),
            FlowOutcome::AiStatus(r) => r.as_ref().err(),
        }
    }
}

/// A backend answer tagged with the invocation that asked for it.
#[derive(Debug, Clone)]
pub struct Completion {
    pub invocation: InvocationId,
    pub outcome: FlowOutcome,
}

/// Data-free view of a flow's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStatus {
    Idle,
    Pending(InvocationId),
    Succeeded(InvocationId),
    Failed(InvocationId, String),
}

impl<T> From<&OperationState<T>> for FlowStatus {
    fn from(state: &OperationState<T>) -> Self {
        match state {
            OperationState::Idle => FlowStatus::Idle,
            OperationState::Pending(id) => FlowStatus::Pending(*id),
            OperationState::Succeeded(id, _) => FlowStatus::Succeeded(*id),
            OperationState::Failed(id, err) => FlowStatus::Failed(*id, err.message.clone()),
        }
    }
}

#[derive(Debug, Default)]
pub struct FlowRegistry {
    overview: AsyncOperation<DashboardOverview>,
    directory: AsyncOperation<Vec<CreatorSummary>>,
    analytics_creator: Option<CreatorId>,
    analytics: AsyncOperation<CreatorAnalytics>,
    content: AsyncOperation<GeneratedContent>,
    matching: AsyncOperation<MatchingResult>,
    risk: AsyncOperation<RiskAssessment>,
    ai_status: AsyncOperation<AiStatus>,
}

impl FlowRegistry {
    pub fn submit(&mut self, flow: Flow) -> InvocationId {
        match flow {
            Flow::DashboardOverview => self.overview.submit(),
            Flow::CreatorDirectory => self.directory.submit(),
            Flow::CreatorAnalytics(creator_id) => {
                if self.analytics_creator != Some(creator_id) {
                    self.analytics.reset_instance();
                    self.analytics_creator = Some(creator_id);
                }
                self.analytics.submit()
            }
            Flow::ContentGeneration => self.content.submit(),
            Flow::BrandMatching => self.matching.submit(),
            Flow::RiskCheck => self.risk.submit(),
            Flow::AiStatus => self.ai_status.submit(),
        }
    }

    /// Returns `false` when the completion was stale and dropped.
    pub fn complete(&mut self, completion: Completion) -> bool {
        let id = completion.invocation;
        match completion.outcome {
            FlowOutcome::DashboardOverview(r) => self.overview.complete(id, r),
            FlowOutcome::CreatorDirectory(r) => self.directory.complete(id, r),
            FlowOutcome::CreatorAnalytics(creator_id, r) => {
                self.analytics_creator == Some(creator_id) && self.analytics.complete(id, r)
            }
            FlowOutcome::ContentGeneration(r) => self.content.complete(id, r),
            FlowOutcome::BrandMatching(r) => self.matching.complete(id, r),
            FlowOutcome::RiskCheck(r) => self.risk.complete(id, r),
            FlowOutcome::AiStatus(r) => self.ai_status.complete(id, r),
        }
    }

    pub fn status(&self, flow: Flow) -> FlowStatus {
        match flow {
            Flow::DashboardOverview => self.overview.state().into(),
            Flow::CreatorDirectory => self.directory.state().into(),
            Flow::CreatorAnalytics(creator_id) if self.analytics_creator == Some(creator_id) => {
                self.analytics.state().into()
            }
            Flow::CreatorAnalytics(_) => FlowStatus::Idle,
            Flow::ContentGeneration => self.content.state().into(),
            Flow::BrandMatching => self.matching.state().into(),
            Flow::RiskCheck => self.risk.state().into(),
            Flow::AiStatus => self.ai_status.state().into(),
        }
    }

    pub fn any_pending(&self) -> bool {
        self.overview.state().is_pending()
            || self.directory.state().is_pending()
            || self.analytics.state().is_pending()
            || self.content.state().is_pending()
            || self.matching.state().is_pending()
            || self.risk.state().is_pending()
            || self.ai_status.state().is_pending()
    }

    pub fn overview(&self) -> OperationSnapshot<DashboardOverview> {
        self.overview.snapshot()
    }

    pub fn directory(&self) -> OperationSnapshot<Vec<CreatorSummary>> {
        self.directory.snapshot()
    }

    /// Analytics for `creator_id`, or `None` if the live instance is for another creator.
    pub fn analytics_for(&self, creator_id: CreatorId) -> Option<OperationSnapshot<CreatorAnalytics>> {
        (self.analytics_creator == Some(creator_id)).then(|| self.analytics.snapshot())
    }

    pub fn content(&self) -> OperationSnapshot<GeneratedContent> {
        self.content.snapshot()
    }

    pub fn matching(&self) -> OperationSnapshot<MatchingResult> {
        self.matching.snapshot()
    }

    pub fn risk(&self) -> OperationSnapshot<RiskAssessment> {
        self.risk.snapshot()
    }

    pub fn ai_status(&self) -> OperationSnapshot<AiStatus> {
        self.ai_status.snapshot()
    }
}

async fn execute(backend: &dyn DashboardBackend, request: BackendRequest) -> FlowOutcome {
    match request {
        BackendRequest::DashboardOverview => {
            FlowOutcome::DashboardOverview(backend.dashboard_overview().await)
        }
        BackendRequest::CreatorDirectory(query) => {
            FlowOutcome::CreatorDirectory(backend.list_creators(&query).await)
        }
        BackendRequest::CreatorAnalytics(creator_id) => FlowOutcome::CreatorAnalytics(
            creator_id,
            backend.creator_analytics(creator_id).await,
        ),
        BackendRequest::GenerateContent(body) => {
            FlowOutcome::ContentGeneration(backend.generate_content(&body).await)
        }
        BackendRequest::MatchBrand(body) => {
            FlowOutcome::BrandMatching(backend.match_brand_creators(&body).await)
        }
        BackendRequest::RiskCheck(body) => {
            FlowOutcome::RiskCheck(backend.check_content_risk(&body).await)
        }
        BackendRequest::AiStatus => FlowOutcome::AiStatus(backend.ai_status().await),
    }
}

/// Owns the selection and one operation per flow for a dashboard session.
///
/// All mutation happens through `&mut self` on the owning task; backend
/// calls run on spawned tasks and come back as [`Completion`]s that the
/// owner applies with [`Orchestrator::apply`], [`Orchestrator::settle`] or
/// [`Orchestrator::drain_ready`]. Must be used inside a tokio runtime.
pub struct Orchestrator {
    backend: Arc<dyn DashboardBackend>,
    catalog: BrandCatalog,
    selection: Selection,
    registry: FlowRegistry,
    inflight: HashMap<FlowKind, JoinHandle<()>>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    changes: broadcast::Sender<Flow>,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn DashboardBackend>, catalog: BrandCatalog) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        let mut selection = Selection::default();
        selection.matching.brand_id = catalog.first().map(|brand| brand.id);
        Self {
            backend,
            catalog,
            selection,
            registry: FlowRegistry::default(),
            inflight: HashMap::new(),
            completions_tx,
            completions_rx,
            changes,
        }
    }

    /// Creates the session and starts the overview and directory loads.
    pub fn mount(backend: Arc<dyn DashboardBackend>, catalog: BrandCatalog) -> Self {
        let mut orchestrator = Self::new(backend, catalog);
        for flow in [Flow::DashboardOverview, Flow::CreatorDirectory] {
            if let Err(rejection) = orchestrator.trigger(flow) {
                warn!(flow = %flow, reason = %rejection, "mount load rejected");
            }
        }
        orchestrator
    }

    pub fn trigger(&mut self, flow: Flow) -> Result<InvocationId, Rejection> {
        let request = prepare(flow, &self.selection, &self.catalog).map_err(|rejection| {
            warn!(flow = %flow, reason = %rejection, "submission rejected");
            rejection
        })?;

        let invocation = self.registry.submit(flow);
        info!(flow = %flow, invocation = invocation.0, "flow submitted");

        let backend = Arc::clone(&self.backend);
        let completions = self.completions_tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = execute(backend.as_ref(), request).await;
            let _ = completions.send(Completion {
                invocation,
                outcome,
            });
        });
        if let Some(superseded) = self.inflight.insert(flow.kind(), handle) {
            superseded.abort();
        }

        let _ = self.changes.send(flow);
        Ok(invocation)
    }

    /// Commits `completion` if it belongs to the latest invocation of its flow.
    pub fn apply(&mut self, completion: Completion) -> bool {
        let flow = completion.outcome.flow();
        let invocation = completion.invocation;
        let failure = completion.outcome.failure().cloned();

        if !self.registry.complete(completion) {
            debug!(flow = %flow, invocation = invocation.0, "stale completion dropped");
            return false;
        }

        self.inflight.remove(&flow.kind());
        match failure {
            Some(err) => warn!(
                flow = %flow,
                invocation = invocation.0,
                kind = ?err.kind,
                error = %err,
                "flow failed"
            ),
            None => debug!(flow = %flow, invocation = invocation.0, "flow succeeded"),
        }
        let _ = self.changes.send(flow);
        true
    }

    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.recv().await
    }

    /// Applies completions until no flow is pending.
    pub async fn settle(&mut self) {
        while self.registry.any_pending() {
            match self.completions_rx.recv().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => break,
            }
        }
    }

    /// Applies whatever completions have already arrived without waiting.
    pub fn drain_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            if self.apply(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Selects a creator and starts a fresh analytics instance for it.
    pub fn select_creator(&mut self, creator_id: CreatorId) -> Result<InvocationId, Rejection> {
        self.selection.creator_id = Some(creator_id);
        info!(creator_id = creator_id.0, "creator selected");
        self.trigger(Flow::CreatorAnalytics(creator_id))
    }

    pub fn set_creator_query(&mut self, query: CreatorQuery) {
        self.selection.creator_query = query;
    }

    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.selection.content.content_type = content_type;
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.selection.content.topic = topic.into();
    }

    pub fn set_content_platform(&mut self, platform: impl Into<String>) {
        self.selection.content.platform = platform.into();
    }

    pub fn select_brand(&mut self, brand_id: Option<BrandId>) {
        self.selection.matching.brand_id = brand_id;
    }

    pub fn set_matching_platform(&mut self, platform: PlatformFilter) {
        self.selection.matching.platform = platform;
    }

    pub fn set_risk_content(&mut self, content: impl Into<String>) {
        self.selection.risk_content = content.into();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn catalog(&self) -> &BrandCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &FlowRegistry {
        &self.registry
    }

    pub fn current_state(&self, flow: Flow) -> FlowStatus {
        self.registry.status(flow)
    }

    pub fn view(&self) -> DashboardView {
        view::project(&self.registry, &self.selection, &self.catalog)
    }

    /// Emits the flow whose visible state changed (submission or commit).
    pub fn subscribe_changes(&self) -> broadcast::Receiver<Flow> {
        self.changes.subscribe()
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        for (_, handle) in self.inflight.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
