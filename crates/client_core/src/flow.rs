use shared::domain::CreatorId;

/// One independently triggerable interaction with the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    DashboardOverview,
    CreatorDirectory,
    CreatorAnalytics(CreatorId),
    ContentGeneration,
    BrandMatching,
    RiskCheck,
    AiStatus,
}

/// Flow identity without parameters; every analytics instance shares one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    DashboardOverview,
    CreatorDirectory,
    CreatorAnalytics,
    ContentGeneration,
    BrandMatching,
    RiskCheck,
    AiStatus,
}

impl Flow {
    pub fn kind(self) -> FlowKind {
        match self {
            Flow::DashboardOverview => FlowKind::DashboardOverview,
            Flow::CreatorDirectory => FlowKind::CreatorDirectory,
            Flow::CreatorAnalytics(_) => FlowKind::CreatorAnalytics,
            Flow::ContentGeneration => FlowKind::ContentGeneration,
            Flow::BrandMatching => FlowKind::BrandMatching,
            Flow::RiskCheck => FlowKind::RiskCheck,
            Flow::AiStatus => FlowKind::AiStatus,
        }
    }

    pub fn name(self) -> &'static str {
        self.kind().name()
    }
}

impl FlowKind {
    pub fn name(self) -> &'static str {
        match self {
            FlowKind::DashboardOverview => "dashboard_overview",
            FlowKind::CreatorDirectory => "creator_directory",
            FlowKind::CreatorAnalytics => "creator_analytics",
            FlowKind::ContentGeneration => "content_generation",
            FlowKind::BrandMatching => "brand_matching",
            FlowKind::RiskCheck => "risk_check",
            FlowKind::AiStatus => "ai_status",
        }
    }
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flow::CreatorAnalytics(id) => write!(f, "creator_analytics({id})"),
            other => f.write_str(other.name()),
        }
    }
}
