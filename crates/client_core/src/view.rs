//! Read-only projection of the registry for the rendering layer.
//!
//! Nothing here touches the network or validates input; every structure is
//! derived from registry snapshots and holds display-ready values only.

use shared::{
    domain::{BrandId, CreatorId},
    protocol::{
        AiStatus, CreatorAnalytics, CreatorSummary, DashboardOverview, FanAffinity,
        GeneratedContent, MatchingResult, RiskAssessment,
    },
};

use crate::{
    catalog::BrandCatalog,
    format::{self, ShareRow},
    operation::{OperationSnapshot, OperationState},
    orchestrator::FlowRegistry,
    selection::Selection,
    tier::{classify_details, MatchTier},
};

const ANALYTICS_WINDOW_DAYS: usize = 7;
const NO_SUGGESTION: &str = "无";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// A flow's status plus the last committed success, kept through later
/// pending or failed invocations.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel<T> {
    pub status: PanelStatus,
    pub data: Option<T>,
}

impl<T> Panel<T> {
    pub fn is_loading(&self) -> bool {
        self.status == PanelStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            PanelStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

fn panel<T, V>(snapshot: &OperationSnapshot<T>, project: impl Fn(&T) -> V) -> Panel<V> {
    let status = match &snapshot.state {
        OperationState::Idle => PanelStatus::Idle,
        OperationState::Pending(_) => PanelStatus::Loading,
        OperationState::Succeeded(..) => PanelStatus::Ready,
        OperationState::Failed(_, err) => PanelStatus::Failed(err.message.clone()),
    };
    Panel {
        status,
        data: snapshot.last_success.as_deref().map(project),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

pub fn growth_tone(trend: &str) -> Tone {
    match trend.trim() {
        "上升" => Tone::Positive,
        "稳定" => Tone::Neutral,
        _ => Tone::Negative,
    }
}

pub fn risk_tone(level: &str) -> Tone {
    match level.trim() {
        "低" => Tone::Positive,
        "中" => Tone::Neutral,
        _ => Tone::Negative,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRow {
    pub time: String,
    pub action: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewView {
    pub total_creators: u64,
    pub active_campaigns: u64,
    pub total_revenue: String,
    pub avg_roi: String,
    pub platform_shares: Vec<ShareRow>,
    pub category_shares: Vec<ShareRow>,
    pub recent_activities: Vec<ActivityRow>,
}

fn overview_view(data: &DashboardOverview) -> OverviewView {
    OverviewView {
        total_creators: data.total_creators,
        active_campaigns: data.active_campaigns,
        total_revenue: format::currency_wan(data.total_revenue),
        avg_roi: format::roi(data.avg_roi),
        platform_shares: format::shares(&data.platform_distribution),
        category_shares: format::shares(&data.category_distribution),
        recent_activities: data
            .recent_activities
            .iter()
            .map(|a| ActivityRow {
                time: a.time.clone(),
                action: a.action.clone(),
                detail: a.detail.clone(),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatorRow {
    pub id: CreatorId,
    pub name: String,
    pub category: String,
    pub platforms: Vec<String>,
    pub followers: String,
    pub engagement_rate: String,
    pub growth_trend: String,
    pub growth_tone: Tone,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatorDirectoryView {
    pub rows: Vec<CreatorRow>,
    pub selected: Option<CreatorId>,
}

impl CreatorDirectoryView {
    pub fn selected_count(&self) -> usize {
        self.rows.iter().filter(|row| row.selected).count()
    }
}

fn directory_view(creators: &[CreatorSummary], selected: Option<CreatorId>) -> CreatorDirectoryView {
    CreatorDirectoryView {
        rows: creators
            .iter()
            .map(|c| CreatorRow {
                id: c.id,
                name: c.name.clone(),
                category: c.category.clone(),
                platforms: c.platforms.clone(),
                followers: format::wan(c.followers as f64),
                engagement_rate: format::percent(c.engagement_rate),
                growth_trend: c.growth_trend.clone(),
                growth_tone: growth_tone(&c.growth_trend),
                selected: selected == Some(c.id),
            })
            .collect(),
        selected,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub tick: String,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsView {
    pub total_views: String,
    pub avg_engagement_rate: String,
    pub follower_growth: i64,
    pub recent_days: Vec<ChartPoint>,
}

fn analytics_view(data: &CreatorAnalytics) -> AnalyticsView {
    let start = data.analytics.len().saturating_sub(ANALYTICS_WINDOW_DAYS);
    AnalyticsView {
        total_views: format::wan(data.summary.total_views as f64),
        avg_engagement_rate: format::percent(data.summary.avg_engagement_rate),
        follower_growth: data.summary.follower_growth,
        recent_days: data.analytics[start..]
            .iter()
            .map(|day| ChartPoint {
                tick: format::date_tick(&day.date),
                views: day.views,
            })
            .collect(),
    }
}

/// Analytics always belong to the currently selected creator.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSection {
    pub creator_id: CreatorId,
    pub creator_name: Option<String>,
    pub panel: Panel<AnalyticsView>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentView {
    pub title: Option<String>,
    pub description: Option<String>,
    pub script: Option<String>,
    pub tags: Vec<String>,
    /// Free-form body, shown only when no title was generated.
    pub body: Option<String>,
    pub predicted_views: Option<String>,
    pub predicted_engagement: Option<String>,
}

fn non_blank(field: &Option<String>) -> Option<String> {
    field.clone().filter(|s| !s.trim().is_empty())
}

/// Generators fill unused fields with empty strings; those count as absent.
fn content_view(data: &GeneratedContent) -> ContentView {
    let title = non_blank(&data.title);
    let body = if title.is_none() {
        non_blank(&data.content)
    } else {
        None
    };
    ContentView {
        title,
        description: non_blank(&data.description),
        script: non_blank(&data.script),
        tags: data.tags.clone().unwrap_or_default(),
        body,
        predicted_views: data
            .estimated_performance
            .as_ref()
            .map(|p| format::thousands(p.predicted_views)),
        predicted_engagement: data
            .estimated_performance
            .as_ref()
            .map(|p| format::percent(p.predicted_engagement)),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub rank: usize,
    pub creator_id: CreatorId,
    pub name: String,
    pub category: String,
    pub followers: String,
    pub platforms: Vec<String>,
    pub fan_affinity: Option<String>,
    pub match_percentage: Option<f64>,
    /// The percentage when present, otherwise the backend's qualitative label.
    pub match_label: String,
    pub tier: MatchTier,
    pub reason: Option<String>,
    pub suggestion: Option<String>,
}

/// `NoResults` is a succeeded run with zero matches, distinct from a panel
/// that never ran or failed.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchList {
    Ranked(Vec<MatchRow>),
    NoResults,
}

fn matching_view(data: &MatchingResult) -> MatchList {
    if data.matched_creators.is_empty() {
        return MatchList::NoResults;
    }
    MatchList::Ranked(
        data.matched_creators
            .iter()
            .enumerate()
            .map(|(index, m)| {
                let details = &m.match_details;
                let match_label = match (details.match_percentage, &details.match_score) {
                    (Some(pct), _) => format!("{pct}"),
                    (None, Some(label)) => label.clone(),
                    (None, None) => "-".to_string(),
                };
                MatchRow {
                    rank: index + 1,
                    creator_id: m.id,
                    name: m.name.clone(),
                    category: m.category.clone(),
                    followers: format::wan(m.followers as f64),
                    platforms: m.platforms.clone(),
                    fan_affinity: m.fan_affinity.as_ref().map(|a| match a {
                        FanAffinity::Score(v) => format!("{v}"),
                        FanAffinity::Label(s) => s.clone(),
                    }),
                    match_percentage: details.match_percentage,
                    match_label,
                    tier: classify_details(details),
                    reason: details.reason.clone().filter(|r| !r.trim().is_empty()),
                    suggestion: details
                        .suggestions
                        .clone()
                        .filter(|s| !s.trim().is_empty() && s.trim() != NO_SUGGESTION),
                }
            })
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchingView {
    pub brand_id: Option<BrandId>,
    pub brand_name: Option<String>,
    pub platform: String,
    pub panel: Panel<MatchList>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskView {
    pub risk_level: String,
    pub tone: Tone,
    pub risk_score: f64,
    pub score_label: String,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

fn risk_view(data: &RiskAssessment) -> RiskView {
    RiskView {
        risk_level: data.risk_level.clone(),
        tone: risk_tone(&data.risk_level),
        risk_score: data.risk_score,
        score_label: format::out_of_100(data.risk_score),
        issues: data.issues.clone(),
        suggestions: data.suggestions.clone(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiStatusView {
    pub model_status: String,
    pub api_key_configured: bool,
    pub features: Vec<String>,
}

fn ai_status_view(data: &AiStatus) -> AiStatusView {
    AiStatusView {
        model_status: data.model_status.clone(),
        api_key_configured: data.api_key_configured,
        features: data.available_features.clone(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub overview: Panel<OverviewView>,
    pub creators: Panel<CreatorDirectoryView>,
    pub analytics: Option<AnalyticsSection>,
    pub content: Panel<ContentView>,
    pub matching: MatchingView,
    pub risk: Panel<RiskView>,
    pub ai_status: Panel<AiStatusView>,
}

pub fn project(registry: &FlowRegistry, selection: &Selection, catalog: &BrandCatalog) -> DashboardView {
    let directory = registry.directory();
    let selected = selection.creator_id;

    let analytics = selected.map(|creator_id| {
        let creator_name = directory.last_success.as_ref().and_then(|creators| {
            creators
                .iter()
                .find(|c| c.id == creator_id)
                .map(|c| c.name.clone())
        });
        let analytics_panel = match registry.analytics_for(creator_id) {
            Some(snapshot) => panel(&snapshot, analytics_view),
            None => Panel {
                status: PanelStatus::Idle,
                data: None,
            },
        };
        AnalyticsSection {
            creator_id,
            creator_name,
            panel: analytics_panel,
        }
    });

    let brand_id = selection.matching.brand_id;
    DashboardView {
        overview: panel(&registry.overview(), overview_view),
        creators: panel(&directory, |creators| directory_view(creators, selected)),
        analytics,
        content: panel(&registry.content(), content_view),
        matching: MatchingView {
            brand_id,
            brand_name: brand_id
                .and_then(|id| catalog.get(id))
                .map(|b| b.name.clone()),
            platform: selection.matching.platform.label().to_string(),
            panel: panel(&registry.matching(), matching_view),
        },
        risk: panel(&registry.risk(), risk_view),
        ai_status: panel(&registry.ai_status(), ai_status_view),
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
