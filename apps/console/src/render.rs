//! Plain-text rendering of the dashboard view.

use client_core::{
    view::{
        AiStatusView, AnalyticsSection, ContentView, CreatorDirectoryView, DashboardView,
        MatchList, MatchingView, OverviewView, Panel, PanelStatus, RiskView, Tone,
    },
    BrandCatalog, Flow,
};

/// Renders the panel for `flow` and returns its error message, if the last
/// invocation failed.
pub fn flow(view: &DashboardView, flow: Flow) -> (String, Option<String>) {
    let mut lines = Vec::new();
    let error = match flow {
        Flow::DashboardOverview => panel(&mut lines, "Overview", &view.overview, overview),
        Flow::CreatorDirectory => panel(&mut lines, "Creators", &view.creators, creators),
        Flow::CreatorAnalytics(_) => match &view.analytics {
            Some(section) => analytics(&mut lines, section),
            None => None,
        },
        Flow::ContentGeneration => panel(&mut lines, "Generated content", &view.content, content),
        Flow::BrandMatching => matching(&mut lines, &view.matching),
        Flow::RiskCheck => panel(&mut lines, "Risk check", &view.risk, risk),
        Flow::AiStatus => panel(&mut lines, "AI status", &view.ai_status, ai_status),
    };
    lines.push(String::new());
    (lines.join("\n"), error)
}

fn panel<T>(
    lines: &mut Vec<String>,
    heading: &str,
    panel: &Panel<T>,
    body: impl Fn(&mut Vec<String>, &T),
) -> Option<String> {
    lines.push(format!("== {heading} =="));
    match &panel.status {
        PanelStatus::Idle => lines.push("(not loaded)".into()),
        PanelStatus::Loading => lines.push("loading...".into()),
        PanelStatus::Ready => {}
        PanelStatus::Failed(message) => lines.push(format!("error: {message}")),
    }
    if let Some(data) = &panel.data {
        body(lines, data);
    }
    panel.error().map(str::to_string)
}

fn badge(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "+",
        Tone::Neutral => "=",
        Tone::Negative => "-",
    }
}

fn overview(lines: &mut Vec<String>, data: &OverviewView) {
    lines.push(format!("creators:         {}", data.total_creators));
    lines.push(format!("active campaigns: {}", data.active_campaigns));
    lines.push(format!("total revenue:    {}", data.total_revenue));
    lines.push(format!("average ROI:      {}", data.avg_roi));
    for (title, rows) in [
        ("platforms", &data.platform_shares),
        ("categories", &data.category_shares),
    ] {
        lines.push(format!("{title}:"));
        for row in rows {
            lines.push(format!("  {:<8} {:>4}", row.name, row.share));
        }
    }
    if !data.recent_activities.is_empty() {
        lines.push("recent activity:".into());
        for activity in &data.recent_activities {
            lines.push(format!(
                "  {} {} {}",
                activity.time, activity.action, activity.detail
            ));
        }
    }
}

fn creators(lines: &mut Vec<String>, data: &CreatorDirectoryView) {
    if data.rows.is_empty() {
        lines.push("no creators".into());
    }
    for row in &data.rows {
        lines.push(format!(
            "{} #{} {} [{}] {} followers, {} engagement, {} {} ({})",
            if row.selected { "*" } else { " " },
            row.id,
            row.name,
            row.category,
            row.followers,
            row.engagement_rate,
            badge(row.growth_tone),
            row.growth_trend,
            row.platforms.join("/"),
        ));
    }
}

fn analytics(lines: &mut Vec<String>, section: &AnalyticsSection) -> Option<String> {
    let heading = match &section.creator_name {
        Some(name) => format!("Analytics for {name} (#{})", section.creator_id),
        None => format!("Analytics for #{}", section.creator_id),
    };
    panel(lines, &heading, &section.panel, |lines, data| {
        lines.push(format!("total views:     {}", data.total_views));
        lines.push(format!("avg engagement:  {}", data.avg_engagement_rate));
        lines.push(format!("follower growth: {}", data.follower_growth));
        for point in &data.recent_days {
            lines.push(format!("  {} {:>8}", point.tick, point.views));
        }
    })
}

fn content(lines: &mut Vec<String>, data: &ContentView) {
    if let Some(title) = &data.title {
        lines.push(format!("title: {title}"));
    }
    if let Some(description) = &data.description {
        lines.push(format!("description: {description}"));
    }
    if let Some(script) = &data.script {
        lines.push("script:".into());
        lines.extend(script.lines().map(|line| format!("  {line}")));
    }
    if !data.tags.is_empty() {
        lines.push(format!("tags: {}", data.tags.join(" ")));
    }
    if let Some(body) = &data.body {
        lines.push(body.clone());
    }
    if let (Some(views), Some(engagement)) = (&data.predicted_views, &data.predicted_engagement) {
        lines.push(format!("predicted: {views} views, {engagement} engagement"));
    }
}

fn matching(lines: &mut Vec<String>, view: &MatchingView) -> Option<String> {
    let brand = view.brand_name.as_deref().unwrap_or("(no brand)");
    let heading = format!("Matches for {brand} on {}", view.platform);
    panel(lines, &heading, &view.panel, |lines, list| match list {
        MatchList::NoResults => lines.push("no matching creators".into()),
        MatchList::Ranked(rows) => {
            for row in rows {
                lines.push(format!(
                    "{:>2}. {} [{}] {} followers, match {} ({})",
                    row.rank,
                    row.name,
                    row.category,
                    row.followers,
                    row.match_label,
                    row.tier.label(),
                ));
                if let Some(affinity) = &row.fan_affinity {
                    lines.push(format!("    fan affinity: {affinity}"));
                }
                if let Some(reason) = &row.reason {
                    lines.push(format!("    reason: {reason}"));
                }
                if let Some(suggestion) = &row.suggestion {
                    lines.push(format!("    suggestion: {suggestion}"));
                }
            }
        }
    })
}

fn risk(lines: &mut Vec<String>, data: &RiskView) {
    lines.push(format!(
        "level: {} {} ({})",
        badge(data.tone),
        data.risk_level,
        data.score_label
    ));
    for issue in &data.issues {
        lines.push(format!("  issue: {issue}"));
    }
    for suggestion in &data.suggestions {
        lines.push(format!("  suggestion: {suggestion}"));
    }
}

fn ai_status(lines: &mut Vec<String>, data: &AiStatusView) {
    lines.push(format!("model: {}", data.model_status));
    lines.push(format!(
        "api key: {}",
        if data.api_key_configured { "configured" } else { "missing" }
    ));
    if !data.features.is_empty() {
        lines.push(format!("features: {}", data.features.join(", ")));
    }
}

pub fn brands(catalog: &BrandCatalog) -> String {
    let mut out = String::new();
    for brand in catalog.brands() {
        out.push_str(&format!(
            "#{} {} [{}] budget {}\n    {}\n",
            brand.id, brand.name, brand.category, brand.budget, brand.requirements
        ));
    }
    out
}
