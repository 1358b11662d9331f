use super::*;
use serde_json::json;
use shared::{domain::BrandId, error::ApiFailure, protocol::MatchDetails};

use crate::{
    flow::Flow,
    orchestrator::{Completion, FlowOutcome},
};

fn matched(details: serde_json::Value) -> MatchingResult {
    serde_json::from_value(json!({
        "matched_creators": [{
            "id": 7,
            "name": "美妆小美",
            "category": "美妆",
            "followers": 125000,
            "platforms": ["抖音"],
            "fan_affinity": "高",
            "match_details": details
        }]
    }))
    .expect("matching result")
}

fn analytics_with_days(days: usize) -> CreatorAnalytics {
    let analytics: Vec<_> = (1..=days)
        .map(|day| json!({"date": format!("2024-03-{day:02}"), "views": day * 100}))
        .collect();
    serde_json::from_value(json!({
        "summary": {"total_views": 125000, "avg_engagement_rate": 7.5, "follower_growth": -30},
        "analytics": analytics
    }))
    .expect("analytics")
}

#[test]
fn empty_match_list_is_distinct_from_idle_and_failed() {
    let mut registry = FlowRegistry::default();
    let selection = Selection::default();
    let catalog = BrandCatalog::builtin();

    let idle = project(&registry, &selection, &catalog).matching.panel;
    assert_eq!(idle.status, PanelStatus::Idle);
    assert_eq!(idle.data, None);

    let id = registry.submit(Flow::BrandMatching);
    assert!(project(&registry, &selection, &catalog)
        .matching
        .panel
        .is_loading());

    registry.complete(Completion {
        invocation: id,
        outcome: FlowOutcome::BrandMatching(Ok(MatchingResult {
            matched_creators: Vec::new(),
        })),
    });
    let empty = project(&registry, &selection, &catalog).matching.panel;
    assert_eq!(empty.status, PanelStatus::Ready);
    assert_eq!(empty.data, Some(MatchList::NoResults));

    let id = registry.submit(Flow::BrandMatching);
    registry.complete(Completion {
        invocation: id,
        outcome: FlowOutcome::BrandMatching(Err(ApiFailure::application(Some(
            "品牌不存在".into(),
        )))),
    });
    let failed = project(&registry, &selection, &catalog).matching.panel;
    assert_eq!(failed.error(), Some("品牌不存在"));
    assert_eq!(failed.data, Some(MatchList::NoResults));
}

#[test]
fn match_rows_hide_placeholder_suggestion() {
    let with_placeholder = matched(json!({
        "match_percentage": 12.5,
        "reason": "受众重合度高",
        "suggestions": " 无 "
    }));
    let MatchList::Ranked(rows) = matching_view(&with_placeholder) else {
        panic!("expected ranked rows");
    };
    assert_eq!(rows[0].suggestion, None);
    assert_eq!(rows[0].reason.as_deref(), Some("受众重合度高"));
    assert_eq!(rows[0].tier, MatchTier::High);
    assert_eq!(rows[0].match_label, "12.5");
    assert_eq!(rows[0].fan_affinity.as_deref(), Some("高"));
    assert_eq!(rows[0].followers, "12.5万");

    let with_advice = matched(json!({"match_percentage": 4.0, "suggestions": "增加开箱视频"}));
    let MatchList::Ranked(rows) = matching_view(&with_advice) else {
        panic!("expected ranked rows");
    };
    assert_eq!(rows[0].suggestion.as_deref(), Some("增加开箱视频"));
    assert_eq!(rows[0].tier, MatchTier::Low);
}

#[test]
fn label_only_match_uses_label_for_tier_and_display() {
    let result = matched(json!({"match_score": "中"}));
    let MatchList::Ranked(rows) = matching_view(&result) else {
        panic!("expected ranked rows");
    };
    assert_eq!(rows[0].match_percentage, None);
    assert_eq!(rows[0].match_label, "中");
    assert_eq!(rows[0].tier, MatchTier::Medium);
    assert_eq!(classify_details(&MatchDetails::default()), MatchTier::Low);
}

#[test]
fn analytics_chart_keeps_last_seven_days() {
    let view = analytics_view(&analytics_with_days(10));
    let ticks: Vec<&str> = view.recent_days.iter().map(|p| p.tick.as_str()).collect();
    assert_eq!(
        ticks,
        vec!["03-04", "03-05", "03-06", "03-07", "03-08", "03-09", "03-10"]
    );
    assert_eq!(view.recent_days[6].views, 1000);
    assert_eq!(view.total_views, "12.5万");
    assert_eq!(view.avg_engagement_rate, "7.5%");
    assert_eq!(view.follower_growth, -30);

    assert_eq!(analytics_view(&analytics_with_days(3)).recent_days.len(), 3);
    assert!(analytics_view(&analytics_with_days(0)).recent_days.is_empty());
}

#[test]
fn content_body_shown_only_without_title() {
    let titled = GeneratedContent {
        title: Some("春日穿搭指南".into()),
        content: Some("原始文本".into()),
        tags: Some(vec!["穿搭".into()]),
        ..GeneratedContent::default()
    };
    let view = content_view(&titled);
    assert_eq!(view.title.as_deref(), Some("春日穿搭指南"));
    assert_eq!(view.body, None);
    assert_eq!(view.tags, vec!["穿搭".to_string()]);

    let untitled = GeneratedContent {
        content: Some("原始文本".into()),
        estimated_performance: Some(shared::protocol::EstimatedPerformance {
            predicted_views: 45_000,
            predicted_engagement: 8.2,
        }),
        ..GeneratedContent::default()
    };
    let view = content_view(&untitled);
    assert_eq!(view.body.as_deref(), Some("原始文本"));
    assert_eq!(view.predicted_views.as_deref(), Some("45,000"));
    assert_eq!(view.predicted_engagement.as_deref(), Some("8.2%"));
}

#[test]
fn blank_generated_fields_are_absent() {
    let title_only: GeneratedContent = serde_json::from_value(json!({
        "title": "【模拟】春季穿搭的5个小技巧",
        "description": "",
        "script": "",
        "tags": ["穿搭", "春季"],
        "platform": "抖音",
        "estimated_performance": {"predicted_views": 45000, "predicted_engagement": 8.2}
    }))
    .expect("generated content");
    let view = content_view(&title_only);
    assert_eq!(view.title.as_deref(), Some("【模拟】春季穿搭的5个小技巧"));
    assert_eq!(view.description, None);
    assert_eq!(view.script, None);
    assert_eq!(view.body, None);
    assert_eq!(view.tags.len(), 2);

    let blank_title = GeneratedContent {
        title: Some("  ".into()),
        content: Some("完整文案".into()),
        ..GeneratedContent::default()
    };
    let view = content_view(&blank_title);
    assert_eq!(view.title, None);
    assert_eq!(view.body.as_deref(), Some("完整文案"));

    let blank_body = GeneratedContent {
        content: Some(String::new()),
        ..GeneratedContent::default()
    };
    assert_eq!(content_view(&blank_body).body, None);
}

#[test]
fn tones_follow_trend_and_risk_level() {
    assert_eq!(growth_tone("上升"), Tone::Positive);
    assert_eq!(growth_tone("稳定"), Tone::Neutral);
    assert_eq!(growth_tone("下降"), Tone::Negative);
    assert_eq!(risk_tone("低"), Tone::Positive);
    assert_eq!(risk_tone("中"), Tone::Neutral);
    assert_eq!(risk_tone("高"), Tone::Negative);
}

#[test]
fn matching_view_names_selected_brand_and_platform() {
    let registry = FlowRegistry::default();
    let catalog = BrandCatalog::builtin();
    let mut selection = Selection::default();
    selection.matching.brand_id = Some(BrandId(2));

    let view = project(&registry, &selection, &catalog);
    assert_eq!(view.matching.brand_name.as_deref(), Some("科技公司B"));
    assert_eq!(view.matching.platform, "所有平台");

    selection.matching.brand_id = Some(BrandId(42));
    assert_eq!(
        project(&registry, &selection, &catalog).matching.brand_name,
        None
    );
}

#[test]
fn analytics_section_is_idle_before_first_load() {
    let registry = FlowRegistry::default();
    let catalog = BrandCatalog::builtin();
    let selection = Selection {
        creator_id: Some(CreatorId(7)),
        ..Selection::default()
    };

    let section = project(&registry, &selection, &catalog)
        .analytics
        .expect("section for selected creator");
    assert_eq!(section.creator_id, CreatorId(7));
    assert_eq!(section.creator_name, None);
    assert_eq!(section.panel.status, PanelStatus::Idle);
}
