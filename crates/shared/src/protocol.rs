use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    domain::{Brand, BrandId, ContentType, CreatorId},
    error::ApiFailure,
};

/// Raw `{success, data?, message?}` wrapper every backend response uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    /// Collapses the envelope into a typed result at the boundary.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, ApiFailure> {
        if !self.success {
            return Err(ApiFailure::application(self.message));
        }
        let data = self.data.ok_or_else(|| {
            ApiFailure::application(Some("unexpected response payload: missing data".into()))
        })?;
        serde_json::from_value(data).map_err(|err| {
            ApiFailure::application(Some(format!("unexpected response payload: {err}")))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub time: String,
    pub action: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub total_creators: u64,
    pub active_campaigns: u64,
    pub total_revenue: f64,
    pub avg_roi: f64,
    #[serde(default)]
    pub platform_distribution: BTreeMap<String, f64>,
    #[serde(default)]
    pub category_distribution: BTreeMap<String, f64>,
    #[serde(default)]
    pub recent_activities: Vec<RecentActivity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_followers: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorSummary {
    pub id: CreatorId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    pub followers: u64,
    pub engagement_rate: f64,
    pub growth_trend: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_views: u64,
    pub avg_engagement_rate: f64,
    pub follower_growth: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAnalytics {
    pub date: String,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorAnalytics {
    pub summary: AnalyticsSummary,
    #[serde(default)]
    pub analytics: Vec<DailyAnalytics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub topic: String,
    pub platform: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedPerformance {
    pub predicted_views: u64,
    pub predicted_engagement: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_performance: Option<EstimatedPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandMatchingRequest {
    pub brand_id: BrandId,
    pub brand_requirements: Brand,
    /// Omitted entirely when every platform is acceptable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FanAffinity {
    Score(f64),
    Label(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_percentage: Option<f64>,
    /// Qualitative label (`高`/`中`/`低`/`未知`) some backends send instead of a percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedCreator {
    pub id: CreatorId,
    pub name: String,
    pub category: String,
    pub followers: u64,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fan_affinity: Option<FanAffinity>,
    #[serde(default)]
    pub match_details: MatchDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingResult {
    #[serde(default)]
    pub matched_creators: Vec<MatchedCreator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCheckRequest {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: String,
    pub risk_score: f64,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiStatus {
    pub model_status: String,
    pub api_key_configured: bool,
    #[serde(default)]
    pub available_features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FailureKind, UNKNOWN_FAILURE_MESSAGE};

    #[test]
    fn failed_envelope_surfaces_backend_message() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"success":false,"message":"主题不能为空"}"#).expect("parse");
        let err = envelope.into_result::<GeneratedContent>().unwrap_err();
        assert_eq!(err.kind, FailureKind::Application);
        assert_eq!(err.message, "主题不能为空");
    }

    #[test]
    fn failed_envelope_without_message_uses_fallback() {
        let envelope: Envelope = serde_json::from_str(r#"{"success":false}"#).expect("parse");
        let err = envelope.into_result::<AiStatus>().unwrap_err();
        assert_eq!(err.message, UNKNOWN_FAILURE_MESSAGE);
    }

    #[test]
    fn successful_envelope_without_data_is_application_failure() {
        let envelope: Envelope = serde_json::from_str(r#"{"success":true}"#).expect("parse");
        let err = envelope.into_result::<RiskAssessment>().unwrap_err();
        assert_eq!(err.kind, FailureKind::Application);
        assert!(err.message.contains("missing data"));
    }

    #[test]
    fn matching_request_omits_platform_when_unset() {
        let request = BrandMatchingRequest {
            brand_id: BrandId(3),
            brand_requirements: Brand {
                id: BrandId(3),
                name: "美妆品牌C".into(),
                category: "美妆".into(),
                description: String::new(),
                budget: 600000,
                target_audience: String::new(),
                campaign_type: String::new(),
                products_services: String::new(),
                requirements: String::new(),
            },
            platform: None,
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["brand_id"], 3);
        assert_eq!(value["brand_requirements"]["name"], "美妆品牌C");
        assert!(value.get("platform").is_none());
    }

    #[test]
    fn generate_request_uses_type_key() {
        let request = GenerateContentRequest {
            content_type: ContentType::Script,
            topic: "秋季护肤".into(),
            platform: "小红书".into(),
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["type"], "script");
    }

    #[test]
    fn matched_creator_accepts_label_only_details() {
        let creator: MatchedCreator = serde_json::from_str(
            r#"{"id":1,"name":"小美美妆","category":"美妆","followers":125000,
                "platforms":["抖音"],"fan_affinity":"高",
                "match_details":{"match_score":"高","reason":"契合","suggestions":"无"}}"#,
        )
        .expect("parse");
        assert_eq!(creator.match_details.match_percentage, None);
        assert_eq!(creator.match_details.match_score.as_deref(), Some("高"));
        assert_eq!(creator.fan_affinity, Some(FanAffinity::Label("高".into())));
    }

    #[test]
    fn unread_backend_fields_are_ignored() {
        let analytics: CreatorAnalytics = serde_json::from_str(
            r#"{"creator_id":7,
                "summary":{"total_views":90000,"avg_engagement_rate":7.2,"follower_growth":1200},
                "analytics":[{"date":"2024-03-01","views":1000,"likes":80,"comments":12,
                              "shares":5,"followers_growth":30}]}"#,
        )
        .expect("parse");
        assert_eq!(analytics.analytics[0].views, 1000);

        let creator: CreatorSummary = serde_json::from_str(
            r#"{"id":7,"name":"美妆小美","category":"美妆","platforms":["抖音"],
                "followers":125000,"engagement_rate":8.5,"growth_trend":"上升",
                "potential_score":88.5,"tags":["护肤"]}"#,
        )
        .expect("parse");
        assert_eq!(creator.id, CreatorId(7));

        let result: MatchingResult =
            serde_json::from_str(r#"{"matched_creators":[],"total_matches":0}"#).expect("parse");
        assert!(result.matched_creators.is_empty());
    }
}
