//! Operator-chosen inputs that seed the next submission of each flow.

use shared::{
    domain::{BrandId, ContentType, CreatorId, PlatformFilter, CONTENT_PLATFORMS},
    protocol::CreatorQuery,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ContentParams {
    pub content_type: ContentType,
    pub topic: String,
    pub platform: String,
}

impl Default for ContentParams {
    fn default() -> Self {
        Self {
            content_type: ContentType::default(),
            topic: String::new(),
            platform: CONTENT_PLATFORMS[0].to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchingParams {
    pub brand_id: Option<BrandId>,
    pub platform: PlatformFilter,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub creator_id: Option<CreatorId>,
    pub creator_query: CreatorQuery,
    pub content: ContentParams,
    pub matching: MatchingParams,
    pub risk_content: String,
}
