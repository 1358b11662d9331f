//! Pure request construction from the current selection, one builder per flow.

use shared::{
    domain::{Brand, CreatorId, PlatformFilter},
    protocol::{BrandMatchingRequest, CreatorQuery, GenerateContentRequest, RiskCheckRequest},
};

use crate::{
    catalog::BrandCatalog,
    flow::Flow,
    selection::{ContentParams, Selection},
    validation::{validate, Rejection},
};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendRequest {
    DashboardOverview,
    CreatorDirectory(CreatorQuery),
    CreatorAnalytics(CreatorId),
    GenerateContent(GenerateContentRequest),
    MatchBrand(BrandMatchingRequest),
    RiskCheck(RiskCheckRequest),
    AiStatus,
}

pub fn directory_request(query: &CreatorQuery) -> BackendRequest {
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    BackendRequest::CreatorDirectory(CreatorQuery {
        category,
        min_followers: query.min_followers.filter(|n| *n > 0),
    })
}

pub fn content_request(params: &ContentParams) -> GenerateContentRequest {
    GenerateContentRequest {
        content_type: params.content_type,
        topic: params.topic.trim().to_string(),
        platform: params.platform.clone(),
    }
}

pub fn matching_request(brand: &Brand, platform: &PlatformFilter) -> BrandMatchingRequest {
    BrandMatchingRequest {
        brand_id: brand.id,
        brand_requirements: brand.clone(),
        platform: platform.as_platform().map(str::to_string),
    }
}

pub fn risk_request(content: &str) -> RiskCheckRequest {
    RiskCheckRequest {
        content: content.to_string(),
    }
}

/// Runs the validation gate, then builds the request for `flow`.
pub fn prepare(
    flow: Flow,
    selection: &Selection,
    catalog: &BrandCatalog,
) -> Result<BackendRequest, Rejection> {
    validate(flow, selection, catalog)?;
    let request = match flow {
        Flow::DashboardOverview => BackendRequest::DashboardOverview,
        Flow::CreatorDirectory => directory_request(&selection.creator_query),
        Flow::CreatorAnalytics(id) => BackendRequest::CreatorAnalytics(id),
        Flow::ContentGeneration => BackendRequest::GenerateContent(content_request(&selection.content)),
        Flow::BrandMatching => {
            let brand = selection
                .matching
                .brand_id
                .and_then(|id| catalog.get(id))
                .ok_or(Rejection::BrandRequired)?;
            BackendRequest::MatchBrand(matching_request(brand, &selection.matching.platform))
        }
        Flow::RiskCheck => BackendRequest::RiskCheck(risk_request(&selection.risk_content)),
        Flow::AiStatus => BackendRequest::AiStatus,
    };
    Ok(request)
}
