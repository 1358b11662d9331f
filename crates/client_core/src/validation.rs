//! Pre-flight checks that block a submission before the backend is contacted.

use thiserror::Error;

use crate::{catalog::BrandCatalog, flow::Flow, selection::Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("topic required")]
    TopicRequired,
    #[error("brand required")]
    BrandRequired,
    #[error("content required")]
    ContentRequired,
}

pub fn validate(flow: Flow, selection: &Selection, catalog: &BrandCatalog) -> Result<(), Rejection> {
    match flow {
        Flow::ContentGeneration if selection.content.topic.trim().is_empty() => {
            Err(Rejection::TopicRequired)
        }
        Flow::BrandMatching => selection
            .matching
            .brand_id
            .and_then(|id| catalog.get(id))
            .map(|_| ())
            .ok_or(Rejection::BrandRequired),
        Flow::RiskCheck if selection.risk_content.trim().is_empty() => {
            Err(Rejection::ContentRequired)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::{BrandId, CreatorId};

    use super::*;

    #[test]
    fn whitespace_topic_is_rejected() {
        let mut selection = Selection::default();
        selection.content.topic = "  \t".into();
        assert_eq!(
            validate(Flow::ContentGeneration, &selection, &BrandCatalog::builtin()),
            Err(Rejection::TopicRequired)
        );
        selection.content.topic = "秋季护肤".into();
        assert!(validate(Flow::ContentGeneration, &selection, &BrandCatalog::builtin()).is_ok());
    }

    #[test]
    fn brand_must_be_selected_and_known() {
        let catalog = BrandCatalog::builtin();
        let mut selection = Selection::default();
        assert_eq!(
            validate(Flow::BrandMatching, &selection, &catalog),
            Err(Rejection::BrandRequired)
        );
        selection.matching.brand_id = Some(BrandId(99));
        assert_eq!(
            validate(Flow::BrandMatching, &selection, &catalog),
            Err(Rejection::BrandRequired)
        );
        selection.matching.brand_id = Some(BrandId(3));
        assert!(validate(Flow::BrandMatching, &selection, &catalog).is_ok());
    }

    #[test]
    fn empty_risk_content_is_rejected() {
        let selection = Selection::default();
        let err = validate(Flow::RiskCheck, &selection, &BrandCatalog::builtin()).unwrap_err();
        assert_eq!(err.to_string(), "content required");
    }

    #[test]
    fn loading_flows_need_no_input() {
        let catalog = BrandCatalog::builtin();
        let selection = Selection::default();
        for flow in [
            Flow::DashboardOverview,
            Flow::CreatorDirectory,
            Flow::CreatorAnalytics(CreatorId(7)),
            Flow::AiStatus,
        ] {
            assert!(validate(flow, &selection, &catalog).is_ok(), "{flow:?}");
        }
    }
}
