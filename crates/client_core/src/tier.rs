use shared::protocol::MatchDetails;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

impl MatchTier {
    pub fn label(self) -> &'static str {
        match self {
            MatchTier::High => "high",
            MatchTier::Medium => "medium",
            MatchTier::Low => "low",
        }
    }
}

/// Thresholds apply in order: above 10 is high, 5 through 10 is medium.
/// NaN falls through to low.
pub fn classify(match_percentage: f64) -> MatchTier {
    if match_percentage > 10.0 {
        MatchTier::High
    } else if (5.0..=10.0).contains(&match_percentage) {
        MatchTier::Medium
    } else {
        MatchTier::Low
    }
}

fn classify_label(label: &str) -> MatchTier {
    match label.trim() {
        "高" => MatchTier::High,
        "中" => MatchTier::Medium,
        _ => MatchTier::Low,
    }
}

/// Percentage wins; the qualitative label is only a fallback.
pub fn classify_details(details: &MatchDetails) -> MatchTier {
    match (details.match_percentage, details.match_score.as_deref()) {
        (Some(percentage), _) => classify(percentage),
        (None, Some(label)) => classify_label(label),
        (None, None) => MatchTier::Low,
    }
}
