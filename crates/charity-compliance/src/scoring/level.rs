use super::config::LevelThresholds;
use serde::{Deserialize, Serialize};

/// Ordinal risk classification of an overall compliance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceLevel {
    AtRisk,
    NeedsAttention,
    Good,
    Excellent,
}

impl ComplianceLevel {
    /// First matching threshold wins, checked from the top down.
    pub fn classify(overall: u8, thresholds: &LevelThresholds) -> Self {
        if overall >= thresholds.excellent {
            Self::Excellent
        } else if overall >= thresholds.good {
            Self::Good
        } else if overall >= thresholds.needs_attention {
            Self::NeedsAttention
        } else {
            Self::AtRisk
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::NeedsAttention => "needs-attention",
            Self::AtRisk => "at-risk",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsAttention => "Needs Attention",
            Self::AtRisk => "At Risk",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Excellent => {
                "Your charity demonstrates excellent compliance across all areas."
            }
            Self::Good => "Your charity is in good standing, with a few areas to keep an eye on.",
            Self::NeedsAttention => {
                "Several compliance areas need attention. Review the findings and act soon."
            }
            Self::AtRisk => {
                "Your charity is at risk of regulatory action. Address critical findings immediately."
            }
        }
    }
}
