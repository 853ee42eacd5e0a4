use serde::{Deserialize, Serialize};
use std::path::Path;

const WEIGHT_TOLERANCE: f64 = 1e-6;
const MAX_WARNING_DAYS: u32 = 36_500;

/// Every numeric dial used by the scoring rules.
///
/// Each section falls back to its defaults when omitted, so a JSON override
/// only needs to name the values it changes:
///
/// ```json
/// { "safeguarding": { "expiry_warning_days": 60 } }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub weights: DomainWeights,
    pub safeguarding: SafeguardingPolicy,
    pub overseas: OverseasPolicy,
    pub income: IncomePolicy,
    pub levels: LevelThresholds,
    pub empty_scores: EmptyCollectionScores,
}

/// Share of the overall score contributed by each domain. Must sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomainWeights {
    pub safeguarding: f64,
    pub overseas: f64,
    pub income: f64,
}

impl Default for DomainWeights {
    fn default() -> Self {
        Self {
            safeguarding: 0.4,
            overseas: 0.3,
            income: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SafeguardingPolicy {
    /// Checks expiring within this many days of `now` count as expiring.
    pub expiry_warning_days: u32,
    pub expiring_penalty: u32,
    pub expired_penalty: u32,
}

impl Default for SafeguardingPolicy {
    fn default() -> Self {
        Self {
            expiry_warning_days: 30,
            expiring_penalty: 10,
            expired_penalty: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverseasPolicy {
    pub unreported_penalty: u32,
    pub sanctions_check_penalty: u32,
}

impl Default for OverseasPolicy {
    fn default() -> Self {
        Self {
            unreported_penalty: 15,
            sanctions_check_penalty: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncomePolicy {
    /// Points awarded when every record is documented.
    pub documentation_weight: u32,
    pub related_party_bonus: u32,
    pub gift_aid_unclaimed_penalty: u32,
}

impl Default for IncomePolicy {
    fn default() -> Self {
        Self {
            documentation_weight: 80,
            related_party_bonus: 20,
            gift_aid_unclaimed_penalty: 5,
        }
    }
}

/// Minimum overall score for each level; anything below `needs_attention` is at risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelThresholds {
    pub excellent: u8,
    pub good: u8,
    pub needs_attention: u8,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            excellent: 90,
            good: 75,
            needs_attention: 50,
        }
    }
}

/// Scores reported when a domain has nothing to assess.
///
/// Overseas deliberately passes on an empty collection while the other two
/// domains treat missing evidence as a gap. Change these only with sign-off
/// from the product owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmptyCollectionScores {
    pub safeguarding: u8,
    pub overseas: u8,
    pub income: u8,
}

impl Default for EmptyCollectionScores {
    fn default() -> Self {
        Self {
            safeguarding: 0,
            overseas: 100,
            income: 0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("failed to read scoring config at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid scoring config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scoring config rejected: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl ScoringConfig {
    /// Parse a JSON override and validate the merged result.
    pub fn from_json_str(raw: &str) -> Result<Self, ScoringConfigError> {
        let config: ScoringConfig = serde_json::from_str(raw)?;
        config.validate().map_err(ScoringConfigError::Invalid)?;
        Ok(config)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ScoringConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ScoringConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Returns every problem at once rather than stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let weights = [
            ("weights.safeguarding", self.weights.safeguarding),
            ("weights.overseas", self.weights.overseas),
            ("weights.income", self.weights.income),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                errors.push(format!("{name}: must be a finite, non-negative number"));
            }
        }
        let total: f64 = weights.iter().map(|(_, weight)| weight).sum();
        if total.is_finite() && (total - 1.0).abs() > WEIGHT_TOLERANCE {
            errors.push(format!("weights: must sum to 1.0 (found {total:.4})"));
        }

        let warning_days = self.safeguarding.expiry_warning_days;
        if warning_days == 0 {
            errors.push("safeguarding.expiry_warning_days: must be at least 1".to_string());
        } else if warning_days > MAX_WARNING_DAYS {
            errors.push(format!(
                "safeguarding.expiry_warning_days: must not exceed {MAX_WARNING_DAYS} (found {warning_days})"
            ));
        }

        let levels = &self.levels;
        if levels.excellent > 100 {
            errors.push("levels.excellent: must not exceed 100".to_string());
        }
        if levels.excellent <= levels.good || levels.good <= levels.needs_attention {
            errors.push(format!(
                "levels: thresholds must be strictly descending (excellent {} > good {} > needs_attention {})",
                levels.excellent, levels.good, levels.needs_attention
            ));
        }

        let empty = [
            ("empty_scores.safeguarding", self.empty_scores.safeguarding),
            ("empty_scores.overseas", self.empty_scores.overseas),
            ("empty_scores.income", self.empty_scores.income),
        ];
        for (name, score) in empty {
            if score > 100 {
                errors.push(format!("{name}: must not exceed 100"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
