//! Compliance scoring engine.
//!
//! Reduces safeguarding, overseas, and income records to 0-100 domain scores,
//! blends them into an overall score, and classifies the result. Every call is
//! a pure function of its inputs: the caller supplies `now` and the country
//! reference table, and nothing is cached between calls.

mod aggregate;
mod config;
mod countries;
pub mod domain;
mod findings;
mod income;
mod level;
mod overseas;
mod safeguarding;

pub use aggregate::aggregate_scores;
pub use config::{
    DomainWeights, EmptyCollectionScores, IncomePolicy, LevelThresholds, OverseasPolicy,
    SafeguardingPolicy, ScoringConfig, ScoringConfigError,
};
pub use countries::{CountryImportError, CountryIndex};
pub use domain::{
    CheckType, ComplianceDomain, Country, FindingSeverity, IncomeRecord, OverseasActivity,
    SafeguardingRecord,
};
pub use findings::ComplianceFinding;
pub use income::{score_income, IncomeBreakdown, IncomeScore};
pub use level::ComplianceLevel;
pub use overseas::{score_overseas, OverseasBreakdown, OverseasScore};
pub use safeguarding::{score_safeguarding, SafeguardingBreakdown, SafeguardingScore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Borrowed inputs for a single scoring pass.
#[derive(Debug, Clone, Copy)]
pub struct ComplianceInput<'a> {
    pub safeguarding: &'a [SafeguardingRecord],
    pub overseas: &'a [OverseasActivity],
    pub income: &'a [IncomeRecord],
    pub countries: &'a CountryIndex,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceBreakdown {
    pub safeguarding: SafeguardingBreakdown,
    pub overseas: OverseasBreakdown,
    pub income: IncomeBreakdown,
}

/// Engine output shared by the dashboard and the annual report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceScores {
    pub overall: u8,
    pub safeguarding: u8,
    pub overseas: u8,
    pub income: u8,
    pub level: ComplianceLevel,
    pub message: String,
    pub breakdown: ComplianceBreakdown,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<ComplianceFinding>,
}

impl ComplianceScores {
    pub fn domain_score(&self, domain: ComplianceDomain) -> u8 {
        match domain {
            ComplianceDomain::Safeguarding => self.safeguarding,
            ComplianceDomain::Overseas => self.overseas,
            ComplianceDomain::Income => self.income,
        }
    }
}

/// Stateless scorer that applies a [`ScoringConfig`] to record collections.
#[derive(Debug, Clone, Default)]
pub struct ComplianceEngine {
    config: ScoringConfig,
}

impl ComplianceEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, input: ComplianceInput<'_>) -> ComplianceScores {
        let config = &self.config;

        let safeguarding = score_safeguarding(
            input.safeguarding,
            input.now,
            &config.safeguarding,
            &config.empty_scores,
        );
        let overseas = score_overseas(
            input.overseas,
            input.countries,
            &config.overseas,
            &config.empty_scores,
        );
        let income = score_income(input.income, &config.income, &config.empty_scores);

        let overall = aggregate_scores(
            safeguarding.score,
            overseas.score,
            income.score,
            &config.weights,
        );
        let level = ComplianceLevel::classify(overall, &config.levels);
        let findings = findings::collect_findings(
            &safeguarding.breakdown,
            &overseas.breakdown,
            &income.breakdown,
            config,
        );

        debug!(
            overall,
            safeguarding = safeguarding.score,
            overseas = overseas.score,
            income = income.score,
            level = level.key(),
            "compliance scores calculated"
        );

        ComplianceScores {
            overall,
            safeguarding: safeguarding.score,
            overseas: overseas.score,
            income: income.score,
            level,
            message: level.message().to_string(),
            breakdown: ComplianceBreakdown {
                safeguarding: safeguarding.breakdown,
                overseas: overseas.breakdown,
                income: income.breakdown,
            },
            findings,
        }
    }
}

/// Scores records with the default configuration.
pub fn calculate_compliance_scores(
    safeguarding: &[SafeguardingRecord],
    overseas: &[OverseasActivity],
    income: &[IncomeRecord],
    countries: &[Country],
    now: DateTime<Utc>,
) -> ComplianceScores {
    let countries = CountryIndex::new(countries);
    ComplianceEngine::default().score(ComplianceInput {
        safeguarding,
        overseas,
        income,
        countries: &countries,
        now,
    })
}

pub(crate) fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}
