use super::clamp_score;
use super::config::{EmptyCollectionScores, OverseasPolicy};
use super::countries::CountryIndex;
use super::domain::OverseasActivity;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverseasBreakdown {
    pub total_activities: usize,
    pub high_risk_activities: usize,
    pub unreported_activities: usize,
    pub sanctions_checks_required: usize,
    /// Activities whose country code is missing from the reference table.
    pub unknown_countries: usize,
    pub total_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverseasScore {
    pub score: u8,
    pub breakdown: OverseasBreakdown,
}

pub fn score_overseas(
    activities: &[OverseasActivity],
    countries: &CountryIndex,
    policy: &OverseasPolicy,
    empty: &EmptyCollectionScores,
) -> OverseasScore {
    let mut breakdown = OverseasBreakdown {
        total_activities: activities.len(),
        ..OverseasBreakdown::default()
    };

    for activity in activities {
        breakdown.total_amount = breakdown.total_amount.saturating_add(activity.amount);

        let Some(country) = countries.get(&activity.country_code) else {
            debug!(
                country_code = %activity.country_code,
                "overseas activity references unknown country; treating as low risk"
            );
            breakdown.unknown_countries += 1;
            continue;
        };

        if country.high_risk {
            breakdown.high_risk_activities += 1;
            if activity.reporting_required && !activity.reported {
                breakdown.unreported_activities += 1;
            }
        }

        if country.sanctioned && !activity.sanctions_checked {
            breakdown.sanctions_checks_required += 1;
        }
    }

    if activities.is_empty() {
        return OverseasScore {
            score: empty.overseas.min(100),
            breakdown,
        };
    }

    let penalty = breakdown.unreported_activities as i64 * i64::from(policy.unreported_penalty)
        + breakdown.sanctions_checks_required as i64 * i64::from(policy.sanctions_check_penalty);

    OverseasScore {
        score: clamp_score(100 - penalty),
        breakdown,
    }
}
