use super::clamp_score;
use super::config::{EmptyCollectionScores, IncomePolicy};
use super::domain::IncomeRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    pub total: usize,
    pub documented: usize,
    pub related_party: usize,
    pub related_party_documented: usize,
    pub gift_aid_eligible: usize,
    pub gift_aid_unclaimed: usize,
    pub total_amount: i64,
}

impl IncomeBreakdown {
    /// Related-party income is acceptable when none exists or all of it is evidenced.
    pub fn related_party_covered(&self) -> bool {
        self.related_party == self.related_party_documented
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeScore {
    pub score: u8,
    pub breakdown: IncomeBreakdown,
}

pub fn score_income(
    records: &[IncomeRecord],
    policy: &IncomePolicy,
    empty: &EmptyCollectionScores,
) -> IncomeScore {
    let mut breakdown = IncomeBreakdown {
        total: records.len(),
        ..IncomeBreakdown::default()
    };

    for record in records {
        breakdown.total_amount = breakdown.total_amount.saturating_add(record.amount);
        let documented = record.is_documented();
        if documented {
            breakdown.documented += 1;
        }
        if record.related_party {
            breakdown.related_party += 1;
            if documented {
                breakdown.related_party_documented += 1;
            }
        }
        if record.gift_aid_eligible {
            breakdown.gift_aid_eligible += 1;
        }
        if record.gift_aid_unclaimed() {
            breakdown.gift_aid_unclaimed += 1;
        }
    }

    if breakdown.total == 0 {
        return IncomeScore {
            score: empty.income.min(100),
            breakdown,
        };
    }

    let base = (f64::from(policy.documentation_weight) * breakdown.documented as f64
        / breakdown.total as f64)
        .round() as i64;
    let bonus = if breakdown.related_party_covered() {
        i64::from(policy.related_party_bonus)
    } else {
        0
    };
    let penalty = breakdown.gift_aid_unclaimed as i64 * i64::from(policy.gift_aid_unclaimed_penalty);

    IncomeScore {
        score: clamp_score(base + bonus - penalty),
        breakdown,
    }
}
