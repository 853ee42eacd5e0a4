use super::clamp_score;
use super::config::{EmptyCollectionScores, SafeguardingPolicy};
use super::domain::SafeguardingRecord;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeguardingBreakdown {
    /// Active records assessed.
    pub total: usize,
    /// Records that have not lapsed, including those about to.
    pub valid: usize,
    pub expiring: usize,
    pub expired: usize,
    /// Inactive records skipped entirely.
    pub inactive: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeguardingScore {
    pub score: u8,
    pub breakdown: SafeguardingBreakdown,
}

pub fn score_safeguarding(
    records: &[SafeguardingRecord],
    now: DateTime<Utc>,
    policy: &SafeguardingPolicy,
    empty: &EmptyCollectionScores,
) -> SafeguardingScore {
    // Windows past the end of the calendar mean every unexpired check is expiring.
    let warning_horizon = now
        .checked_add_signed(Duration::days(i64::from(policy.expiry_warning_days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let mut breakdown = SafeguardingBreakdown::default();

    for record in records {
        if !record.active {
            breakdown.inactive += 1;
            continue;
        }

        breakdown.total += 1;
        let expires_at = record.expiry_date.and_time(NaiveTime::MIN).and_utc();
        if expires_at < now {
            breakdown.expired += 1;
        } else {
            if expires_at < warning_horizon {
                breakdown.expiring += 1;
            }
            breakdown.valid += 1;
        }
    }

    if breakdown.total == 0 {
        return SafeguardingScore {
            score: empty.safeguarding.min(100),
            breakdown,
        };
    }

    let penalty = breakdown.expiring as i64 * i64::from(policy.expiring_penalty)
        + breakdown.expired as i64 * i64::from(policy.expired_penalty);

    SafeguardingScore {
        score: clamp_score(100 - penalty),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::CheckType;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn record(expiry: NaiveDate, active: bool) -> SafeguardingRecord {
        SafeguardingRecord {
            person_id: "volunteer-1".to_string(),
            role_category: "youth_worker".to_string(),
            check_type: CheckType::Enhanced,
            expiry_date: expiry,
            active,
        }
    }

    fn score(records: &[SafeguardingRecord]) -> SafeguardingScore {
        score_safeguarding(
            records,
            now(),
            &SafeguardingPolicy::default(),
            &EmptyCollectionScores::default(),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn empty_collection_is_a_gap() {
        let result = score(&[]);
        assert_eq!(result.score, 0);
        assert_eq!(result.breakdown, SafeguardingBreakdown::default());
    }

    #[test]
    fn inactive_records_are_ignored() {
        let result = score(&[record(date(2020, 1, 1), false), record(date(2026, 1, 1), true)]);

        assert_eq!(result.score, 100);
        assert_eq!(result.breakdown.total, 1);
        assert_eq!(result.breakdown.inactive, 1);
        assert_eq!(result.breakdown.expired, 0);
    }

    #[test]
    fn only_inactive_records_scores_as_empty() {
        let result = score(&[record(date(2020, 1, 1), false)]);
        assert_eq!(result.score, 0);
        assert_eq!(result.breakdown.inactive, 1);
    }

    #[test]
    fn expiry_on_now_is_expiring_not_expired() {
        let result = score(&[record(date(2025, 3, 1), true)]);

        assert_eq!(result.breakdown.expired, 0);
        assert_eq!(result.breakdown.expiring, 1);
        assert_eq!(result.breakdown.valid, 1);
        assert_eq!(result.score, 90);
    }

    #[test]
    fn warning_window_end_is_exclusive() {
        let inside = score(&[record(date(2025, 3, 30), true)]);
        let boundary = score(&[record(date(2025, 3, 31), true)]);

        assert_eq!(inside.breakdown.expiring, 1);
        assert_eq!(boundary.breakdown.expiring, 0);
        assert_eq!(boundary.score, 100);
    }

    #[test]
    fn score_floors_at_zero() {
        let records: Vec<_> = (0..8).map(|_| record(date(2024, 1, 1), true)).collect();
        let result = score(&records);

        assert_eq!(result.breakdown.expired, 8);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn custom_window_changes_classification() {
        let policy = SafeguardingPolicy {
            expiry_warning_days: 90,
            ..SafeguardingPolicy::default()
        };
        let result = score_safeguarding(
            &[record(date(2025, 5, 1), true)],
            now(),
            &policy,
            &EmptyCollectionScores::default(),
        );

        assert_eq!(result.breakdown.expiring, 1);
        assert_eq!(result.score, 90);
    }

    #[test]
    fn oversized_window_does_not_overflow() {
        let policy = SafeguardingPolicy {
            expiry_warning_days: u32::MAX,
            ..SafeguardingPolicy::default()
        };
        let result = score_safeguarding(
            &[record(date(2090, 1, 1), true), record(date(2024, 1, 1), true)],
            now(),
            &policy,
            &EmptyCollectionScores::default(),
        );

        assert_eq!(result.breakdown.expiring, 1);
        assert_eq!(result.breakdown.expired, 1);
        assert_eq!(result.score, 70);
    }
}
