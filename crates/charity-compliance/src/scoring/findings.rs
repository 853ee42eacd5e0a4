use super::config::ScoringConfig;
use super::domain::{ComplianceDomain, FindingSeverity};
use super::income::IncomeBreakdown;
use super::overseas::OverseasBreakdown;
use super::safeguarding::SafeguardingBreakdown;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceFinding {
    pub domain: ComplianceDomain,
    pub severity: FindingSeverity,
    pub detail: String,
}

impl ComplianceFinding {
    fn new(domain: ComplianceDomain, severity: FindingSeverity, detail: String) -> Self {
        Self {
            domain,
            severity,
            detail,
        }
    }
}

pub(crate) fn collect_findings(
    safeguarding: &SafeguardingBreakdown,
    overseas: &OverseasBreakdown,
    income: &IncomeBreakdown,
    config: &ScoringConfig,
) -> Vec<ComplianceFinding> {
    use ComplianceDomain::{Income, Overseas, Safeguarding};
    use FindingSeverity::{Critical, Notice, Warning};

    let mut findings = Vec::new();

    if safeguarding.total == 0 {
        findings.push(ComplianceFinding::new(
            Safeguarding,
            Critical,
            "No active safeguarding checks are on record".to_string(),
        ));
    }
    if safeguarding.expired > 0 {
        findings.push(ComplianceFinding::new(
            Safeguarding,
            Critical,
            format!(
                "{} safeguarding {} expired",
                safeguarding.expired,
                plural(safeguarding.expired, "check has", "checks have")
            ),
        ));
    }
    if safeguarding.expiring > 0 {
        findings.push(ComplianceFinding::new(
            Safeguarding,
            Warning,
            format!(
                "{} safeguarding {} within {} days",
                safeguarding.expiring,
                plural(safeguarding.expiring, "check expires", "checks expire"),
                config.safeguarding.expiry_warning_days
            ),
        ));
    }

    if overseas.unreported_activities > 0 {
        findings.push(ComplianceFinding::new(
            Overseas,
            Critical,
            format!(
                "{} high-risk overseas {} not been reported to the Commission",
                overseas.unreported_activities,
                plural(overseas.unreported_activities, "activity has", "activities have")
            ),
        ));
    }
    if overseas.sanctions_checks_required > 0 {
        findings.push(ComplianceFinding::new(
            Overseas,
            Critical,
            format!(
                "{} overseas {} in sanctioned jurisdictions without a sanctions check",
                overseas.sanctions_checks_required,
                plural(overseas.sanctions_checks_required, "activity is", "activities are")
            ),
        ));
    }
    if overseas.unknown_countries > 0 {
        findings.push(ComplianceFinding::new(
            Overseas,
            Notice,
            format!(
                "{} overseas {} a country missing from the reference table",
                overseas.unknown_countries,
                plural(overseas.unknown_countries, "activity references", "activities reference")
            ),
        ));
    }

    if income.total == 0 {
        findings.push(ComplianceFinding::new(
            Income,
            Warning,
            "No income records are on file".to_string(),
        ));
    } else if income.documented < income.total {
        let missing = income.total - income.documented;
        findings.push(ComplianceFinding::new(
            Income,
            Warning,
            format!(
                "{} income {} supporting documentation",
                missing,
                plural(missing, "record lacks", "records lack")
            ),
        ));
    }
    if !income.related_party_covered() {
        let missing = income.related_party - income.related_party_documented;
        findings.push(ComplianceFinding::new(
            Income,
            Critical,
            format!(
                "{} related-party income {} undocumented",
                missing,
                plural(missing, "record is", "records are")
            ),
        ));
    }
    if income.gift_aid_unclaimed > 0 {
        findings.push(ComplianceFinding::new(
            Income,
            Notice,
            format!(
                "{} Gift Aid eligible {} not been claimed",
                income.gift_aid_unclaimed,
                plural(income.gift_aid_unclaimed, "donation has", "donations have")
            ),
        ));
    }

    findings
}

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_breakdowns_produce_no_findings() {
        let safeguarding = SafeguardingBreakdown {
            total: 3,
            valid: 3,
            ..SafeguardingBreakdown::default()
        };
        let income = IncomeBreakdown {
            total: 2,
            documented: 2,
            ..IncomeBreakdown::default()
        };

        let findings = collect_findings(
            &safeguarding,
            &OverseasBreakdown::default(),
            &income,
            &ScoringConfig::default(),
        );
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }

    #[test]
    fn empty_inputs_flag_missing_evidence() {
        let findings = collect_findings(
            &SafeguardingBreakdown::default(),
            &OverseasBreakdown::default(),
            &IncomeBreakdown::default(),
            &ScoringConfig::default(),
        );

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].domain, ComplianceDomain::Safeguarding);
        assert_eq!(findings[0].severity, FindingSeverity::Critical);
        assert_eq!(findings[1].domain, ComplianceDomain::Income);
        assert_eq!(findings[1].detail, "No income records are on file");
    }

    #[test]
    fn details_use_counts_and_window() {
        let safeguarding = SafeguardingBreakdown {
            total: 4,
            valid: 3,
            expiring: 2,
            expired: 1,
            inactive: 0,
        };
        let income = IncomeBreakdown {
            total: 1,
            documented: 1,
            ..IncomeBreakdown::default()
        };

        let findings = collect_findings(
            &safeguarding,
            &OverseasBreakdown::default(),
            &income,
            &ScoringConfig::default(),
        );

        let details: Vec<_> = findings.iter().map(|f| f.detail.as_str()).collect();
        assert_eq!(
            details,
            vec![
                "1 safeguarding check has expired",
                "2 safeguarding checks expire within 30 days",
            ]
        );
    }
}
