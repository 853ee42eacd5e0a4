use charity_compliance::error::AppError;
use charity_compliance::scoring::{
    ComplianceEngine, ComplianceInput, ComplianceScores, Country, CountryIndex, IncomeRecord,
    OverseasActivity, SafeguardingRecord,
};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engine and reference data shared by every scoring request.
#[derive(Clone, Default)]
pub(crate) struct ScoringState {
    pub(crate) engine: Arc<ComplianceEngine>,
    pub(crate) countries: Arc<CountryIndex>,
}

/// Already-fetched records for one organisation, as supplied by the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ComplianceSnapshot {
    #[serde(default)]
    pub(crate) safeguarding: Vec<SafeguardingRecord>,
    #[serde(default)]
    pub(crate) overseas: Vec<OverseasActivity>,
    #[serde(default)]
    pub(crate) income: Vec<IncomeRecord>,
    /// Entries here override the service's reference table for this request.
    #[serde(default)]
    pub(crate) countries: Vec<Country>,
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

impl ScoringState {
    pub(crate) fn score(&self, snapshot: &ComplianceSnapshot, fallback_now: DateTime<Utc>) -> ComplianceScores {
        let countries: Cow<'_, CountryIndex> = if snapshot.countries.is_empty() {
            Cow::Borrowed(self.countries.as_ref())
        } else {
            let mut merged = self.countries.as_ref().clone();
            merged.extend(snapshot.countries.iter().cloned());
            Cow::Owned(merged)
        };

        self.engine.score(ComplianceInput {
            safeguarding: &snapshot.safeguarding,
            overseas: &snapshot.overseas,
            income: &snapshot.income,
            countries: &countries,
            now: snapshot.now.unwrap_or(fallback_now),
        })
    }
}

pub(crate) fn load_countries(path: Option<&Path>) -> Result<CountryIndex, AppError> {
    match path {
        Some(path) => {
            let index = CountryIndex::from_csv_path(path)?;
            info!(path = %path.display(), countries = index.len(), "country reference table loaded");
            Ok(index)
        }
        None => Ok(CountryIndex::default()),
    }
}

pub(crate) fn read_snapshot(path: &Path) -> Result<ComplianceSnapshot, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn state() -> ScoringState {
        ScoringState {
            engine: Arc::new(ComplianceEngine::default()),
            countries: Arc::new(CountryIndex::new(&[Country {
                code: "AF".to_string(),
                high_risk: true,
                sanctioned: false,
            }])),
        }
    }

    fn activity(code: &str) -> OverseasActivity {
        OverseasActivity {
            country_code: code.to_string(),
            amount: 10_000,
            reporting_required: true,
            reported: false,
            sanctions_checked: false,
        }
    }

    #[test]
    fn parses_offsets_into_utc() {
        let parsed = parse_timestamp("2025-04-01T10:30:00+01:00").expect("parses");
        let expected = Utc
            .with_ymd_and_hms(2025, 4, 1, 9, 30, 0)
            .single()
            .expect("valid");
        assert_eq!(parsed, expected);
        assert!(parse_timestamp("2025-04-01").is_err());
    }

    #[test]
    fn snapshot_countries_override_reference_table() {
        let state = state();
        let now = Utc::now();
        let mut snapshot = ComplianceSnapshot {
            overseas: vec![activity("AF")],
            ..ComplianceSnapshot::default()
        };

        assert_eq!(state.score(&snapshot, now).overseas, 85);

        snapshot.countries = vec![Country {
            code: "af".to_string(),
            high_risk: false,
            sanctioned: false,
        }];
        assert_eq!(state.score(&snapshot, now).overseas, 100);
        assert!(state.countries.get("AF").expect("unchanged").high_risk);
    }

    #[test]
    fn snapshot_decodes_with_missing_collections() {
        let snapshot: ComplianceSnapshot =
            serde_json::from_str(r#"{ "now": "2025-04-01T00:00:00Z" }"#).expect("decodes");
        assert!(snapshot.safeguarding.is_empty());
        assert!(snapshot.now.is_some());
    }
}
