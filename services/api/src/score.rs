use crate::infra::{load_countries, read_snapshot, ScoringState};
use charity_compliance::config::AppConfig;
use charity_compliance::error::AppError;
use charity_compliance::scoring::{ComplianceDomain, ComplianceEngine, ComplianceScores};
use chrono::{DateTime, Utc};
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON snapshot with safeguarding, overseas, and income records
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Country reference CSV (overrides COMPLIANCE_COUNTRIES_CSV)
    #[arg(long)]
    pub(crate) countries: Option<PathBuf>,
    /// Evaluation instant as RFC 3339 (defaults to the snapshot's `now`, then the current time)
    #[arg(long, value_parser = crate::infra::parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Emit the full result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        countries,
        now,
        json,
    } = args;

    let config = AppConfig::load()?;
    let countries_path = countries.or(config.countries_csv);
    let state = ScoringState {
        engine: Arc::new(ComplianceEngine::new(config.scoring)),
        countries: Arc::new(load_countries(countries_path.as_deref())?),
    };

    let mut snapshot = read_snapshot(&input)?;
    if now.is_some() {
        snapshot.now = now;
    }
    let scores = state.score(&snapshot, Utc::now());

    if json {
        let rendered = serde_json::to_string_pretty(&scores).map_err(AppError::Output)?;
        println!("{rendered}");
    } else {
        print!("{}", render_summary(&scores));
    }

    Ok(())
}

fn render_summary(scores: &ComplianceScores) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Compliance score: {}/100 ({})",
        scores.overall,
        scores.level.label()
    );
    let _ = writeln!(out, "{}", scores.message);

    for domain in ComplianceDomain::ordered() {
        let _ = writeln!(out, "- {}: {}", domain.label(), scores.domain_score(domain));
    }

    if scores.findings.is_empty() {
        let _ = writeln!(out, "No outstanding findings.");
    } else {
        let _ = writeln!(out, "Findings:");
        for finding in &scores.findings {
            let _ = writeln!(
                out,
                "  [{}] {}: {}",
                finding.severity.label(),
                finding.domain.label(),
                finding.detail
            );
        }
    }

    out
}
